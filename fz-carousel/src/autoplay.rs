//! Autoplay scheduling
//!
//! The scheduler only decides *whether* and *when* an advance should be
//! scheduled; the engine owns the host timer. Each schedule mints a fresh
//! [`AutoplayToken`], and a fired timer is honoured only if its token is the
//! one still pending.

use std::time::Duration;

use crate::host::AutoplayToken;

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    /// Autoplay is configured on.
    enabled: bool,
    /// The advance loop is live (cleared by user interaction).
    running: bool,
    /// Temporarily held (hover, hidden page); does not clear `running`.
    paused: bool,
    interval: Duration,
    next_token: u64,
    pending: Option<AutoplayToken>,
}

impl AutoplayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            enabled: false,
            running: false,
            paused: false,
            interval,
            next_token: 0,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pending(&self) -> Option<AutoplayToken> {
        self.pending
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Turn autoplay on and start the loop.
    pub fn enable(&mut self, interval: Duration) {
        self.enabled = true;
        self.running = true;
        self.interval = interval;
    }

    /// Turn autoplay off. Returns the pending token that should be cancelled.
    pub fn disable(&mut self) -> Option<AutoplayToken> {
        self.enabled = false;
        self.running = false;
        self.pending.take()
    }

    /// User interaction: stop the loop until an explicit resume.
    pub fn stop(&mut self) -> Option<AutoplayToken> {
        self.running = false;
        self.pending.take()
    }

    /// Restart the loop after an interaction, if autoplay is enabled.
    pub fn resume(&mut self) -> bool {
        self.running = self.enabled;
        self.running
    }

    /// Hold or release the loop without forgetting that it runs.
    pub fn set_paused(&mut self, paused: bool) -> Option<AutoplayToken> {
        self.paused = paused;
        if paused { self.pending.take() } else { None }
    }

    /// Mint a timer if the loop should tick. `can_advance` is the engine's
    /// own readiness (idle, more than one slide, measured).
    pub fn schedule(&mut self, can_advance: bool) -> Option<(Duration, AutoplayToken)> {
        if !(self.running && !self.paused && can_advance) {
            return None;
        }
        self.next_token += 1;
        let token = AutoplayToken(self.next_token);
        self.pending = Some(token);
        Some((self.interval, token))
    }

    /// Consume a fired timer. `false` for stale or cancelled tokens.
    pub fn fire(&mut self, token: AutoplayToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.running && !self.paused
    }
}
