//! Carousel tuning constants
//!
//! Shared defaults for padding depth, gesture thresholds and timing. Tuning
//! should happen here so every carousel instance updates consistently; the
//! values are overridable per instance through [`crate::CarouselConfig`].

/// Clone padding around the home region.
pub mod padding {
    /// Full copies of the slide set placed before the originals.
    pub const LEADING_CLONE_SETS: usize = 2;
    /// Full copies of the slide set placed after the originals.
    pub const TRAILING_CLONE_SETS: usize = 2;
    /// Smallest accepted clone-set depth on either side.
    pub const MIN_CLONE_SETS: usize = 1;
}

/// Drag/flick commit heuristics.
pub mod gesture {
    /// Release distance (px) beyond which a drag always commits.
    pub const DRAG_THRESHOLD_PX: f32 = 50.0;
    /// Release velocity (px/ms) above which a short drag counts as a flick.
    pub const FLICK_VELOCITY_PX_PER_MS: f32 = 0.25;
    /// Minimum distance (px) a flick must travel to commit.
    pub const FLICK_MIN_DISTANCE_PX: f32 = 10.0;
}

/// Track animation defaults.
pub mod transition {
    /// Default slide transition duration (ms).
    pub const DURATION_MS: u64 = 300;
    /// Spacing between adjacent slides (px).
    pub const GAP_PX: f32 = 0.0;
}

/// Autoplay defaults.
pub mod autoplay {
    /// Default delay between automatic advances (ms).
    pub const INTERVAL_MS: u64 = 5_000;
    /// Shortest interval accepted; anything below is treated as a typo.
    pub const MIN_INTERVAL_MS: u64 = 100;
}
