//! Slide registry and padded sequence
//!
//! Holds the caller's logical slides and derives the padded sequence the
//! track is laid out from: `leading` full copies, the originals (the home
//! region), then `trailing` full copies. Clones carry no state of their own;
//! the whole sequence is rebuilt whenever the slide set or depth changes.

use std::fmt;

/// Which copy of the slide set a padded entry belongs to.
///
/// Sets are numbered outward from the home region, so `Leading(1)` sits
/// directly before the originals and `Trailing(1)` directly after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloneTag {
    /// Copy placed before the home region.
    Leading(usize),
    /// Copy placed after the home region.
    Trailing(usize),
}

impl fmt::Display for CloneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading(set) => write!(f, "leading-{set}"),
            Self::Trailing(set) => write!(f, "trailing-{set}"),
        }
    }
}

/// One position of the padded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaddedEntry {
    /// Index of the slide this entry renders.
    pub original_index: usize,
    /// `None` for the real instance in the home region.
    pub clone: Option<CloneTag>,
}

impl PaddedEntry {
    /// Whether this entry is a copy outside the home region.
    pub fn is_clone(&self) -> bool {
        self.clone.is_some()
    }
}

/// Logical slides plus the padded sequence derived from them.
#[derive(Debug, Clone)]
pub struct SlideRegistry<S> {
    slides: Vec<S>,
    leading_sets: usize,
    trailing_sets: usize,
    padded: Vec<PaddedEntry>,
}

impl<S> Default for SlideRegistry<S> {
    fn default() -> Self {
        use crate::constants::padding;
        Self::new(padding::LEADING_CLONE_SETS, padding::TRAILING_CLONE_SETS)
    }
}

impl<S> SlideRegistry<S> {
    /// Empty registry padding with the given clone-set depths.
    pub fn new(leading_sets: usize, trailing_sets: usize) -> Self {
        Self {
            slides: Vec::new(),
            leading_sets,
            trailing_sets,
            padded: Vec::new(),
        }
    }

    /// Replace the logical slide list and rebuild the padded sequence.
    pub fn set_slides(&mut self, slides: Vec<S>) {
        self.slides = slides;
        self.rebuild();
    }

    /// Change clone-set depth. Returns `true` when the padded sequence changed.
    pub fn set_clone_sets(&mut self, leading: usize, trailing: usize) -> bool {
        if leading == self.leading_sets && trailing == self.trailing_sets {
            return false;
        }
        self.leading_sets = leading;
        self.trailing_sets = trailing;
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        let n = self.slides.len();
        self.padded.clear();
        if n == 0 {
            return;
        }
        if n == 1 {
            // A single slide cannot wrap.
            self.padded.push(PaddedEntry {
                original_index: 0,
                clone: None,
            });
            return;
        }

        self.padded
            .reserve((self.leading_sets + self.trailing_sets + 1) * n);
        for set in (1..=self.leading_sets).rev() {
            self.push_set(Some(CloneTag::Leading(set)));
        }
        self.push_set(None);
        for set in 1..=self.trailing_sets {
            self.push_set(Some(CloneTag::Trailing(set)));
        }
    }

    fn push_set(&mut self, clone: Option<CloneTag>) {
        let n = self.slides.len();
        self.padded.extend((0..n).map(|original_index| PaddedEntry {
            original_index,
            clone,
        }));
    }

    /// Number of logical slides (`N`).
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// No slides registered.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Whether the slide set is large enough to loop.
    pub fn loops(&self) -> bool {
        self.slides.len() > 1
    }

    /// Clone sets placed before the originals.
    pub fn leading_sets(&self) -> usize {
        self.leading_sets
    }

    /// Clone sets placed after the originals.
    pub fn trailing_sets(&self) -> usize {
        self.trailing_sets
    }

    /// Length of the padded sequence.
    pub fn padded_len(&self) -> usize {
        self.padded.len()
    }

    /// First index of the home region (`leading_sets * N` when looping).
    pub fn offset_to_first_actual(&self) -> usize {
        if self.loops() {
            self.leading_sets * self.slides.len()
        } else {
            0
        }
    }

    /// The whole padded sequence, in track order.
    pub fn padded(&self) -> &[PaddedEntry] {
        &self.padded
    }

    /// Entry at `dom_index` of the padded sequence.
    pub fn entry(&self, dom_index: usize) -> Option<PaddedEntry> {
        self.padded.get(dom_index).copied()
    }

    /// Logical slides in caller order.
    pub fn slides(&self) -> &[S] {
        &self.slides
    }

    /// Padded entries paired with the slide each one renders.
    pub fn padded_slides(&self) -> impl Iterator<Item = (PaddedEntry, &S)> + '_ {
        self.padded
            .iter()
            .map(|entry| (*entry, &self.slides[entry.original_index]))
    }
}
