//! Track geometry: cumulative slide offsets and target translations
//!
//! Everything here is pure arithmetic over measured widths. The engine keeps
//! one [`TrackGeometry`] per successful measurement pass and drops it when
//! measurements become unavailable.

use crate::registry::SlideRegistry;

/// Where the current slide sits inside the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Current slide's leading edge at the viewport's leading edge.
    #[default]
    LeftAligned,
    /// Current slide's midpoint at the viewport's midpoint.
    Centered,
}

/// Cumulative start positions for every entry of the padded sequence.
///
/// Invariant: `offset(i + 1) == offset(i) + width(i) + gap`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTable {
    offsets: Vec<f32>,
    widths: Vec<f32>,
    gap: f32,
}

/// Start position of each slide given its width and a fixed gap.
pub fn compute_offsets(widths: &[f32], gap_px: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut cursor = 0.0_f32;
    for width in widths {
        offsets.push(cursor);
        cursor += width + gap_px;
    }
    offsets
}

/// Track translation that brings `dom_index` into place.
///
/// Returns `None` when the index is outside the table.
pub fn target_offset_for(
    dom_index: usize,
    mode: LayoutMode,
    viewport_width: f32,
    offsets: &[f32],
    widths: &[f32],
) -> Option<f32> {
    let start = *offsets.get(dom_index)?;
    match mode {
        LayoutMode::LeftAligned => Some(-start),
        LayoutMode::Centered => {
            let width = *widths.get(dom_index)?;
            Some(viewport_width / 2.0 - (start + width / 2.0))
        }
    }
}

impl OffsetTable {
    pub fn compute(widths: Vec<f32>, gap_px: f32) -> Self {
        Self {
            offsets: compute_offsets(&widths, gap_px),
            widths,
            gap: gap_px,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offset(&self, index: usize) -> Option<f32> {
        self.offsets.get(index).copied()
    }

    pub fn width(&self, index: usize) -> Option<f32> {
        self.widths.get(index).copied()
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }
}

/// Measured layout for one slide set: the offset table plus the padding
/// facts needed to translate between padded and original indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    table: OffsetTable,
    mode: LayoutMode,
    viewport_width: f32,
    home_start: usize,
    slide_count: usize,
}

impl TrackGeometry {
    /// Build geometry from per-entry widths. `widths` must cover the whole
    /// padded sequence of `registry`.
    pub fn new<S>(
        registry: &SlideRegistry<S>,
        widths: Vec<f32>,
        gap_px: f32,
        mode: LayoutMode,
        viewport_width: f32,
    ) -> Option<Self> {
        if registry.is_empty() || widths.len() != registry.padded_len() {
            return None;
        }
        Some(Self {
            table: OffsetTable::compute(widths, gap_px),
            mode,
            viewport_width,
            home_start: registry.offset_to_first_actual(),
            slide_count: registry.len(),
        })
    }

    pub fn table(&self) -> &OffsetTable {
        &self.table
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Number of entries in the padded sequence.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// First index of the home region.
    pub fn home_start(&self) -> usize {
        self.home_start
    }

    pub fn contains(&self, dom_index: usize) -> bool {
        dom_index < self.len()
    }

    pub fn is_home(&self, dom_index: usize) -> bool {
        dom_index >= self.home_start && dom_index < self.home_start + self.slide_count
    }

    /// Logical slide shown at `dom_index`.
    pub fn original_for(&self, dom_index: usize) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        let n = self.slide_count as isize;
        let rel = dom_index as isize - self.home_start as isize;
        rel.rem_euclid(n) as usize
    }

    /// Home-region index that renders the same slide as `dom_index`.
    pub fn home_equivalent(&self, dom_index: usize) -> usize {
        self.home_start + self.original_for(dom_index)
    }

    pub fn home_index(&self, original_index: usize) -> usize {
        self.home_start + original_index
    }

    pub fn target_offset(&self, dom_index: usize) -> Option<f32> {
        target_offset_for(
            dom_index,
            self.mode,
            self.viewport_width,
            &self.table.offsets,
            &self.table.widths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_width_and_gap() {
        let widths = [100.0, 80.0, 120.0, 60.0];
        let offsets = compute_offsets(&widths, 10.0);
        assert_eq!(offsets, vec![0.0, 110.0, 200.0, 330.0]);
        for i in 0..widths.len() - 1 {
            assert_eq!(offsets[i + 1] - offsets[i], widths[i] + 10.0);
        }
    }

    #[test]
    fn empty_widths_give_empty_table() {
        let table = OffsetTable::compute(Vec::new(), 8.0);
        assert!(table.is_empty());
        assert_eq!(table.offset(0), None);
    }

    #[test]
    fn left_aligned_target_is_negated_start() {
        let widths = [200.0; 3];
        let offsets = compute_offsets(&widths, 0.0);
        assert_eq!(
            target_offset_for(2, LayoutMode::LeftAligned, 500.0, &offsets, &widths),
            Some(-400.0)
        );
    }

    #[test]
    fn centered_target_puts_midpoint_in_middle() {
        let widths = [200.0, 100.0, 200.0];
        let offsets = compute_offsets(&widths, 20.0);
        // slide 1 starts at 220 and is 100 wide -> midpoint 270
        assert_eq!(
            target_offset_for(1, LayoutMode::Centered, 600.0, &offsets, &widths),
            Some(300.0 - 270.0)
        );
    }

    #[test]
    fn target_outside_table_is_none() {
        let widths = [10.0];
        let offsets = compute_offsets(&widths, 0.0);
        assert_eq!(
            target_offset_for(1, LayoutMode::LeftAligned, 0.0, &offsets, &widths),
            None
        );
    }

    #[test]
    fn geometry_maps_clone_regions_home() {
        let mut registry = SlideRegistry::new(2, 2);
        registry.set_slides(vec!['a', 'b', 'c', 'd', 'e']);
        let widths = vec![100.0; registry.padded_len()];
        let geo = TrackGeometry::new(&registry, widths, 0.0, LayoutMode::LeftAligned, 300.0)
            .expect("geometry");

        assert_eq!(geo.len(), 25);
        assert_eq!(geo.home_start(), 10);
        assert!(geo.is_home(10) && geo.is_home(14));
        assert!(!geo.is_home(9) && !geo.is_home(15));
        assert_eq!(geo.home_equivalent(15), 10);
        assert_eq!(geo.home_equivalent(9), 14);
        assert_eq!(geo.home_equivalent(0), 10);
        assert_eq!(geo.home_equivalent(24), 14);
        assert_eq!(geo.original_for(22), 2);
    }

    #[test]
    fn geometry_rejects_mismatched_widths() {
        let mut registry = SlideRegistry::new(2, 2);
        registry.set_slides(vec![1, 2, 3]);
        assert!(
            TrackGeometry::new(&registry, vec![50.0; 3], 0.0, LayoutMode::Centered, 100.0)
                .is_none()
        );
    }
}
