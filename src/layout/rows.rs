use crate::layout::geometry::ScreenRect;

/// Space taken by one committed placement
#[derive(Debug, Clone, Copy)]
struct Footprint {
    label: ScreenRect,
    symbol: ScreenRect,
}

impl Footprint {
    fn blocks(&self, rect: &ScreenRect) -> bool {
        rect.intersects(&self.label) || rect.intersects(&self.symbol)
    }

    fn top(&self) -> f64 {
        match (self.label.is_empty(), self.symbol.is_empty()) {
            (false, false) => self.label.top().min(self.symbol.top()),
            (true, false) => self.symbol.top(),
            _ => self.label.top(),
        }
    }

    fn bottom(&self) -> f64 {
        match (self.label.is_empty(), self.symbol.is_empty()) {
            (false, false) => self.label.bottom().max(self.symbol.bottom()),
            (true, false) => self.symbol.bottom(),
            _ => self.label.bottom(),
        }
    }
}

/// Horizontal screen bands of committed placements.
///
/// A placement is filed under every band it covers plus one band above and
/// below, so a collision test only has to look at the bands the candidate
/// itself covers. Rebuilt every frame.
#[derive(Debug, Default)]
pub struct RowSections {
    rows: Vec<Vec<Footprint>>,
    row_height: f64,
}

impl RowSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all bands and size them for a screen of `screen_height`
    pub fn reset(&mut self, screen_height: f64, row_height: f64) {
        debug_assert!(row_height > 0.0, "row height must be positive");
        let count = (screen_height.max(0.0) / row_height) as usize + 1;
        self.rows.iter_mut().for_each(Vec::clear);
        self.rows.resize_with(count, Vec::new);
        self.row_height = row_height;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Band index for screen y; off-screen positions fall into the edge bands
    fn row_of(&self, y: f64) -> usize {
        let last = self.rows.len().saturating_sub(1);
        let idx = if y <= 0.0 {
            0
        } else {
            ((y / self.row_height) as usize).min(last)
        };
        debug_assert!(idx < self.rows.len(), "row {idx} outside {} sections", self.rows.len());
        idx
    }

    /// True when `rect` overlaps no committed label or symbol
    pub fn has_room(&self, rect: &ScreenRect) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let first = self.row_of(rect.top());
        let last = self.row_of(rect.bottom());
        self.rows[first..=last]
            .iter()
            .all(|row| row.iter().all(|placed| !placed.blocks(rect)))
    }

    /// Commit a placement so later candidates collide with it
    pub fn insert(&mut self, label: ScreenRect, symbol: ScreenRect) {
        if self.rows.is_empty() {
            return;
        }
        let footprint = Footprint { label, symbol };
        let first = self.row_of(footprint.top()).saturating_sub(1);
        let last = (self.row_of(footprint.bottom()) + 1).min(self.rows.len() - 1);
        for row in &mut self.rows[first..=last] {
            row.push(footprint);
        }
    }

    /// Committed placements filed under band `row`
    pub fn occupancy(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SYMBOL: ScreenRect = ScreenRect::new(0.0, 0.0, 0.0, 0.0);

    #[test]
    fn test_section_count() {
        let mut rows = RowSections::new();
        rows.reset(100.0, 10.0);
        assert_eq!(rows.row_count(), 11);
        rows.reset(95.0, 10.0);
        assert_eq!(rows.row_count(), 10);
    }

    #[test]
    fn test_insert_files_adjacent_bands() {
        let mut rows = RowSections::new();
        rows.reset(100.0, 10.0);
        rows.insert(ScreenRect::new(0.0, 42.0, 20.0, 6.0), NO_SYMBOL);
        assert_eq!(rows.occupancy(2), 0);
        assert_eq!(rows.occupancy(3), 1);
        assert_eq!(rows.occupancy(4), 1);
        assert_eq!(rows.occupancy(5), 1);
        assert_eq!(rows.occupancy(6), 0);
    }

    #[test]
    fn test_collision_across_band_boundary() {
        let mut rows = RowSections::new();
        rows.reset(100.0, 10.0);
        rows.insert(ScreenRect::new(0.0, 18.0, 20.0, 10.0), NO_SYMBOL);
        assert!(!rows.has_room(&ScreenRect::new(5.0, 25.0, 10.0, 10.0)));
        assert!(rows.has_room(&ScreenRect::new(5.0, 28.0, 10.0, 10.0)));
        assert!(rows.has_room(&ScreenRect::new(20.0, 18.0, 10.0, 10.0)));
    }

    #[test]
    fn test_symbol_blocks_labels() {
        let mut rows = RowSections::new();
        rows.reset(100.0, 10.0);
        rows.insert(ScreenRect::new(50.0, 50.0, 20.0, 8.0), ScreenRect::new(40.0, 50.0, 8.0, 8.0));
        assert!(!rows.has_room(&ScreenRect::new(30.0, 52.0, 12.0, 6.0)));
    }

    #[test]
    fn test_offscreen_rects_use_edge_bands() {
        let mut rows = RowSections::new();
        rows.reset(50.0, 10.0);
        rows.insert(ScreenRect::new(0.0, -30.0, 10.0, 8.0), NO_SYMBOL);
        assert!(!rows.has_room(&ScreenRect::new(0.0, -28.0, 10.0, 8.0)));
        rows.insert(ScreenRect::new(0.0, 200.0, 10.0, 8.0), NO_SYMBOL);
        assert!(!rows.has_room(&ScreenRect::new(5.0, 204.0, 10.0, 8.0)));
    }

    #[test]
    fn test_reset_clears() {
        let mut rows = RowSections::new();
        rows.reset(100.0, 10.0);
        rows.insert(ScreenRect::new(0.0, 0.0, 10.0, 10.0), NO_SYMBOL);
        rows.reset(100.0, 10.0);
        assert!(rows.has_room(&ScreenRect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
