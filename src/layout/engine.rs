use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::{CategoryFilter, LayoutConfig};
use crate::geo::GeoBox;
use crate::index::{select_candidates, CandidateCache};
use crate::layout::geometry::{ScreenPoint, ScreenRect};
use crate::layout::registry::{VisiblePlacemark, VisibleRegistry};
use crate::layout::rows::RowSections;
use crate::map::Viewport;
use crate::placemark::{
    LabelAlignment, MonospaceMetrics, Placemark, PlacemarkId, PlacemarkStore, PlacemarkStyle, Selection,
    TextMeasurer,
};

/// Counters of the most recent frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Least important popularity rank admitted
    pub threshold: u8,
    /// Deepest tile level queried
    pub level: u8,
    /// Selected placemarks plus popularity candidates considered
    pub candidates: usize,
    pub placed: usize,
}

/// Per-frame state shared by both placement passes
struct FrameContext<'a, V: Viewport + ?Sized> {
    viewport: &'a V,
    visible: GeoBox,
    width: f64,
    height: f64,
    radius: f64,
}

/// Placemark visibility and label layout engine.
///
/// Each call to [`layout`](Self::layout) places the selected placemarks
/// first, then popularity candidates in rank order, until the on-screen
/// cap is reached. Labels never overlap each other or committed symbols.
pub struct PlacemarkLayout<M = MonospaceMetrics> {
    config: LayoutConfig,
    measurer: M,
    cache: CandidateCache,
    registry: VisibleRegistry,
    rows: RowSections,
    draw_order: Vec<PlacemarkId>,
    max_label_height: f64,
    rebuild_requested: bool,
    style_reset_requested: bool,
    store_generation: Option<u64>,
    selection_generation: Option<u64>,
    stats: FrameStats,
}

impl PlacemarkLayout<MonospaceMetrics> {
    pub fn with_config(config: LayoutConfig) -> Self {
        Self::new(config, MonospaceMetrics::default())
    }
}

impl Default for PlacemarkLayout<MonospaceMetrics> {
    fn default() -> Self {
        Self::with_config(LayoutConfig::default())
    }
}

impl<M: TextMeasurer> PlacemarkLayout<M> {
    pub fn new(config: LayoutConfig, measurer: M) -> Self {
        Self {
            config,
            measurer,
            cache: CandidateCache::new(),
            registry: VisibleRegistry::new(),
            rows: RowSections::new(),
            draw_order: Vec::new(),
            max_label_height: 0.0,
            rebuild_requested: true,
            style_reset_requested: true,
            store_generation: None,
            selection_generation: None,
            stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn categories(&self) -> CategoryFilter {
        self.config.categories
    }

    /// Category toggles take effect on the next frame
    pub fn set_categories(&mut self, categories: CategoryFilter) {
        self.config.categories = categories;
    }

    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.config.max_visible = max_visible;
    }

    /// Placemark collection or selection changed. The rebuild happens at
    /// the start of the next layout pass, never during one.
    pub fn notify_changed(&mut self) {
        self.rebuild_requested = true;
    }

    /// Drop measured label heights and all layout records
    pub fn request_style_reset(&mut self) {
        self.style_reset_requested = true;
    }

    /// Compute the draw list for `viewport`, highest priority first
    pub fn layout<V: Viewport + ?Sized>(
        &mut self,
        store: &PlacemarkStore,
        selection: &Selection,
        viewport: &V,
    ) -> Vec<&VisiblePlacemark> {
        self.sync(store, selection);

        self.draw_order.clear();
        self.stats = FrameStats::default();

        let frame = FrameContext {
            viewport,
            visible: viewport.visible_box(),
            width: viewport.width() as f64,
            height: viewport.height() as f64,
            radius: viewport.radius(),
        };

        if frame.width <= 0.0 || frame.height <= 0.0 || self.max_label_height <= 0.0 || frame.visible.is_empty() {
            self.registry.clear();
            return Vec::new();
        }

        self.rows.reset(frame.height, self.max_label_height);
        let cap = self.config.max_visible;

        // Selected placemarks first, regardless of popularity
        for &id in selection.ids() {
            if self.draw_order.len() >= cap {
                break;
            }
            let Some(placemark) = store.get(id) else {
                continue;
            };
            self.stats.candidates += 1;
            self.try_place(id, placemark, &frame);
        }

        let candidates = select_candidates(
            &self.cache,
            store,
            self.config.namespace,
            &frame.visible,
            frame.radius,
            &self.config.popularity,
        );
        self.stats.threshold = candidates.threshold;
        self.stats.level = candidates.level;

        let mut order = candidates.indices;
        order.sort_unstable_by_key(|&idx| (store.entry(idx).map_or(u8::MAX, |(_, p)| p.popularity_rank), idx));

        for idx in order {
            if self.draw_order.len() >= cap {
                break;
            }
            let Some((id, placemark)) = store.entry(idx) else {
                continue;
            };
            if selection.contains(id) {
                continue;
            }
            self.stats.candidates += 1;
            self.try_place(id, placemark, &frame);
        }

        // Anything not placed this frame is no longer displayable
        let placed: HashSet<PlacemarkId> = self.draw_order.iter().copied().collect();
        self.registry.retain(|id| placed.contains(&id));
        self.stats.placed = self.draw_order.len();

        trace!(
            threshold = self.stats.threshold,
            level = self.stats.level,
            candidates = self.stats.candidates,
            placed = self.stats.placed,
            "placemark layout frame"
        );

        self.draw_list()
    }

    /// Placements of the most recent frame, in draw order
    pub fn draw_list(&self) -> Vec<&VisiblePlacemark> {
        self.draw_order.iter().filter_map(|&id| self.registry.get(id)).collect()
    }

    /// Layout record of `id`, if it was placed in the most recent frame
    pub fn visible(&self, id: PlacemarkId) -> Option<&VisiblePlacemark> {
        self.registry.get(id)
    }

    /// Placed placemarks whose label or symbol contains `point`
    pub fn hit_test(&self, point: ScreenPoint) -> Vec<PlacemarkId> {
        self.draw_list()
            .into_iter()
            .filter(|record| record.contains(point))
            .map(VisiblePlacemark::id)
            .collect()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn max_label_height(&self) -> f64 {
        self.max_label_height
    }

    /// Apply pending change notifications before a pass starts
    fn sync(&mut self, store: &PlacemarkStore, selection: &Selection) {
        let store_changed = self.store_generation != Some(store.generation());
        let selection_changed = self.selection_generation != Some(selection.generation());

        if self.style_reset_requested {
            self.registry.clear();
        }

        if self.rebuild_requested || store_changed || selection_changed {
            self.cache
                .rebuild(store, self.config.namespace, &self.config.popularity);
            self.registry.retain(|id| store.get(id).is_some());
            self.store_generation = Some(store.generation());
            self.selection_generation = Some(selection.generation());
        }

        if self.rebuild_requested || store_changed || self.style_reset_requested {
            self.max_label_height = store
                .iter()
                .map(|(_, p)| self.label_height(&p.style))
                .fold(0.0, f64::max);
            debug!(
                placemarks = store.len(),
                indexed = self.cache.len(),
                buckets = self.cache.bucket_count(),
                max_label_height = self.max_label_height,
                "rebuilt placemark index"
            );
        }

        self.rebuild_requested = false;
        self.style_reset_requested = false;
    }

    fn label_height(&self, style: &PlacemarkStyle) -> f64 {
        self.measurer.line_height(&style.font) + self.glow_padding(style)
    }

    fn glow_padding(&self, style: &PlacemarkStyle) -> f64 {
        if style.glow {
            2.0 * self.config.glow_margin
        } else {
            0.0
        }
    }

    /// Try to place one placemark; on failure its record is released
    fn try_place<V: Viewport + ?Sized>(
        &mut self,
        id: PlacemarkId,
        placemark: &Placemark,
        frame: &FrameContext<'_, V>,
    ) -> bool {
        match self.find_placement(placemark, frame) {
            Some((anchor, symbol, label)) => {
                let record = self.registry.get_or_create(id, frame.radius);
                record.symbol_position = ScreenPoint::new(symbol.x, symbol.y);
                record.symbol_rect = symbol;
                record.label_rect = label.unwrap_or(ScreenRect::new(anchor.x, anchor.y, 0.0, 0.0));
                self.rows.insert(record.label_rect, symbol);
                self.draw_order.push(id);
                true
            }
            None => {
                self.registry.release(id);
                false
            }
        }
    }

    /// Anchor, symbol rectangle and label rectangle for a placemark, or
    /// `None` when it cannot be shown this frame
    fn find_placement<V: Viewport + ?Sized>(
        &self,
        placemark: &Placemark,
        frame: &FrameContext<'_, V>,
    ) -> Option<(ScreenPoint, ScreenRect, Option<ScreenRect>)> {
        if !placemark.visible || !self.config.categories.allows(placemark.category) {
            return None;
        }
        let coords = placemark.coordinates.resolve()?;
        if !frame.visible.contains(coords) {
            return None;
        }
        let anchor = frame.viewport.project(coords)?;
        if !(anchor.x >= 0.0 && anchor.x <= frame.width && anchor.y >= 0.0 && anchor.y <= frame.height) {
            return None;
        }

        let style = &placemark.style;
        let symbol = ScreenRect::new(
            anchor.x - style.hot_spot[0],
            anchor.y - style.hot_spot[1],
            style.icon_size[0],
            style.icon_size[1],
        );

        if placemark.name.is_empty() {
            return self.rows.has_room(&symbol).then_some((anchor, symbol, None));
        }

        let padding = self.glow_padding(style);
        let width = self.measurer.text_width(&style.font, &placemark.name) + padding;
        let height = self.measurer.line_height(&style.font) + padding;

        let label = match style.alignment {
            LabelAlignment::Corner => self.corner_placement(anchor, style.icon_size[0], width, height),
            LabelAlignment::Center => {
                let rect = ScreenRect::centered_on(anchor, width, height);
                self.rows.has_room(&rect).then_some(rect)
            }
        }?;

        Some((anchor, symbol, Some(label)))
    }

    /// First free spot beside the symbol: right of it then left of it,
    /// each trying below the anchor line then above it
    fn corner_placement(&self, anchor: ScreenPoint, symbol_width: f64, width: f64, height: f64) -> Option<ScreenRect> {
        let right = anchor.x + symbol_width / 2.0 + 1.0;
        let left = anchor.x - symbol_width / 2.0 - 1.0 - width;
        for x in [right, left] {
            for y in [anchor.y, anchor.y - height] {
                let rect = ScreenRect::new(x, y, width, height);
                if self.rows.has_room(&rect) {
                    return Some(rect);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::placemark::{Category, TrackSource};
    use std::sync::{Arc, Mutex};

    /// Linear projection of a geographic box onto the screen
    struct FlatViewport {
        visible: GeoBox,
        radius: f64,
        scale: f64,
    }

    impl FlatViewport {
        fn new(radius: f64) -> Self {
            Self {
                visible: GeoBox::new(10.0, 0.0, 10.0, 0.0),
                radius,
                scale: 100.0,
            }
        }
    }

    impl Viewport for FlatViewport {
        fn visible_box(&self) -> GeoBox {
            self.visible
        }

        fn radius(&self) -> f64 {
            self.radius
        }

        fn width(&self) -> usize {
            ((self.visible.east - self.visible.west) * self.scale) as usize
        }

        fn height(&self) -> usize {
            ((self.visible.north - self.visible.south) * self.scale) as usize
        }

        fn project(&self, p: GeoPoint) -> Option<ScreenPoint> {
            Some(ScreenPoint::new(
                (p.lon - self.visible.west) * self.scale,
                (self.visible.north - p.lat) * self.scale,
            ))
        }
    }

    struct Lost;

    impl TrackSource for Lost {
        fn position(&self) -> Option<GeoPoint> {
            None
        }
    }

    /// Position that moves when the test says so
    struct Beacon(Mutex<GeoPoint>);

    impl TrackSource for Beacon {
        fn position(&self) -> Option<GeoPoint> {
            self.0.lock().ok().map(|p| *p)
        }
    }

    const ZOOMED_IN: f64 = 20_000_000.0;

    fn centered(name: &str, lon: f64, lat: f64, rank: u8) -> Placemark {
        Placemark::new(name, lon, lat)
            .with_rank(rank)
            .with_style(PlacemarkStyle::default().with_alignment(LabelAlignment::Center))
    }

    fn ids(list: &[&VisiblePlacemark]) -> Vec<PlacemarkId> {
        list.iter().map(|r| r.id()).collect()
    }

    fn assert_no_label_overlap(list: &[&VisiblePlacemark]) {
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                assert!(
                    !a.label_rect.intersects(&b.label_rect),
                    "{:?} overlaps {:?}",
                    a.id(),
                    b.id()
                );
            }
        }
    }

    #[test]
    fn test_empty_store_empty_draw_list() {
        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&PlacemarkStore::new(), &Selection::new(), &FlatViewport::new(ZOOMED_IN));
        assert!(list.is_empty());
    }

    #[test]
    fn test_single_centered_placemark() {
        let mut store = PlacemarkStore::new();
        let id = store.push(centered("Alpha", 5.0, 5.0, 3));
        let vp = FlatViewport::new(ZOOMED_IN);
        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &Selection::new(), &vp);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id(), id);
        let anchor = vp.project(GeoPoint::new(5.0, 5.0)).unwrap();
        let center = list[0].label_rect.center();
        assert!((center.x - anchor.x).abs() < 1e-9);
        assert!((center.y - anchor.y).abs() < 1e-9);
        assert_eq!(list[0].symbol_position, ScreenPoint::new(anchor.x - 4.0, anchor.y - 4.0));
    }

    #[test]
    fn test_selected_wins_identical_position() {
        let mut store = PlacemarkStore::new();
        let first = store.push(centered("Same", 5.0, 5.0, 4));
        let second = store.push(centered("Same", 5.0, 5.0, 4));
        let mut selection = Selection::new();
        selection.select(second);

        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &selection, &FlatViewport::new(ZOOMED_IN));
        assert_eq!(ids(&list), vec![second]);
        assert!(layout.visible(first).is_none());
    }

    #[test]
    fn test_selected_placed_before_more_popular() {
        let mut store = PlacemarkStore::new();
        let popular = store.push(centered("Popular", 2.0, 2.0, 0));
        let obscure = store.push(centered("Obscure", 8.0, 8.0, 19));
        let mut selection = Selection::new();
        selection.select(obscure);

        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &selection, &FlatViewport::new(ZOOMED_IN));
        assert_eq!(ids(&list), vec![obscure, popular]);
    }

    #[test]
    fn test_selected_ignores_popularity_threshold() {
        let mut store = PlacemarkStore::new();
        let obscure = store.push(centered("Obscure", 8.0, 8.0, 19));
        let mut selection = Selection::new();
        let mut layout = PlacemarkLayout::default();

        // radius 1000 admits ranks up to 6
        assert!(layout.layout(&store, &selection, &FlatViewport::new(1_000.0)).is_empty());
        selection.select(obscure);
        let list = layout.layout(&store, &selection, &FlatViewport::new(1_000.0));
        assert_eq!(ids(&list), vec![obscure]);
    }

    #[test]
    fn test_popularity_threshold_filters() {
        let mut store = PlacemarkStore::new();
        let major = store.push(centered("Major", 2.0, 2.0, 3));
        store.push(centered("Minor", 8.0, 8.0, 15));

        let mut layout = PlacemarkLayout::default();
        let list = ids(&layout.layout(&store, &Selection::new(), &FlatViewport::new(1_000.0)));
        assert_eq!(layout.stats().threshold, 6);
        assert_eq!(list, vec![major]);
    }

    #[test]
    fn test_cap_keeps_best_priority() {
        let mut store = PlacemarkStore::new();
        let mut expected = Vec::new();
        for j in 0..20 {
            for i in 0..25 {
                let idx = j * 25 + i;
                let rank = (idx % 20) as u8;
                let id = store.push(centered(
                    &format!("P{idx}"),
                    0.2 + 0.4 * i as f64,
                    0.25 + 0.5 * j as f64,
                    rank,
                ));
                expected.push((rank, idx, id));
            }
        }
        expected.sort();
        let best: Vec<PlacemarkId> = expected.iter().take(100).map(|&(_, _, id)| id).collect();

        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));
        assert_eq!(list.len(), 100);
        assert_eq!(ids(&list), best);
        assert_no_label_overlap(&list);

        layout.set_max_visible(500);
        let list = layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));
        assert_eq!(list.len(), 500);
        assert_no_label_overlap(&list);
    }

    #[test]
    fn test_corner_scan_order() {
        let mut store = PlacemarkStore::new();
        let placed: Vec<PlacemarkId> = (0..5)
            .map(|i| store.push(Placemark::new(format!("Corner{i}"), 5.0, 5.0).with_rank(2)))
            .collect();

        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));
        assert_eq!(ids(&list), placed[..4].to_vec());
        assert_no_label_overlap(&list);

        // anchor (500, 500), symbol 8 wide, "CornerN" is 7 * 6 = 42 wide, 12 high
        let rects: Vec<ScreenRect> = list.iter().map(|r| r.label_rect).collect();
        assert_eq!(rects[0], ScreenRect::new(505.0, 500.0, 42.0, 12.0));
        assert_eq!(rects[1], ScreenRect::new(505.0, 488.0, 42.0, 12.0));
        assert_eq!(rects[2], ScreenRect::new(453.0, 500.0, 42.0, 12.0));
        assert_eq!(rects[3], ScreenRect::new(453.0, 488.0, 42.0, 12.0));
    }

    #[test]
    fn test_unchanged_frame_reuses_records() {
        let mut store = PlacemarkStore::new();
        for i in 0..10 {
            store.push(Placemark::new(format!("Spot{i}"), 1.0 + i as f64 * 0.8, 5.0).with_rank(i as u8));
        }
        let vp = FlatViewport::new(ZOOMED_IN);
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();

        let first: Vec<(PlacemarkId, u64, ScreenRect)> = layout
            .layout(&store, &selection, &vp)
            .iter()
            .map(|r| (r.id(), r.serial(), r.label_rect))
            .collect();
        let second: Vec<(PlacemarkId, u64, ScreenRect)> = layout
            .layout(&store, &selection, &vp)
            .iter()
            .map(|r| (r.id(), r.serial(), r.label_rect))
            .collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_style_reset_recreates_records() {
        let mut store = PlacemarkStore::new();
        let id = store.push(centered("Alpha", 5.0, 5.0, 0));
        let vp = FlatViewport::new(ZOOMED_IN);
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();

        layout.layout(&store, &selection, &vp);
        let before = layout.visible(id).map(VisiblePlacemark::serial);
        layout.request_style_reset();
        layout.layout(&store, &selection, &vp);
        let after = layout.visible(id).map(VisiblePlacemark::serial);
        assert!(before.is_some() && after.is_some());
        assert_ne!(before, after);
    }

    #[test]
    fn test_records_released_when_out_of_view() {
        let mut store = PlacemarkStore::new();
        let id = store.push(centered("Alpha", 5.0, 5.0, 0));
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();

        let mut vp = FlatViewport::new(ZOOMED_IN);
        assert_eq!(layout.layout(&store, &selection, &vp).len(), 1);
        vp.visible = GeoBox::new(40.0, 30.0, 40.0, 30.0);
        assert!(layout.layout(&store, &selection, &vp).is_empty());
        assert!(layout.visible(id).is_none());
    }

    #[test]
    fn test_filtered_hidden_and_unresolvable_are_skipped() {
        let mut store = PlacemarkStore::new();
        let crater = store.push(centered("Tycho", 2.0, 2.0, 1).with_category(Category::Crater));
        store.push(centered("Ghost", 4.0, 4.0, 1).hidden());
        store.push(Placemark::tracked("Lander", Arc::new(Lost)).with_rank(1));
        let city = store.push(centered("Town", 8.0, 8.0, 1).with_category(Category::City));

        let vp = FlatViewport::new(ZOOMED_IN);
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();
        assert_eq!(ids(&layout.layout(&store, &selection, &vp)), vec![crater, city]);

        let mut categories = layout.categories();
        categories.show_craters = false;
        layout.set_categories(categories);
        assert_eq!(ids(&layout.layout(&store, &selection, &vp)), vec![city]);
        assert!(layout.visible(crater).is_none());
    }

    #[test]
    fn test_removed_placemark_record_dropped() {
        let mut store = PlacemarkStore::new();
        let a = store.push(centered("A", 2.0, 2.0, 0));
        let b = store.push(centered("B", 8.0, 8.0, 0));
        let vp = FlatViewport::new(ZOOMED_IN);
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();
        assert_eq!(layout.layout(&store, &selection, &vp).len(), 2);

        store.remove(a);
        assert_eq!(ids(&layout.layout(&store, &selection, &vp)), vec![b]);
        assert!(layout.visible(a).is_none());
    }

    #[test]
    fn test_hit_test() {
        let mut store = PlacemarkStore::new();
        let id = store.push(centered("Alpha", 5.0, 5.0, 0));
        let mut layout = PlacemarkLayout::default();
        layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));

        assert_eq!(layout.hit_test(ScreenPoint::new(500.0, 500.0)), vec![id]);
        assert_eq!(layout.hit_test(ScreenPoint::new(512.0, 503.0)), vec![id]);
        assert!(layout.hit_test(ScreenPoint::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_glow_widens_label() {
        let mut store = PlacemarkStore::new();
        let style = PlacemarkStyle::default()
            .with_alignment(LabelAlignment::Center)
            .with_glow(true);
        let id = store.push(Placemark::new("Glow", 5.0, 5.0).with_rank(0).with_style(style));
        let mut layout = PlacemarkLayout::default();
        layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));

        let rect = layout.visible(id).map(|r| r.label_rect).unwrap();
        assert_eq!(rect.width, 4.0 * 6.0 + 4.0);
        assert_eq!(rect.height, 12.0 + 4.0);
        assert_eq!(layout.max_label_height(), 16.0);
    }

    #[test]
    fn test_symbol_only_placemark() {
        let mut store = PlacemarkStore::new();
        let id = store.push(Placemark::new("", 5.0, 5.0).with_rank(0));
        let mut layout = PlacemarkLayout::default();
        let list = layout.layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN));
        assert_eq!(ids(&list), vec![id]);
        assert!(!list[0].has_label());
        assert_eq!(list[0].symbol_rect, ScreenRect::new(496.0, 496.0, 8.0, 8.0));
    }

    #[test]
    fn test_zero_label_height_skips_frame() {
        let mut store = PlacemarkStore::new();
        store.push(
            Placemark::new("Tiny", 5.0, 5.0)
                .with_rank(0)
                .with_style(PlacemarkStyle::default().with_font_size(0.0)),
        );
        let mut layout = PlacemarkLayout::default();
        assert!(layout
            .layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN))
            .is_empty());
    }

    #[test]
    fn test_zero_cap() {
        let mut store = PlacemarkStore::new();
        store.push(centered("Alpha", 5.0, 5.0, 0));
        let mut layout = PlacemarkLayout::with_config(LayoutConfig {
            max_visible: 0,
            ..LayoutConfig::default()
        });
        assert!(layout
            .layout(&store, &Selection::new(), &FlatViewport::new(ZOOMED_IN))
            .is_empty());
    }

    #[test]
    fn test_moved_track_needs_notify() {
        let beacon = Arc::new(Beacon(Mutex::new(GeoPoint::new(5.0, 5.0))));
        let mut store = PlacemarkStore::new();
        let id = store.push(
            Placemark::tracked("Rover", beacon.clone())
                .with_rank(10)
                .with_style(PlacemarkStyle::default().with_alignment(LabelAlignment::Center)),
        );
        let selection = Selection::new();
        let mut layout = PlacemarkLayout::default();

        let mut vp = FlatViewport::new(ZOOMED_IN);
        assert_eq!(ids(&layout.layout(&store, &selection, &vp)), vec![id]);

        // Level 5 tile of the old position no longer covers the new one
        if let Ok(mut p) = beacon.0.lock() {
            *p = GeoPoint::new(-95.0, 45.0);
        }
        vp.visible = GeoBox::new(50.0, 40.0, -90.0, -100.0);
        assert!(layout.layout(&store, &selection, &vp).is_empty());
        assert_eq!(layout.stats().placed, 0);

        layout.notify_changed();
        assert_eq!(ids(&layout.layout(&store, &selection, &vp)), vec![id]);
        assert_eq!(layout.stats().placed, 1);
    }
}
