use placemark_layout::config::{LayoutConfig, PopularityPolicy};
use placemark_layout::geo::GeoPoint;
use placemark_layout::layout::{PlacemarkLayout, ScreenPoint};
use placemark_layout::map::{GlobeViewport, MercatorViewport, Viewport};
use placemark_layout::placemark::{
    Category, MonospaceMetrics, Placemark, PlacemarkStore, PlacemarkStyle, Selection,
};

/// Braille pixels are about four times coarser than desktop pixels
const TERMINAL_RADIUS_SCALE: f64 = 0.25;

/// Active projection
#[derive(Clone, Debug)]
pub enum View {
    Globe(GlobeViewport),
    Mercator(MercatorViewport),
}

impl View {
    pub fn viewport(&self) -> &dyn Viewport {
        match self {
            View::Globe(v) => v as &dyn Viewport,
            View::Mercator(v) => v as &dyn Viewport,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Globe(_) => "globe",
            View::Mercator(_) => "mercator",
        }
    }

    fn center(&self) -> GeoPoint {
        match self {
            View::Globe(v) => v.center(),
            View::Mercator(v) => GeoPoint::new(v.center_lon, v.center_lat),
        }
    }

    fn zoom(&self) -> f64 {
        match self {
            View::Globe(v) => v.effective_zoom(),
            View::Mercator(v) => v.zoom,
        }
    }
}

/// Application state
pub struct App {
    pub view: View,
    pub store: PlacemarkStore,
    pub selection: Selection,
    pub layout: PlacemarkLayout,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Whether the button moved since it went down; a press without
    /// movement is a click
    dragged: bool,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

/// Symbol one cell wide, labels one row high
pub fn terminal_style() -> PlacemarkStyle {
    PlacemarkStyle::default().with_icon(2.0, 4.0).with_font_size(4.0)
}

fn pixel_size(width: usize, height: usize) -> (usize, usize) {
    // Border takes 2 columns, border plus status bar take 3 rows
    (width.saturating_sub(2) * 2, height.saturating_sub(3) * 4)
}

impl App {
    pub fn new(width: usize, height: usize, placemarks: Vec<Placemark>) -> Self {
        let (pw, ph) = pixel_size(width, height);
        let config = LayoutConfig {
            popularity: PopularityPolicy::scaled(TERMINAL_RADIUS_SCALE),
            ..LayoutConfig::default()
        };

        let mut store = PlacemarkStore::new();
        for placemark in placemarks {
            store.push(placemark.with_style(terminal_style()));
        }

        Self {
            view: View::Globe(GlobeViewport::world(pw, ph)),
            store,
            selection: Selection::new(),
            layout: PlacemarkLayout::new(config, MonospaceMetrics::terminal()),
            should_quit: false,
            last_mouse: None,
            dragged: false,
            mouse_pos: None,
        }
    }

    /// Run the layout pass for the current view
    pub fn relayout(&mut self) {
        self.layout
            .layout(&self.store, &self.selection, self.view.viewport());
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pw, ph) = pixel_size(width, height);
        match &mut self.view {
            View::Globe(v) => v.set_size(pw, ph),
            View::Mercator(v) => {
                v.width = pw;
                v.height = ph;
            }
        }
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        match &mut self.view {
            View::Globe(v) => v.rotate_drag(dx, dy),
            View::Mercator(v) => v.pan(dx, dy),
        }
    }

    pub fn zoom_in(&mut self) {
        match &mut self.view {
            View::Globe(v) => v.zoom_in(),
            View::Mercator(v) => v.zoom_in(),
        }
    }

    pub fn zoom_out(&mut self) {
        match &mut self.view {
            View::Globe(v) => v.zoom_out(),
            View::Mercator(v) => v.zoom_out(),
        }
    }

    /// Zoom towards a terminal cell
    pub fn zoom_at(&mut self, col: u16, row: u16, factor: f64) {
        let (px, py) = cell_to_pixel(col, row);
        match &mut self.view {
            View::Globe(v) => v.zoom_at(px as f64, py as f64, factor),
            View::Mercator(v) => {
                if factor > 1.0 {
                    v.zoom_in();
                } else {
                    v.zoom_out();
                }
            }
        }
    }

    /// Switch between globe and flat map, keeping center and zoom
    pub fn toggle_projection(&mut self) {
        self.view = match &self.view {
            View::Globe(v) => View::Mercator(v.to_mercator()),
            View::Mercator(v) => View::Globe(GlobeViewport::from_mercator(v)),
        };
    }

    pub fn toggle_category(&mut self, category: Category) {
        let mut categories = self.layout.categories();
        categories.toggle(category);
        self.layout.set_categories(categories);
    }

    /// Change the on-screen cap by `delta`
    pub fn adjust_cap(&mut self, delta: i64) {
        let cap = (self.layout.config().max_visible as i64 + delta).clamp(0, 1_000);
        self.layout.set_max_visible(cap as usize);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Drag pans the view
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (last_x as i32 - x as i32) * 2;
            let dy = (last_y as i32 - y as i32) * 4;
            if dx != 0 || dy != 0 {
                self.dragged = true;
            }
            self.pan(dx, dy);
        }
        self.last_mouse = Some((x, y));
    }

    /// A release without a drag is a click: toggle selection of the
    /// placemark under the cursor
    pub fn release(&mut self, col: u16, row: u16) {
        if self.last_mouse.is_some() && !self.dragged {
            self.click(col, row);
        }
        self.last_mouse = None;
        self.dragged = false;
    }

    fn click(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        // Sample the middle of the clicked cell
        let point = ScreenPoint::new(px as f64 + 1.0, py as f64 + 2.0);
        if let Some(&id) = self.layout.hit_test(point).first() {
            self.selection.toggle(id);
        }
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.view.zoom())
    }

    pub fn center_coords(&self) -> String {
        let c = self.view.center();
        format!(
            "{:.1}°{}, {:.1}°{}",
            c.lat.abs(),
            if c.lat >= 0.0 { "N" } else { "S" },
            c.lon.abs(),
            if c.lon >= 0.0 { "E" } else { "W" }
        )
    }
}

/// Terminal cell to braille pixel, accounting for the one-cell border
fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    (col.saturating_sub(1) as i32 * 2, row.saturating_sub(1) as i32 * 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemark_layout::data::sample_placemarks;

    fn app() -> App {
        let mut app = App::new(120, 40, sample_placemarks());
        app.relayout();
        app
    }

    #[test]
    fn test_world_view_places_top_cities() {
        let app = app();
        let stats = app.layout.stats();
        assert!(stats.placed > 0);
        assert!(stats.placed <= app.layout.config().max_visible);
        assert!(app
            .layout
            .draw_list()
            .iter()
            .all(|r| app.store.get(r.id()).is_some_and(|p| p.popularity_rank <= stats.threshold)));
    }

    #[test]
    fn test_click_toggles_selection() {
        let mut app = app();
        let record = app.layout.draw_list()[0].clone();
        // A cell whose sample point falls inside the label
        let label = record.label_rect;
        let col = (label.x / 2.0).ceil() as u16 + 1;
        let row = ((label.y - 2.0) / 4.0).ceil() as u16 + 1;

        app.press(col, row);
        app.release(col, row);
        assert!(app.selection.contains(record.id()));

        app.press(col, row);
        app.release(col, row);
        assert!(!app.selection.contains(record.id()));
    }

    #[test]
    fn test_drag_is_not_a_click() {
        let mut app = app();
        let before = app.view.center();
        app.press(30, 10);
        app.handle_drag(20, 10);
        app.release(20, 10);
        assert!(app.selection.is_empty());
        assert_ne!(app.view.center(), before);
    }

    #[test]
    fn test_projection_round_trip_keeps_center() {
        let mut app = app();
        let before = app.view.center();
        app.toggle_projection();
        assert_eq!(app.view.name(), "mercator");
        app.relayout();
        app.toggle_projection();
        let after = app.view.center();
        assert!((before.lon - after.lon).abs() < 1e-6);
        assert!((before.lat - after.lat).abs() < 1e-6);
    }

    #[test]
    fn test_category_toggle_hides_cities() {
        let mut app = app();
        app.toggle_category(Category::City);
        app.relayout();
        assert!(app
            .layout
            .draw_list()
            .iter()
            .all(|r| app.store.get(r.id()).is_some_and(|p| p.category != Category::City)));
    }
}
