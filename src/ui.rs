use crate::app::{App, View};
use crate::braille::{draw_polyline, draw_ring, BrailleCanvas};
use placemark_layout::geo::GeoPoint;
use placemark_layout::layout::{ScreenPoint, VisiblePlacemark};
use placemark_layout::map::Viewport;
use placemark_layout::placemark::{Category, Placemark, PlacemarkStyle};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Degrees between graticule lines
const GRATICULE_STEP: i32 = 30;
/// Degrees between samples along a graticule line
const GRATICULE_SAMPLE: i32 = 3;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Placemarks ({}) ", app.view.name()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    draw_graticule(&mut canvas, &app.view);

    let cursor_pos = app.mouse_pos.and_then(|(col, row)| {
        let (x, y) = (col.checked_sub(inner.x)?, row.checked_sub(inner.y)?);
        (x < inner.width && y < inner.height).then_some((x, y))
    });

    let marks = app
        .layout
        .draw_list()
        .into_iter()
        .filter_map(|record| {
            let placemark = app.store.get(record.id())?;
            Some(Mark::new(record, placemark, app.selection.contains(record.id())))
        })
        .collect();

    frame.render_widget(
        MapWidget {
            canvas,
            marks,
            cursor_pos,
        },
        inner,
    );
}

/// Lines of latitude and longitude, plus the limb of the globe
fn draw_graticule(canvas: &mut BrailleCanvas, view: &View) {
    let viewport: &dyn Viewport = view.viewport();
    let (width, _) = canvas.pixel_size();
    let max_jump = width as f64 / 2.0;

    for lon in (-180..180).step_by(GRATICULE_STEP as usize) {
        let points: Vec<Option<ScreenPoint>> = (-90..=90)
            .step_by(GRATICULE_SAMPLE as usize)
            .map(|lat| viewport.project(GeoPoint::new(lon as f64, lat as f64)))
            .collect();
        draw_polyline(canvas, &points, max_jump);
    }
    for lat in (-90 + GRATICULE_STEP..90).step_by(GRATICULE_STEP as usize) {
        let points: Vec<Option<ScreenPoint>> = (-180..=180)
            .step_by(GRATICULE_SAMPLE as usize)
            .map(|lon| viewport.project(GeoPoint::new(lon as f64, lat as f64)))
            .collect();
        draw_polyline(canvas, &points, max_jump);
    }

    if let View::Globe(globe) = view {
        let center = ScreenPoint::new(globe.width as f64 / 2.0, globe.height as f64 / 2.0);
        draw_ring(canvas, center, globe.radius);
    }
}

/// One placed placemark in terminal cells
struct Mark {
    symbol: (usize, usize, char),
    label: Option<(usize, usize, String)>,
    style: Style,
    label_style: Style,
}

impl Mark {
    fn new(record: &VisiblePlacemark, placemark: &Placemark, selected: bool) -> Self {
        let anchor = record.symbol_rect.center();
        let symbol = (
            (anchor.x / 2.0) as usize,
            (anchor.y / 4.0) as usize,
            category_glyph(placemark.category),
        );
        let label = record.has_label().then(|| {
            let rect = record.label_rect;
            (
                (rect.x.max(0.0) / 2.0).round() as usize,
                (rect.y.max(0.0) / 4.0).round() as usize,
                placemark.name.clone(),
            )
        });
        let style = if selected {
            selected_style()
        } else {
            Style::default().fg(category_color(placemark.category))
        };
        Self {
            symbol,
            label,
            style,
            label_style: label_style(&placemark.style, selected),
        }
    }
}

fn selected_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Label text in the placemark's own color; bold when the style asks for it
fn label_style(style: &PlacemarkStyle, selected: bool) -> Style {
    if selected {
        return selected_style();
    }
    let [r, g, b, _] = style.label_color;
    let label = Style::default().fg(Color::Rgb(r, g, b));
    if style.font.bold {
        label.add_modifier(Modifier::BOLD)
    } else {
        label
    }
}

fn category_glyph(category: Category) -> char {
    match category {
        Category::City => '●',
        Category::Terrain => '▲',
        Category::OtherPlace => '◆',
        Category::LandingSite => '★',
        Category::Crater => '○',
        Category::Mare => '◦',
        Category::Unclassified => '·',
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::City => Color::White,
        Category::Terrain => Color::Green,
        Category::OtherPlace => Color::Magenta,
        Category::LandingSite => Color::LightRed,
        Category::Crater | Category::Mare => Color::Gray,
        Category::Unclassified => Color::DarkGray,
    }
}

/// Braille graticule with placemark symbols and labels overlaid
struct MapWidget {
    canvas: BrailleCanvas,
    marks: Vec<Mark>,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    fn put(area: Rect, buf: &mut Buffer, col: usize, row: usize, ch: char, style: Style) {
        if col >= area.width as usize || row >= area.height as usize {
            return;
        }
        buf[(area.x + col as u16, area.y + row as u16)]
            .set_char(ch)
            .set_style(style);
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = Style::default().fg(Color::Blue);
        for (col, row, ch) in self.canvas.glyphs() {
            Self::put(area, buf, col, row, ch, grid);
        }

        // Draw order is priority order; paint in reverse so the most
        // important placemark ends up on top
        for mark in self.marks.iter().rev() {
            let (col, row, glyph) = mark.symbol;
            Self::put(area, buf, col, row, glyph, mark.style);
            if let Some((col, row, text)) = &mark.label {
                for (i, ch) in text.chars().enumerate() {
                    Self::put(area, buf, col + i, *row, ch, mark.label_style);
                }
            }
        }

        if let Some((cx, cy)) = self.cursor_pos {
            Self::put(area, buf, cx as usize, cy as usize, '╋', Style::default().fg(Color::Red));
        }
    }
}

fn toggle_span(on: bool, on_text: &'static str, off_text: &'static str) -> Span<'static> {
    Span::styled(
        if on { on_text } else { off_text },
        Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
    )
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let categories = app.layout.categories();
    let stats = app.layout.stats();
    let dim = Style::default().fg(Color::DarkGray);

    let status = Line::from(vec![
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" rank<=", dim),
        Span::styled(stats.threshold.to_string(), Style::default().fg(Color::Magenta)),
        Span::styled(
            format!(" {}/{} of {} ", stats.placed, app.layout.config().max_visible, stats.candidates),
            Style::default().fg(Color::Magenta),
        ),
        toggle_span(categories.show_cities, "[C]ity ", "[c]ity "),
        toggle_span(categories.show_terrain, "[T]errain ", "[t]errain "),
        toggle_span(categories.show_other_places, "[O]ther ", "[o]ther "),
        toggle_span(categories.show_landing_sites, "[S]ite ", "[s]ite "),
        toggle_span(categories.show_craters, "[X]crater ", "[x]crater "),
        toggle_span(categories.show_maria, "[M]are ", "[m]are "),
        Span::styled("| ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" | sel:{} g:proj [/]:cap u:unselect r:reset q:quit", app.selection.len()),
            dim,
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
