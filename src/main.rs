mod app;
mod braille;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use placemark_layout::data;
use placemark_layout::placemark::{Category, Placemark};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Loaded when no path is given on the command line
const DEFAULT_DATA: &str = "data/placemarks.geojson";
const LOG_FILE: &str = "placemark-layout.log";

fn main() -> Result<()> {
    init_tracing()?;
    let placemarks = load_placemarks(std::env::args_os().nth(1).map(PathBuf::from))?;

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, placemarks);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Log to a file, and only when asked to; the terminal belongs to the UI
fn init_tracing() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// An explicit path must load; the default file is optional and the
/// built-in sample set stands in for it
fn load_placemarks(path: Option<PathBuf>) -> Result<Vec<Placemark>> {
    if let Some(path) = path {
        return data::load_placemarks(&path);
    }
    let default = Path::new(DEFAULT_DATA);
    if default.exists() {
        match data::load_placemarks(default) {
            Ok(placemarks) => return Ok(placemarks),
            Err(e) => tracing::warn!("falling back to sample placemarks: {e:#}"),
        }
    }
    Ok(data::sample_placemarks())
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_at(mouse.column, mouse.row, 1.25),
        MouseEventKind::ScrollDown => app.zoom_at(mouse.column, mouse.row, 0.8),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.press(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.release(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, placemarks: Vec<Placemark>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize, placemarks.clone());

    loop {
        app.relayout();
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),
                    KeyCode::Char('g') => app.toggle_projection(),

                    KeyCode::Char('c') | KeyCode::Char('C') => app.toggle_category(Category::City),
                    KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_category(Category::Terrain),
                    KeyCode::Char('o') | KeyCode::Char('O') => app.toggle_category(Category::OtherPlace),
                    KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_category(Category::LandingSite),
                    KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_category(Category::Crater),
                    KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_category(Category::Mare),

                    KeyCode::Char('[') => app.adjust_cap(-10),
                    KeyCode::Char(']') => app.adjust_cap(10),
                    KeyCode::Char('u') => app.clear_selection(),

                    KeyCode::Char('r') | KeyCode::Char('0') => {
                        let size = terminal.size()?;
                        app = App::new(size.width as usize, size.height as usize, placemarks.clone());
                    }

                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
