mod canvas;
mod draw;

pub use canvas::BrailleCanvas;
pub use draw::{draw_polyline, draw_ring};
