mod globe;
mod projection;

pub use globe::GlobeViewport;
pub use projection::MercatorViewport;

use crate::geo::{GeoBox, GeoPoint};
use crate::layout::ScreenPoint;

/// Viewport capability consumed by the layout engine
pub trait Viewport {
    /// Conservative geographic bounds of what is on screen
    fn visible_box(&self) -> GeoBox;
    /// Zoom proxy: sphere radius in screen pixels
    fn radius(&self) -> f64;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Screen position of `p`, or `None` when it is not projectable
    /// (back side of the globe, beyond the Mercator latitude limit)
    fn project(&self, p: GeoPoint) -> Option<ScreenPoint>;
}
