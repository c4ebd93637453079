//! Per-frame label placement: two-pass priority layout over row-bucketed
//! collision sections, with layout records kept across frames.

mod engine;
mod geometry;
mod registry;
mod rows;

pub use engine::{FrameStats, PlacemarkLayout};
pub use geometry::{ScreenPoint, ScreenRect};
pub use registry::{VisiblePlacemark, VisibleRegistry};
pub use rows::RowSections;
