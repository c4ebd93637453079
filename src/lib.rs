//! Placemark visibility and label layout for a virtual-globe viewer.
//!
//! Placemarks are bucketed into quadtree tiles by popularity rank
//! ([`index`]). Each frame the visible tiles are collected for the current
//! viewport ([`map::Viewport`]) and [`layout::PlacemarkLayout`] places
//! selected placemarks first, then the rest by rank, without letting
//! labels overlap.

pub mod config;
pub mod data;
pub mod geo;
pub mod hash;
pub mod index;
pub mod layout;
pub mod map;
pub mod placemark;

pub use config::{CategoryFilter, LayoutConfig, PopularityPolicy};
pub use layout::{PlacemarkLayout, VisiblePlacemark};
pub use placemark::{Placemark, PlacemarkId, PlacemarkStore, Selection};
