//! Popularity-tiered spatial index: placemarks bucketed by quadtree tile,
//! with the tile level chosen by popularity rank.

mod cache;
mod select;
mod tile;

pub use cache::CandidateCache;
pub use select::{select_candidates, tile_pyramid, Candidates, TileRange};
pub use tile::{tile_for, TileId, MAX_TILE_LEVEL};
