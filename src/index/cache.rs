use rayon::prelude::*;
use std::collections::HashMap;

use crate::config::PopularityPolicy;
use crate::index::tile::{tile_for, TileId};
use crate::placemark::PlacemarkStore;

/// Tile buckets of placemark indices.
/// Indices point into the store the cache was last rebuilt from.
#[derive(Debug, Default)]
pub struct CandidateCache {
    /// Placemark indices per tile, in store order
    buckets: HashMap<TileId, Vec<usize>>,
    /// Number of placemarks indexed
    indexed: usize,
    /// Store generation the buckets were built from
    generation: Option<u64>,
}

impl CandidateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache contents with the current store.
    ///
    /// Placemarks that are hidden or whose coordinates cannot be resolved
    /// are left out.
    pub fn rebuild(&mut self, store: &PlacemarkStore, namespace: u32, policy: &PopularityPolicy) {
        self.buckets.clear();

        let tiles: Vec<Option<TileId>> = store
            .entries()
            .par_iter()
            .map(|(_, placemark)| {
                if !placemark.visible {
                    return None;
                }
                let coords = placemark.coordinates.resolve()?;
                let level = policy.level_for_rank(placemark.popularity_rank);
                Some(tile_for(namespace, coords, level))
            })
            .collect();

        let mut indexed = 0;
        for (idx, tile) in tiles.into_iter().enumerate() {
            if let Some(tile) = tile {
                self.buckets.entry(tile).or_default().push(idx);
                indexed += 1;
            }
        }

        self.indexed = indexed;
        self.generation = Some(store.generation());
    }

    /// Indices bucketed under `tile`
    #[inline(always)]
    pub fn get(&self, tile: &TileId) -> &[usize] {
        self.buckets.get(tile).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the cache reflects `store` as it is now
    pub fn is_current(&self, store: &PlacemarkStore) -> bool {
        self.generation == Some(store.generation())
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.indexed = 0;
        self.generation = None;
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }
}
