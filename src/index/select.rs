use crate::config::PopularityPolicy;
use crate::geo::GeoBox;
use crate::index::cache::CandidateCache;
use crate::index::tile::{tile_for, TileId, MAX_TILE_LEVEL};
use crate::placemark::PlacemarkStore;

/// Inclusive rectangle of tile coordinates at one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub level: u8,
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl TileRange {
    pub fn tile_count(&self) -> usize {
        (self.x1 - self.x0 + 1) as usize * (self.y1 - self.y0 + 1) as usize
    }

    pub fn tiles(&self, namespace: u32) -> impl Iterator<Item = TileId> + '_ {
        (self.y0..=self.y1)
            .flat_map(move |y| (self.x0..=self.x1).map(move |x| TileId::new(namespace, self.level, x, y)))
    }
}

/// Tile rectangles covering `visible` on every level from 0 to `bottom`.
///
/// Boxes crossing the antimeridian yield two rectangles per level until
/// they meet. An empty box yields an empty pyramid.
pub fn tile_pyramid(namespace: u32, visible: &GeoBox, bottom: u8) -> Vec<TileRange> {
    if visible.is_empty() {
        return Vec::new();
    }

    let bottom = bottom.min(MAX_TILE_LEVEL);
    let last = TileId::tiles_per_axis(bottom) - 1;
    let nw = tile_for(namespace, visible.north_west(), bottom);
    let se = tile_for(namespace, visible.south_east(), bottom);
    // The east edge at +180 wraps to x = 0; it means the last column
    let east_x = if visible.east >= 180.0 { last } else { se.x };
    let (y0, y1) = (nw.y, se.y);

    let spans: Vec<(u32, u32)> = if visible.crosses_antimeridian() {
        vec![(nw.x, last), (0, east_x)]
    } else {
        vec![(nw.x, east_x.max(nw.x))]
    };

    let mut pyramid = Vec::with_capacity(spans.len() * (bottom as usize + 1));
    for level in 0..=bottom {
        let shift = bottom - level;
        let ly0 = y0 >> shift;
        let ly1 = y1 >> shift;

        let mut level_spans: Vec<(u32, u32)> = spans.iter().map(|&(a, b)| (a >> shift, b >> shift)).collect();
        if let [(a0, a1), (b0, b1)] = level_spans[..] {
            // Two spans that touch or overlap collapse into one
            if b1 + 1 >= a0 {
                level_spans = vec![(b0.min(a0), a1.max(b1))];
            }
        }

        for (x0, x1) in level_spans {
            let n = TileId::tiles_per_axis(level);
            debug_assert!(x0 <= x1 && x1 < n && ly0 <= ly1 && ly1 < n, "tile range outside level {level}");
            pyramid.push(TileRange {
                level,
                x0,
                x1,
                y0: ly0,
                y1: ly1,
            });
        }
    }
    pyramid
}

/// Outcome of a candidate query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    /// Least important rank admitted
    pub threshold: u8,
    /// Deepest tile level queried
    pub level: u8,
    /// Store indices, unordered
    pub indices: Vec<usize>,
}

/// Collect every placemark that could be visible in `visible` at `radius`.
///
/// Buckets come from all pyramid levels so globally important placemarks
/// stay candidates at any zoom; ranks above the threshold are dropped.
pub fn select_candidates(
    cache: &CandidateCache,
    store: &PlacemarkStore,
    namespace: u32,
    visible: &GeoBox,
    radius: f64,
    policy: &PopularityPolicy,
) -> Candidates {
    let threshold = policy.threshold(radius);
    let level = policy.level_for_rank(threshold);

    let mut indices = Vec::new();
    for range in tile_pyramid(namespace, visible, level) {
        for tile in range.tiles(namespace) {
            indices.extend(cache.get(&tile).iter().copied().filter(|&idx| {
                store
                    .entry(idx)
                    .is_some_and(|(_, p)| p.popularity_rank <= threshold)
            }));
        }
    }

    Candidates {
        threshold,
        level,
        indices,
    }
}
