use crate::geo::{clamp_lat, wrap_lon, GeoPoint};

/// Deepest level a tile id can address
pub const MAX_TILE_LEVEL: u8 = 30;

/// Cell of a quadtree partition of the sphere.
///
/// x grows eastward from longitude -180, y grows southward from latitude 90.
/// For a given level both lie in `[0, 2^level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub namespace: u32,
    pub level: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub const fn new(namespace: u32, level: u8, x: u32, y: u32) -> Self {
        Self {
            namespace,
            level,
            x,
            y,
        }
    }

    /// Number of tiles along one axis at `level`
    #[inline(always)]
    pub fn tiles_per_axis(level: u8) -> u32 {
        1u32 << level
    }

    /// The tile one level up that contains this one
    pub fn parent(&self) -> Option<TileId> {
        (self.level > 0).then(|| TileId::new(self.namespace, self.level - 1, self.x >> 1, self.y >> 1))
    }
}

/// Quadtree address of `p` at `level`.
///
/// Bisects longitude and latitude `level` times. Every midpoint is
/// recomputed from the original bounds and the address prefix, so the
/// result never depends on accumulated interval arithmetic.
pub fn tile_for(namespace: u32, p: GeoPoint, level: u8) -> TileId {
    let level = level.min(MAX_TILE_LEVEL);
    let lon = wrap_lon(p.lon);
    let lat = clamp_lat(p.lat);

    let mut x = 0u32;
    let mut y = 0u32;
    for depth in 1..=level {
        let cells = (1u64 << depth) as f64;

        let mid_lon = -180.0 + 360.0 * f64::from((x << 1) | 1) / cells;
        x <<= 1;
        if lon >= mid_lon {
            x |= 1;
        }

        let mid_lat = 90.0 - 180.0 * f64::from((y << 1) | 1) / cells;
        y <<= 1;
        if lat < mid_lat {
            y |= 1;
        }
    }

    TileId::new(namespace, level, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_is_single_tile() {
        let t = tile_for(0, GeoPoint::new(123.0, -45.0), 0);
        assert_eq!(t, TileId::new(0, 0, 0, 0));
    }

    #[test]
    fn test_level_one_quadrants() {
        assert_eq!(tile_for(0, GeoPoint::new(-90.0, 45.0), 1), TileId::new(0, 1, 0, 0));
        assert_eq!(tile_for(0, GeoPoint::new(90.0, 45.0), 1), TileId::new(0, 1, 1, 0));
        assert_eq!(tile_for(0, GeoPoint::new(-90.0, -45.0), 1), TileId::new(0, 1, 0, 1));
        assert_eq!(tile_for(0, GeoPoint::new(90.0, -45.0), 1), TileId::new(0, 1, 1, 1));
    }

    #[test]
    fn test_matches_direct_division() {
        let p = GeoPoint::new(2.3522, 48.8566);
        for level in 0..=16u8 {
            let n = f64::from(TileId::tiles_per_axis(level));
            let t = tile_for(7, p, level);
            assert_eq!(t.x, ((p.lon + 180.0) / 360.0 * n).floor() as u32, "x at level {level}");
            assert_eq!(t.y, ((90.0 - p.lat) / 180.0 * n).floor() as u32, "y at level {level}");
            assert_eq!(t.namespace, 7);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = GeoPoint::new(-73.9857, 40.7484);
        let a = tile_for(0, p, 12);
        for _ in 0..100 {
            assert_eq!(tile_for(0, p, 12), a);
        }
    }

    #[test]
    fn test_coverage_at_extremes() {
        let corners = [
            GeoPoint::new(-180.0, 90.0),
            GeoPoint::new(180.0, -90.0),
            GeoPoint::new(179.999_999, -89.999_999),
            GeoPoint::new(-180.0, -90.0),
            GeoPoint::new(540.0, 200.0),
        ];
        for level in 0..=MAX_TILE_LEVEL {
            let n = TileId::tiles_per_axis(level);
            for p in corners {
                let t = tile_for(0, p, level);
                assert!(t.x < n && t.y < n, "{t:?} out of range at level {level}");
            }
        }
    }

    #[test]
    fn test_parent_contains_child() {
        let p = GeoPoint::new(139.69, 35.68);
        let child = tile_for(0, p, 9);
        assert_eq!(child.parent(), Some(tile_for(0, p, 8)));
        assert_eq!(tile_for(0, p, 0).parent(), None);
    }
}
