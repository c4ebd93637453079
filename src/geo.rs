/// Wrap longitude into [-180, 180)
#[inline(always)]
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Clamp latitude into [-90, 90]
#[inline(always)]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// Geographic bounding box in degrees.
///
/// A box with `west > east` crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBox {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// The whole planet
    pub const fn world() -> Self {
        Self::new(90.0, -90.0, 180.0, -180.0)
    }

    /// A box with no area, or with non-finite bounds
    pub fn is_empty(&self) -> bool {
        !(self.north.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.west.is_finite())
            || self.north <= self.south
            || self.east == self.west
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        if self.is_empty() || p.lat > self.north || p.lat < self.south {
            return false;
        }
        // +180 stays as is so it can match an east edge at 180
        let lon = if (-180.0..=180.0).contains(&p.lon) {
            p.lon
        } else {
            wrap_lon(p.lon)
        };
        if self.crosses_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            lon >= self.west && lon <= self.east
        }
    }

    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::new(self.west, self.north)
    }

    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::new(self.east, self.south)
    }
}
