use std::f64::consts::PI;

use crate::geo::{clamp_lat, wrap_lon, GeoBox, GeoPoint};
use crate::layout::ScreenPoint;
use crate::map::Viewport;

/// Latitude limit of the Web Mercator square
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Flat Web Mercator view
#[derive(Clone, Debug)]
pub struct MercatorViewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (higher = more zoomed in)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl MercatorViewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Create a world view (shows entire world)
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 20.0, 1.0, width, height)
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width.max(1) as f64);
        self.center_lon = wrap_lon(self.center_lon + dx as f64 * scale);
        self.center_lat = (self.center_lat - dy as f64 * scale * 0.5).clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(100.0);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(0.5);
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width as f64
    }

    fn center_xy(&self) -> (f64, f64) {
        mercator_xy(self.center_lon, self.center_lat)
    }

    /// Unproject pixel coordinates back to a geographic point
    pub fn unproject(&self, px: f64, py: f64) -> GeoPoint {
        let (cx, cy) = self.center_xy();
        let scale = self.scale();
        let x = (px - self.width as f64 / 2.0) / scale + cx;
        let y = (py - self.height as f64 / 2.0) / scale + cy;

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        GeoPoint::new(lon, lat)
    }
}

/// Normalized Web Mercator coordinates, both in [0, 1] for the world square
fn mercator_xy(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

impl Viewport for MercatorViewport {
    fn visible_box(&self) -> GeoBox {
        if self.width == 0 || self.height == 0 {
            return GeoBox::new(0.0, 0.0, 0.0, 0.0);
        }
        let nw = self.unproject(0.0, 0.0);
        let se = self.unproject(self.width as f64, self.height as f64);
        let north = clamp_lat(nw.lat);
        let south = clamp_lat(se.lat);
        if se.lon - nw.lon >= 360.0 {
            return GeoBox::new(north, south, 180.0, -180.0);
        }
        GeoBox::new(north, south, wrap_lon(se.lon), wrap_lon(nw.lon))
    }

    /// Same relation as the globe: radius 0.35 * width at zoom 1
    fn radius(&self) -> f64 {
        self.width as f64 * 0.35 * self.zoom
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn project(&self, p: GeoPoint) -> Option<ScreenPoint> {
        if p.lat.abs() > MAX_MERCATOR_LAT {
            return None;
        }
        let (x, y) = mercator_xy(p.lon, p.lat);
        let (cx, cy) = self.center_xy();
        let scale = self.scale();

        // Pick the copy of the point nearest to the center
        let mut dx = x - cx;
        if dx > 0.5 {
            dx -= 1.0;
        } else if dx < -0.5 {
            dx += 1.0;
        }

        Some(ScreenPoint::new(
            dx * scale + self.width as f64 / 2.0,
            (y - cy) * scale + self.height as f64 / 2.0,
        ))
    }
}
