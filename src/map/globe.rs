use glam::DVec3;
use std::f64::consts::PI;

use crate::geo::{wrap_lon, GeoBox, GeoPoint};
use crate::layout::ScreenPoint;
use crate::map::{MercatorViewport, Viewport};

/// Samples per screen edge when estimating the visible box
const EDGE_SAMPLES: usize = 16;
/// Samples around the limb of the sphere
const LIMB_SAMPLES: usize = 64;

/// Globe viewport using orthographic projection of a rotating sphere.
/// Orientation stored as a rotation matrix (3 column vectors).
#[derive(Clone, Debug)]
pub struct GlobeViewport {
    /// Forward direction (what points at the camera)
    forward: DVec3,
    /// Right direction
    right: DVec3,
    /// Up direction
    up: DVec3,
    /// Sphere radius in pixels (controls zoom)
    pub radius: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl GlobeViewport {
    /// Build a globe viewport centered on (lon, lat) with given radius.
    pub fn new(center_lon: f64, center_lat: f64, radius: f64, width: usize, height: usize) -> Self {
        let lon_rad = center_lon.to_radians();
        let lat_rad = center_lat.to_radians();

        let forward = lonlat_to_vec3(center_lon, center_lat);

        // Derivative of forward w.r.t. latitude (points north on sphere)
        let raw_up = DVec3::new(
            -lat_rad.sin() * lon_rad.cos(),
            -lat_rad.sin() * lon_rad.sin(),
            lat_rad.cos(),
        );

        let right = forward.cross(raw_up).normalize();
        let up = right.cross(forward).normalize();

        Self {
            forward,
            right,
            up,
            radius,
            width,
            height,
        }
    }

    /// Whole-globe view for a canvas of the given size
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 20.0, width as f64 * 0.35, width, height)
    }

    /// Convert a Mercator viewport to a globe, preserving center and proportional zoom.
    pub fn from_mercator(vp: &MercatorViewport) -> Self {
        Self::new(vp.center_lon, vp.center_lat, vp.radius(), vp.width, vp.height)
    }

    /// Convert back to Mercator, preserving center and zoom.
    pub fn to_mercator(&self) -> MercatorViewport {
        let c = self.center();
        MercatorViewport::new(c.lon, c.lat.clamp(-85.0, 85.0), self.effective_zoom(), self.width, self.height)
    }

    /// The geographic point at the center of the view
    pub fn center(&self) -> GeoPoint {
        vec3_to_geo(self.forward)
    }

    /// Unproject screen pixels back to a geographic point.
    /// Returns `None` if the point is outside the sphere disk.
    pub fn unproject(&self, px: f64, py: f64) -> Option<GeoPoint> {
        let sx = (px - self.width as f64 / 2.0) / self.radius;
        let sy = -(py - self.height as f64 / 2.0) / self.radius;

        let r2 = sx * sx + sy * sy;
        if r2 > 1.0 {
            return None;
        }

        let sz = (1.0 - r2).sqrt();
        Some(vec3_to_geo(self.right * sx + self.up * sy + self.forward * sz))
    }

    /// Rotate the globe by a pixel drag delta.
    /// Positive dx = dragged left, globe center shifts east.
    pub fn rotate_drag(&mut self, dx: i32, dy: i32) {
        let angle_x = (dx as f64) / self.radius;
        let angle_y = -(dy as f64) / self.radius;
        self.rotate(angle_x, angle_y);
    }

    fn rotate(&mut self, angle_x: f64, angle_y: f64) {
        // Around the up axis: longitude change
        if angle_x.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_x.sin_cos();
            let new_forward = self.forward * cos_a + self.right * sin_a;
            let new_right = self.right * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.right = new_right.normalize();
        }

        // Around the right axis: latitude change
        if angle_y.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_y.sin_cos();
            let new_forward = self.forward * cos_a + self.up * sin_a;
            let new_up = self.up * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.up = new_up.normalize();
        }
    }

    fn min_radius(&self) -> f64 {
        self.width as f64 * 0.35
    }

    fn max_radius(&self) -> f64 {
        self.width as f64 * 35.0
    }

    /// Zoom in by scaling the sphere radius.
    pub fn zoom_in(&mut self) {
        self.radius = (self.radius * 1.5).min(self.max_radius());
    }

    /// Zoom out by scaling the sphere radius.
    pub fn zoom_out(&mut self) {
        self.radius = (self.radius / 1.5).max(self.min_radius());
    }

    /// Zoom by factor towards a specific pixel, keeping the geographic point under cursor fixed.
    pub fn zoom_at(&mut self, px: f64, py: f64, factor: f64) {
        let target = self.unproject(px, py);

        self.radius = (self.radius * factor).clamp(self.min_radius(), self.max_radius());

        if let Some(p) = target {
            let target_vec = lonlat_to_vec3(p.lon, p.lat);
            let sx_now = target_vec.dot(self.right);
            let sy_now = target_vec.dot(self.up);
            let sx_want = (px - self.width as f64 / 2.0) / self.radius;
            let sy_want = -(py - self.height as f64 / 2.0) / self.radius;

            self.rotate(-(sx_want - sx_now), sy_want - sy_now);
        }
    }

    /// Effective zoom level normalized to match Mercator's zoom=1 at world view.
    pub fn effective_zoom(&self) -> f64 {
        self.radius / self.min_radius()
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Whether a pole is on the visible hemisphere and inside the screen
    fn pole_on_screen(&self, lat: f64) -> bool {
        self.project(GeoPoint::new(0.0, lat))
            .is_some_and(|p| p.x >= 0.0 && p.x <= self.width as f64 && p.y >= 0.0 && p.y <= self.height as f64)
    }
}

impl Viewport for GlobeViewport {
    /// Conservative lat/lon box of the visible part of the sphere.
    /// Samples the screen border where it hits the sphere and the limb
    /// where it lies on screen.
    fn visible_box(&self) -> GeoBox {
        if self.width == 0 || self.height == 0 || self.radius <= 0.0 {
            return GeoBox::new(0.0, 0.0, 0.0, 0.0);
        }

        let w = self.width as f64;
        let h = self.height as f64;
        let mut samples = Vec::with_capacity(EDGE_SAMPLES * 4 + LIMB_SAMPLES + 1);
        samples.push(self.center());

        for i in 0..=EDGE_SAMPLES {
            let t = i as f64 / EDGE_SAMPLES as f64;
            for (px, py) in [(t * w, 0.0), (t * w, h), (0.0, t * h), (w, t * h)] {
                if let Some(p) = self.unproject(px, py) {
                    samples.push(p);
                }
            }
        }

        for i in 0..LIMB_SAMPLES {
            let angle = (i as f64 / LIMB_SAMPLES as f64) * 2.0 * PI;
            let (sy, sx) = angle.sin_cos();
            let px = w / 2.0 + sx * self.radius;
            let py = h / 2.0 - sy * self.radius;
            if px >= 0.0 && px <= w && py >= 0.0 && py <= h {
                samples.push(vec3_to_geo(self.right * sx + self.up * sy));
            }
        }

        let center = self.center();
        let mut north = f64::MIN;
        let mut south = f64::MAX;
        let mut min_dlon = 0.0_f64;
        let mut max_dlon = 0.0_f64;
        for p in &samples {
            north = north.max(p.lat);
            south = south.min(p.lat);
            let d = wrap_lon(p.lon - center.lon);
            min_dlon = min_dlon.min(d);
            max_dlon = max_dlon.max(d);
        }

        let north_pole = self.pole_on_screen(90.0);
        let south_pole = self.pole_on_screen(-90.0);
        if north_pole {
            north = 90.0;
        }
        if south_pole {
            south = -90.0;
        }

        // A visible pole or a span near half the planet means every longitude may show
        if north_pole || south_pole || max_dlon - min_dlon >= 179.0 {
            return GeoBox::new(north.min(90.0), south.max(-90.0), 180.0, -180.0);
        }

        GeoBox::new(
            north.min(90.0),
            south.max(-90.0),
            wrap_lon(center.lon + max_dlon),
            wrap_lon(center.lon + min_dlon),
        )
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    /// Returns `None` for back-face points (behind the visible hemisphere).
    fn project(&self, p: GeoPoint) -> Option<ScreenPoint> {
        let v = lonlat_to_vec3(p.lon, p.lat);

        if v.dot(self.forward) < 0.0 {
            return None;
        }

        // Orthographic: project onto right/up plane
        let sx = v.dot(self.right);
        let sy = v.dot(self.up);

        Some(ScreenPoint::new(
            self.width as f64 / 2.0 + sx * self.radius,
            self.height as f64 / 2.0 - sy * self.radius,
        ))
    }
}

/// Convert lon/lat (degrees) to a unit sphere vector.
#[inline(always)]
fn lonlat_to_vec3(lon: f64, lat: f64) -> DVec3 {
    let lon_rad = lon.to_radians();
    let lat_rad = lat.to_radians();
    DVec3::new(
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.cos() * lon_rad.sin(),
        lat_rad.sin(),
    )
}

#[inline(always)]
fn vec3_to_geo(v: DVec3) -> GeoPoint {
    GeoPoint::new(v.y.atan2(v.x).to_degrees(), v.z.clamp(-1.0, 1.0).asin().to_degrees())
}
