#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered_on(center: ScreenPoint, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Open-interval overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.right() <= other.left()
            || other.right() <= self.left()
            || self.bottom() <= other.top()
            || other.bottom() <= self.top())
    }

    /// Closed on the top/left edge, open on the bottom/right edge
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
        let b = ScreenRect::new(10.0, 0.0, 10.0, 10.0);
        let c = ScreenRect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&ScreenRect::new(9.0, 9.0, 2.0, 2.0)));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
        let empty = ScreenRect::new(5.0, 5.0, 0.0, 4.0);
        assert!(!a.intersects(&empty));
        assert!(!empty.intersects(&a));
    }

    #[test]
    fn test_centered_on() {
        let r = ScreenRect::centered_on(ScreenPoint::new(50.0, 20.0), 10.0, 4.0);
        assert_eq!(r, ScreenRect::new(45.0, 18.0, 10.0, 4.0));
        assert_eq!(r.center(), ScreenPoint::new(50.0, 20.0));
        assert!(r.contains(ScreenPoint::new(45.0, 18.0)));
        assert!(!r.contains(ScreenPoint::new(55.0, 18.0)));
    }
}
