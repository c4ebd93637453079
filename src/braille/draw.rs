use placemark_layout::layout::ScreenPoint;

use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Connect consecutive projected points. A `None` (unprojectable sample)
/// or a jump longer than `max_jump` pixels breaks the line.
pub fn draw_polyline(canvas: &mut BrailleCanvas, points: &[Option<ScreenPoint>], max_jump: f64) {
    for pair in points.windows(2) {
        let (Some(a), Some(b)) = (pair[0], pair[1]) else {
            continue;
        };
        if (b.x - a.x).abs() > max_jump || (b.y - a.y).abs() > max_jump {
            continue;
        }
        draw_line(canvas, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }
}

/// Circle outline, used for the limb of the globe
pub fn draw_ring(canvas: &mut BrailleCanvas, center: ScreenPoint, radius: f64) {
    let steps = ((radius * 2.0 * std::f64::consts::PI) as usize).clamp(16, 4096);
    let points: Vec<Option<ScreenPoint>> = (0..=steps)
        .map(|i| {
            let a = i as f64 / steps as f64 * std::f64::consts::TAU;
            Some(ScreenPoint::new(center.x + radius * a.cos(), center.y + radius * a.sin()))
        })
        .collect();
    draw_polyline(canvas, &points, f64::INFINITY);
}
