//! Anti-aliased drawing primitives over a [`FrameBuffer`].
//!
//! Both rasterizers compute an analytic coverage fraction per touched cell
//! and hand it to [`FrameBuffer::blend_pixel`], which discards anything that
//! falls outside the grid. Endpoints and centers may therefore lie off the
//! buffer entirely.

use crate::foundation::core::Rgba;
use crate::frame::buffer::FrameBuffer;

impl FrameBuffer {
    /// Draw an anti-aliased line between two cells (Xiaolin Wu).
    pub fn draw_line(&mut self, r1: i64, c1: i64, r2: i64, c2: i64, color: Rgba) {
        let steep = (r2 - r1).abs() > (c2 - c1).abs();

        // Iterate along the major axis; x runs over rows when steep.
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (r1, c1, r2, c2)
        } else {
            (c1, r1, c2, r2)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = (x1 - x0) as f64;
        let gradient = if dx == 0.0 {
            0.0
        } else {
            (y1 - y0) as f64 / dx
        };

        let mut intery = y0 as f64;
        for x in x0..=x1 {
            let base = intery.floor();
            let frac = (intery - base) as f32;
            let y = base as i64;
            if steep {
                self.blend_pixel(x, y, color, 1.0 - frac);
                if frac > 0.0 {
                    self.blend_pixel(x, y + 1, color, frac);
                }
            } else {
                self.blend_pixel(y, x, color, 1.0 - frac);
                if frac > 0.0 {
                    self.blend_pixel(y + 1, x, color, frac);
                }
            }
            intery += gradient;
        }
    }

    /// Draw a circle centered on `(row, col)`.
    ///
    /// `filled` rasterizes the whole disc with a soft one-cell rim;
    /// otherwise only an anti-aliased perimeter ring is drawn. Negative or
    /// non-finite radii draw nothing.
    pub fn draw_circle(&mut self, row: i64, col: i64, radius: f64, color: Rgba, filled: bool) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }

        let reach = radius.ceil() as i64 + 1;
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                let dist = ((dr * dr + dc * dc) as f64).sqrt();
                let coverage = if filled {
                    (radius - dist + 0.5).clamp(0.0, 1.0)
                } else {
                    (1.0 - (dist - radius).abs()).clamp(0.0, 1.0)
                };
                if coverage > 0.0 {
                    self.blend_pixel(row + dr, col + dc, color, coverage as f32);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/draw.rs"]
mod tests;
