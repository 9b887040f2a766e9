use super::*;
use crate::frame::buffer::FrameBuffer;

fn red() -> Rgba {
    Rgba::rgb(1.0, 0.0, 0.0)
}

#[test]
fn horizontal_line_covers_cells_exactly() {
    let mut fb = FrameBuffer::new(5, 3);
    fb.draw_line(1, 0, 1, 4, red());
    for col in 0..5 {
        assert_eq!(fb.get_pixel(1, col), Some(red()), "col {col}");
    }
    // zero-coverage neighbors are never written
    for col in 0..5 {
        assert_eq!(fb.get_pixel(0, col), Some(Rgba::TRANSPARENT));
        assert_eq!(fb.get_pixel(2, col), Some(Rgba::TRANSPARENT));
    }
}

#[test]
fn diagonal_line_covers_the_diagonal() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.draw_line(0, 0, 3, 3, red());
    for i in 0..4 {
        assert_eq!(fb.get_pixel(i, i), Some(red()), "cell {i},{i}");
    }
}

#[test]
fn steep_line_covers_the_column() {
    let mut fb = FrameBuffer::new(3, 6);
    fb.draw_line(0, 1, 5, 1, red());
    for row in 0..6 {
        assert_eq!(fb.get_pixel(row, 1), Some(red()), "row {row}");
    }
}

#[test]
fn line_with_offscreen_endpoints_stays_in_range() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.draw_line(-10, -10, 10, 10, red());
    // everything written stays a valid channel value
    for cell in fb.cells() {
        for c in [cell.r, cell.g, cell.b, cell.a] {
            assert!((0.0..=1.0).contains(&c));
        }
    }
    // the visible diagonal did get drawn
    assert_eq!(fb.get_pixel(2, 2), Some(red()));
}

#[test]
fn circle_outline_leaves_center_untouched() {
    let mut fb = FrameBuffer::new(9, 9);
    fb.draw_circle(4, 4, 3.0, red(), false);
    assert_eq!(fb.get_pixel(4, 4), Some(Rgba::TRANSPARENT));
    // a cell exactly on the radius gets full coverage
    assert_eq!(fb.get_pixel(4, 7), Some(red()));
}

#[test]
fn filled_circle_has_opaque_center_and_soft_rim() {
    let mut fb = FrameBuffer::new(7, 7);
    fb.draw_circle(3, 3, 2.0, red(), true);
    assert_eq!(fb.get_pixel(3, 3), Some(red()));
    // on the radius, coverage falls to one half
    let rim = fb.get_pixel(3, 5).unwrap();
    assert!((rim.a - 0.5).abs() < 1e-6, "rim alpha was {}", rim.a);
}

#[test]
fn circle_clipped_by_the_edge_never_panics() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.draw_circle(0, 0, 3.0, red(), true);
    fb.draw_circle(-2, -2, 5.0, red(), false);
    assert_eq!(fb.get_pixel(0, 0), Some(red()));
}

#[test]
fn degenerate_radii_draw_nothing() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.draw_circle(1, 1, -1.0, red(), true);
    fb.draw_circle(1, 1, f64::NAN, red(), false);
    assert!(fb.cells().iter().all(|c| *c == Rgba::TRANSPARENT));
}
