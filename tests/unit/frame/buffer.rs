use super::*;

fn red() -> Rgba {
    Rgba::rgb(1.0, 0.0, 0.0)
}

#[test]
fn set_then_get_round_trips() {
    let mut fb = FrameBuffer::new(6, 4);
    for row in 0..4 {
        for col in 0..6 {
            let c = Rgba::new(col as f32 / 6.0, row as f32 / 4.0, 0.25, 0.5);
            fb.set_pixel(row, col, c);
            assert_eq!(fb.get_pixel(row, col), Some(c));
        }
    }
}

#[test]
fn out_of_range_set_is_clipped() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.set_pixel(2, 0, red());
    fb.set_pixel(0, 2, red());
    fb.set_pixel(99, 99, red());
    assert!(fb.cells().iter().all(|c| *c == Rgba::TRANSPARENT));
    assert_eq!(fb.get_pixel(2, 0), None);
}

#[test]
fn clear_resets_to_transparent_not_base() {
    let mut fb = FrameBuffer::with_base_color(3, 1, Rgba::rgb(0.0, 1.0, 0.0));
    fb.set_pixel(0, 1, red());
    fb.clear();
    assert_eq!(fb.get_pixel(0, 1), Some(Rgba::TRANSPARENT));
}

#[test]
fn clear_then_flatten_yields_base_everywhere() {
    let base = Rgba::rgb(0.2, 0.4, 0.6);
    let mut fb = FrameBuffer::new(5, 3);
    fb.set_pixel(1, 1, red());
    fb.clear();

    let flat = fb.flatten_with(base);
    assert_eq!(flat.len(), 5 * 3 * 4);
    for px in flat.chunks_exact(4) {
        assert_eq!(
            px,
            [
                Rgba::channel_to_u8(base.r),
                Rgba::channel_to_u8(base.g),
                Rgba::channel_to_u8(base.b),
                0xFF
            ]
        );
    }
}

#[test]
fn flatten_uses_stored_base_color() {
    let mut fb = FrameBuffer::new(2, 1);
    fb.set_base_color(Rgba::rgb(1.0, 1.0, 1.0));
    let flat = fb.flatten();
    assert_eq!(&flat[..4], [255, 255, 255, 255]);
}

#[test]
fn flatten_weights_by_alpha() {
    let mut fb = FrameBuffer::new(1, 1);
    fb.set_pixel(0, 0, Rgba::new(1.0, 0.0, 0.0, 0.5));
    // rgb * a + base * (1 - a), base defaults to opaque black
    let flat = fb.flatten();
    assert_eq!(&flat[..4], [128, 0, 0, 255]);
}

#[test]
fn blend_at_full_coverage_is_idempotent() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.blend_pixel(1, 1, red(), 1.0);
    fb.blend_pixel(1, 1, red(), 1.0);
    assert_eq!(fb.get_pixel(1, 1), Some(red()));
}

#[test]
fn blend_discards_out_of_range_coordinates() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.blend_pixel(-1, 0, red(), 1.0);
    fb.blend_pixel(0, -7, red(), 1.0);
    fb.blend_pixel(2, 0, red(), 1.0);
    fb.blend_pixel(0, 2, red(), 1.0);
    assert!(fb.cells().iter().all(|c| *c == Rgba::TRANSPARENT));
}

#[test]
fn fill_row_truncates_overlong_input() {
    let mut fb = FrameBuffer::new(2, 2);
    let colors = [red(); 5];
    fb.fill_row(0, &colors);
    fb.fill_row(9, &colors);
    assert_eq!(fb.get_pixel(0, 0), Some(red()));
    assert_eq!(fb.get_pixel(0, 1), Some(red()));
    assert_eq!(fb.get_pixel(1, 0), Some(Rgba::TRANSPARENT));
}
