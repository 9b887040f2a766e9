use crate::foundation::core::Rgba;
use crate::frame::buffer::FrameBuffer;
use crate::frame::layer::Layer;

/// How a layer's pixels combine with what is already composited below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// Darkens: channel product with the backdrop.
    Multiply,
    /// Lightens: inverse product with the backdrop.
    Screen,
    /// Clamped channel sum with the backdrop.
    Additive,
}

impl BlendMode {
    fn mix(self, s: f32, d: f32) -> f32 {
        match self {
            BlendMode::Normal => s,
            BlendMode::Multiply => s * d,
            BlendMode::Screen => 1.0 - (1.0 - s) * (1.0 - d),
            BlendMode::Additive => (s + d).min(1.0),
        }
    }
}

/// Composite one straight-alpha source pixel over a destination pixel.
///
/// The mode's channel mix is weighted by the backdrop's alpha (a transparent
/// backdrop leaves the source color untouched for every mode), then the
/// result is source-over composited. `opacity` scales the source alpha.
pub fn blend(dst: Rgba, src: Rgba, mode: BlendMode, opacity: f32) -> Rgba {
    let opacity = opacity.clamp(0.0, 1.0);
    let sa = src.a * opacity;
    if sa <= 0.0 {
        return dst;
    }

    let da = dst.a;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba::TRANSPARENT;
    }

    let channel = |s: f32, d: f32| {
        let m = mode.mix(s, d);
        let src_c = s + (m - s) * da;
        (src_c * sa + d * da * (1.0 - sa)) / out_a
    };

    Rgba::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        out_a,
    )
}

/// Merge a layer's pixels into the device frame through the layer's blend
/// mode and opacity. Grids are expected to share dimensions; any mismatch
/// merges the overlapping region only.
pub fn merge_layer(dst: &mut FrameBuffer, layer: &Layer) {
    let src = layer.buffer();
    debug_assert_eq!(
        (dst.width(), dst.height()),
        (src.width(), src.height()),
        "layer dimensions must match the device frame"
    );

    let rows = dst.height().min(src.height());
    let cols = dst.width().min(src.width());
    let mode = layer.blend_mode();
    let opacity = layer.opacity();

    for row in 0..rows {
        for col in 0..cols {
            let s = src.get_pixel(row, col).unwrap_or(Rgba::TRANSPARENT);
            if s.is_transparent() {
                continue;
            }
            let d = dst.get_pixel(row, col).unwrap_or(Rgba::TRANSPARENT);
            dst.set_pixel(row, col, blend(d, s, mode, opacity));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/compose.rs"]
mod tests;
