/// Hard ceiling on the composited output rate, in frames per second.
pub const MAX_FPS: f64 = 30.0;

/// Renderer cadence used when a config does not specify one.
pub const DEFAULT_FPS: f64 = 15.0;

/// Layers allocated per renderer. Two gives double buffering: one layer
/// being drawn while the previous one is queued or composited.
pub const NUM_BUFFERS: usize = 2;

/// Straight-alpha RGBA color with every channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (0 = transparent, 1 = opaque).
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque black.
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Create a color, clamping every channel into `[0, 1]`.
    ///
    /// Non-finite inputs clamp to 0.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Create an opaque color from RGB channels.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Return `true` when alpha is exactly zero.
    pub fn is_transparent(self) -> bool {
        self.a == 0.0
    }

    /// Linear interpolation toward `other` by `t` across all four channels.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantize a single channel to a byte.
    pub fn channel_to_u8(c: f32) -> u8 {
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn clamp_channel(c: f32) -> f32 {
    if c.is_finite() {
        c.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
