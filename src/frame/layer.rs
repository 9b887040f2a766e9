use crate::frame::buffer::FrameBuffer;
use crate::frame::compose::BlendMode;

/// One renderer's private drawable buffer.
///
/// A layer is either free (owned by its renderer, safe to draw into) or
/// locked (queued for or undergoing composition). The two states are
/// mutually exclusive: the engine locks a layer when the renderer submits
/// it and only unlocks it when handing it back to the free pool.
#[derive(Debug)]
pub struct Layer {
    buffer: FrameBuffer,
    blend_mode: BlendMode,
    opacity: f32,
    locked: bool,
}

impl Layer {
    /// Create an unlocked, transparent layer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            blend_mode: BlendMode::default(),
            opacity: 1.0,
            locked: false,
        }
    }

    /// Read-only view of the pixel grid. Always available; the compositor
    /// reads locked layers through this.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutable view of the pixel grid.
    ///
    /// # Panics
    ///
    /// Panics if the layer is locked: mutating a layer that is queued for
    /// composition is a programming error, not a recoverable condition.
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        assert!(!self.locked, "attempted to draw into a locked layer");
        &mut self.buffer
    }

    /// How this layer composites onto the layers below it.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Set the blend mode used at composition time.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Whole-layer opacity applied at composition time.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the composition-time opacity, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// `true` while the compositor owns this layer.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }

    /// Unlock and clear, making the layer safe to hand back to a free pool.
    pub(crate) fn recycle(&mut self) {
        self.locked = false;
        self.buffer.clear();
    }
}
