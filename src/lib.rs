//! Lumyte drives multi-zone addressable-RGB peripherals over a HID
//! transport.
//!
//! Client code registers effect renderers, each producing timed frames at
//! its own rate; the engine merges their output into one composited image
//! and streams it to the hardware as a chunked binary protocol:
//!
//! - Register renderer kinds in a [`RendererRegistry`]
//! - Bind an [`AnimationManager`] to a device's [`FrameLink`]
//! - Add renderers, then `start` / `stop` the animation
//!
//! Renderers and the compositing loop are independent tokio tasks that
//! only ever suspend (on layer exchange, timer ticks, or input events),
//! so an idle animation consumes no cycles.
#![forbid(unsafe_code)]

pub mod anim;
pub mod device;
pub mod foundation;
pub mod frame;

pub use crate::foundation::core::{DEFAULT_FPS, MAX_FPS, NUM_BUFFERS, Rgba};
pub use crate::foundation::error::{LumyteError, LumyteResult};

pub use crate::anim::manager::{AnimationManager, RendererFactory, RendererRegistry};
pub use crate::anim::renderer::{Renderer, RendererConfig, RendererMeta};
pub use crate::anim::ticker::Ticker;
pub use crate::device::command::{Command, Quirk};
pub use crate::device::encode::FrameLink;
pub use crate::device::input::{InputSource, KeyEvent};
pub use crate::device::transport::Transport;
pub use crate::frame::buffer::FrameBuffer;
pub use crate::frame::compose::BlendMode;
pub use crate::frame::layer::Layer;
