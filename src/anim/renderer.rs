use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use crate::anim::ticker::Ticker;
use crate::device::input::InputSource;
use crate::foundation::core::{DEFAULT_FPS, MAX_FPS, Rgba};
use crate::foundation::error::LumyteResult;
use crate::frame::compose::BlendMode;
use crate::frame::layer::Layer;

/// Identity card carried by every renderer implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererMeta {
    /// Human-readable effect name.
    pub display_name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Author attribution.
    pub author: &'static str,
    /// Implementation version string.
    pub version: &'static str,
}

/// Per-renderer configuration, captured when the renderer is added and
/// fixed for the duration of a run.
///
/// Setters clamp their input instead of erroring, so a config is always
/// valid by construction.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RendererConfig {
    fps: f64,
    opacity: f32,
    blend_mode: Option<BlendMode>,
    background_color: Rgba,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            opacity: 1.0,
            blend_mode: None,
            background_color: Rgba::TRANSPARENT,
        }
    }
}

impl RendererConfig {
    /// Defaults: [`DEFAULT_FPS`], full opacity, engine-default blend mode,
    /// transparent background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target draw rate, frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Set the draw rate, clamped into `(0, MAX_FPS]`. Non-finite or
    /// non-positive values fall back to [`DEFAULT_FPS`].
    pub fn set_fps(&mut self, fps: f64) {
        self.fps = if fps.is_finite() && fps > 0.0 {
            fps.min(MAX_FPS)
        } else {
            DEFAULT_FPS
        };
    }

    /// Builder form of [`RendererConfig::set_fps`].
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.set_fps(fps);
        self
    }

    /// Whole-layer opacity applied at composition time.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the composition opacity, clamped into `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Builder form of [`RendererConfig::set_opacity`].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    /// Blend mode override; `None` uses the loop's default.
    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.blend_mode
    }

    /// Override the blend mode for this renderer's layers.
    pub fn set_blend_mode(&mut self, mode: Option<BlendMode>) {
        self.blend_mode = mode;
    }

    /// Builder form of [`RendererConfig::set_blend_mode`].
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    /// Background color stamped onto this renderer's layer buffers.
    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    /// Set the layer background color.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
    }

    /// Builder form of [`RendererConfig::set_background_color`].
    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }
}

/// A timed producer of layer content.
///
/// Implementations draw into the layer handed to them and never touch the
/// device; the engine owns pacing, layer exchange, and composition. A draw
/// step may suspend freely (waiting on input events, for instance) without
/// holding up any other renderer.
#[async_trait::async_trait]
pub trait Renderer: Send {
    /// Identity card for logs and registries.
    fn meta(&self) -> RendererMeta;

    /// Key-event source, for renderers that react to typing. The engine
    /// attaches it on start and detaches it on stop.
    fn input(&mut self) -> Option<&mut dyn InputSource> {
        None
    }

    /// One-time setup before the first draw, with the device dimensions.
    /// Returning `Ok(false)` or an error aborts adding the renderer.
    fn init(&mut self, width: usize, height: usize) -> LumyteResult<bool> {
        let _ = (width, height);
        Ok(true)
    }

    /// Produce one frame into `layer`.
    ///
    /// Return `Ok(true)` to submit the layer for composition, `Ok(false)`
    /// when there is nothing to show this cycle. An error stops this
    /// renderer only; the rest of the animation keeps running.
    async fn draw(&mut self, layer: &mut Layer, timestamp: Instant) -> LumyteResult<bool>;

    /// One-time cleanup, invoked exactly once when the renderer stops.
    fn finish(&mut self) {}
}

/// Drive one renderer until it stops or is told to.
///
/// Each iteration: acquire a free layer (suspending while the pool is
/// empty), draw with a monotonic timestamp, lock and submit on success,
/// then sleep out the frame budget. All suspension points also watch the
/// stop signal so shutdown unwinds promptly.
pub(crate) async fn drive(
    slot: usize,
    mut renderer: Box<dyn Renderer>,
    fps: f64,
    mut avail_rx: mpsc::Receiver<Layer>,
    avail_tx: mpsc::Sender<Layer>,
    submit_tx: mpsc::Sender<(usize, Layer)>,
    mut stop_rx: watch::Receiver<bool>,
) -> Box<dyn Renderer> {
    let name = renderer.meta().display_name;
    info!(slot, renderer = name, fps, "renderer starting");

    if let Some(queue) = renderer.input() {
        queue.attach();
    }

    let mut ticker = Ticker::from_fps(fps);
    loop {
        ticker.start();

        let mut layer = tokio::select! {
            _ = stop_rx.changed() => break,
            layer = avail_rx.recv() => match layer {
                Some(layer) => layer,
                None => break,
            },
        };

        let timestamp = Instant::now();
        let drawn = tokio::select! {
            _ = stop_rx.changed() => break,
            drawn = renderer.draw(&mut layer, timestamp) => drawn,
        };

        match drawn {
            Ok(true) => {
                layer.lock();
                let submitted = tokio::select! {
                    _ = stop_rx.changed() => false,
                    sent = submit_tx.send((slot, layer)) => sent.is_ok(),
                };
                if !submitted {
                    break;
                }
            }
            Ok(false) => {
                // Nothing to show; hand the layer straight back to our pool.
                let _ = avail_tx.try_send(layer);
            }
            Err(err) => {
                error!(slot, renderer = name, error = %err, "draw failed, stopping renderer");
                break;
            }
        }

        tokio::select! {
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {}
        }
    }

    // Flush: no stale layer outlives the renderer.
    while avail_rx.try_recv().is_ok() {}

    if let Some(queue) = renderer.input() {
        queue.detach();
    }
    renderer.finish();
    info!(slot, renderer = name, "renderer stopped");
    renderer
}
