use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::anim::compositor::AnimationLoop;
use crate::anim::renderer::{Renderer, RendererConfig};
use crate::device::encode::FrameLink;
use crate::foundation::error::{LumyteError, LumyteResult};
use crate::frame::compose::BlendMode;

/// Constructor for one renderer kind.
pub type RendererFactory = Box<dyn Fn() -> Box<dyn Renderer> + Send + Sync>;

/// Explicit mapping from renderer-kind names to factories.
///
/// Populated by whatever assembles the application; there is no scanning
/// or discovery involved.
#[derive(Default)]
pub struct RendererRegistry {
    factories: HashMap<String, RendererFactory>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a kind name, replacing any previous entry.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Renderer> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// `true` when a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Iterate over the registered kind names.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    fn create(&self, kind: &str) -> Option<Box<dyn Renderer>> {
        self.factories.get(kind).map(|factory| factory())
    }
}

/// Façade over the compositing engine for one device.
///
/// Tracks configured renderers, owns the animation loop's lifecycle, and
/// exposes the add / start / stop / clear surface to callers.
pub struct AnimationManager {
    registry: RendererRegistry,
    width: usize,
    height: usize,
    link: Option<FrameLink>,
    renderers: Vec<(Box<dyn Renderer>, RendererConfig)>,
    parked_configs: Vec<RendererConfig>,
    active: Option<AnimationLoop>,
}

impl AnimationManager {
    /// Bind a manager to a device link and a renderer registry.
    pub fn new(link: FrameLink, registry: RendererRegistry) -> Self {
        Self {
            width: link.width(),
            height: link.height(),
            link: Some(link),
            registry,
            renderers: Vec::new(),
            parked_configs: Vec::new(),
            active: None,
        }
    }

    /// `true` while the animation loop is running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Number of configured renderers.
    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    /// Instantiate and initialize a renderer kind, appending it with
    /// z-order equal to its insertion index.
    ///
    /// Fails while the loop is running, for unknown kinds, and when the
    /// renderer's `init` rejects the device.
    pub fn add_renderer(&mut self, kind: &str, config: RendererConfig) -> LumyteResult<usize> {
        if self.is_running() {
            return Err(LumyteError::config("cannot add renderers while running"));
        }
        let Some(mut renderer) = self.registry.create(kind) else {
            return Err(LumyteError::config(format!("unknown renderer kind: {kind}")));
        };
        if !renderer.init(self.width, self.height)? {
            return Err(LumyteError::config(format!(
                "renderer {kind} failed to initialize"
            )));
        }

        let zorder = self.renderers.len();
        info!(kind, zorder, "renderer added");
        self.renderers.push((renderer, config));
        Ok(zorder)
    }

    /// Start compositing all configured renderers.
    ///
    /// Returns `false` when already running or when no renderers are
    /// configured. Must be called from within a tokio runtime.
    pub fn start(&mut self, default_blend_mode: Option<BlendMode>) -> bool {
        if self.is_running() {
            error!("animation loop already running");
            return false;
        }
        if self.renderers.is_empty() {
            error!("no renderers were configured");
            return false;
        }
        let Some(link) = self.link.take() else {
            error!("device link is gone, cannot start");
            return false;
        };

        let renderers = std::mem::take(&mut self.renderers);
        self.parked_configs = renderers.iter().map(|(_, cfg)| cfg.clone()).collect();
        self.active = Some(AnimationLoop::start(renderers, link, default_blend_mode));
        true
    }

    /// Stop the animation and wait for full shutdown.
    ///
    /// `Ok(false)` when nothing was running; an `Err` surfaces a transport
    /// failure that ended the run early. Renderers stay configured and can
    /// be started again.
    pub async fn stop(&mut self) -> LumyteResult<bool> {
        let Some(active) = self.active.take() else {
            return Ok(false);
        };

        let (renderers, link, result) = active.stop().await;
        self.link = link;

        let configs = std::mem::take(&mut self.parked_configs);
        if renderers.len() != configs.len() {
            warn!(
                renderers = renderers.len(),
                configs = configs.len(),
                "renderer set changed during shutdown"
            );
        }
        self.renderers = renderers.into_iter().zip(configs).collect();

        match result {
            Ok(()) => {
                info!("animation stopped");
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "animation stopped after error");
                Err(err)
            }
        }
    }

    /// Drop all configured renderers. Only permitted while stopped.
    pub fn clear_renderers(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.renderers.clear();
        true
    }
}

impl Drop for AnimationManager {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            warn!("animation manager dropped while running, aborting tasks");
            active.abort();
        }
    }
}
