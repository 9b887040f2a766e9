use std::time::{Duration, Instant};

use crate::foundation::error::LumyteResult;

/// A single key event delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Device-specific key code.
    pub code: u32,
    /// `true` on press, `false` on release.
    pub pressed: bool,
    /// When the event was captured.
    pub timestamp: Instant,
}

/// Key-event source attached to renderers that declare key input.
///
/// The engine attaches the source when such a renderer starts and detaches
/// it when the renderer stops; the renderer itself only ever awaits
/// [`InputSource::get_events`] from inside its draw step.
#[async_trait::async_trait]
pub trait InputSource: Send {
    /// Register interest in key events.
    fn attach(&mut self);

    /// Drop interest in key events.
    fn detach(&mut self);

    /// Keep delivered events around for this long, so a renderer can act on
    /// groups of events over time. `None` delivers each event exactly once.
    fn set_expire_window(&mut self, window: Option<Duration>);

    /// The configured expiry window, if any.
    fn expire_window(&self) -> Option<Duration>;

    /// Suspend until at least one event is available.
    ///
    /// With an expiry window configured, returns every event still inside
    /// the window; otherwise returns whatever arrived since the last call.
    async fn get_events(&mut self) -> LumyteResult<Vec<KeyEvent>>;
}
