//! Shared fixtures for the integration tests: a recording transport and a
//! few scripted renderers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lumyte::{
    Command, FrameLink, Layer, LumyteError, LumyteResult, Quirk, Renderer, RendererMeta, Rgba,
    Transport,
};

/// One captured transport write.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub command: Command,
    pub args: Vec<u8>,
    pub transaction_id: Option<u8>,
    pub remaining_packets: usize,
}

/// Transport stub that records every transaction.
#[derive(Default)]
pub struct RecordingTransport {
    pub fail_all: bool,
    pub calls: Arc<Mutex<Vec<Recorded>>>,
}

impl Transport for RecordingTransport {
    fn run_command(
        &mut self,
        command: Command,
        args: &[u8],
        transaction_id: Option<u8>,
        remaining_packets: usize,
    ) -> LumyteResult<()> {
        if self.fail_all {
            return Err(LumyteError::transport("device went away"));
        }
        self.calls.lock().unwrap().push(Recorded {
            command,
            args: args.to_vec(),
            transaction_id,
            remaining_packets,
        });
        Ok(())
    }

    fn has_quirk(&self, _quirk: Quirk) -> bool {
        false
    }
}

/// A working device link plus a handle onto its recorded calls.
pub fn recording_link(width: usize, height: usize) -> (FrameLink, Arc<Mutex<Vec<Recorded>>>) {
    let transport = RecordingTransport::default();
    let calls = Arc::clone(&transport.calls);
    let link = FrameLink::new(Box::new(transport), width, height).unwrap();
    (link, calls)
}

/// A device link whose every write fails.
pub fn broken_link(width: usize, height: usize) -> FrameLink {
    let transport = RecordingTransport {
        fail_all: true,
        ..Default::default()
    };
    FrameLink::new(Box::new(transport), width, height).unwrap()
}

/// Count how many display flips the transport has seen.
pub fn flips(calls: &Arc<Mutex<Vec<Recorded>>>) -> usize {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.command == Command::ShowFrame)
        .count()
}

/// Spin (in virtual time) until `pred` holds.
pub async fn wait_until(pred: impl Fn() -> bool) {
    for _ in 0..10_000 {
        if pred() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

fn test_meta(name: &'static str) -> RendererMeta {
    RendererMeta {
        display_name: name,
        description: "integration fixture",
        author: "tests",
        version: "0",
    }
}

/// Fills its whole layer with one opaque color every frame.
pub struct SolidRenderer {
    pub color: Rgba,
    pub draws: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Renderer for SolidRenderer {
    fn meta(&self) -> RendererMeta {
        test_meta("solid")
    }

    async fn draw(&mut self, layer: &mut Layer, _timestamp: Instant) -> LumyteResult<bool> {
        let (width, height) = (layer.buffer().width(), layer.buffer().height());
        for row in 0..height {
            for col in 0..width {
                layer.buffer_mut().set_pixel(row, col, self.color);
            }
        }
        self.draws.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Never has anything to show.
pub struct IdleRenderer;

#[async_trait::async_trait]
impl Renderer for IdleRenderer {
    fn meta(&self) -> RendererMeta {
        test_meta("idle")
    }

    async fn draw(&mut self, _layer: &mut Layer, _timestamp: Instant) -> LumyteResult<bool> {
        Ok(false)
    }
}

/// Suspends forever inside its draw step.
pub struct StuckRenderer;

#[async_trait::async_trait]
impl Renderer for StuckRenderer {
    fn meta(&self) -> RendererMeta {
        test_meta("stuck")
    }

    async fn draw(&mut self, _layer: &mut Layer, _timestamp: Instant) -> LumyteResult<bool> {
        std::future::pending().await
    }
}

/// Rejects the device at init time.
pub struct RefusingRenderer;

#[async_trait::async_trait]
impl Renderer for RefusingRenderer {
    fn meta(&self) -> RendererMeta {
        test_meta("refusing")
    }

    fn init(&mut self, _width: usize, _height: usize) -> LumyteResult<bool> {
        Ok(false)
    }

    async fn draw(&mut self, _layer: &mut Layer, _timestamp: Instant) -> LumyteResult<bool> {
        Ok(false)
    }
}

/// Fails its draw step after a configurable number of good frames.
pub struct FlakyRenderer {
    pub good_frames: usize,
    pub color: Rgba,
}

#[async_trait::async_trait]
impl Renderer for FlakyRenderer {
    fn meta(&self) -> RendererMeta {
        test_meta("flaky")
    }

    async fn draw(&mut self, layer: &mut Layer, _timestamp: Instant) -> LumyteResult<bool> {
        if self.good_frames == 0 {
            return Err(LumyteError::render("effect state corrupted"));
        }
        self.good_frames -= 1;
        let (width, height) = (layer.buffer().width(), layer.buffer().height());
        for row in 0..height {
            for col in 0..width {
                layer.buffer_mut().set_pixel(row, col, self.color);
            }
        }
        Ok(true)
    }
}
