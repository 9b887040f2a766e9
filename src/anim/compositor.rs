use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::anim::renderer::{Renderer, RendererConfig, drive};
use crate::anim::ticker::Ticker;
use crate::device::encode::FrameLink;
use crate::foundation::core::{MAX_FPS, NUM_BUFFERS};
use crate::foundation::error::{LumyteError, LumyteResult};
use crate::frame::buffer::FrameBuffer;
use crate::frame::compose::{BlendMode, merge_layer};
use crate::frame::layer::Layer;

/// The running compositing machinery: one task per renderer plus the
/// merge-and-transmit loop, joined by a fan-in submission channel and a
/// shared stop signal.
///
/// Renderers submit `(slot, layer)` pairs into one bounded channel; the
/// loop suspends until at least one submission arrives, opportunistically
/// drains whatever else is already ready, then merges every last-known
/// layer in ascending z-order and pushes the result to the hardware. The
/// submission channel is bounded, so a renderer that outruns the
/// compositor suspends once its free pool is exhausted.
pub struct AnimationLoop {
    stop_tx: Arc<watch::Sender<bool>>,
    renderer_tasks: Vec<JoinHandle<Box<dyn Renderer>>>,
    loop_task: JoinHandle<(FrameLink, LumyteResult<()>)>,
}

impl AnimationLoop {
    /// Allocate layer pools, spawn every renderer task and the loop task.
    ///
    /// Each renderer gets [`NUM_BUFFERS`] fresh layers stamped with its
    /// effective blend mode, opacity, and background color.
    pub(crate) fn start(
        renderers: Vec<(Box<dyn Renderer>, RendererConfig)>,
        link: FrameLink,
        default_blend_mode: Option<BlendMode>,
    ) -> Self {
        let (width, height) = (link.width(), link.height());
        let (stop_tx, _) = watch::channel(false);
        let stop_tx = Arc::new(stop_tx);

        let (submit_tx, submit_rx) = mpsc::channel(renderers.len().max(1) * NUM_BUFFERS);

        let mut avail_txs = Vec::with_capacity(renderers.len());
        let mut renderer_tasks = Vec::with_capacity(renderers.len());
        for (slot, (renderer, config)) in renderers.into_iter().enumerate() {
            let (avail_tx, avail_rx) = mpsc::channel(NUM_BUFFERS);
            let blend = config
                .blend_mode()
                .or(default_blend_mode)
                .unwrap_or_default();
            for _ in 0..NUM_BUFFERS {
                let mut layer = Layer::new(width, height);
                layer.set_blend_mode(blend);
                layer.set_opacity(config.opacity());
                layer
                    .buffer_mut()
                    .set_base_color(config.background_color());
                avail_tx
                    .try_send(layer)
                    .expect("fresh layer pool cannot be full");
            }

            avail_txs.push(avail_tx.clone());
            renderer_tasks.push(tokio::spawn(drive(
                slot,
                renderer,
                config.fps(),
                avail_rx,
                avail_tx,
                submit_tx.clone(),
                stop_tx.subscribe(),
            )));
        }
        drop(submit_tx);

        let frame = FrameBuffer::new(width, height);
        let loop_task = tokio::spawn(run(
            link,
            frame,
            avail_txs,
            submit_rx,
            stop_tx.subscribe(),
            Arc::clone(&stop_tx),
        ));

        info!(width, height, renderers = renderer_tasks.len(), "animation loop started");
        Self {
            stop_tx,
            renderer_tasks,
            loop_task,
        }
    }

    /// Signal shutdown, then wait for every task to reach its terminal
    /// state. Returns the renderers for reuse, the device link, and the
    /// loop's exit result (a transport failure surfaces here).
    pub(crate) async fn stop(self) -> (Vec<Box<dyn Renderer>>, Option<FrameLink>, LumyteResult<()>) {
        let _ = self.stop_tx.send(true);

        let mut renderers = Vec::with_capacity(self.renderer_tasks.len());
        for task in self.renderer_tasks {
            match task.await {
                Ok(renderer) => renderers.push(renderer),
                Err(err) => error!(error = %err, "renderer task died"),
            }
        }

        match self.loop_task.await {
            Ok((link, result)) => (renderers, Some(link), result),
            Err(err) => (
                renderers,
                None,
                Err(LumyteError::render(format!("compositor task died: {err}"))),
            ),
        }
    }

    /// Last-resort shutdown for drop paths that cannot await: signal stop
    /// and abort whatever has not unwound yet.
    pub(crate) fn abort(self) {
        let _ = self.stop_tx.send(true);
        for task in &self.renderer_tasks {
            task.abort();
        }
        self.loop_task.abort();
    }
}

async fn run(
    mut link: FrameLink,
    mut frame: FrameBuffer,
    avail: Vec<mpsc::Sender<Layer>>,
    mut submit_rx: mpsc::Receiver<(usize, Layer)>,
    mut stop_rx: watch::Receiver<bool>,
    stop_tx: Arc<watch::Sender<bool>>,
) -> (FrameLink, LumyteResult<()>) {
    let mut last: Vec<Option<Layer>> = (0..avail.len()).map(|_| None).collect();
    let mut ticker = Ticker::from_fps(MAX_FPS);
    info!("compositor running");

    let result = loop {
        ticker.start();

        // Suspend until at least one renderer submits.
        let first = tokio::select! {
            _ = stop_rx.changed() => break Ok(()),
            submitted = submit_rx.recv() => submitted,
        };
        let Some((slot, layer)) = first else {
            // Every renderer is gone; nothing left to composite.
            warn!("all renderers exited, compositor stopping");
            break Ok(());
        };
        accept(&mut last, &avail, slot, layer);

        // Pick up every other renderer that is already done this cycle.
        while let Ok((slot, layer)) = submit_rx.try_recv() {
            accept(&mut last, &avail, slot, layer);
        }

        if *stop_rx.borrow() {
            break Ok(());
        }

        // Merge in ascending z-order, then push to the hardware.
        frame.clear();
        for layer in last.iter().flatten() {
            merge_layer(&mut frame, layer);
        }
        if let Err(err) = link.update(&frame, None) {
            error!(error = %err, "hardware update failed, forcing stop");
            let _ = stop_tx.send(true);
            break Err(err);
        }

        tokio::select! {
            _ = stop_rx.changed() => break Ok(()),
            _ = ticker.tick() => {}
        }
    };

    // Discard remaining output and unlock retained layers before they drop.
    submit_rx.close();
    while submit_rx.try_recv().is_ok() {}
    for layer in last.iter_mut().flatten() {
        layer.unlock();
    }

    info!("compositor exiting");
    (link, result)
}

/// Record a submission as the renderer's current contribution, returning
/// its previous layer to that renderer's free pool.
fn accept(last: &mut [Option<Layer>], avail: &[mpsc::Sender<Layer>], slot: usize, layer: Layer) {
    if let Some(mut prev) = last[slot].take() {
        prev.recycle();
        // A renderer that already exited simply lets its layer drop.
        let _ = avail[slot].try_send(prev);
    }
    last[slot] = Some(layer);
}
