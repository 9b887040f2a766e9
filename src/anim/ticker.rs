use std::time::{Duration, Instant};

use crate::foundation::core::{DEFAULT_FPS, MAX_FPS};

/// Wall-clock frame pacing.
///
/// Call [`Ticker::start`] at the top of a frame and [`Ticker::tick`] at the
/// bottom; `tick` suspends for whatever remains of the frame budget. A frame
/// that overran its budget yields without sleeping, so pacing never
/// busy-waits and never blocks the scheduler.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    started: Option<Instant>,
}

impl Ticker {
    /// Build a ticker for the given rate, clamped into `(0, MAX_FPS]`.
    ///
    /// Non-finite or non-positive rates fall back to [`DEFAULT_FPS`].
    pub fn from_fps(fps: f64) -> Self {
        Self {
            period: period_for(fps),
            started: None,
        }
    }

    /// The current frame period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Re-arm with a new rate; takes effect from the next [`Ticker::tick`].
    pub fn set_fps(&mut self, fps: f64) {
        self.period = period_for(fps);
    }

    /// Mark the beginning of a frame.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Suspend for the unused remainder of the frame budget.
    ///
    /// Without a preceding [`Ticker::start`], the full period is slept.
    /// A zero-length sleep still yields to the scheduler.
    pub async fn tick(&mut self) {
        let elapsed = self
            .started
            .take()
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO);
        tokio::time::sleep(self.period.saturating_sub(elapsed)).await;
    }
}

fn period_for(fps: f64) -> Duration {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps.min(MAX_FPS)
    } else {
        DEFAULT_FPS
    };
    Duration::from_secs_f64(1.0 / fps)
}
