//! Tick-driven roll animation.
//!
//! An animated roll draws and publishes a preview on every tick until the
//! total duration has elapsed, then makes one final draw. The final draw is
//! handed back to the caller, which decides whether it may still commit.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::app_settings::RollSettings;
use crate::infrastructure::ports::{RandomPort, TickerPort};

/// How an animation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation<T> {
    Finished { last: T, previews: usize },
    Cancelled,
}

pub struct RollAnimator {
    ticker: Arc<dyn TickerPort>,
    settings: RollSettings,
}

impl RollAnimator {
    pub fn new(ticker: Arc<dyn TickerPort>, settings: RollSettings) -> Self {
        Self { ticker, settings }
    }

    pub fn settings(&self) -> &RollSettings {
        &self.settings
    }

    /// Total roll duration, uniform over the configured bounds.
    pub fn draw_duration(&self, random: &dyn RandomPort) -> Duration {
        let (min, max) = self.settings.duration_bounds_ms();
        Duration::from_millis(random.gen_range(min, max))
    }

    /// Run one animation of length `total`.
    ///
    /// `publish` returns `false` once the session may no longer publish,
    /// which ends the animation as cancelled.
    pub async fn animate<T, D, P>(
        &self,
        total: Duration,
        cancel: &CancellationToken,
        mut draw: D,
        mut publish: P,
    ) -> Animation<T>
    where
        D: FnMut() -> T,
        P: FnMut(T) -> bool,
    {
        let tick = self.settings.tick_interval();
        let mut elapsed = Duration::ZERO;
        let mut previews = 0;

        while elapsed < total {
            let step = tick.min(total - elapsed);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Animation::Cancelled,
                _ = self.ticker.sleep(step) => {}
            }
            elapsed += step;
            if elapsed >= total {
                break;
            }
            if !publish(draw()) {
                return Animation::Cancelled;
            }
            previews += 1;
        }

        if cancel.is_cancelled() {
            return Animation::Cancelled;
        }
        Animation::Finished {
            last: draw(),
            previews,
        }
    }
}
