//! Ticker implementations.

use std::time::Duration;

use async_trait::async_trait;

use crate::infrastructure::ports::TickerPort;

/// Tokio timer. Honours paused time in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

impl TokioTicker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TickerPort for TokioTicker {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Zero-delay ticker for testing. Yields so other tasks still interleave.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTicker;

#[cfg(test)]
#[async_trait]
impl TickerPort for ImmediateTicker {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
