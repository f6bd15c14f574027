//! Testability ports for injecting time and randomness.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn gen_index(&self, len: usize) -> usize;
    /// Uniform value in `[min, max]`.
    fn gen_range(&self, min: u64, max: u64) -> u64;
    fn gen_uuid(&self) -> Uuid;
}

/// Timer used to pace roll animations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
