//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_index(&self, len: usize) -> usize {
        use rand::Rng;
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }

    fn gen_range(&self, min: u64, max: u64) -> u64 {
        use rand::Rng;
        rand::thread_rng().gen_range(min.min(max)..=max.max(min))
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted random for testing.
///
/// Cycles through `values`; each answer is clamped into the requested range.
/// UUIDs count up from 1 so saved ids stay distinct.
#[cfg(test)]
pub struct FixedRandom {
    values: Vec<u64>,
    next: std::sync::atomic::AtomicUsize,
    uuids: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl FixedRandom {
    pub fn constant(value: u64) -> Self {
        Self::cycling(vec![value])
    }

    pub fn cycling(values: Vec<u64>) -> Self {
        Self {
            values,
            next: std::sync::atomic::AtomicUsize::new(0),
            uuids: std::sync::atomic::AtomicU64::new(0),
        }
    }

    fn next_value(&self) -> u64 {
        use std::sync::atomic::Ordering;
        if self.values.is_empty() {
            return 0;
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_index(&self, len: usize) -> usize {
        (self.next_value() as usize).min(len.saturating_sub(1))
    }

    fn gen_range(&self, min: u64, max: u64) -> u64 {
        min.saturating_add(self.next_value()).min(max)
    }

    fn gen_uuid(&self) -> Uuid {
        use std::sync::atomic::Ordering;
        let n = self.uuids.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
