//! Roll lifecycle: sessions, the tick-driven animator and roll outcomes.

mod animator;
mod session;

pub use animator::{Animation, RollAnimator};
pub use session::{RollSession, RollStatus};

/// A settled roll.
#[derive(Debug, Clone, PartialEq)]
pub struct RollReport<T> {
    /// The committed result.
    pub result: T,
    /// Intermediate draws published before the commit.
    pub previews: usize,
}

/// How a randomize call ended. None of these are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RollOutcome<T> {
    Settled(RollReport<T>),
    /// The selector has no catalog yet, or loading it failed.
    NotReady,
    /// A newer roll on the same selector took over before this one settled.
    Superseded,
}

impl<T> RollOutcome<T> {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Settled(report) => Some(&report.result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<T> {
        match self {
            Self::Settled(report) => Some(report.result),
            _ => None,
        }
    }
}
