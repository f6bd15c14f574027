use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Whether a selector is mid-roll.
///
/// Settling is reported by `RollOutcome::Settled`; the status itself goes
/// back to `Idle` once a roll commits or is abandoned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollStatus {
    #[default]
    Idle,
    Rolling,
}

/// One in-flight roll.
///
/// Sessions are numbered per selector. Only the session currently registered
/// on its selector may publish, and cancelling the token stops its ticks.
#[derive(Debug, Clone)]
pub struct RollSession {
    id: u64,
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RollSession {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// When the final draw is due. `None` for instant rolls.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
