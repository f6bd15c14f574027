//! Randomize-all use case.
//!
//! Rolls champion, abilities, runes and items in that order. Each step waits
//! for the previous one to settle so that its result can shape the next
//! step's pools. Triggers arriving while a cycle runs are dropped or
//! coalesced into a single re-run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use riftroll_domain::{AbilityContext, ItemContext, LoadoutRecord, RoleMode};

use crate::entities::{
    AbilitySelector, ChampionSelector, ItemSelector, RollDomain, RuneSelector, Selector,
};
use crate::infrastructure::app_settings::FlightPolicy;
use crate::roll::RollOutcome;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Randomize-all requires a {0} selector")]
    MissingSelector(&'static str),
}

/// How each step rolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CycleMode {
    Instant,
    #[default]
    Animated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Settled { previews: usize },
    /// The selector was not ready; its current result was kept.
    Skipped,
    /// Another roll on the selector took over; its result is used.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub selector: &'static str,
    pub outcome: StepOutcome,
}

/// Result of one full cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub record: LoadoutRecord,
    /// Champion, abilities, runes, items.
    pub steps: [StepReport; 4],
}

/// What became of a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// This trigger ran the cycle, plus `reruns` queued re-runs. `report`
    /// describes the last cycle.
    Completed { report: CycleReport, reruns: usize },
    /// A cycle was running and the trigger was queued behind it.
    Queued,
    /// A cycle was running and the trigger was ignored.
    Dropped,
}

#[derive(Debug, Default)]
struct FlightState {
    running: bool,
    queued: Option<(RoleMode, CycleMode)>,
}

/// Clears `running` if a cycle is abandoned mid-flight.
struct FlightGuard<'a> {
    flight: &'a Mutex<FlightState>,
    armed: bool,
}

impl FlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut flight = self.flight.lock().unwrap_or_else(PoisonError::into_inner);
            flight.running = false;
            flight.queued = None;
        }
    }
}

pub struct RandomizeAll {
    champion: Arc<ChampionSelector>,
    abilities: Arc<AbilitySelector>,
    runes: Arc<RuneSelector>,
    items: Arc<ItemSelector>,
    policy: FlightPolicy,
    flight: Mutex<FlightState>,
}

impl RandomizeAll {
    pub fn builder() -> RandomizeAllBuilder {
        RandomizeAllBuilder::default()
    }

    pub fn policy(&self) -> FlightPolicy {
        self.policy
    }

    pub fn is_running(&self) -> bool {
        self.lock_flight().running
    }

    fn lock_flight(&self) -> MutexGuard<'_, FlightState> {
        self.flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a cycle for `role`, or queue/drop the trigger if one is running.
    pub async fn execute(&self, role: RoleMode, mode: CycleMode) -> TriggerOutcome {
        {
            let mut flight = self.lock_flight();
            if flight.running {
                return match self.policy {
                    FlightPolicy::Drop => {
                        tracing::warn!(role = %role, "Randomize-all already running, trigger dropped");
                        TriggerOutcome::Dropped
                    }
                    FlightPolicy::Coalesce => {
                        tracing::debug!(role = %role, "Randomize-all already running, re-run queued");
                        flight.queued = Some((role, mode));
                        TriggerOutcome::Queued
                    }
                };
            }
            flight.running = true;
        }

        let guard = FlightGuard {
            flight: &self.flight,
            armed: true,
        };
        let mut next = (role, mode);
        let mut reruns = 0;
        loop {
            let report = self.run_cycle(next.0, next.1).await;

            // Checking the queue and releasing the flight happen under one lock.
            let queued = {
                let mut flight = self.lock_flight();
                let queued = flight.queued.take();
                if queued.is_none() {
                    flight.running = false;
                }
                queued
            };
            match queued {
                Some(queued) => {
                    tracing::debug!(role = %queued.0, "Running queued randomize-all");
                    next = queued;
                    reruns += 1;
                }
                None => {
                    guard.disarm();
                    return TriggerOutcome::Completed { report, reruns };
                }
            }
        }
    }

    async fn run_cycle(&self, role: RoleMode, mode: CycleMode) -> CycleReport {
        tracing::info!(role = %role, mode = ?mode, "Randomize-all cycle started");

        let (champion, champion_step) = roll_step(&self.champion, mode).await;

        self.abilities.set_context(AbilityContext::new(role));
        let (abilities, abilities_step) = roll_step(&self.abilities, mode).await;

        let (runes, runes_step) = roll_step(&self.runes, mode).await;

        let item_context =
            ItemContext::derive(role, &champion, &abilities, self.items.domain().rules());
        self.items.set_context(item_context);
        let (items, items_step) = roll_step(&self.items, mode).await;

        let report = CycleReport {
            record: LoadoutRecord {
                champion,
                abilities,
                runes,
                items,
            },
            steps: [champion_step, abilities_step, runes_step, items_step],
        };
        tracing::info!(
            role = %role,
            skipped = report
                .steps
                .iter()
                .filter(|s| s.outcome == StepOutcome::Skipped)
                .count(),
            "Randomize-all cycle finished"
        );
        report
    }
}

async fn roll_step<D: RollDomain>(
    selector: &Selector<D>,
    mode: CycleMode,
) -> (D::Output, StepReport) {
    let outcome = match mode {
        CycleMode::Instant => selector.randomize_instant(),
        CycleMode::Animated => selector.randomize_animated().await,
    };
    let (output, outcome) = match outcome {
        RollOutcome::Settled(report) => {
            let previews = report.previews;
            (report.result, StepOutcome::Settled { previews })
        }
        RollOutcome::NotReady => {
            tracing::warn!(selector = D::NAME, "Selector not ready, step skipped");
            (selector.current(), StepOutcome::Skipped)
        }
        RollOutcome::Superseded => {
            // Later steps derive their context from this result, so wait for
            // the roll that took over to commit.
            tracing::debug!(selector = D::NAME, "Step superseded, waiting for the newer roll");
            (selector.settled().await, StepOutcome::Superseded)
        }
    };
    (
        output,
        StepReport {
            selector: D::NAME,
            outcome,
        },
    )
}

#[derive(Default)]
pub struct RandomizeAllBuilder {
    champion: Option<Arc<ChampionSelector>>,
    abilities: Option<Arc<AbilitySelector>>,
    runes: Option<Arc<RuneSelector>>,
    items: Option<Arc<ItemSelector>>,
    policy: FlightPolicy,
}

impl RandomizeAllBuilder {
    pub fn champion(mut self, selector: Arc<ChampionSelector>) -> Self {
        self.champion = Some(selector);
        self
    }

    pub fn abilities(mut self, selector: Arc<AbilitySelector>) -> Self {
        self.abilities = Some(selector);
        self
    }

    pub fn runes(mut self, selector: Arc<RuneSelector>) -> Self {
        self.runes = Some(selector);
        self
    }

    pub fn items(mut self, selector: Arc<ItemSelector>) -> Self {
        self.items = Some(selector);
        self
    }

    pub fn policy(mut self, policy: FlightPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<RandomizeAll, OrchestratorError> {
        Ok(RandomizeAll {
            champion: self
                .champion
                .ok_or(OrchestratorError::MissingSelector("champion"))?,
            abilities: self
                .abilities
                .ok_or(OrchestratorError::MissingSelector("abilities"))?,
            runes: self
                .runes
                .ok_or(OrchestratorError::MissingSelector("runes"))?,
            items: self
                .items
                .ok_or(OrchestratorError::MissingSelector("items"))?,
            policy: self.policy,
            flight: Mutex::new(FlightState::default()),
        })
    }
}
