//! Use cases - user stories orchestrated across selectors and ports.

pub mod loadout;
pub mod randomize_all;

pub use loadout::{GetLoadout, ListLoadouts, LoadoutError, LoadoutUseCases, SaveLoadout};
pub use randomize_all::{
    CycleMode, CycleReport, OrchestratorError, RandomizeAll, RandomizeAllBuilder, StepOutcome,
    StepReport, TriggerOutcome,
};
