// src/tasks/mod.rs
pub mod main_task;

pub use main_task::{ClimateMonitor, CycleOutcome};

#[cfg(feature = "simulator")]
pub use main_task::{DefaultClimateMonitor, main_task};
