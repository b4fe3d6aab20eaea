//! Background Tasks Module
//!
//! # Tasks
//! - Derivation cycle: freshness, promotions, then a refresh of every view

mod derivation;

pub use derivation::{run_derivation_cycle, spawn_derivation_task, CycleReport};
