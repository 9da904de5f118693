//! Academy Core - Youth Academy Season Simulation Engine
//!
//! Simulates a youth football academy over a fixed number of seasons: staff
//! hiring, facility upgrades, scouting missions, player sales, random events
//! and a weighted objective system that gates season completion.
//!
//! # Architecture
//!
//! - **Components**: plain data records (players, staff, facilities, teams)
//! - **Generation**: seeded creation of rosters, candidates and prospects
//! - **Systems**: rules that operate on the state (scouting, events, seasons)
//! - **Engine**: owns the state and the clock, and exposes every operation
//!
//! All randomness flows through [`random::RandomValueProvider`], so a run is
//! reproducible from its seed.
//!
//! # Example
//!
//! ```rust,no_run
//! use academy_core::prelude::*;
//!
//! let mut engine = AcademyEngine::new(42);
//! engine.upgrade_facility("training_fields", 15)?;
//!
//! for observation in engine.advance_weeks(4)? {
//!     println!("{:?}", observation);
//! }
//! # Ok::<(), academy_core::error::EngineError>(())
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod generation;
pub mod random;
pub mod state;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{AcademyEngine, Observation, UpgradeReceipt};
    pub use crate::error::{EngineError, EngineResult, ErrorKind};
    pub use crate::random::{RandomValueProvider, ScriptedRandom, SeededRandom};
    pub use crate::state::SimulationState;
    pub use crate::systems::{
        EventResolution, FinalResult, PendingEvent, ScoutingReport, SeasonPhase, SeasonSummary,
        TriggerOutcome,
    };
    pub use academy_logic::constants::{ObjectiveId, ScoutingDuration, StaffCategory};
}
