//! Systems - logic that operates on the simulation state

mod events;
mod scheduler;
mod scouting;
mod season;

pub use events::*;
pub use scheduler::*;
pub use scouting::{
    cancel as cancel_mission, dispatch as dispatch_mission, resolve as resolve_mission,
    validate_scouts, MissionStatus, ScoutingMission, ScoutingReport,
};
pub use season::*;
