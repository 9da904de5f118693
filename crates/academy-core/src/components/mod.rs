//! Plain data held in the simulation state.
//!
//! Components carry no behaviour beyond small helpers; the rules live in
//! `academy_logic` and the systems.

mod academy;
mod people;

pub use academy::*;
pub use people::*;
