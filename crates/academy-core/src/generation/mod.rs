//! Generation - procedural creation of players, staff and prospects
//!
//! Every roll goes through a [`RandomValueProvider`](crate::random::RandomValueProvider),
//! so a fixed seed reproduces the same academy.

mod names;
mod players;
mod prospects;
mod staff;

pub use names::*;
pub use players::*;
pub use prospects::*;
pub use staff::*;
