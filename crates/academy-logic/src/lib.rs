//! Pure season and economy rules for the youth academy simulation.
//!
//! Everything in this crate is independent of engine state and randomness.
//! Functions take plain data and return results, so the rules can be unit
//! tested in isolation and reused by any front end that drives the engine.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Static game tables, JSON overrides and validation |
//! | [`constants`] | Staff categories, scouting durations, objective ids |
//! | [`economy`] | Upgrade costs, hiring checks, player value, income, final score |
//! | [`events`] | Random-event templates and their raw effects |
//! | [`objectives`] | Weighted objectives, progress gate, escalation |

pub mod config;
pub mod constants;
pub mod economy;
pub mod events;
pub mod objectives;
