//! Engine errors.
//!
//! Every rejected operation leaves the simulation state untouched; errors are
//! structured so a front end can render them without parsing text.

use academy_logic::economy::EconomyError;
use thiserror::Error;

use crate::systems::SeasonPhase;

/// Coarse classification used by callers that only need to know how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable rejection: not enough money, bad input, no eligible target.
    Validation,
    /// The referenced entity no longer exists.
    NotFound,
    /// Season progress is below the completion threshold.
    GateNotMet,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Economy(#[from] EconomyError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("no available scouts for this mission")]
    NoAvailableScouts,
    #[error("scout {id} is already on a mission")]
    ScoutBusy { id: u32 },
    #[error("staff member {id} is not a scout")]
    NotAScout { id: u32 },
    #[error("candidate {field} {value} is outside {min}..={max}")]
    InvalidCandidate {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("player is {age}, sales are allowed from age {min_age}")]
    AgeIneligible { age: u32, min_age: u32 },
    #[error("season progress {progress}% is below the required {required}%")]
    GateNotMet { progress: u32, required: u32 },
    #[error("budget distribution totals {total}%, expected 100%")]
    InvalidDistribution { total: u32 },
    #[error("option {index} does not exist ({available} available)")]
    InvalidOption { index: usize, available: usize },
    #[error("no event is awaiting a decision")]
    NoPendingEvent,
    #[error("operation requires phase {expected:?}, current phase is {actual:?}")]
    WrongPhase {
        expected: SeasonPhase,
        actual: SeasonPhase,
    },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::GateNotMet { .. } => ErrorKind::GateNotMet,
            _ => ErrorKind::Validation,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use academy_logic::economy::Account;

    #[test]
    fn test_error_kinds() {
        let funds = EngineError::from(EconomyError::InsufficientFunds {
            account: Account::Main,
            required: 10,
            available: 5,
        });
        assert_eq!(funds.kind(), ErrorKind::Validation);
        assert_eq!(EngineError::not_found("player", 7).kind(), ErrorKind::NotFound);
        assert_eq!(
            EngineError::GateNotMet {
                progress: 60,
                required: 80
            }
            .kind(),
            ErrorKind::GateNotMet
        );
        assert_eq!(EngineError::NoAvailableScouts.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_economy_error_message_is_transparent() {
        let err = EngineError::from(EconomyError::LevelExceedsMax { max_amount: 20 });
        assert_eq!(
            err.to_string(),
            EconomyError::LevelExceedsMax { max_amount: 20 }.to_string()
        );
    }
}
