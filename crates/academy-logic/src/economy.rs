//! Pure economy formulas: upgrade costs, hiring and severance checks, player
//! valuation, seasonal income and final run scoring.
//!
//! Nothing here touches engine state or draws random numbers: callers pass in
//! the live budget and any random factors they rolled, and get back either a
//! value or a structured [`EconomyError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guaranteed seasonal income before bonuses.
pub const BASE_SEASON_INCOME: i64 = 500_000;
/// League bonus per place above fourth: first earns 3x, third earns 1x.
pub const LEAGUE_BONUS_UNIT: i64 = 50_000;
/// Income per point of completed objective weight.
pub const OBJECTIVE_BONUS_PER_WEIGHT: i64 = 1_000;
/// Months of salary that must be covered to hire.
pub const HIRING_COMMITMENT_MONTHS: i64 = 12;
/// Months of salary paid out on dismissal.
pub const SEVERANCE_MONTHS: i64 = 3;
/// Rating thresholds for stars 1-5, ascending.
pub const RATING_THRESHOLDS: [(u8, f64); 5] = [(1, 0.0), (2, 80.0), (3, 150.0), (4, 250.0), (5, 400.0)];

/// Which pool of money a check ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Main,
    Scouting,
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Account::Main => write!(f, "main budget"),
            Account::Scouting => write!(f, "scouting budget"),
        }
    }
}

/// A rejected economic action. State is never touched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("insufficient funds in {account}: requires €{required}, available €{available}")]
    InsufficientFunds {
        account: Account,
        required: i64,
        available: i64,
    },
    #[error("upgrade amount must be at least 1%")]
    EmptyUpgrade,
    #[error("upgrade would exceed max level (at most +{max_amount}% possible)")]
    LevelExceedsMax { max_amount: u32 },
}

fn require(account: Account, available: i64, required: i64) -> Result<(), EconomyError> {
    if available < required {
        Err(EconomyError::InsufficientFunds {
            account,
            required,
            available,
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// FACILITIES
// ============================================================================

/// Price of raising a facility by `amount` levels from `current_level`.
///
/// Each level costs `base_cost / 100`, scaled up by the current level, so late
/// upgrades are disproportionately expensive.
pub fn facility_upgrade_cost(base_cost: i64, current_level: u32, amount: u32) -> i64 {
    let per_level = base_cost as f64 / 100.0;
    let level_multiplier = 1.0 + current_level as f64 / 100.0;
    (per_level * amount as f64 * level_multiplier).round() as i64
}

/// Largest legal upgrade from `current_level`.
pub fn max_upgrade_amount(current_level: u32, max_level: u32) -> u32 {
    max_level.saturating_sub(current_level)
}

/// Validate an upgrade and return its cost.
pub fn check_facility_upgrade(
    budget: i64,
    base_cost: i64,
    current_level: u32,
    max_level: u32,
    amount: u32,
) -> Result<i64, EconomyError> {
    if amount == 0 {
        return Err(EconomyError::EmptyUpgrade);
    }
    let cost = facility_upgrade_cost(base_cost, current_level, amount);
    require(Account::Main, budget, cost)?;
    if current_level + amount > max_level {
        return Err(EconomyError::LevelExceedsMax {
            max_amount: max_upgrade_amount(current_level, max_level),
        });
    }
    Ok(cost)
}

// ============================================================================
// STAFF
// ============================================================================

pub fn annual_commitment(monthly_salary: i64) -> i64 {
    monthly_salary * HIRING_COMMITMENT_MONTHS
}

/// A hire needs the full annual salary covered. Nothing is debited at hire time.
pub fn check_hire(budget: i64, monthly_salary: i64) -> Result<(), EconomyError> {
    require(Account::Main, budget, annual_commitment(monthly_salary))
}

pub fn severance(monthly_salary: i64) -> i64 {
    monthly_salary * SEVERANCE_MONTHS
}

/// Validate a dismissal and return the severance to debit.
pub fn check_severance(budget: i64, monthly_salary: i64) -> Result<i64, EconomyError> {
    let pay = severance(monthly_salary);
    require(Account::Main, budget, pay)?;
    Ok(pay)
}

/// A scouting mission must be covered by both the main and the scouting budget.
pub fn check_scouting_funds(budget: i64, scouting_budget: i64, cost: i64) -> Result<(), EconomyError> {
    require(Account::Scouting, scouting_budget, cost)?;
    require(Account::Main, budget, cost)
}

// ============================================================================
// PLAYERS
// ============================================================================

/// Market value of a player at creation.
///
/// `random_factor` is expected in `[0.8, 1.2]`. The result is rounded to the
/// nearest hundred.
pub fn player_value(age: u32, potential: u8, attributes: [u32; 4], random_factor: f64) -> i64 {
    let avg_skill = attributes.iter().sum::<u32>() as f64 / 4.0;
    let base = 5_000.0 + age as f64 * 1_000.0 + potential as f64 * 10_000.0 + avg_skill * 500.0;
    ((base * random_factor) / 100.0).round() as i64 * 100
}

/// Cash offer for a direct sale; `random_factor` is expected in `[0.8, 1.2]`.
pub fn sale_offer(value: i64, random_factor: f64) -> i64 {
    (value as f64 * random_factor).round() as i64
}

/// Rescale a catalog amount quoted against `reference` onto a live offer.
pub fn scale_offer(raw_amount: i64, base_offer: f64, reference: i64) -> i64 {
    if reference == 0 {
        return raw_amount;
    }
    (base_offer * (raw_amount as f64 / reference as f64)).round() as i64
}

// ============================================================================
// SEASONAL INCOME
// ============================================================================

/// League-finish bonus for one team.
pub fn league_bonus(position: u32) -> i64 {
    if (1..=3).contains(&position) {
        LEAGUE_BONUS_UNIT * (4 - position as i64)
    } else {
        0
    }
}

/// Components of the income credited when a season completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub base: i64,
    pub performance_bonus: i64,
    pub transfer_revenue: i64,
    pub objectives_bonus: i64,
}

impl IncomeBreakdown {
    pub fn total(&self) -> i64 {
        self.base + self.performance_bonus + self.transfer_revenue + self.objectives_bonus
    }
}

/// Seasonal income from league finishes, the season's transfer revenue and the
/// weights of completed objectives.
pub fn seasonal_income(
    league_positions: &[u32],
    transfer_revenue: i64,
    completed_weights: impl IntoIterator<Item = u32>,
) -> IncomeBreakdown {
    IncomeBreakdown {
        base: BASE_SEASON_INCOME,
        performance_bonus: league_positions.iter().map(|&p| league_bonus(p)).sum(),
        transfer_revenue,
        objectives_bonus: completed_weights
            .into_iter()
            .map(|w| w as i64 * OBJECTIVE_BONUS_PER_WEIGHT)
            .sum(),
    }
}

// ============================================================================
// FINAL SCORING
// ============================================================================

/// Running achievement counters.
///
/// Everything except `transfer_revenue` accumulates over the whole run;
/// transfer revenue is per season and cleared when a season completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Achievements {
    pub top_players_produced: u32,
    pub championships_won: u32,
    pub international_tournaments_won: u32,
    pub players_in_national_team: u32,
    pub transfer_revenue: i64,
}

/// Points and star rating at the end of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub points: f64,
    pub rating: u8,
    pub average_facility_level: f64,
}

pub fn average_level(levels: &[u32]) -> f64 {
    if levels.is_empty() {
        return 0.0;
    }
    levels.iter().sum::<u32>() as f64 / levels.len() as f64
}

pub fn final_score(achievements: &Achievements, budget: i64, facility_levels: &[u32]) -> FinalScore {
    let average_facility_level = average_level(facility_levels);
    let points = achievements.championships_won as f64 * 20.0
        + achievements.top_players_produced as f64 * 10.0
        + achievements.international_tournaments_won as f64 * 30.0
        + achievements.players_in_national_team as f64 * 25.0
        + (budget as f64 / 50_000.0).max(0.0)
        + (average_facility_level - 60.0).max(0.0) * 2.0;
    FinalScore {
        points,
        rating: rating_for(points),
        average_facility_level,
    }
}

/// Highest rating whose threshold `points` meets.
pub fn rating_for(points: f64) -> u8 {
    RATING_THRESHOLDS
        .iter()
        .rev()
        .find(|(_, threshold)| points >= *threshold)
        .map_or(1, |(rating, _)| *rating)
}

pub fn rating_text(rating: u8) -> &'static str {
    match rating {
        5 => "Masterclass! You built a world-class talent factory.",
        4 => "Excellent! The academy became the pride of the country under your leadership.",
        3 => "Good work. You built a solid system and achieved notable success.",
        2 => "Satisfactory. The academy works, but it is still far from the top.",
        _ => "Needs improvement. Results fell short of the board's expectations.",
    }
}
