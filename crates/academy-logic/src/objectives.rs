//! Weighted season objectives and the season-completion gate.
//!
//! Each objective is binary-completable: it flips to completed the first time
//! its current value reaches the requirement and is never retracted within the
//! season. Season progress is the completed share of total weight, rounded to
//! a whole percent, and the season may only be closed once progress reaches the
//! gate threshold.
//!
//! ```
//! use academy_logic::config::default_objectives;
//! use academy_logic::constants::ObjectiveId;
//! use academy_logic::objectives::{ObjectiveTracker, ProgressUpdate};
//!
//! let mut tracker = ObjectiveTracker::new(&default_objectives(14));
//! tracker.record_progress(ObjectiveId::FindTopTalents, ProgressUpdate::Increment(2));
//! assert_eq!(tracker.progress_percent(), 25);
//! assert!(!tracker.is_season_completable());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::ObjectiveId;

/// Default minimum progress needed to close a season.
pub const DEFAULT_GATE_THRESHOLD: u32 = 80;

/// Percentage objectives never accumulate past this.
pub const PERCENT_CEILING: u32 = 100;

/// How an objective's requirement changes from one season to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Escalation {
    /// Requirement never changes.
    Fixed,
    /// Counting objectives: requirement grows by `step`.
    Add { step: u32 },
    /// Requirement grows by `step` but never exceeds `cap`.
    AddCapped { step: u32, cap: u32 },
    /// Requirement is set back to `value`.
    Reset { value: u32 },
}

impl Escalation {
    pub fn next_requirement(&self, required: u32) -> u32 {
        match *self {
            Escalation::Fixed => required,
            Escalation::Add { step } => required + step,
            Escalation::AddCapped { step, cap } => (required + step).min(cap),
            Escalation::Reset { value } => value,
        }
    }
}

/// Static definition of an objective, as found in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub id: ObjectiveId,
    pub required: u32,
    pub weight: u32,
    pub escalation: Escalation,
}

impl ObjectiveSpec {
    pub fn new(id: ObjectiveId, required: u32, weight: u32, escalation: Escalation) -> Self {
        Self {
            id,
            required,
            weight,
            escalation,
        }
    }
}

/// Live state of one objective during a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub required_value: u32,
    pub current_value: u32,
    pub weight: u32,
    pub completed: bool,
    /// Facility the key-facility objective is locked to, once one is touched.
    pub auxiliary_tag: Option<String>,
    pub escalation: Escalation,
}

impl Objective {
    fn from_spec(spec: &ObjectiveSpec) -> Self {
        Self {
            id: spec.id,
            required_value: spec.required,
            current_value: 0,
            weight: spec.weight,
            completed: false,
            auxiliary_tag: None,
            escalation: spec.escalation,
        }
    }

    pub fn description(&self) -> String {
        self.id.describe(self.required_value)
    }

    fn apply(&mut self, update: ProgressUpdate, ceiling: Option<u32>) -> ProgressOutcome {
        if self.completed {
            return ProgressOutcome::AlreadyCompleted;
        }
        let value = match update {
            ProgressUpdate::Increment(delta) => self.current_value.saturating_add(delta),
            ProgressUpdate::Set(value) => value,
        };
        self.current_value = ceiling.map_or(value, |c| value.min(c));
        if self.current_value >= self.required_value {
            self.completed = true;
            ProgressOutcome::Completed
        } else {
            ProgressOutcome::Advanced {
                current: self.current_value,
                required: self.required_value,
            }
        }
    }

    fn reset(&mut self) {
        self.current_value = 0;
        self.completed = false;
        self.auxiliary_tag = None;
    }
}

/// A change to an objective's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    Increment(u32),
    /// Absolute value.
    Set(u32),
}

/// What a progress report did to the objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressOutcome {
    Advanced { current: u32, required: u32 },
    /// The objective flipped to completed with this update.
    Completed,
    /// Already completed this season; nothing changed.
    AlreadyCompleted,
    /// The key-facility objective is locked to another facility.
    Rejected { locked_to: String },
    /// No objective with this id is tracked.
    Untracked,
}

impl ProgressOutcome {
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            ProgressOutcome::Advanced { .. } | ProgressOutcome::Completed
        )
    }
}

/// Owns a season's objective set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveTracker {
    objectives: Vec<Objective>,
    gate_threshold: u32,
}

impl ObjectiveTracker {
    pub fn new(specs: &[ObjectiveSpec]) -> Self {
        Self::with_gate(specs, DEFAULT_GATE_THRESHOLD)
    }

    pub fn with_gate(specs: &[ObjectiveSpec], gate_threshold: u32) -> Self {
        Self {
            objectives: specs.iter().map(Objective::from_spec).collect(),
            gate_threshold,
        }
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: ObjectiveId) -> Option<&mut Objective> {
        self.objectives.iter_mut().find(|o| o.id == id)
    }

    pub fn is_completed(&self, id: ObjectiveId) -> bool {
        self.get(id).map_or(false, |o| o.completed)
    }

    pub fn gate_threshold(&self) -> u32 {
        self.gate_threshold
    }

    /// Record progress toward a counting or absolute objective.
    pub fn record_progress(&mut self, id: ObjectiveId, update: ProgressUpdate) -> ProgressOutcome {
        match self.get_mut(id) {
            Some(objective) => objective.apply(update, None),
            None => ProgressOutcome::Untracked,
        }
    }

    /// Record a facility upgrade toward the key-facility objective.
    ///
    /// The objective locks to the first facility reported with a non-zero amount
    /// this season; upgrades to any other facility are rejected until the next
    /// rollover. The caller is responsible for only reporting nominated
    /// facilities.
    pub fn record_facility_progress(&mut self, facility_id: &str, amount: u32) -> ProgressOutcome {
        let Some(objective) = self.get_mut(ObjectiveId::UpgradeKeyFacility) else {
            return ProgressOutcome::Untracked;
        };
        if objective.completed {
            return ProgressOutcome::AlreadyCompleted;
        }
        match &objective.auxiliary_tag {
            Some(locked) if locked != facility_id => {
                return ProgressOutcome::Rejected {
                    locked_to: locked.clone(),
                }
            }
            Some(_) => {}
            None if amount > 0 => objective.auxiliary_tag = Some(facility_id.to_string()),
            None => {}
        }
        objective.apply(ProgressUpdate::Increment(amount), Some(PERCENT_CEILING))
    }

    /// Evaluate an end-of-season condition. A satisfied condition completes the
    /// objective; an unsatisfied one leaves it as it is.
    pub fn finalize(&mut self, id: ObjectiveId, satisfied: bool) -> ProgressOutcome {
        let Some(objective) = self.get_mut(id) else {
            return ProgressOutcome::Untracked;
        };
        if !satisfied {
            return ProgressOutcome::Advanced {
                current: objective.current_value,
                required: objective.required_value,
            };
        }
        let required = objective.required_value;
        objective.apply(ProgressUpdate::Set(required.max(objective.current_value)), None)
    }

    pub fn total_weight(&self) -> u32 {
        self.objectives.iter().map(|o| o.weight).sum()
    }

    pub fn completed_weight(&self) -> u32 {
        self.objectives
            .iter()
            .filter(|o| o.completed)
            .map(|o| o.weight)
            .sum()
    }

    pub fn completed_count(&self) -> usize {
        self.objectives.iter().filter(|o| o.completed).count()
    }

    /// Weighted completion, rounded half up to a whole percent.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total_weight() as u64;
        if total == 0 {
            return 0;
        }
        let completed = self.completed_weight() as u64;
        ((completed * 200 + total) / (total * 2)) as u32
    }

    pub fn is_season_completable(&self) -> bool {
        self.progress_percent() >= self.gate_threshold
    }

    /// Requirements the objectives would have after rolling into `next_season`.
    pub fn preview_requirements(&self, next_season: u32) -> Vec<(ObjectiveId, u32)> {
        self.objectives
            .iter()
            .map(|o| {
                let required = if next_season > 1 {
                    o.escalation.next_requirement(o.required_value)
                } else {
                    o.required_value
                };
                (o.id, required)
            })
            .collect()
    }

    /// Reset every objective for `next_season`, escalating requirements from
    /// season 2 onward.
    pub fn roll_over(&mut self, next_season: u32) {
        for objective in &mut self.objectives {
            objective.reset();
            if next_season > 1 {
                objective.required_value =
                    objective.escalation.next_requirement(objective.required_value);
            }
        }
    }
}
