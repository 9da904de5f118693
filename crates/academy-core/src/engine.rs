//! Simulation engine - main entry point for running an academy

use academy_logic::config::{BudgetDistribution, ConfigError, GameConfig};
use academy_logic::constants::{ObjectiveId, ScoutingDuration, StaffCategory};
use academy_logic::economy::{check_facility_upgrade, check_hire, check_severance, sale_offer};
use academy_logic::objectives::{ProgressOutcome, ProgressUpdate};
use serde::{Deserialize, Serialize};

use crate::components::{Prospect, StaffCandidate};
use crate::error::{EngineError, EngineResult};
use crate::generation::{generate_candidates, generate_initial_staff, generate_players};
use crate::random::{RandomValueProvider, SeededRandom};
use crate::state::SimulationState;
use crate::systems::*;

/// Something that happened while simulated time passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    ScoutingReport(ScoutingReport),
    EventPresented(PendingEvent),
    EventSkipped { template_id: Option<String> },
}

/// Result of a facility upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeReceipt {
    pub cost: i64,
    pub new_level: u32,
    /// Effect on the key-facility objective, if the facility is nominated.
    pub objective: Option<ProgressOutcome>,
}

/// Main simulation engine
///
/// Owns the whole run: state, randomness, deferred tasks and the season phase.
/// Every operation validates before it mutates, so a returned error means
/// nothing changed.
pub struct AcademyEngine<R: RandomValueProvider = SeededRandom> {
    config: GameConfig,
    state: SimulationState,
    phase: SeasonPhase,
    rng: R,
    scheduler: TaskScheduler,
    /// Open scouting missions.
    missions: Vec<ScoutingMission>,
    /// Reported prospects not yet invited.
    prospects: Vec<Prospect>,
    invited: Vec<Prospect>,
    pending_event: Option<PendingEvent>,
    next_mission_id: u32,
    next_event_id: u32,
    last_summary: Option<SeasonSummary>,
    final_result: Option<FinalResult>,
}

impl AcademyEngine<SeededRandom> {
    /// Standard academy, seeded.
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), SeededRandom::new(seed))
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SeededRandom::new(seed))
    }
}

impl<R: RandomValueProvider> AcademyEngine<R> {
    /// Validate `config` and start a run driven by `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: GameConfig, rng: R) -> Self {
        let state = SimulationState::new(&config);
        let mut engine = Self {
            config,
            state,
            phase: SeasonPhase::SeasonInProgress,
            rng,
            scheduler: TaskScheduler::new(),
            missions: Vec::new(),
            prospects: Vec::new(),
            invited: Vec::new(),
            pending_event: None,
            next_mission_id: 1,
            next_event_id: 1,
            last_summary: None,
            final_result: None,
        };
        engine.start_run();
        engine
    }

    fn start_run(&mut self) {
        self.state = SimulationState::new(&self.config);
        self.state.players = generate_players(&self.config, &mut self.state.ids, &mut self.rng);
        self.state.staff = generate_initial_staff(&self.config, &mut self.state.ids, &mut self.rng);
        self.phase = SeasonPhase::SeasonInProgress;
        self.schedule_event(self.config.event_cadence.initial_delay_weeks);
        log::info!(
            "New run: {} players, {} staff, budget {}",
            self.state.players.len(),
            self.state.staff.len(),
            self.state.budget
        );
    }

    /// Throw away the current run and start a fresh one from the same config.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.missions.clear();
        self.prospects.clear();
        self.invited.clear();
        self.pending_event = None;
        self.last_summary = None;
        self.final_result = None;
        self.start_run();
    }

    // ========================================================================
    // READ SURFACE
    // ========================================================================

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> SeasonPhase {
        self.phase
    }

    pub fn progress_percent(&self) -> u32 {
        self.state.objectives.progress_percent()
    }

    pub fn is_season_completable(&self) -> bool {
        self.state.objectives.is_season_completable()
    }

    pub fn pending_event(&self) -> Option<&PendingEvent> {
        self.pending_event.as_ref()
    }

    pub fn prospects(&self) -> &[Prospect] {
        &self.prospects
    }

    pub fn invited_prospects(&self) -> &[Prospect] {
        &self.invited
    }

    pub fn open_missions(&self) -> &[ScoutingMission] {
        &self.missions
    }

    pub fn scheduled_tasks(&self) -> &[ScheduledTask] {
        self.scheduler.pending()
    }

    pub fn annual_payroll(&self) -> i64 {
        self.state.annual_payroll()
    }

    pub fn last_summary(&self) -> Option<&SeasonSummary> {
        self.last_summary.as_ref()
    }

    pub fn final_result(&self) -> Option<&FinalResult> {
        self.final_result.as_ref()
    }

    fn require_phase(&self, expected: SeasonPhase) -> EngineResult<()> {
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // ========================================================================
    // STAFF
    // ========================================================================

    /// Applicants for a role. Hiring one is a separate step.
    pub fn generate_candidates(
        &mut self,
        category: StaffCategory,
        role_id: &str,
    ) -> EngineResult<Vec<StaffCandidate>> {
        let role = self
            .config
            .role(category, role_id)
            .ok_or_else(|| EngineError::not_found("staff role", role_id))?;
        Ok(generate_candidates(
            role,
            self.config.settings.candidates_per_role,
            &mut self.rng,
        ))
    }

    /// Hire a candidate. Skill must be 1-5 and the salary within the role's
    /// range. The annual salary must be covered; nothing is debited.
    pub fn hire_staff(&mut self, candidate: StaffCandidate) -> EngineResult<u32> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let role = self
            .config
            .role(candidate.category, &candidate.role_id)
            .ok_or_else(|| EngineError::not_found("staff role", &candidate.role_id))?;
        if !(1..=5).contains(&candidate.skill) {
            return Err(EngineError::InvalidCandidate {
                field: "skill",
                value: candidate.skill as i64,
                min: 1,
                max: 5,
            });
        }
        if !(role.salary_min..=role.salary_max).contains(&candidate.salary) {
            return Err(EngineError::InvalidCandidate {
                field: "salary",
                value: candidate.salary,
                min: role.salary_min,
                max: role.salary_max,
            });
        }
        check_hire(self.state.budget, candidate.salary)?;

        let top_coach = candidate.category == StaffCategory::Coaches && candidate.skill >= 4;
        let id = self.state.ids.next_id();
        let member = candidate.into_member(id);
        log::info!("Hired {} as {} (skill {})", member.name, member.title, member.skill);
        self.state.staff.push(member);
        if top_coach {
            self.state
                .objectives
                .record_progress(ObjectiveId::HireTopCoaches, ProgressUpdate::Increment(1));
        }
        Ok(id)
    }

    /// Dismiss a staff member, paying three months' severance.
    pub fn fire_staff(&mut self, staff_id: u32) -> EngineResult<i64> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let index = self
            .state
            .staff
            .iter()
            .position(|s| s.id == staff_id)
            .ok_or_else(|| EngineError::not_found("staff member", staff_id))?;
        let member = &self.state.staff[index];
        if member.is_busy {
            return Err(EngineError::ScoutBusy { id: staff_id });
        }
        let severance = check_severance(self.state.budget, member.salary)?;

        self.state.budget -= severance;
        let member = self.state.staff.remove(index);
        log::info!("Dismissed {} ({}), severance {}", member.name, member.title, severance);
        Ok(severance)
    }

    // ========================================================================
    // FACILITIES & BUDGET
    // ========================================================================

    pub fn upgrade_facility(&mut self, facility_id: &str, amount: u32) -> EngineResult<UpgradeReceipt> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let facility = self
            .state
            .facility(facility_id)
            .ok_or_else(|| EngineError::not_found("facility", facility_id))?;
        let cost = check_facility_upgrade(
            self.state.budget,
            facility.base_cost,
            facility.level,
            facility.max_level,
            amount,
        )?;

        self.state.budget -= cost;
        let mut new_level = 0;
        if let Some(facility) = self.state.facility_mut(facility_id) {
            facility.level += amount;
            new_level = facility.level;
        }
        let objective = if self.config.is_key_facility(facility_id) {
            Some(
                self.state
                    .objectives
                    .record_facility_progress(facility_id, amount),
            )
        } else {
            None
        };
        if let Some(ProgressOutcome::Rejected { locked_to }) = &objective {
            log::info!(
                "Upgrade of {} does not count: objective is locked to {}",
                facility_id,
                locked_to
            );
        }
        log::info!("Upgraded {} by {} to {} for {}", facility_id, amount, new_level, cost);
        Ok(UpgradeReceipt {
            cost,
            new_level,
            objective,
        })
    }

    pub fn set_budget_distribution(&mut self, distribution: BudgetDistribution) -> EngineResult<()> {
        if !distribution.is_balanced() {
            return Err(EngineError::InvalidDistribution {
                total: distribution.total(),
            });
        }
        self.state.budget_distribution = distribution;
        Ok(())
    }

    // ========================================================================
    // PLAYERS & PROSPECTS
    // ========================================================================

    /// Sell a player for a randomized offer around their value.
    pub fn sell_player(&mut self, player_id: u32) -> EngineResult<i64> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let index = self
            .state
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| EngineError::not_found("player", player_id))?;
        let min_age = self.config.settings.min_sale_age;
        let player = &self.state.players[index];
        if player.age < min_age {
            return Err(EngineError::AgeIneligible {
                age: player.age,
                min_age,
            });
        }

        let offer = sale_offer(player.value, self.rng.range_f64(0.8, 1.2));
        self.state.budget += offer;
        self.state.achievements.transfer_revenue += offer;
        let player = self.state.players.remove(index);
        log::info!("Sold {} for {}", player.name, offer);
        Ok(offer)
    }

    /// Invite a reported prospect for a trial.
    pub fn invite_prospect(&mut self, prospect_id: u32) -> EngineResult<Prospect> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let index = self
            .prospects
            .iter()
            .position(|p| p.id == prospect_id)
            .ok_or_else(|| EngineError::not_found("prospect", prospect_id))?;
        let prospect = self.prospects.remove(index);
        if prospect.potential == 5 {
            self.state
                .objectives
                .record_progress(ObjectiveId::FindTopTalents, ProgressUpdate::Increment(1));
        }
        log::info!("Invited {} (potential {})", prospect.name, prospect.potential);
        self.invited.push(prospect.clone());
        Ok(prospect)
    }

    // ========================================================================
    // SCOUTING
    // ========================================================================

    /// Send scouts to a region. Resolution is scheduled `duration` weeks ahead.
    pub fn dispatch_scouts(
        &mut self,
        region_id: &str,
        scout_ids: &[u32],
        duration: ScoutingDuration,
    ) -> EngineResult<u32> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let region = self
            .config
            .region(region_id)
            .ok_or_else(|| EngineError::not_found("region", region_id))?;
        let mut mission = dispatch_mission(
            &mut self.state,
            self.next_mission_id,
            region,
            scout_ids,
            duration,
        )?;
        self.next_mission_id += 1;

        let task = self.scheduler.schedule(
            mission.due_week,
            mission.season,
            TaskKind::ResolveScouting {
                mission_id: mission.id,
            },
        );
        mission.task_id = Some(task);
        log::info!(
            "Mission {} to {} with {} scouts for {} weeks",
            mission.id,
            region_id,
            mission.scout_ids.len(),
            duration.weeks()
        );
        let id = mission.id;
        self.missions.push(mission);
        Ok(id)
    }

    /// Resolve an open mission now, cancelling its scheduled resolution.
    pub fn resolve_scouting_mission(&mut self, mission_id: u32) -> EngineResult<ScoutingReport> {
        let index = self
            .missions
            .iter()
            .position(|m| m.id == mission_id)
            .ok_or_else(|| EngineError::not_found("mission", mission_id))?;
        let mut mission = self.missions.remove(index);
        if let Some(task) = mission.task_id {
            self.scheduler.cancel(task);
        }
        let region = self
            .config
            .region(&mission.region_id)
            .ok_or_else(|| EngineError::not_found("region", &mission.region_id))?;
        let report = resolve_mission(
            &mut self.state,
            &mut mission,
            region,
            &self.config.positions,
            &mut self.rng,
        );
        log::info!(
            "Mission {} in {} found {} prospects",
            report.mission_id,
            report.region_id,
            report.prospects.len()
        );
        self.prospects.extend(report.prospects.iter().cloned());
        Ok(report)
    }

    // ========================================================================
    // RANDOM EVENTS
    // ========================================================================

    fn schedule_event(&mut self, delay_weeks: u32) {
        self.scheduler.schedule(
            self.state.week + delay_weeks,
            self.state.season,
            TaskKind::TriggerEvent,
        );
    }

    fn cancel_event_triggers(&mut self) {
        if !self.scheduler.has_pending(TaskKind::TriggerEvent) {
            return;
        }
        let ids: Vec<u32> = self
            .scheduler
            .pending()
            .iter()
            .filter(|t| t.kind == TaskKind::TriggerEvent)
            .map(|t| t.id)
            .collect();
        for id in ids {
            self.scheduler.cancel(id);
        }
    }

    fn schedule_next_event(&mut self) {
        let cadence = &self.config.event_cadence;
        let (min, max) = (cadence.min_interval_weeks, cadence.max_interval_weeks);
        let delay = self.rng.range_u32(min, max);
        self.schedule_event(delay);
    }

    /// Fire a random event now. While an event awaits a decision no new one is
    /// drawn and the open one is returned.
    pub fn trigger_random_event(&mut self) -> EngineResult<TriggerOutcome> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        if let Some(event) = &self.pending_event {
            return Ok(TriggerOutcome::Presented(event.clone()));
        }
        self.cancel_event_triggers();

        let outcome = trigger(
            &self.config.events,
            self.next_event_id,
            &self.state,
            &self.config.regions,
            &mut self.rng,
        );
        match &outcome {
            TriggerOutcome::Presented(event) => {
                self.next_event_id += 1;
                log::info!("Event: {}", event.title);
                self.pending_event = Some(event.clone());
            }
            TriggerOutcome::Skipped { template_id } => {
                log::warn!("Skipped event {:?}: no qualifying target", template_id);
                self.schedule_event(self.config.event_cadence.retry_delay_weeks);
            }
        }
        Ok(outcome)
    }

    fn take_pending_event(&mut self, instance_id: u32) -> EngineResult<PendingEvent> {
        match &self.pending_event {
            None => Err(EngineError::NoPendingEvent),
            Some(event) if event.instance_id != instance_id => {
                Err(EngineError::not_found("event", instance_id))
            }
            Some(_) => self.pending_event.take().ok_or(EngineError::NoPendingEvent),
        }
    }

    /// Choose an option on the open event and schedule the next one.
    pub fn apply_event_option(
        &mut self,
        instance_id: u32,
        option_index: usize,
    ) -> EngineResult<EventResolution> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let event = self.take_pending_event(instance_id)?;
        match apply_option(&mut self.state, &event, option_index, &mut self.rng) {
            Ok(resolution) => {
                log::info!("Event {} resolved with option {}", event.template_id, option_index);
                self.schedule_next_event();
                Ok(resolution)
            }
            Err(err) => {
                self.pending_event = Some(event);
                Err(err)
            }
        }
    }

    /// Close the open event without choosing an option.
    pub fn dismiss_event(&mut self, instance_id: u32) -> EngineResult<()> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let event = self.take_pending_event(instance_id)?;
        log::info!("Event {} dismissed", event.template_id);
        self.schedule_next_event();
        Ok(())
    }

    // ========================================================================
    // TIME
    // ========================================================================

    /// Let `weeks` weeks pass, running every task that falls due.
    pub fn advance_weeks(&mut self, weeks: u32) -> EngineResult<Vec<Observation>> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let mut observations = Vec::new();
        for _ in 0..weeks {
            self.state.week += 1;
            for task in self.scheduler.take_due(self.state.week) {
                if let Some(observation) = self.run_task(task) {
                    observations.push(observation);
                }
            }
        }
        Ok(observations)
    }

    fn run_task(&mut self, task: ScheduledTask) -> Option<Observation> {
        match task.kind {
            TaskKind::ResolveScouting { mission_id } => {
                match self.resolve_scouting_mission(mission_id) {
                    Ok(report) => Some(Observation::ScoutingReport(report)),
                    Err(err) => {
                        log::warn!("Dropped scouting task {}: {}", task.id, err);
                        None
                    }
                }
            }
            TaskKind::TriggerEvent => match self.trigger_random_event() {
                Ok(TriggerOutcome::Presented(event)) => Some(Observation::EventPresented(event)),
                Ok(TriggerOutcome::Skipped { template_id }) => {
                    Some(Observation::EventSkipped { template_id })
                }
                Err(err) => {
                    log::warn!("Dropped event task {}: {}", task.id, err);
                    None
                }
            },
        }
    }

    // ========================================================================
    // SEASONS
    // ========================================================================

    /// Close the season if the progress gate is met.
    pub fn attempt_complete_season(&mut self) -> EngineResult<SeasonSummary> {
        self.require_phase(SeasonPhase::SeasonInProgress)?;
        let summary = complete_season(&mut self.state, &mut self.rng)?;
        self.phase = SeasonPhase::SeasonComplete;
        log::info!(
            "Season {} complete: progress {}%, income {}, budget {}",
            summary.season,
            summary.progress_percent,
            summary.income.total(),
            summary.budget_after
        );
        self.last_summary = Some(summary.clone());
        Ok(summary)
    }

    /// Acknowledge the season summary: start the next season, or finish the
    /// run after the last one.
    pub fn acknowledge_summary(&mut self) -> EngineResult<SeasonPhase> {
        self.require_phase(SeasonPhase::SeasonComplete)?;
        self.cancel_season_work();

        if self.state.season >= self.state.total_seasons {
            let result = final_result(&self.state);
            log::info!(
                "Run complete: {:.1} points, rating {}",
                result.score.points,
                result.score.rating
            );
            self.final_result = Some(result);
            self.phase = SeasonPhase::RunComplete;
        } else {
            roll_over(&mut self.state, self.config.settings.scouting_budget);
            self.phase = SeasonPhase::SeasonInProgress;
            self.schedule_event(self.config.event_cadence.initial_delay_weeks);
            log::info!("Season {} started", self.state.season);
        }
        Ok(self.phase)
    }

    /// Cancel every deferred task of the current season and abandon its open
    /// missions and pending event.
    fn cancel_season_work(&mut self) {
        let cancelled = self.scheduler.cancel_season(self.state.season);
        if !cancelled.is_empty() {
            log::warn!("Cancelled {} deferred tasks at season end", cancelled.len());
        }
        for mission in std::mem::take(&mut self.missions) {
            log::warn!("Mission {} abandoned at season end", mission.id);
            cancel_mission(&mut self.state, &mission);
        }
        self.prospects.clear();
        if let Some(event) = self.pending_event.take() {
            log::warn!("Event {} discarded at season end", event.template_id);
        }
    }
}
