//! Random decision events.
//!
//! Each trigger picks a template uniformly and builds a fresh [`PendingEvent`]
//! from it. Templates are shared and read-only; everything parameterized
//! against live state (region names, the targeted player, rescaled offers)
//! lives on the instance.

use academy_logic::config::RegionSpec;
use academy_logic::economy::scale_offer;
use academy_logic::events::{
    render_text, EventEffects, EventRequirement, EventTemplate, TransferEffect,
};
use serde::{Deserialize, Serialize};

use crate::components::Player;
use crate::error::{EngineError, EngineResult};
use crate::random::RandomValueProvider;
use crate::state::SimulationState;

/// A parameterized choice on a live event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOption {
    pub text: String,
    pub effects: EventEffects,
    pub chance: Option<u8>,
    pub transfer: Option<TransferEffect>,
}

/// An event awaiting the manager's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub instance_id: u32,
    pub template_id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<EventOption>,
    /// Player the options act on, for transfer events.
    pub target_player: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggerOutcome {
    Presented(PendingEvent),
    /// The drawn template needs a live target and none qualifies.
    Skipped { template_id: Option<String> },
}

/// What applying an option did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResolution {
    pub template_id: String,
    pub option_index: usize,
    pub budget_delta: i64,
    /// False when the option's chance roll failed.
    pub effects_applied: bool,
    /// Facility id and the level increase actually applied.
    pub facility_bump: Option<(String, u32)>,
    pub player_sold: Option<u32>,
    pub transfer_revenue: i64,
}

/// First player satisfying `requirement`, in roster order.
pub fn find_target<'a>(
    players: &'a [Player],
    requirement: &EventRequirement,
) -> Option<&'a Player> {
    match *requirement {
        EventRequirement::TransferablePlayer {
            min_age,
            max_age,
            min_potential,
        } => players
            .iter()
            .find(|p| p.potential >= min_potential && (min_age..=max_age).contains(&p.age)),
    }
}

/// `1234567` as `"1,234,567"`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Build a live instance of `template`, or `None` if it needs a target that
/// does not exist.
pub fn instantiate(
    template: &EventTemplate,
    instance_id: u32,
    state: &SimulationState,
    regions: &[RegionSpec],
    rng: &mut impl RandomValueProvider,
) -> Option<PendingEvent> {
    let target = match &template.requirement {
        Some(requirement) => Some(find_target(&state.players, requirement)?),
        None => None,
    };

    let region_name = if template.description.contains("{region}") && !regions.is_empty() {
        regions[rng.index(regions.len())].name.clone()
    } else {
        String::new()
    };
    let player_label = target
        .map(|p| format!("{} ({}, {} years old)", p.name, p.position, p.age))
        .unwrap_or_default();
    let description = render_text(
        &template.description,
        &[("region", region_name.as_str()), ("player", player_label.as_str())],
    );

    let base_offer = match (target, template.reference_offer) {
        (Some(player), Some(_)) => Some(player.value as f64 * rng.range_f64(0.5, 1.5)),
        _ => None,
    };
    let options = template
        .options
        .iter()
        .map(|option| {
            let mut effects = option.effects;
            if let (Some(base), Some(reference)) = (base_offer, template.reference_offer) {
                if effects.budget != 0 {
                    effects.budget = scale_offer(effects.budget, base, reference);
                }
            }
            EventOption {
                text: render_text(&option.text, &[("offer", format_amount(effects.budget).as_str())]),
                effects,
                chance: option.chance,
                transfer: option.transfer,
            }
        })
        .collect();

    Some(PendingEvent {
        instance_id,
        template_id: template.id.clone(),
        title: template.title.clone(),
        description,
        options,
        target_player: target.map(|p| p.id),
    })
}

/// Draw a template uniformly and try to instantiate it.
pub fn trigger(
    templates: &[EventTemplate],
    instance_id: u32,
    state: &SimulationState,
    regions: &[RegionSpec],
    rng: &mut impl RandomValueProvider,
) -> TriggerOutcome {
    if templates.is_empty() {
        return TriggerOutcome::Skipped { template_id: None };
    }
    let template = &templates[rng.index(templates.len())];
    match instantiate(template, instance_id, state, regions, rng) {
        Some(event) => TriggerOutcome::Presented(event),
        None => TriggerOutcome::Skipped {
            template_id: Some(template.id.clone()),
        },
    }
}

/// Apply option `index` of `event` to the state.
///
/// A transfer option whose target has left the academy is rejected with
/// `NotFound` and nothing changes.
pub fn apply_option(
    state: &mut SimulationState,
    event: &PendingEvent,
    index: usize,
    rng: &mut impl RandomValueProvider,
) -> EngineResult<EventResolution> {
    let option = event.options.get(index).ok_or(EngineError::InvalidOption {
        index,
        available: event.options.len(),
    })?;
    let effects = option.effects;

    let target_index = match option.transfer {
        Some(TransferEffect::Sell) | Some(TransferEffect::PartialSale) => {
            let id = event
                .target_player
                .ok_or_else(|| EngineError::not_found("player", "none"))?;
            Some(
                state
                    .players
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| EngineError::not_found("player", id))?,
            )
        }
        _ => None,
    };

    state.budget += effects.budget;

    let effects_applied = option.chance.map_or(true, |percent| rng.chance(percent));
    let mut facility_bump = None;
    if effects_applied {
        let standing = &mut state.standing;
        standing.reputation += effects.reputation;
        standing.injury_risk += effects.injury_risk;
        standing.coaching_level += effects.coaching_level;
        standing.morale += effects.morale;
        standing.tournament_experience += effects.experience;

        if effects.infrastructure > 0 && !state.facilities.is_empty() {
            let i = rng.index(state.facilities.len());
            let facility = &mut state.facilities[i];
            let applied = facility.raise_capped(effects.infrastructure);
            facility_bump = Some((facility.id.clone(), applied));
        }
    }

    let mut player_sold = None;
    let mut transfer_revenue = 0;
    if let Some(i) = target_index {
        transfer_revenue = effects.budget;
        state.achievements.transfer_revenue += transfer_revenue;
        if option.transfer == Some(TransferEffect::Sell) {
            let player = state.players.remove(i);
            log::info!("{} transferred for {}", player.name, transfer_revenue);
            player_sold = Some(player.id);
        }
    }

    Ok(EventResolution {
        template_id: event.template_id.clone(),
        option_index: index,
        budget_delta: effects.budget,
        effects_applied,
        facility_bump,
        player_sold,
        transfer_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Attributes;
    use crate::random::ScriptedRandom;
    use academy_logic::config::GameConfig;
    use academy_logic::events::default_catalog;

    fn template(id: &str) -> EventTemplate {
        default_catalog().into_iter().find(|t| t.id == id).unwrap()
    }

    fn player(id: u32, age: u32, potential: u8, value: i64) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            age,
            position: "CM".into(),
            team: "u17".into(),
            potential,
            attributes: Attributes {
                technical: 50,
                physical: 50,
                tactical: 50,
                mental: 50,
            },
            value,
        }
    }

    fn state() -> (GameConfig, SimulationState) {
        let config = GameConfig::default();
        let state = SimulationState::new(&config);
        (config, state)
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(150_000), "150,000");
        assert_eq!(format_amount(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_transfer_event_skipped_without_target() {
        let (config, mut s) = state();
        s.players.push(player(1, 15, 5, 100_000));
        s.players.push(player(2, 17, 3, 100_000));
        let event = instantiate(
            &template("top_club_interest"),
            1,
            &s,
            &config.regions,
            &mut ScriptedRandom::constant(0.5),
        );
        assert!(event.is_none());
    }

    #[test]
    fn test_transfer_offer_scaled_to_player_value() {
        let (config, mut s) = state();
        s.players.push(player(7, 17, 4, 120_000));
        // base offer = 120_000 * (0.5 + 0.5) = 120_000
        let event = instantiate(
            &template("top_club_interest"),
            3,
            &s,
            &config.regions,
            &mut ScriptedRandom::constant(0.5),
        )
        .unwrap();
        assert_eq!(event.target_player, Some(7));
        assert_eq!(event.options[0].effects.budget, 120_000);
        assert_eq!(event.options[1].effects.budget, 0);
        assert_eq!(event.options[2].effects.budget, 60_000);
        assert_eq!(event.options[0].text, "Sell the player (€120,000)");
        assert!(event.description.contains("Player 7"));
    }

    #[test]
    fn test_templates_not_mutated_by_instances() {
        let (config, mut s) = state();
        s.players.push(player(7, 17, 4, 120_000));
        let catalog = default_catalog();
        let t = &catalog[4];
        let a = instantiate(t, 1, &s, &config.regions, &mut ScriptedRandom::constant(0.1)).unwrap();
        let b = instantiate(t, 2, &s, &config.regions, &mut ScriptedRandom::constant(0.9)).unwrap();
        assert_ne!(a.options[0].effects.budget, b.options[0].effects.budget);
        assert_eq!(t.options[0].effects.budget, 200_000);
        assert_eq!(catalog, default_catalog());
    }

    #[test]
    fn test_region_placeholder_filled() {
        let (config, s) = state();
        let event = instantiate(
            &template("talent_discovery"),
            1,
            &s,
            &config.regions,
            &mut ScriptedRandom::constant(0.0),
        )
        .unwrap();
        assert!(event.description.contains("Almaty"));
        assert!(!event.description.contains("{region}"));
    }

    #[test]
    fn test_sell_option_removes_player_and_counts_revenue() {
        let (config, mut s) = state();
        s.players.push(player(7, 17, 4, 120_000));
        let mut rng = ScriptedRandom::constant(0.5);
        let event =
            instantiate(&template("top_club_interest"), 1, &s, &config.regions, &mut rng).unwrap();
        let resolution = apply_option(&mut s, &event, 0, &mut rng).unwrap();
        assert_eq!(resolution.player_sold, Some(7));
        assert!(s.players.is_empty());
        assert_eq!(s.budget, 2_620_000);
        assert_eq!(s.achievements.transfer_revenue, 120_000);
        assert_eq!(s.standing.reputation, 5);
    }

    #[test]
    fn test_partial_sale_keeps_player() {
        let (config, mut s) = state();
        s.players.push(player(7, 17, 4, 120_000));
        let mut rng = ScriptedRandom::constant(0.5);
        let event =
            instantiate(&template("top_club_interest"), 1, &s, &config.regions, &mut rng).unwrap();
        apply_option(&mut s, &event, 2, &mut rng).unwrap();
        assert_eq!(s.players.len(), 1);
        assert_eq!(s.achievements.transfer_revenue, 60_000);
    }

    #[test]
    fn test_sale_of_departed_player_is_not_found() {
        let (config, mut s) = state();
        s.players.push(player(7, 17, 4, 120_000));
        let mut rng = ScriptedRandom::constant(0.5);
        let event =
            instantiate(&template("top_club_interest"), 1, &s, &config.regions, &mut rng).unwrap();
        s.players.clear();
        let err = apply_option(&mut s, &event, 0, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
        assert_eq!(s.budget, 2_500_000);
    }

    #[test]
    fn test_infrastructure_bump_capped() {
        let (config, mut s) = state();
        for f in &mut s.facilities {
            f.level = 95;
        }
        let mut rng = ScriptedRandom::constant(0.0);
        let event =
            instantiate(&template("injury_crisis"), 1, &s, &config.regions, &mut rng).unwrap();
        let resolution = apply_option(&mut s, &event, 0, &mut rng).unwrap();
        assert_eq!(resolution.facility_bump, Some(("training_fields".into(), 5)));
        assert_eq!(s.facility("training_fields").unwrap().level, 100);
        assert_eq!(s.standing.injury_risk, -30);
        assert_eq!(s.budget, 2_470_000);
    }

    #[test]
    fn test_chance_gates_effects_not_cost() {
        let (config, mut s) = state();
        let event = instantiate(
            &template("coaching_offer"),
            1,
            &s,
            &config.regions,
            &mut ScriptedRandom::constant(0.0),
        )
        .unwrap();
        let resolution = apply_option(&mut s, &event, 1, &mut ScriptedRandom::constant(0.9)).unwrap();
        assert!(!resolution.effects_applied);
        assert_eq!(s.budget, 2_440_000);
        assert_eq!(s.standing.coaching_level, 0);

        apply_option(&mut s, &event, 1, &mut ScriptedRandom::constant(0.1)).unwrap();
        assert_eq!(s.standing.coaching_level, 10);
    }

    #[test]
    fn test_invalid_option() {
        let (config, mut s) = state();
        let event = instantiate(
            &template("injury_crisis"),
            1,
            &s,
            &config.regions,
            &mut ScriptedRandom::constant(0.0),
        )
        .unwrap();
        assert_eq!(
            apply_option(&mut s, &event, 3, &mut ScriptedRandom::constant(0.0)).unwrap_err(),
            EngineError::InvalidOption {
                index: 3,
                available: 3
            }
        );
    }

    #[test]
    fn test_trigger_uniform_pick_and_skip() {
        let (config, s) = state();
        let catalog = default_catalog();
        // 0.99 picks the last template, which needs a target the empty roster lacks
        let outcome = trigger(&catalog, 1, &s, &config.regions, &mut ScriptedRandom::constant(0.99));
        assert_eq!(
            outcome,
            TriggerOutcome::Skipped {
                template_id: Some("top_club_interest".into())
            }
        );
        let outcome = trigger(&catalog, 1, &s, &config.regions, &mut ScriptedRandom::constant(0.0));
        assert!(matches!(outcome, TriggerOutcome::Presented(e) if e.template_id == "talent_discovery"));
    }
}
