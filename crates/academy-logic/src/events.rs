//! Random-event catalog: static decision templates and their raw effects.
//!
//! Templates are never modified at run time. When an event fires, the engine
//! builds a fresh instance from the template, substituting placeholders and
//! rescaling monetary effects against the live target (see
//! [`EventTemplate::reference_offer`]).

use serde::{Deserialize, Serialize};

/// Live entity an event needs before it can fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRequirement {
    /// A player in the age window with at least `min_potential`.
    TransferablePlayer {
        min_age: u32,
        max_age: u32,
        min_potential: u8,
    },
}

/// What an option does to the targeted player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferEffect {
    /// Player leaves; fee counts as transfer revenue.
    Sell,
    /// Player stays; nothing is paid.
    Retain,
    /// Player stays; fee counts as transfer revenue.
    PartialSale,
}

/// Raw deltas carried by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventEffects {
    pub budget: i64,
    pub reputation: i32,
    pub injury_risk: i32,
    /// Level bump for one random facility, capped at its max level.
    pub infrastructure: u32,
    pub coaching_level: i32,
    pub experience: i32,
    pub morale: i32,
}

/// One choice of an event template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOptionTemplate {
    /// May contain `{offer}`, replaced by the rescaled budget effect.
    pub text: String,
    #[serde(default)]
    pub effects: EventEffects,
    /// Percent chance that the non-monetary effects take hold.
    #[serde(default)]
    pub chance: Option<u8>,
    #[serde(default)]
    pub transfer: Option<TransferEffect>,
}

/// A static decision event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: String,
    pub title: String,
    /// May contain `{region}` and `{player}`.
    pub description: String,
    #[serde(default)]
    pub requirement: Option<EventRequirement>,
    /// Budget amounts in the options are quoted against this offer and
    /// rescaled to the target player's value when the event fires.
    #[serde(default)]
    pub reference_offer: Option<i64>,
    pub options: Vec<EventOptionTemplate>,
}

/// Replace `{key}` placeholders in `text`.
pub fn render_text(text: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(text.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{}}}", key), value)
        })
}

fn option(text: &str, effects: EventEffects) -> EventOptionTemplate {
    EventOptionTemplate {
        text: text.to_string(),
        effects,
        chance: None,
        transfer: None,
    }
}

/// The five events of the standard game.
pub fn default_catalog() -> Vec<EventTemplate> {
    vec![
        EventTemplate {
            id: "talent_discovery".into(),
            title: "A scout found a talent!".into(),
            description: "Our scout reports an incredibly gifted young player from {region}. \
                The family is not well off and will need support to relocate."
                .into(),
            requirement: None,
            reference_offer: None,
            options: vec![
                option(
                    "Offer a full scholarship (€5,000)",
                    EventEffects {
                        budget: -5_000,
                        morale: 10,
                        ..Default::default()
                    },
                ),
                option(
                    "Offer partial support (€2,000)",
                    EventEffects {
                        budget: -2_000,
                        morale: 5,
                        ..Default::default()
                    },
                ),
                option(
                    "Decline, we cannot afford extra costs",
                    EventEffects {
                        morale: -5,
                        ..Default::default()
                    },
                ),
            ],
        },
        EventTemplate {
            id: "injury_crisis".into(),
            title: "Injuries in the U19 squad".into(),
            description: "Three key U19 players were injured at once. The doctor proposes \
                buying new rehabilitation equipment."
                .into(),
            requirement: None,
            reference_offer: None,
            options: vec![
                option(
                    "Buy top-class equipment (€30,000)",
                    EventEffects {
                        budget: -30_000,
                        injury_risk: -30,
                        infrastructure: 10,
                        ..Default::default()
                    },
                ),
                option(
                    "Buy basic equipment (€10,000)",
                    EventEffects {
                        budget: -10_000,
                        injury_risk: -15,
                        infrastructure: 5,
                        ..Default::default()
                    },
                ),
                option("Make do with what we have", EventEffects::default()),
            ],
        },
        EventTemplate {
            id: "coaching_offer".into(),
            title: "Offer from an experienced coach".into(),
            description: "A highly qualified youth coach from Europe wants to join the academy. \
                His salary expectations exceed our budget, but his methods are proven."
                .into(),
            requirement: None,
            reference_offer: None,
            options: vec![
                option(
                    "Hire the coach (€8,000/month)",
                    EventEffects {
                        budget: -96_000,
                        coaching_level: 20,
                        ..Default::default()
                    },
                ),
                EventOptionTemplate {
                    chance: Some(50),
                    ..option(
                        "Offer a lower salary (€5,000/month)",
                        EventEffects {
                            budget: -60_000,
                            coaching_level: 10,
                            ..Default::default()
                        },
                    )
                },
                option("Decline the offer", EventEffects::default()),
            ],
        },
        EventTemplate {
            id: "international_tournament".into(),
            title: "Invitation to an international tournament".into(),
            description: "Our U17 team has been invited to a prestigious international \
                tournament. Taking part is invaluable experience but costs extra."
                .into(),
            requirement: None,
            reference_offer: None,
            options: vec![
                option(
                    "Accept and allocate extra budget (€15,000)",
                    EventEffects {
                        budget: -15_000,
                        experience: 15,
                        reputation: 10,
                        ..Default::default()
                    },
                ),
                option(
                    "Accept within the standard budget",
                    EventEffects {
                        budget: -5_000,
                        experience: 10,
                        reputation: 5,
                        ..Default::default()
                    },
                ),
                option(
                    "Decline the invitation",
                    EventEffects {
                        reputation: -5,
                        ..Default::default()
                    },
                ),
            ],
        },
        EventTemplate {
            id: "top_club_interest".into(),
            title: "Top club interested in an academy player".into(),
            description: "A top European club is interested in {player}. They are ready to pay \
                a transfer fee, but the player has huge potential."
                .into(),
            requirement: Some(EventRequirement::TransferablePlayer {
                min_age: 16,
                max_age: 18,
                min_potential: 4,
            }),
            reference_offer: Some(200_000),
            options: vec![
                EventOptionTemplate {
                    transfer: Some(TransferEffect::Sell),
                    ..option(
                        "Sell the player (€{offer})",
                        EventEffects {
                            budget: 200_000,
                            reputation: 5,
                            ..Default::default()
                        },
                    )
                },
                EventOptionTemplate {
                    transfer: Some(TransferEffect::Retain),
                    ..option("Reject the offer and keep the player", EventEffects::default())
                },
                EventOptionTemplate {
                    transfer: Some(TransferEffect::PartialSale),
                    ..option(
                        "Negotiate future bonuses and a sell-on fee (€{offer} + %)",
                        EventEffects {
                            budget: 100_000,
                            reputation: 10,
                            ..Default::default()
                        },
                    )
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|e| !e.options.is_empty()));
    }

    #[test]
    fn test_only_transfer_event_has_requirement() {
        let catalog = default_catalog();
        let with_requirement: Vec<&str> = catalog
            .iter()
            .filter(|e| e.requirement.is_some())
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(with_requirement, vec!["top_club_interest"]);
    }

    #[test]
    fn test_render_text() {
        let text = render_text(
            "{player} from {region} ({region})",
            &[("player", "Arman"), ("region", "Almaty")],
        );
        assert_eq!(text, "Arman from Almaty (Almaty)");
        assert_eq!(render_text("no placeholders", &[("x", "y")]), "no placeholders");
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let catalog = default_catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: Vec<EventTemplate> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
