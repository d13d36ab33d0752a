// Fantasy point scoring: rule sets, presets, and the point evaluator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Points awarded per unit of each stat category. Negative values penalize
/// (interceptions, fumbles). Categories missing from `rules` score nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRuleSet {
    pub id: String,
    pub name: String,
    pub rules: BTreeMap<String, f64>,
}

impl ScoringRuleSet {
    pub fn new<'a>(
        id: &str,
        name: &str,
        rules: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        ScoringRuleSet {
            id: id.to_string(),
            name: name.to_string(),
            rules: rules
                .into_iter()
                .map(|(category, points)| (category.to_string(), points))
                .collect(),
        }
    }

    /// Points per unit for `category`, if the rule set scores it.
    pub fn points_per(&self, category: &str) -> Option<f64> {
        self.rules.get(category).copied()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Rules shared by every preset; only the per-reception value differs.
const BASE_RULES: &[(&str, f64)] = &[
    ("passYards", 0.04),
    ("passTDs", 4.0),
    ("interceptions", -2.0),
    ("rushYards", 0.1),
    ("rushTDs", 6.0),
    ("receivingYards", 0.1),
    ("receivingTDs", 6.0),
    ("fumblesLost", -2.0),
    ("twoPointConversions", 2.0),
    // Kicking
    ("fgMade0_39", 3.0),
    ("fgMade40_49", 4.0),
    ("fgMade50Plus", 5.0),
    ("fgMissed", -1.0),
    ("extraPoints", 1.0),
    // Team defense
    ("sacks", 1.0),
    ("defInterceptions", 2.0),
    ("fumbleRecoveries", 2.0),
    ("defTDs", 6.0),
    ("safeties", 2.0),
    ("pointsAllowed0", 10.0),
    ("pointsAllowed1_6", 7.0),
    ("pointsAllowed7_13", 4.0),
    ("pointsAllowed14_20", 1.0),
    ("pointsAllowed28_34", -1.0),
    ("pointsAllowed35Plus", -4.0),
];

const PRESETS: &[(&str, &str, f64)] = &[
    ("ppr", "PPR", 1.0),
    ("half_ppr", "Half PPR", 0.5),
    ("standard", "Standard", 0.0),
];

/// All built-in rule sets, PPR first.
pub fn presets() -> Vec<ScoringRuleSet> {
    PRESETS
        .iter()
        .map(|&(id, name, per_reception)| {
            let mut set = ScoringRuleSet::new(id, name, BASE_RULES.iter().copied());
            set.rules.insert("receptions".into(), per_reception);
            set
        })
        .collect()
}

/// Look up a built-in rule set by id (case-insensitive).
pub fn preset(id: &str) -> Option<ScoringRuleSet> {
    presets()
        .into_iter()
        .find(|s| s.id.eq_ignore_ascii_case(id.trim()))
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Round to two decimal places. Halves round toward positive infinity, so
/// -12.345 becomes -12.34.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Round to three decimal places, halves toward positive infinity.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0 + 0.5).floor() / 1000.0
}

/// Projected fantasy points for `player` under `scoring`, rounded to two
/// decimals. Pure: identical inputs always give bit-identical output.
pub fn fantasy_points(player: &Player, scoring: &ScoringRuleSet) -> f64 {
    let total: f64 = player
        .projections
        .iter()
        .filter_map(|(category, &projected)| {
            scoring.points_per(category).map(|per| projected * per)
        })
        .sum();
    round2(total)
}

/// Every player paired with its points, sorted descending by points. Ties
/// keep pool order.
pub fn rank_players_by_points<'a>(
    players: &'a [Player],
    scoring: &ScoringRuleSet,
) -> Vec<(&'a Player, f64)> {
    let mut ranked: Vec<(&Player, f64)> = players
        .iter()
        .map(|p| (p, fantasy_points(p, scoring)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
