// Positional scarcity.
//
// For each position, measures how much of the above-replacement talent the
// league has already taken. A position where most starters are gone scores
// close to 1; an untouched position scores 0.

use serde::Serialize;

use super::vor::determine_replacement_levels;
use crate::league::RosterSlot;
use crate::player::{Player, Position};
use crate::scoring::{fantasy_points, round3, ScoringRuleSet};

// ---------------------------------------------------------------------------
// Scarcity entry
// ---------------------------------------------------------------------------

/// Scarcity analysis for a single position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionScarcity {
    pub position: Position,
    /// Available players at this position.
    pub remaining: usize,
    /// Available players projected strictly above replacement level.
    pub above_replacement: usize,
    /// Above-replacement players in the full pool, drafted or not.
    pub original_above_replacement: usize,
    /// `1 - above / original_above`, rounded to 3 decimals. 1 when the full
    /// pool never had anyone above replacement.
    pub scarcity_score: f64,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Scarcity for every position, in `Position::ALL` order.
///
/// Replacement levels always come from `all_players` so that the threshold
/// stays fixed as the draft progresses:
/// 1. Count available players at the position.
/// 2. Count those scoring strictly above replacement.
/// 3. Count the same in the full pool.
/// 4. Score = 1 - step 2 / step 3.
pub fn analyze_scarcity(
    available: &[&Player],
    all_players: &[Player],
    scoring: &ScoringRuleSet,
    team_count: usize,
    slots: &[RosterSlot],
) -> Vec<PositionScarcity> {
    let levels = determine_replacement_levels(all_players, scoring, team_count, slots);

    Position::ALL
        .iter()
        .map(|&pos| {
            let replacement = levels.get(&pos).copied().unwrap_or(0.0);
            let is_above = |p: &Player| fantasy_points(p, scoring) > replacement;

            let at_pos: Vec<&Player> = available
                .iter()
                .copied()
                .filter(|p| p.position == pos)
                .collect();
            let above = at_pos.iter().filter(|p| is_above(p)).count();
            let original_above = all_players
                .iter()
                .filter(|p| p.position == pos && is_above(p))
                .count();

            let score = if original_above > 0 {
                1.0 - above as f64 / original_above as f64
            } else {
                1.0
            };

            PositionScarcity {
                position: pos,
                remaining: at_pos.len(),
                above_replacement: above,
                original_above_replacement: original_above,
                scarcity_score: round3(score),
            }
        })
        .collect()
}

/// Scarcity score for `position`, or 0 if it was not analyzed.
pub fn scarcity_for_position(scarcities: &[PositionScarcity], position: Position) -> f64 {
    scarcities
        .iter()
        .find(|s| s.position == position)
        .map(|s| s.scarcity_score)
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
