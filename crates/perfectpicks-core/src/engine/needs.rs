// Roster needs for a single team.
//
// A position is needed when the team still has empty starting slots for it.
// Urgency grows as the number of unfilled starters approaches the number of
// rounds left. FLEX slots are shared by RB/WR/TE: extra players at those
// positions spill into FLEX, and an open FLEX alone never creates a need.

use std::collections::HashMap;

use serde::Serialize;

use crate::draft::pick::DraftPick;
use crate::league::{slot_count, RosterSlot, SlotType};
use crate::player::{Player, Position};
use crate::scoring::round3;

/// Need assessment for one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RosterNeed {
    pub position: Position,
    /// Players at this position the team has drafted.
    pub drafted: usize,
    /// Dedicated starting slots still open. See [`unfilled_starter_slots`].
    pub unfilled_starters: usize,
    /// Every slot a player here could occupy (dedicated, FLEX, SUPERFLEX,
    /// bench) minus the players already drafted at the position.
    pub unfilled_total: usize,
    /// 0-1, higher is more needed. Rounded to 3 decimals.
    pub need_score: f64,
}

/// Drafted players per position for `team_picks`. Picks whose player is not
/// in `players` are not counted.
fn drafted_by_position(team_picks: &[&DraftPick], players: &[Player]) -> HashMap<Position, usize> {
    let positions: HashMap<&str, Position> =
        players.iter().map(|p| (p.id.as_str(), p.position)).collect();

    let mut counts = HashMap::new();
    for pick in team_picks {
        if let Some(&pos) = positions.get(pick.player_id.as_str()) {
            *counts.entry(pos).or_insert(0) += 1;
        }
    }
    counts
}

/// Open dedicated starting slots at `position`, given per-position drafted
/// counts.
///
/// For FLEX-eligible positions, flex-eligible players beyond the combined
/// RB/WR/TE dedicated slots are assumed to fill FLEX first. When the dedicated
/// slots are full and FLEX is still open, the position reports no need.
pub fn unfilled_starter_slots(
    position: Position,
    slots: &[RosterSlot],
    drafted: &HashMap<Position, usize>,
) -> usize {
    let drafted_here = drafted.get(&position).copied().unwrap_or(0);
    let direct_unfilled = slot_count(slots, SlotType::Position(position)).saturating_sub(drafted_here);

    if !position.is_flex_eligible() {
        return direct_unfilled;
    }

    let flex_slots = slot_count(slots, SlotType::Flex);
    let flex_eligible_drafted: usize = Position::FLEX_ELIGIBLE
        .iter()
        .map(|pos| drafted.get(pos).copied().unwrap_or(0))
        .sum();
    let flex_direct_slots: usize = Position::FLEX_ELIGIBLE
        .iter()
        .map(|&pos| slot_count(slots, SlotType::Position(pos)))
        .sum();

    let flex_spill = flex_eligible_drafted.saturating_sub(flex_direct_slots);
    let flex_unfilled = flex_slots.saturating_sub(flex_spill);

    if direct_unfilled == 0 && flex_unfilled > 0 {
        return 0;
    }
    direct_unfilled
}

/// Need score from the unfilled starter count and rounds left (including the
/// current one).
///
/// - unfilled starters: `0.5 + min(1, unfilled / max(1, rounds_remaining)) * 0.5`
/// - nobody drafted at the position with 4 or fewer rounds left: 0.3
/// - otherwise 0
pub fn need_score(unfilled_starters: usize, drafted: usize, rounds_remaining: usize) -> f64 {
    let score = if unfilled_starters > 0 {
        let urgency = (unfilled_starters as f64 / rounds_remaining.max(1) as f64).min(1.0);
        0.5 + urgency * 0.5
    } else if drafted == 0 && rounds_remaining <= 4 {
        0.3
    } else {
        0.0
    };
    round3(score)
}

/// Needs for every position, in `Position::ALL` order.
///
/// `team_picks` are the picks belonging to the team being evaluated.
/// `current_round` past `total_rounds` counts as zero rounds remaining.
pub fn analyze_needs(
    team_picks: &[&DraftPick],
    players: &[Player],
    slots: &[RosterSlot],
    total_rounds: usize,
    current_round: usize,
) -> Vec<RosterNeed> {
    let rounds_remaining = (total_rounds + 1).saturating_sub(current_round);
    let drafted = drafted_by_position(team_picks, players);

    let shared_slots = slot_count(slots, SlotType::Bench)
        + slot_count(slots, SlotType::Flex)
        + slot_count(slots, SlotType::SuperFlex);

    Position::ALL
        .iter()
        .map(|&pos| {
            let drafted_here = drafted.get(&pos).copied().unwrap_or(0);
            let unfilled = unfilled_starter_slots(pos, slots, &drafted);
            let total_slots = slot_count(slots, SlotType::Position(pos)) + shared_slots;

            RosterNeed {
                position: pos,
                drafted: drafted_here,
                unfilled_starters: unfilled,
                unfilled_total: total_slots.saturating_sub(drafted_here),
                need_score: need_score(unfilled, drafted_here, rounds_remaining),
            }
        })
        .collect()
}

/// Need score for `position`, or 0 if it was not analyzed.
pub fn need_for_position(needs: &[RosterNeed], position: Position) -> f64 {
    needs
        .iter()
        .find(|n| n.position == position)
        .map(|n| n.need_score)
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
