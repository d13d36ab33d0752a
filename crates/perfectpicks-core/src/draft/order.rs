// Snake draft order.
//
// Odd rounds run team 1 -> N, even rounds run N -> 1. For 4 teams:
//   Round 1: 1 2 3 4
//   Round 2: 4 3 2 1
//   Round 3: 1 2 3 4
//
// Team indices are 0-indexed; overall pick, round and pick-in-round numbers
// are 1-indexed.

use serde::{Deserialize, Serialize};

/// Where a single overall pick falls in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickInfo {
    pub overall: usize,
    pub round: usize,
    pub pick_in_round: usize,
    pub team_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("pick {overall} is outside the draft (1..={total_picks})")]
    PickOutOfRange { overall: usize, total_picks: usize },

    #[error("a draft needs at least one team")]
    NoTeams,
}

/// Round containing `overall`: `ceil(overall / team_count)`.
pub fn round_for_pick(overall: usize, team_count: usize) -> usize {
    overall.div_ceil(team_count)
}

/// Team that owns the slot at `pick_in_round` during `round`.
fn team_in_round(round: usize, pick_in_round: usize, team_count: usize) -> usize {
    if round % 2 == 0 {
        team_count - pick_in_round
    } else {
        pick_in_round - 1
    }
}

/// Forward mapping from an overall pick number. Requires `overall >= 1` and
/// `team_count >= 1`; see [`checked_pick_info`] for a bounds-checked variant.
pub fn pick_info(overall: usize, team_count: usize) -> PickInfo {
    debug_assert!(overall >= 1 && team_count >= 1);
    let round = round_for_pick(overall, team_count);
    let pick_in_round = overall - (round - 1) * team_count;
    PickInfo {
        overall,
        round,
        pick_in_round,
        team_index: team_in_round(round, pick_in_round, team_count),
    }
}

/// 0-indexed team that makes pick `overall`.
pub fn team_for_pick(overall: usize, team_count: usize) -> usize {
    pick_info(overall, team_count).team_index
}

/// [`pick_info`] for a draft of `rounds` rounds, rejecting picks outside it.
pub fn checked_pick_info(
    overall: usize,
    team_count: usize,
    rounds: usize,
) -> Result<PickInfo, OrderError> {
    if team_count == 0 {
        return Err(OrderError::NoTeams);
    }
    let total_picks = team_count * rounds;
    if overall == 0 || overall > total_picks {
        return Err(OrderError::PickOutOfRange {
            overall,
            total_picks,
        });
    }
    Ok(pick_info(overall, team_count))
}

/// The full draft order, pick 1 first.
pub fn generate_draft_order(team_count: usize, rounds: usize) -> Vec<PickInfo> {
    let mut picks = Vec::with_capacity(team_count * rounds);
    let mut overall = 1;
    for round in 1..=rounds {
        for pick_in_round in 1..=team_count {
            picks.push(PickInfo {
                overall,
                round,
                pick_in_round,
                team_index: team_in_round(round, pick_in_round, team_count),
            });
            overall += 1;
        }
    }
    picks
}

/// Every overall pick number owned by `team_index`, in draft order. Empty
/// when the team is not in the league.
pub fn picks_for_team(team_index: usize, team_count: usize, rounds: usize) -> Vec<usize> {
    if team_index >= team_count {
        return Vec::new();
    }
    (1..=rounds)
        .map(|round| {
            let pick_in_round = if round % 2 == 0 {
                team_count - team_index
            } else {
                team_index + 1
            };
            (round - 1) * team_count + pick_in_round
        })
        .collect()
}

/// The first pick owned by `team_index` strictly after `after_overall`, or
/// `None` once the team has made its last pick.
pub fn next_pick_for_team(
    team_index: usize,
    after_overall: usize,
    team_count: usize,
    rounds: usize,
) -> Option<usize> {
    picks_for_team(team_index, team_count, rounds)
        .into_iter()
        .find(|&overall| overall > after_overall)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
