// Value Over Replacement (VOR).
//
// The replacement level at a position is the projected point total of the
// last player the league as a whole is expected to start there. VOR is how
// far a player's projection sits above that baseline.

use std::collections::HashMap;

use crate::league::{starter_slots_for_position, RosterSlot};
use crate::player::{Player, Position};
use crate::scoring::{fantasy_points, ScoringRuleSet};

/// Replacement-level points per position.
pub type ReplacementLevels = HashMap<Position, f64>;

// ---------------------------------------------------------------------------
// Replacement level computation
// ---------------------------------------------------------------------------

/// League-wide count of starters at `position`: starter slots a player there
/// could fill, times the number of teams. In a 10-team league with 2 RB and 1
/// FLEX slot, the replacement RB is RB30 (index 30, the 31st RB).
pub fn replacement_index(position: Position, team_count: usize, slots: &[RosterSlot]) -> usize {
    starter_slots_for_position(slots, position) * team_count
}

/// Replacement-level points for every position.
///
/// Players at each position are ranked by points descending; the level is
/// the points of the player at `min(replacement_index, pool_size - 1)`, or
/// zero when nobody plays the position. Pass the full pool (drafted players
/// included) so the baseline reflects the league's talent, not what is left.
pub fn determine_replacement_levels(
    players: &[Player],
    scoring: &ScoringRuleSet,
    team_count: usize,
    slots: &[RosterSlot],
) -> ReplacementLevels {
    let mut levels = ReplacementLevels::new();

    for pos in Position::ALL {
        let mut points: Vec<f64> = players
            .iter()
            .filter(|p| p.position == pos)
            .map(|p| fantasy_points(p, scoring))
            .collect();
        points.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let level = match points.len() {
            0 => 0.0,
            len => points[replacement_index(pos, team_count, slots).min(len - 1)],
        };
        levels.insert(pos, level);
    }

    levels
}

// ---------------------------------------------------------------------------
// Per-player VOR
// ---------------------------------------------------------------------------

/// `max(0, points - replacement)`, where `points` is the player's projected
/// total under the league's scoring.
pub fn vor_from_points(points: f64, position: Position, levels: &ReplacementLevels) -> f64 {
    let replacement = levels.get(&position).copied().unwrap_or(0.0);
    (points - replacement).max(0.0)
}

/// VOR for a single player. Never negative.
pub fn compute_vor(player: &Player, scoring: &ScoringRuleSet, levels: &ReplacementLevels) -> f64 {
    vor_from_points(fantasy_points(player, scoring), player.position, levels)
}

/// A player's points and VOR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerVor<'a> {
    pub player: &'a Player,
    pub points: f64,
    pub vor: f64,
}

/// Every player with points and VOR, sorted descending by VOR. Replacement
/// levels come from `players` itself.
pub fn rank_players_by_vor<'a>(
    players: &'a [Player],
    scoring: &ScoringRuleSet,
    team_count: usize,
    slots: &[RosterSlot],
) -> Vec<PlayerVor<'a>> {
    let levels = determine_replacement_levels(players, scoring, team_count, slots);

    let mut ranked: Vec<PlayerVor<'a>> = players
        .iter()
        .map(|player| {
            let points = fantasy_points(player, scoring);
            PlayerVor {
                player,
                points,
                vor: vor_from_points(points, player.position, &levels),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.vor.partial_cmp(&a.vor).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{default_roster_slots, SlotType};
    use crate::test_fixtures::{approx_eq, ppr_scoring, test_players};

    fn levels() -> ReplacementLevels {
        determine_replacement_levels(&test_players(), &ppr_scoring(), 10, &default_roster_slots())
    }

    #[test]
    fn replacement_index_uses_flex_and_team_count() {
        let slots = default_roster_slots();
        assert_eq!(replacement_index(Position::QB, 10, &slots), 10);
        assert_eq!(replacement_index(Position::RB, 10, &slots), 30);
        assert_eq!(replacement_index(Position::TE, 12, &slots), 24);
        assert_eq!(replacement_index(Position::K, 8, &slots), 8);
    }

    #[test]
    fn replacement_index_with_superflex() {
        let mut slots = default_roster_slots();
        slots.push(RosterSlot::new(SlotType::SuperFlex, 1));
        assert_eq!(replacement_index(Position::QB, 10, &slots), 20);
        assert_eq!(replacement_index(Position::WR, 10, &slots), 40);
    }

    #[test]
    fn small_pool_falls_back_to_last_player() {
        let levels = levels();
        // Every fixture position has fewer players than the replacement index,
        // so the worst player at each position sets the level.
        assert_eq!(levels[&Position::QB], 236.0);
        assert_eq!(levels[&Position::RB], 119.0);
        assert_eq!(levels[&Position::WR], 171.0);
        assert_eq!(levels[&Position::TE], 113.0);
        assert_eq!(levels[&Position::K], 0.0);
        assert_eq!(levels[&Position::DST], 0.0);
    }

    #[test]
    fn replacement_picks_player_at_index() {
        let players = test_players();
        // One team, one RB slot, no FLEX: the replacement RB is the 2nd best.
        let slots = vec![RosterSlot::new(SlotType::Position(Position::RB), 1)];
        let levels = determine_replacement_levels(&players, &ppr_scoring(), 1, &slots);
        assert_eq!(levels[&Position::RB], 302.0);
        // Positions without slots have index 0: the best player is the level.
        assert_eq!(levels[&Position::QB], 372.0);
    }

    #[test]
    fn empty_position_has_zero_level() {
        let players: Vec<Player> = test_players()
            .into_iter()
            .filter(|p| p.position != Position::TE)
            .collect();
        let levels =
            determine_replacement_levels(&players, &ppr_scoring(), 10, &default_roster_slots());
        assert_eq!(levels[&Position::TE], 0.0);
    }

    #[test]
    fn vor_values() {
        let players = test_players();
        let levels = levels();
        let scoring = ppr_scoring();
        let vor = |id: &str| {
            let p = players.iter().find(|p| p.id == id).unwrap();
            compute_vor(p, &scoring, &levels)
        };
        assert!(approx_eq(vor("rb1"), 211.0, 1e-9));
        assert!(approx_eq(vor("wr1"), 175.0, 1e-9));
        assert!(approx_eq(vor("qb1"), 136.0, 1e-9));
        assert_eq!(vor("rb5"), 0.0);
        assert_eq!(vor("k1"), 0.0);
    }

    #[test]
    fn vor_never_negative() {
        let players = test_players();
        let scoring = ppr_scoring();
        // A replacement level far above everyone.
        let high: ReplacementLevels = Position::ALL.iter().map(|&p| (p, 10_000.0)).collect();
        for p in &players {
            assert_eq!(compute_vor(p, &scoring, &high), 0.0);
        }
    }

    #[test]
    fn vor_monotonic_within_position() {
        let levels = levels();
        for pos in Position::ALL {
            let level = levels[&pos];
            let mut prev = f64::NEG_INFINITY;
            for step in 0..50 {
                let points = level - 100.0 + step as f64 * 5.0;
                let vor = vor_from_points(points, pos, &levels);
                assert!(vor >= prev);
                assert!(vor >= 0.0);
                prev = vor;
            }
        }
    }

    #[test]
    fn rank_by_vor_sorted() {
        let players = test_players();
        let ranked = rank_players_by_vor(&players, &ppr_scoring(), 10, &default_roster_slots());
        assert_eq!(ranked.len(), players.len());
        assert_eq!(ranked[0].player.id, "rb1");
        assert_eq!(ranked[0].points, 330.0);
        for pair in ranked.windows(2) {
            assert!(pair[0].vor >= pair[1].vor);
        }
    }
}
