// Shared fixtures for unit tests: a small pool with realistic projections
// and the PPR/standard rule sets they are scored under.

use std::collections::BTreeMap;

use crate::draft::pick::DraftPick;
use crate::draft::order::pick_info;
use crate::league::{default_roster_slots, LeagueConfig};
use crate::player::{Player, Position};
use crate::scoring::ScoringRuleSet;

pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

pub fn ppr_scoring() -> ScoringRuleSet {
    ScoringRuleSet::new(
        "ppr",
        "PPR",
        [
            ("passYards", 0.04),
            ("passTDs", 4.0),
            ("interceptions", -2.0),
            ("rushYards", 0.1),
            ("rushTDs", 6.0),
            ("receptions", 1.0),
            ("receivingYards", 0.1),
            ("receivingTDs", 6.0),
            ("fumblesLost", -2.0),
        ],
    )
}

pub fn standard_scoring() -> ScoringRuleSet {
    let mut scoring = ppr_scoring();
    scoring.id = "standard".into();
    scoring.name = "Standard".into();
    scoring.rules.insert("receptions".into(), 0.0);
    scoring
}

pub fn test_league() -> LeagueConfig {
    LeagueConfig {
        name: "Test League".into(),
        team_count: 10,
        roster_slots: default_roster_slots(),
        scoring: ppr_scoring(),
        draft_position: 1,
    }
}

fn player(
    id: &str,
    name: &str,
    position: Position,
    team: &str,
    bye: u32,
    adp: f64,
    stats: &[(&str, f64)],
) -> Player {
    Player {
        id: id.into(),
        name: name.into(),
        position,
        team: team.into(),
        bye,
        adp,
        projections: stats
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn test_players() -> Vec<Player> {
    use Position::*;
    vec![
        player("qb1", "Star QB", QB, "KC", 6, 25.0, &[
            ("passYards", 4800.0), ("passTDs", 38.0), ("interceptions", 10.0),
            ("rushYards", 300.0), ("rushTDs", 3.0),
        ]),
        player("qb2", "Good QB", QB, "BUF", 12, 50.0, &[
            ("passYards", 4200.0), ("passTDs", 30.0), ("interceptions", 12.0),
            ("rushYards", 500.0), ("rushTDs", 5.0),
        ]),
        player("qb3", "Average QB", QB, "DAL", 7, 90.0, &[
            ("passYards", 3800.0), ("passTDs", 24.0), ("interceptions", 14.0),
            ("rushYards", 100.0), ("rushTDs", 1.0),
        ]),
        player("rb1", "Elite RB", RB, "ATL", 11, 1.5, &[
            ("rushYards", 1400.0), ("rushTDs", 12.0), ("receptions", 55.0),
            ("receivingYards", 450.0), ("receivingTDs", 3.0),
        ]),
        player("rb2", "Great RB", RB, "NYJ", 7, 4.0, &[
            ("rushYards", 1200.0), ("rushTDs", 10.0), ("receptions", 60.0),
            ("receivingYards", 500.0), ("receivingTDs", 2.0),
        ]),
        player("rb3", "Good RB", RB, "DET", 13, 15.0, &[
            ("rushYards", 1000.0), ("rushTDs", 8.0), ("receptions", 45.0),
            ("receivingYards", 350.0), ("receivingTDs", 2.0),
        ]),
        player("rb4", "Decent RB", RB, "SF", 9, 35.0, &[
            ("rushYards", 800.0), ("rushTDs", 6.0), ("receptions", 35.0),
            ("receivingYards", 280.0), ("receivingTDs", 1.0),
        ]),
        player("rb5", "Bench RB", RB, "CLE", 10, 80.0, &[
            ("rushYards", 600.0), ("rushTDs", 4.0), ("receptions", 20.0),
            ("receivingYards", 150.0), ("receivingTDs", 0.0),
        ]),
        player("wr1", "Elite WR", WR, "MIA", 10, 2.0, &[
            ("receptions", 110.0), ("receivingYards", 1600.0), ("receivingTDs", 12.0),
            ("rushYards", 40.0), ("rushTDs", 0.0),
        ]),
        player("wr2", "Great WR", WR, "MIN", 9, 5.0, &[
            ("receptions", 100.0), ("receivingYards", 1450.0), ("receivingTDs", 10.0),
            ("rushYards", 30.0), ("rushTDs", 0.0),
        ]),
        player("wr3", "Good WR", WR, "CIN", 8, 12.0, &[
            ("receptions", 90.0), ("receivingYards", 1200.0), ("receivingTDs", 9.0),
            ("rushYards", 50.0), ("rushTDs", 1.0),
        ]),
        player("wr4", "Solid WR", WR, "PHI", 5, 30.0, &[
            ("receptions", 75.0), ("receivingYards", 1000.0), ("receivingTDs", 7.0),
            ("rushYards", 20.0), ("rushTDs", 0.0),
        ]),
        player("wr5", "Bench WR", WR, "SEA", 12, 70.0, &[
            ("receptions", 60.0), ("receivingYards", 800.0), ("receivingTDs", 5.0),
            ("rushYards", 10.0), ("rushTDs", 0.0),
        ]),
        player("te1", "Elite TE", TE, "KC", 6, 10.0, &[
            ("receptions", 85.0), ("receivingYards", 900.0), ("receivingTDs", 8.0),
        ]),
        player("te2", "Good TE", TE, "DET", 13, 45.0, &[
            ("receptions", 65.0), ("receivingYards", 700.0), ("receivingTDs", 5.0),
        ]),
        player("te3", "Average TE", TE, "BAL", 14, 100.0, &[
            ("receptions", 45.0), ("receivingYards", 500.0), ("receivingTDs", 3.0),
        ]),
        player("k1", "Top Kicker", K, "BAL", 14, 130.0, &[
            ("fgMade0_39", 20.0), ("fgMade40_49", 8.0), ("fgMade50Plus", 4.0),
            ("extraPoints", 40.0), ("fgMissed", 3.0),
        ]),
        player("dst1", "Top DST", DST, "SF", 9, 120.0, &[
            ("sacks", 45.0), ("defInterceptions", 15.0), ("fumbleRecoveries", 8.0),
            ("defTDs", 3.0), ("safeties", 1.0), ("pointsAllowed7_13", 8.0),
        ]),
    ]
}

/// Build a pick for `overall` in a league of `team_count`, deriving the round
/// and team from snake order.
pub fn make_pick(overall: usize, team_count: usize, player_id: &str) -> DraftPick {
    let info = pick_info(overall, team_count);
    DraftPick {
        overall,
        round: info.round,
        pick_in_round: info.pick_in_round,
        team_index: info.team_index,
        player_id: player_id.into(),
    }
}

/// A pick credited to an explicit team, ignoring snake order. Useful for
/// building one team's roster in isolation.
pub fn pick_for_team(overall: usize, team_index: usize, player_id: &str) -> DraftPick {
    DraftPick {
        overall,
        round: 1,
        pick_in_round: 1,
        team_index,
        player_id: player_id.into(),
    }
}
