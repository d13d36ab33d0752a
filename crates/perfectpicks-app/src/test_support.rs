// Shared helpers for unit tests.

use std::path::Path;

use perfectpicks_core::league::{LeagueConfig, RosterSlot, SlotType};
use perfectpicks_core::player::{load_players, Player, Position};
use perfectpicks_core::scoring::preset;

/// The 18-player fixture pool.
pub fn test_players() -> Vec<Player> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/players.csv");
    load_players(&path).expect("fixture pool should load")
}

/// A PPR league with one QB, RB, WR and TE slot per team: four rounds.
pub fn test_league(team_count: usize, draft_position: usize) -> LeagueConfig {
    LeagueConfig {
        name: "Session Test".into(),
        team_count,
        roster_slots: [Position::QB, Position::RB, Position::WR, Position::TE]
            .into_iter()
            .map(|pos| RosterSlot::new(SlotType::Position(pos), 1))
            .collect(),
        scoring: preset("ppr").expect("ppr preset exists"),
        draft_position,
    }
}
