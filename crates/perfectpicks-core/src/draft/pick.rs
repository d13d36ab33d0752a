// Individual pick record.

use serde::{Deserialize, Serialize};

/// A single draft selection. Created once and never mutated; the ordered
/// sequence of picks is the entire draft state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Sequential pick number (1-indexed).
    pub overall: usize,
    /// Round number (1-indexed).
    pub round: usize,
    /// Position within the round (1-indexed).
    pub pick_in_round: usize,
    /// The team that made the pick (0-indexed).
    pub team_index: usize,
    /// ID of the selected player.
    pub player_id: String,
}
