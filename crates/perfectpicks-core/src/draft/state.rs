// Draft state: the append-only pick log and everything derived from it.
//
// The ordered pick list is the only mutable draft data. Whose turn it is, the
// current round, and each team's roster are all recomputed from it on demand,
// so undo is just "drop the last pick".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::order::{checked_pick_info, team_for_pick, OrderError};
use super::pick::DraftPick;
use crate::league::LeagueConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("the draft is complete ({total_picks} picks made)")]
    DraftComplete { total_picks: usize },

    #[error("player '{player_id}' has already been drafted")]
    AlreadyDrafted { player_id: String },

    #[error("player '{player_id}' is not in the player pool")]
    UnknownPlayer { player_id: String },

    #[error("expected pick {expected}, found pick {found}")]
    OutOfOrder { expected: usize, found: usize },

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// The complete state of a snake draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftState {
    /// All recorded picks in order. `picks[i].overall == i + 1`.
    picks: Vec<DraftPick>,
    team_count: usize,
    rounds: usize,
    user_team_index: usize,
}

impl DraftState {
    /// An empty draft for `league`: one round per roster slot.
    pub fn new(league: &LeagueConfig) -> Self {
        DraftState {
            picks: Vec::new(),
            team_count: league.team_count,
            rounds: league.total_rounds(),
            user_team_index: league.user_team_index(),
        }
    }

    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn total_picks(&self) -> usize {
        self.team_count * self.rounds
    }

    /// The pick about to be made (1-indexed). Once the draft is complete this
    /// is `total_picks + 1`.
    pub fn current_overall(&self) -> usize {
        (self.picks.len() + 1).min(self.total_picks() + 1)
    }

    pub fn current_round(&self) -> usize {
        (self.picks.len() + 1).div_ceil(self.team_count.max(1))
    }

    pub fn is_complete(&self) -> bool {
        self.picks.len() >= self.total_picks()
    }

    /// Team on the clock, or `None` once every pick has been made.
    pub fn team_on_clock(&self) -> Option<usize> {
        if self.is_complete() {
            None
        } else {
            Some(team_for_pick(self.current_overall(), self.team_count))
        }
    }

    pub fn is_user_pick(&self) -> bool {
        self.team_on_clock() == Some(self.user_team_index)
    }

    pub fn user_team_index(&self) -> usize {
        self.user_team_index
    }

    /// Picks made by `team_index`, in draft order.
    pub fn team_picks(&self, team_index: usize) -> Vec<&DraftPick> {
        self.picks
            .iter()
            .filter(|p| p.team_index == team_index)
            .collect()
    }

    pub fn drafted_ids(&self) -> HashSet<&str> {
        self.picks.iter().map(|p| p.player_id.as_str()).collect()
    }

    pub fn is_drafted(&self, player_id: &str) -> bool {
        self.picks.iter().any(|p| p.player_id == player_id)
    }

    /// Record `player_id` as the next pick. Round, slot and team are derived
    /// from snake order. Returns the new pick.
    pub fn record_pick(&mut self, player_id: &str) -> Result<DraftPick, DraftError> {
        if self.is_complete() {
            return Err(DraftError::DraftComplete {
                total_picks: self.total_picks(),
            });
        }
        if self.is_drafted(player_id) {
            return Err(DraftError::AlreadyDrafted {
                player_id: player_id.to_string(),
            });
        }

        let info = checked_pick_info(self.picks.len() + 1, self.team_count, self.rounds)?;
        let pick = DraftPick {
            overall: info.overall,
            round: info.round,
            pick_in_round: info.pick_in_round,
            team_index: info.team_index,
            player_id: player_id.to_string(),
        };
        debug!(
            "pick {} (round {}, team {}): {}",
            pick.overall, pick.round, pick.team_index, pick.player_id
        );
        self.picks.push(pick.clone());
        Ok(pick)
    }

    /// Remove and return the most recent pick.
    pub fn undo_pick(&mut self) -> Option<DraftPick> {
        let undone = self.picks.pop();
        if let Some(pick) = &undone {
            debug!("undid pick {}: {}", pick.overall, pick.player_id);
        }
        undone
    }

    /// Clear every pick.
    pub fn reset(&mut self) {
        self.picks.clear();
    }

    /// Rebuild the log by replaying a saved pick sequence. The sequence must
    /// be numbered 1, 2, 3... with no repeated players; team assignments are
    /// recomputed from snake order. On error the state is left empty.
    pub fn restore_from_picks(&mut self, picks: Vec<DraftPick>) -> Result<(), DraftError> {
        self.reset();
        for pick in picks {
            let expected = self.picks.len() + 1;
            if pick.overall != expected {
                self.reset();
                return Err(DraftError::OutOfOrder {
                    expected,
                    found: pick.overall,
                });
            }
            let recorded = match self.record_pick(&pick.player_id) {
                Ok(recorded) => recorded,
                Err(e) => {
                    self.reset();
                    return Err(e);
                }
            };
            if recorded.team_index != pick.team_index {
                warn!(
                    "pick {} was saved for team {} but snake order gives team {}",
                    pick.overall, pick.team_index, recorded.team_index
                );
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
