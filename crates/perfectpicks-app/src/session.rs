// Draft session: the player pool, league and pick log bundled together, with
// the operations a front end needs on each turn.

use serde::Serialize;
use tracing::info;

use perfectpicks_core::draft::pick::DraftPick;
use perfectpicks_core::draft::roster::Roster;
use perfectpicks_core::draft::state::{DraftError, DraftState};
use perfectpicks_core::engine::{recommend, EngineInput, Recommendation};
use perfectpicks_core::league::LeagueConfig;
use perfectpicks_core::player::{find_player, Player};

/// Outcome of a successful pick, with a message suitable for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickFeedback {
    pub pick: DraftPick,
    pub player_name: String,
    /// Whether the pick was made by the user's team.
    pub by_user: bool,
    pub message: String,
}

/// A draft in progress.
#[derive(Debug, Clone)]
pub struct DraftSession {
    league: LeagueConfig,
    players: Vec<Player>,
    state: DraftState,
}

impl DraftSession {
    pub fn new(league: LeagueConfig, players: Vec<Player>) -> Self {
        let state = DraftState::new(&league);
        DraftSession {
            league,
            players,
            state,
        }
    }

    pub fn league(&self) -> &LeagueConfig {
        &self.league
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn is_user_pick(&self) -> bool {
        self.state.is_user_pick()
    }

    pub fn team_on_clock(&self) -> Option<usize> {
        self.state.team_on_clock()
    }

    /// Recommendations for the user's team at the current pick.
    pub fn recommendations(&self, count: usize) -> Vec<Recommendation> {
        self.recommendations_for(None, count)
    }

    /// Recommendations for `team_index` (the user's team when `None`) at the
    /// current pick. Empty once the draft is complete.
    pub fn recommendations_for(&self, team_index: Option<usize>, count: usize) -> Vec<Recommendation> {
        if self.state.is_complete() {
            return Vec::new();
        }
        let input = EngineInput {
            players: &self.players,
            picks: self.state.picks(),
            league: &self.league,
            current_overall: self.state.current_overall(),
        };
        recommend(&input, count, team_index)
    }

    /// Draft `player_id` with the current pick.
    pub fn draft_player(&mut self, player_id: &str) -> Result<PickFeedback, DraftError> {
        let player = find_player(&self.players, player_id).ok_or_else(|| {
            DraftError::UnknownPlayer {
                player_id: player_id.to_string(),
            }
        })?;
        let name = player.name.clone();

        let by_user = self.state.is_user_pick();
        let pick = self.state.record_pick(player_id)?;
        let message = if by_user {
            format!("Drafted {name}!")
        } else {
            format!("{name} drafted by Team {}", pick.team_index + 1)
        };
        info!("pick {}: {}", pick.overall, message);

        Ok(PickFeedback {
            pick,
            player_name: name,
            by_user,
            message,
        })
    }

    /// Take back the most recent pick, whoever made it.
    pub fn undo(&mut self) -> Option<DraftPick> {
        let undone = self.state.undo_pick();
        if let Some(pick) = &undone {
            info!("undid pick {} ({})", pick.overall, pick.player_id);
        }
        undone
    }

    /// Start the draft over.
    pub fn reset(&mut self) {
        self.state.reset();
        info!("draft reset");
    }

    /// Roster board for any team.
    pub fn roster(&self, team_index: usize) -> Roster {
        Roster::from_picks(
            &self.league.roster_slots,
            self.state.team_picks(team_index),
            &self.players,
            &self.league.scoring,
        )
    }

    pub fn user_roster(&self) -> Roster {
        self.roster(self.state.user_team_index())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_league, test_players};
    use perfectpicks_core::league::SlotType;
    use perfectpicks_core::player::Position;

    fn session() -> DraftSession {
        DraftSession::new(test_league(4, 2), test_players())
    }

    #[test]
    fn feedback_messages_distinguish_user_and_bots() {
        let mut s = session();
        // Seat 2: team 0 picks first.
        let bot = s.draft_player("rb1").unwrap();
        assert!(!bot.by_user);
        assert_eq!(bot.message, "Elite RB drafted by Team 1");

        let user = s.draft_player("wr1").unwrap();
        assert!(user.by_user);
        assert_eq!(user.message, "Drafted Elite WR!");
        assert_eq!(user.pick.team_index, 1);
    }

    #[test]
    fn unknown_player_is_rejected_without_recording() {
        let mut s = session();
        assert_eq!(
            s.draft_player("nobody"),
            Err(DraftError::UnknownPlayer {
                player_id: "nobody".into()
            })
        );
        assert!(s.state().picks().is_empty());
    }

    #[test]
    fn duplicate_pick_is_rejected() {
        let mut s = session();
        s.draft_player("rb1").unwrap();
        assert!(matches!(
            s.draft_player("rb1"),
            Err(DraftError::AlreadyDrafted { .. })
        ));
    }

    #[test]
    fn recommendations_exclude_drafted_and_follow_undo() {
        let mut s = session();
        let fresh = s.recommendations(5);
        assert_eq!(fresh.len(), 5);

        s.draft_player(&fresh[0].player.id).unwrap();
        let after = s.recommendations(5);
        assert!(after.iter().all(|r| r.player.id != fresh[0].player.id));

        let undone = s.undo().unwrap();
        assert_eq!(undone.player_id, fresh[0].player.id);
        assert_eq!(s.recommendations(5), fresh);
    }

    #[test]
    fn recommendations_for_other_team() {
        let mut s = session();
        s.draft_player("qb1").unwrap();
        // Team 0 has its QB; team 1 does not.
        let team0 = s.recommendations_for(Some(0), 20);
        let team1 = s.recommendations_for(Some(1), 20);
        let qb_need = |recs: &[Recommendation]| {
            recs.iter()
                .find(|r| r.player.position == Position::QB)
                .map(|r| r.breakdown.need_score)
                .unwrap()
        };
        assert_eq!(qb_need(&team0), 0.0);
        assert!(qb_need(&team1) > 0.5);
    }

    #[test]
    fn user_roster_places_picks() {
        let mut s = session();
        s.draft_player("rb1").unwrap();
        s.draft_player("rb2").unwrap();
        let roster = s.user_roster();
        assert_eq!(roster.filled_count(), 1);
        assert!(!roster.has_empty_slot(SlotType::Position(Position::RB)));
        assert_eq!(roster.total_points(), 302.0);
    }

    #[test]
    fn complete_draft_has_no_recommendations() {
        let mut s = session();
        while !s.is_complete() {
            let id = s.recommendations_for(s.team_on_clock(), 1)[0].player.id.clone();
            s.draft_player(&id).unwrap();
        }
        assert!(s.recommendations(10).is_empty());
        assert!(matches!(
            s.draft_player("te3"),
            Err(DraftError::DraftComplete { .. })
        ));

        s.reset();
        assert!(!s.is_complete());
        assert_eq!(s.state().current_overall(), 1);
    }
}
