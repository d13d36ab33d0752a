// Simulated opponents.
//
// Each bot turn waits a fixed delay, then takes the single top
// recommendation for the team on the clock. Bots never act on the user's
// turn or after the draft is complete.

use std::time::Duration;

use tracing::{debug, warn};

use crate::session::{DraftSession, PickFeedback};
use perfectpicks_core::draft::state::DraftError;

/// Delay before each bot pick unless configured otherwise.
pub const DEFAULT_BOT_PICK_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy)]
pub struct BotDriver {
    delay: Duration,
}

impl Default for BotDriver {
    fn default() -> Self {
        BotDriver::new(DEFAULT_BOT_PICK_DELAY)
    }
}

impl BotDriver {
    pub fn new(delay: Duration) -> Self {
        BotDriver { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        BotDriver::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a bot should pick now.
    pub fn should_act(&self, session: &DraftSession) -> bool {
        !session.is_complete() && !session.is_user_pick()
    }

    /// The artificial "thinking" delay. Holds no borrow of the session, so
    /// callers can race it against other input.
    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }

    /// Draft the top recommendation for the team on the clock, immediately.
    /// `Ok(None)` when it is not a bot's turn or nobody is left to draft.
    pub fn pick_now(&self, session: &mut DraftSession) -> Result<Option<PickFeedback>, DraftError> {
        if !self.should_act(session) {
            return Ok(None);
        }
        let Some(team) = session.team_on_clock() else {
            return Ok(None);
        };

        let Some(top) = session.recommendations_for(Some(team), 1).into_iter().next() else {
            warn!("no players left for team {} at pick {}", team + 1, session.state().current_overall());
            return Ok(None);
        };
        debug!("bot team {} takes {} ({:.3})", team + 1, top.player.id, top.score);
        session.draft_player(&top.player.id).map(Some)
    }

    /// Wait the delay, then pick. Does not wait when it is not a bot's turn.
    pub async fn take_turn(&self, session: &mut DraftSession) -> Result<Option<PickFeedback>, DraftError> {
        if !self.should_act(session) {
            return Ok(None);
        }
        self.wait().await;
        self.pick_now(session)
    }

    /// Run bot turns until the user is on the clock, the draft ends, or the
    /// pool runs dry. Returns every pick made, in order.
    pub async fn run_until_user_turn(
        &self,
        session: &mut DraftSession,
    ) -> Result<Vec<PickFeedback>, DraftError> {
        let mut made = Vec::new();
        while let Some(feedback) = self.take_turn(session).await? {
            made.push(feedback);
        }
        Ok(made)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
