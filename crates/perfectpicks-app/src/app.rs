// Application event loop.
//
// Owns the draft session and drives it: bot turns fire after their delay,
// user commands arrive over a channel, and every state change is pushed to
// the front end as a `UiUpdate`.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::bot::BotDriver;
use crate::session::{DraftSession, PickFeedback};
use perfectpicks_core::draft::pick::DraftPick;
use perfectpicks_core::draft::roster::Roster;
use perfectpicks_core::engine::Recommendation;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Commands from the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Draft a player with the current pick, whoever is on the clock.
    Draft { player_id: String },
    /// Take back the most recent pick.
    Undo,
    /// Clear every pick.
    Reset,
    Quit,
}

/// Updates pushed to the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The user is on the clock.
    OnTheClock {
        overall: usize,
        round: usize,
        recommendations: Vec<Recommendation>,
    },
    Picked(PickFeedback),
    Undone(DraftPick),
    Reset,
    /// Every pick has been made. Carries the user's final roster.
    DraftComplete { roster: Roster },
    /// The pool ran out before the draft finished.
    Stalled { overall: usize },
    Error(String),
}

/// Loop settings taken from config.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub recommendation_count: usize,
    pub bot: BotDriver,
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the draft until the front end quits or the command channel closes.
///
/// Listens on two sources using `tokio::select!`:
/// 1. User commands from the front end
/// 2. The bot delay timer, armed only while a bot is on the clock
///
/// Returns the session so the caller can inspect the final state.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut session: DraftSession,
    settings: LoopSettings,
) -> anyhow::Result<DraftSession> {
    info!(
        "Draft loop started: {} teams, {} rounds, user seat {}",
        session.league().team_count,
        session.league().total_rounds(),
        session.league().draft_position
    );

    // Pick count at which the front end was last prompted, so each state is
    // announced once.
    let mut announced_at: Option<usize> = None;

    loop {
        let picks_made = session.state().picks().len();
        if announced_at != Some(picks_made) {
            announce(&session, settings.recommendation_count, &ui_tx).await;
            announced_at = Some(picks_made);
        }

        let bot_turn = settings.bot.should_act(&session);

        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut session, cmd, &ui_tx).await;
                        // Re-announce even if the pick count came back to
                        // where it was (undo then redo).
                        announced_at = None;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Bot pick after its delay ---
            _ = settings.bot.wait(), if bot_turn => {
                match settings.bot.pick_now(&mut session) {
                    Ok(Some(feedback)) => {
                        let _ = ui_tx.send(UiUpdate::Picked(feedback)).await;
                    }
                    Ok(None) => {
                        let overall = session.state().current_overall();
                        warn!("Draft stalled at pick {}: player pool exhausted", overall);
                        let _ = ui_tx.send(UiUpdate::Stalled { overall }).await;
                        break;
                    }
                    Err(e) => {
                        warn!("Bot pick failed: {}", e);
                        let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
                        break;
                    }
                }
            }
        }
    }

    info!(
        "Draft loop exiting after {} picks",
        session.state().picks().len()
    );
    Ok(session)
}

/// Tell the front end what the current state needs from it, if anything.
async fn announce(session: &DraftSession, count: usize, ui_tx: &mpsc::Sender<UiUpdate>) {
    if session.is_complete() {
        info!("Draft complete");
        let _ = ui_tx
            .send(UiUpdate::DraftComplete {
                roster: session.user_roster(),
            })
            .await;
    } else if session.is_user_pick() {
        let recommendations = session.recommendations(count);
        if recommendations.is_empty() {
            let overall = session.state().current_overall();
            warn!("No players left for the user at pick {}", overall);
            let _ = ui_tx.send(UiUpdate::Stalled { overall }).await;
            return;
        }
        let _ = ui_tx
            .send(UiUpdate::OnTheClock {
                overall: session.state().current_overall(),
                round: session.state().current_round(),
                recommendations,
            })
            .await;
    }
}

async fn handle_user_command(
    session: &mut DraftSession,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let update = match cmd {
        UserCommand::Draft { player_id } => match session.draft_player(&player_id) {
            Ok(feedback) => UiUpdate::Picked(feedback),
            Err(e) => {
                warn!("Rejected pick of {}: {}", player_id, e);
                UiUpdate::Error(e.to_string())
            }
        },
        UserCommand::Undo => match session.undo() {
            Some(pick) => UiUpdate::Undone(pick),
            None => UiUpdate::Error("no picks to undo".into()),
        },
        UserCommand::Reset => {
            session.reset();
            UiUpdate::Reset
        }
        UserCommand::Quit => return,
    };
    let _ = ui_tx.send(update).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
