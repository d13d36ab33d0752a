// Mock draft entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the player pool
// 4. Create the draft session and channels
// 5. Spawn the draft loop
// 6. Drive the user's seat on autopilot, printing each turn
// 7. Print the final roster

use std::time::Duration;

use perfectpicks_app::app::{self, LoopSettings, UiUpdate, UserCommand};
use perfectpicks_app::bot::BotDriver;
use perfectpicks_app::session::DraftSession;
use perfectpicks_core::config;
use perfectpicks_core::draft::roster::Roster;
use perfectpicks_core::engine::Recommendation;
use perfectpicks_core::player::load_players;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("perfectpicks starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, seat {}, scoring={}",
        config.league.name,
        config.league.team_count,
        config.league.draft_position,
        config.league.scoring.id
    );

    // 3. Load the player pool
    let players = load_players(&config.players_path).with_context(|| {
        format!("failed to load players from {}", config.players_path.display())
    })?;
    info!("Loaded {} players", players.len());
    if players.len() < config.league.total_picks() {
        println!(
            "warning: {} players for {} picks; the draft will stop early",
            players.len(),
            config.league.total_picks()
        );
    }

    // 4. Create the draft session and channels
    let session = DraftSession::new(config.league.clone(), players);
    let settings = LoopSettings {
        recommendation_count: config.recommendation_count,
        bot: BotDriver::new(Duration::from_millis(config.bot_pick_delay_ms)),
    };
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(256);

    println!(
        "{}: {} teams, {} rounds, you pick from seat {}",
        config.league.name,
        config.league.team_count,
        config.league.total_rounds(),
        config.league.draft_position
    );

    // 5. Spawn the draft loop
    let loop_handle = tokio::spawn(app::run(cmd_rx, ui_tx, session, settings));

    // 6. Front end: print updates, auto-draft the user's top recommendation
    while let Some(update) = ui_rx.recv().await {
        match update {
            UiUpdate::OnTheClock {
                overall,
                round,
                recommendations,
            } => {
                print_recommendations(overall, round, &recommendations);
                if let Some(top) = recommendations.first() {
                    let player_id = top.player.id.clone();
                    cmd_tx
                        .send(UserCommand::Draft { player_id })
                        .await
                        .context("draft loop stopped unexpectedly")?;
                }
            }
            UiUpdate::Picked(feedback) => {
                println!("  #{:<3} {}", feedback.pick.overall, feedback.message);
            }
            UiUpdate::Undone(pick) => println!("  undid pick {}", pick.overall),
            UiUpdate::Reset => println!("  draft reset"),
            UiUpdate::DraftComplete { roster } => {
                print_roster(&roster);
                let _ = cmd_tx.send(UserCommand::Quit).await;
            }
            UiUpdate::Stalled { overall } => {
                println!("Player pool exhausted at pick {overall}; stopping.");
                let _ = cmd_tx.send(UserCommand::Quit).await;
            }
            UiUpdate::Error(message) => {
                error!("Draft error: {}", message);
                println!("error: {message}");
            }
        }
    }

    // 7. Wait for the loop to hand back the session
    let session = loop_handle
        .await
        .context("draft loop task panicked")??;
    info!(
        "perfectpicks finished after {} picks",
        session.state().picks().len()
    );
    Ok(())
}

fn print_recommendations(overall: usize, round: usize, recommendations: &[Recommendation]) {
    println!();
    println!("Round {round}, pick {overall}: you're on the clock");
    for rec in recommendations {
        println!(
            "  {:>2}. {:<22} {:<3} {:<4} ADP {:>5.1}  score {:.3}  {}",
            rec.rank,
            rec.player.name,
            rec.player.position,
            rec.player.team,
            rec.player.adp,
            rec.score,
            rec.reasons.join("; ")
        );
    }
}

fn print_roster(roster: &Roster) {
    println!();
    println!("Your final roster:");
    for entry in &roster.slots {
        match &entry.player {
            Some(p) => println!("  {:<9} {:<22} {:>7.2}", entry.slot, p.name, p.points),
            None => println!("  {:<9} (empty)", entry.slot),
        }
    }
    for p in &roster.overflow {
        println!("  {:<9} {:<22} {:>7.2}", "-", p.name, p.points);
    }
    println!("  Projected total: {:.2}", roster.total_points());
}

/// Initialize tracing to log to a file (stdout carries the draft itself).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("perfectpicks.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("perfectpicks_app=info,perfectpicks_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
