// Recommendation engine: replacement levels, VOR, positional scarcity, roster
// needs and the draft-phase weighting that blends them.
//
// Every function here is a pure computation over its arguments. Nothing is
// cached between calls; callers re-run the engine whenever the pick log
// changes.

pub mod needs;
pub mod phase;
pub mod recommend;
pub mod scarcity;
pub mod vor;

use crate::draft::pick::DraftPick;
use crate::league::LeagueConfig;
use crate::player::Player;

pub use recommend::{recommend, Recommendation, ScoreBreakdown, DEFAULT_RECOMMENDATION_COUNT};

/// Everything the engine needs to rank the pool for one pick.
#[derive(Debug, Clone, Copy)]
pub struct EngineInput<'a> {
    /// The full player pool, drafted players included.
    pub players: &'a [Player],
    /// Picks made so far, in order.
    pub picks: &'a [DraftPick],
    pub league: &'a LeagueConfig,
    /// The overall pick number being recommended for.
    pub current_overall: usize,
}
