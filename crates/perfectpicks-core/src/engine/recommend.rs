// Recommendation composer.
//
// Blends the four signals under the current phase's weights and returns the
// top of the available pool, ranked and annotated with reasons.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::needs::{analyze_needs, need_for_position};
use super::phase::{draft_phase, phase_weights};
use super::scarcity::{analyze_scarcity, scarcity_for_position};
use super::vor::{compute_vor, determine_replacement_levels};
use super::EngineInput;
use crate::draft::order::round_for_pick;
use crate::draft::pick::DraftPick;
use crate::player::{available_players, Player};
use crate::scoring::round3;

/// Batch size used when the caller has no preference.
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 10;

/// The four signal scores behind a recommendation, each rounded to 3
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// VOR normalized by the best VOR in the batch.
    pub vor_score: f64,
    pub scarcity_score: f64,
    pub need_score: f64,
    pub adp_value_score: f64,
}

/// A ranked candidate for the pick under consideration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub player: Player,
    /// Weighted composite, rounded to 3 decimals.
    pub score: f64,
    /// 1-indexed position within the returned batch.
    pub rank: usize,
    /// Never empty.
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// How far a player has fallen past (or sits ahead of) their ADP, scaled so
/// one round's worth of picks moves the score by 0.5. 0.5 means the player
/// is being taken exactly at ADP.
pub fn adp_value(player: &Player, current_overall: usize, team_count: usize) -> f64 {
    let normalized = -(player.adp - current_overall as f64) / team_count.max(1) as f64;
    (0.5 + normalized * 0.5).clamp(0.0, 1.0)
}

/// Divide every value by the batch maximum. All zeros when the maximum is
/// not positive.
fn normalize(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max).collect()
}

/// Justifications for a candidate, checked in a fixed order. Always returns
/// at least one.
fn reasons(player: &Player, vor: f64, scarcity: f64, need: f64, adp: f64) -> Vec<String> {
    let pos = player.position;
    let mut out = Vec::new();

    if vor > 0.7 {
        out.push(format!("Elite value over replacement at {pos}"));
    } else if vor > 0.4 {
        out.push("Strong value over replacement".to_string());
    }

    if scarcity > 0.6 {
        out.push(format!("{pos} pool thinning quickly"));
    }

    if need > 0.7 {
        out.push(format!("Fills critical roster need at {pos}"));
    } else if need > 0.4 {
        out.push(format!("Addresses roster need at {pos}"));
    }

    if adp > 0.7 {
        out.push("Falling past ADP, great value pick".to_string());
    } else if adp > 0.5 {
        out.push("Good value relative to ADP".to_string());
    }

    if out.is_empty() {
        out.push("Best available option".to_string());
    }
    out
}

/// Rank the available pool for the pick at `input.current_overall`.
///
/// Needs are evaluated for `for_team` (0-indexed), or the user's team when
/// `None`. Returns at most `count` recommendations sorted by score
/// descending; equal scores keep pool order. Empty when every player has
/// been drafted.
pub fn recommend(
    input: &EngineInput<'_>,
    count: usize,
    for_team: Option<usize>,
) -> Vec<Recommendation> {
    let league = input.league;
    let team_count = league.team_count;
    let slots = &league.roster_slots;
    let scoring = &league.scoring;

    let total_rounds = league.total_rounds();
    let current_round = round_for_pick(input.current_overall, team_count.max(1));
    let team_index = for_team.unwrap_or_else(|| league.user_team_index());

    let team_picks: Vec<&DraftPick> = input
        .picks
        .iter()
        .filter(|p| p.team_index == team_index)
        .collect();
    let drafted: HashSet<&str> = input.picks.iter().map(|p| p.player_id.as_str()).collect();
    let available = available_players(input.players, &drafted);

    if available.is_empty() {
        return Vec::new();
    }

    let phase = draft_phase(current_round, total_rounds);
    let weights = phase_weights(phase);

    let levels = determine_replacement_levels(input.players, scoring, team_count, slots);
    let raw_vor: Vec<f64> = available
        .iter()
        .map(|p| compute_vor(p, scoring, &levels))
        .collect();
    let vor = normalize(&raw_vor);

    let scarcities = analyze_scarcity(&available, input.players, scoring, team_count, slots);
    let needs = analyze_needs(&team_picks, input.players, slots, total_rounds, current_round);

    debug!(
        "recommend: pick {} round {}/{} phase {} team {}: {} available",
        input.current_overall,
        current_round,
        total_rounds,
        phase,
        team_index,
        available.len()
    );

    let mut scored: Vec<Recommendation> = available
        .iter()
        .zip(vor)
        .map(|(&player, vor_score)| {
            let scarcity_score = scarcity_for_position(&scarcities, player.position);
            let need_score = need_for_position(&needs, player.position);
            let adp_value_score = adp_value(player, input.current_overall, team_count);

            let composite = vor_score * weights.vor
                + scarcity_score * weights.scarcity
                + need_score * weights.need
                + adp_value_score * weights.adp_value;

            Recommendation {
                player: player.clone(),
                score: round3(composite),
                rank: 0,
                reasons: reasons(player, vor_score, scarcity_score, need_score, adp_value_score),
                breakdown: ScoreBreakdown {
                    vor_score: round3(vor_score),
                    scarcity_score: round3(scarcity_score),
                    need_score: round3(need_score),
                    adp_value_score: round3(adp_value_score),
                },
            }
        })
        .collect();

    // sort_by is stable: ties keep pool order.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(count);
    for (i, rec) in scored.iter_mut().enumerate() {
        rec.rank = i + 1;
    }
    scored
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueConfig;
    use crate::player::Position;
    use crate::test_fixtures::{approx_eq, make_pick, test_league, test_players};

    fn run(
        players: &[Player],
        picks: &[DraftPick],
        league: &LeagueConfig,
        current_overall: usize,
        count: usize,
        for_team: Option<usize>,
    ) -> Vec<Recommendation> {
        let input = EngineInput {
            players,
            picks,
            league,
            current_overall,
        };
        recommend(&input, count, for_team)
    }

    fn first_pick(count: usize) -> Vec<Recommendation> {
        run(&test_players(), &[], &test_league(), 1, count, None)
    }

    fn find<'a>(recs: &'a [Recommendation], id: &str) -> &'a Recommendation {
        recs.iter().find(|r| r.player.id == id).unwrap()
    }

    #[test]
    fn adp_value_scale() {
        let mut player = test_players().remove(0);
        player.adp = 11.0;
        assert!(approx_eq(adp_value(&player, 11, 10), 0.5, 1e-12));
        // One round past ADP saturates.
        assert_eq!(adp_value(&player, 21, 10), 1.0);
        assert_eq!(adp_value(&player, 1, 10), 0.0);
        assert!(approx_eq(adp_value(&player, 16, 10), 0.75, 1e-12));
    }

    #[test]
    fn normalize_handles_zero_max() {
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(&[50.0, 100.0, 0.0]), vec![0.5, 1.0, 0.0]);
    }

    #[test]
    fn first_pick_worked_example() {
        let recs = first_pick(18);
        assert_eq!(recs.len(), 18);
        assert_eq!(recs[0].player.id, "rb1");
        assert_eq!(recs[0].score, 0.652);
        assert_eq!(
            recs[0].breakdown,
            ScoreBreakdown {
                vor_score: 1.0,
                scarcity_score: 0.0,
                need_score: 0.567,
                adp_value_score: 0.475,
            }
        );
        assert_eq!(
            recs[0].reasons,
            vec![
                "Elite value over replacement at RB".to_string(),
                "Addresses roster need at RB".to_string(),
            ]
        );

        assert_eq!(find(&recs, "wr1").score, 0.561);
        assert_eq!(find(&recs, "k1").score, 0.253);
        assert_eq!(find(&recs, "k1").breakdown.scarcity_score, 1.0);
    }

    #[test]
    fn end_to_end_top_is_rb_or_wr() {
        let recs = first_pick(3);
        assert_eq!(recs.len(), 3);
        assert!(matches!(recs[0].player.position, Position::RB | Position::WR));
    }

    #[test]
    fn batch_is_sorted_and_ranked() {
        let recs = first_pick(DEFAULT_RECOMMENDATION_COUNT);
        assert_eq!(recs.len(), DEFAULT_RECOMMENDATION_COUNT);
        for (i, rec) in recs.iter().enumerate() {
            assert_eq!(rec.rank, i + 1);
        }
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn drafted_players_are_excluded() {
        let players = test_players();
        let picks = vec![make_pick(1, 10, "rb1"), make_pick(2, 10, "wr1")];
        let recs = run(&players, &picks, &test_league(), 3, 50, None);
        assert_eq!(recs.len(), players.len() - 2);
        assert!(recs.iter().all(|r| r.player.id != "rb1" && r.player.id != "wr1"));
    }

    #[test]
    fn count_limits_batch() {
        assert_eq!(first_pick(1).len(), 1);
        assert!(first_pick(0).is_empty());
        assert_eq!(first_pick(100).len(), test_players().len());
    }

    #[test]
    fn empty_pool_gives_empty_batch() {
        let players = test_players();
        let picks: Vec<DraftPick> = players
            .iter()
            .enumerate()
            .map(|(i, p)| make_pick(i + 1, 10, &p.id))
            .collect();
        let recs = run(&players, &picks, &test_league(), picks.len() + 1, 10, None);
        assert!(recs.is_empty());
        assert!(run(&[], &[], &test_league(), 1, 10, None).is_empty());
    }

    #[test]
    fn every_recommendation_has_reasons() {
        let players = test_players();
        let league = test_league();
        let mut picks = Vec::new();
        for (i, id) in ["rb1", "wr1", "rb2", "qb1", "te1", "wr2"].iter().enumerate() {
            picks.push(make_pick(i + 1, 10, id));
            let recs = run(&players, &picks, &league, i + 2, 50, None);
            for rec in &recs {
                assert!(!rec.reasons.is_empty(), "{}", rec.player.id);
            }
        }
    }

    #[test]
    fn fallback_reason_when_no_threshold_met() {
        let player = test_players().remove(0);
        assert_eq!(
            reasons(&player, 0.1, 0.1, 0.1, 0.1),
            vec!["Best available option".to_string()]
        );
        let all = reasons(&player, 0.5, 0.9, 0.8, 0.6);
        assert_eq!(
            all,
            vec![
                "Strong value over replacement".to_string(),
                "QB pool thinning quickly".to_string(),
                "Fills critical roster need at QB".to_string(),
                "Good value relative to ADP".to_string(),
            ]
        );
    }

    #[test]
    fn equal_scores_keep_pool_order() {
        // k1 and dst1 score identically at pick 1.
        let recs = first_pick(18);
        let k = recs.iter().position(|r| r.player.id == "k1").unwrap();
        let dst = recs.iter().position(|r| r.player.id == "dst1").unwrap();
        assert_eq!(recs[k].score, recs[dst].score);
        assert_eq!(dst, k + 1);

        // Reversing the pool reverses the tie.
        let mut reversed = test_players();
        reversed.reverse();
        let recs = run(&reversed, &[], &test_league(), 1, 18, None);
        let k = recs.iter().position(|r| r.player.id == "k1").unwrap();
        let dst = recs.iter().position(|r| r.player.id == "dst1").unwrap();
        assert_eq!(k, dst + 1);
    }

    #[test]
    fn team_override_uses_that_teams_needs() {
        let players = test_players();
        let picks = vec![make_pick(1, 10, "qb1")];
        let league = test_league();

        // Team 0 already has its QB.
        let user = run(&players, &picks, &league, 2, 50, None);
        assert_eq!(find(&user, "qb2").breakdown.need_score, 0.0);

        // Team 1 is on the clock and has nothing.
        let bot = run(&players, &picks, &league, 2, 50, Some(1));
        assert_eq!(find(&bot, "qb2").breakdown.need_score, 0.533);
    }

    #[test]
    fn rerun_after_undo_matches_fresh_run() {
        let players = test_players();
        let league = test_league();
        let before = run(&players, &[make_pick(1, 10, "rb1")], &league, 2, 10, None);
        let mut picks = vec![make_pick(1, 10, "rb1"), make_pick(2, 10, "wr1")];
        picks.pop();
        let after = run(&players, &picks, &league, 2, 10, None);
        assert_eq!(before, after);
    }
}
