// Roster construction and slot assignment.

use serde::{Deserialize, Serialize};

use super::pick::DraftPick;
use crate::league::{RosterSlot, SlotType};
use crate::player::{find_player, Player, Position};
use crate::scoring::{fantasy_points, ScoringRuleSet};

/// A drafted player placed on a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosteredPlayer {
    pub player_id: String,
    pub name: String,
    pub position: Position,
    /// Projected fantasy points under the league's scoring.
    pub points: f64,
}

/// A single slot on a team's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub slot: SlotType,
    pub player: Option<RosteredPlayer>,
}

/// A team's complete roster of slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub slots: Vec<RosterEntry>,
    /// Players that fit no open slot.
    pub overflow: Vec<RosteredPlayer>,
}

impl Roster {
    /// One empty entry per slot in `layout`, ordered by `SlotType::sort_order()`.
    pub fn new(layout: &[RosterSlot]) -> Self {
        let mut slots: Vec<RosterEntry> = layout
            .iter()
            .flat_map(|s| {
                (0..s.count).map(move |_| RosterEntry {
                    slot: s.slot,
                    player: None,
                })
            })
            .collect();
        slots.sort_by_key(|e| e.slot.sort_order());
        Roster {
            slots,
            overflow: Vec::new(),
        }
    }

    /// Build a team's roster by placing its picks in draft order. Picks whose
    /// player is missing from `players` are skipped.
    pub fn from_picks<'a>(
        layout: &[RosterSlot],
        picks: impl IntoIterator<Item = &'a DraftPick>,
        players: &[Player],
        scoring: &ScoringRuleSet,
    ) -> Self {
        let mut roster = Roster::new(layout);
        for pick in picks {
            if let Some(player) = find_player(players, &pick.player_id) {
                roster.add_player(player, fantasy_points(player, scoring));
            }
        }
        roster
    }

    /// Whether there is an empty slot of exactly `slot` kind.
    pub fn has_empty_slot(&self, slot: SlotType) -> bool {
        self.slots
            .iter()
            .any(|e| e.slot == slot && e.player.is_none())
    }

    /// Add a player to the roster.
    ///
    /// Slot assignment priority:
    /// 1. Dedicated position slot
    /// 2. FLEX slot (RB/WR/TE only)
    /// 3. SUPERFLEX slot
    /// 4. Bench
    ///
    /// Returns `true` if the player was placed, `false` if it went to overflow.
    pub fn add_player(&mut self, player: &Player, points: f64) -> bool {
        let rostered = RosteredPlayer {
            player_id: player.id.clone(),
            name: player.name.clone(),
            position: player.position,
            points,
        };

        let priority = [
            SlotType::Position(player.position),
            SlotType::Flex,
            SlotType::SuperFlex,
            SlotType::Bench,
        ];
        for kind in priority {
            if !kind.accepts(player.position) {
                continue;
            }
            if let Some(entry) = self
                .slots
                .iter_mut()
                .find(|e| e.slot == kind && e.player.is_none())
            {
                entry.player = Some(rostered);
                return true;
            }
        }

        self.overflow.push(rostered);
        false
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|e| e.player.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.slots.len() - self.filled_count()
    }

    /// Projected points of every rostered player, overflow included.
    pub fn total_points(&self) -> f64 {
        self.slots
            .iter()
            .filter_map(|e| e.player.as_ref())
            .chain(self.overflow.iter())
            .map(|p| p.points)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
