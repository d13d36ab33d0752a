// League setup: roster slot layout and the immutable league configuration
// threaded through every engine call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Position;
use crate::scoring::ScoringRuleSet;

// ---------------------------------------------------------------------------
// Slot kinds
// ---------------------------------------------------------------------------

/// What may occupy a roster slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotType {
    /// A dedicated slot for one position.
    Position(Position),
    /// RB, WR or TE.
    Flex,
    /// Any position.
    SuperFlex,
    Bench,
}

impl SlotType {
    /// Parse a slot label such as "QB", "FLEX", "SUPERFLEX" or "BENCH".
    pub fn from_str_slot(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FLEX" | "W/R/T" => Some(SlotType::Flex),
            "SUPERFLEX" | "SFLEX" | "OP" => Some(SlotType::SuperFlex),
            "BENCH" | "BE" | "BN" => Some(SlotType::Bench),
            other => Position::from_str_pos(other).map(SlotType::Position),
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            SlotType::Position(pos) => pos.display_str(),
            SlotType::Flex => "FLEX",
            SlotType::SuperFlex => "SUPERFLEX",
            SlotType::Bench => "BENCH",
        }
    }

    /// Whether a player at `position` may occupy this slot.
    pub fn accepts(&self, position: Position) -> bool {
        match self {
            SlotType::Position(pos) => *pos == position,
            SlotType::Flex => position.is_flex_eligible(),
            SlotType::SuperFlex | SlotType::Bench => true,
        }
    }

    pub fn is_bench(&self) -> bool {
        matches!(self, SlotType::Bench)
    }

    /// Deterministic ordering index for roster display: dedicated slots in
    /// position order, then shared slots, then bench.
    pub fn sort_order(&self) -> u8 {
        match self {
            SlotType::Position(pos) => match pos {
                Position::QB => 0,
                Position::RB => 1,
                Position::WR => 2,
                Position::TE => 3,
                Position::K => 6,
                Position::DST => 7,
            },
            SlotType::Flex => 4,
            SlotType::SuperFlex => 5,
            SlotType::Bench => 8,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_str())
    }
}

impl TryFrom<String> for SlotType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SlotType::from_str_slot(&value).ok_or_else(|| format!("unknown roster slot '{value}'"))
    }
}

impl From<SlotType> for String {
    fn from(slot: SlotType) -> Self {
        slot.display_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Roster layout
// ---------------------------------------------------------------------------

/// A slot kind and how many of them each team has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub slot: SlotType,
    pub count: usize,
}

impl RosterSlot {
    pub fn new(slot: SlotType, count: usize) -> Self {
        RosterSlot { slot, count }
    }
}

/// Standard layout: QB, 2 RB, 2 WR, TE, FLEX, DST, K and six bench spots.
pub fn default_roster_slots() -> Vec<RosterSlot> {
    vec![
        RosterSlot::new(SlotType::Position(Position::QB), 1),
        RosterSlot::new(SlotType::Position(Position::RB), 2),
        RosterSlot::new(SlotType::Position(Position::WR), 2),
        RosterSlot::new(SlotType::Position(Position::TE), 1),
        RosterSlot::new(SlotType::Flex, 1),
        RosterSlot::new(SlotType::Position(Position::DST), 1),
        RosterSlot::new(SlotType::Position(Position::K), 1),
        RosterSlot::new(SlotType::Bench, 6),
    ]
}

/// Total slots of exactly `slot` kind.
pub fn slot_count(slots: &[RosterSlot], slot: SlotType) -> usize {
    slots
        .iter()
        .filter(|s| s.slot == slot)
        .map(|s| s.count)
        .sum()
}

/// Starters plus bench.
pub fn total_roster_size(slots: &[RosterSlot]) -> usize {
    slots.iter().map(|s| s.count).sum()
}

/// Every slot except BENCH.
pub fn starter_count(slots: &[RosterSlot]) -> usize {
    slots
        .iter()
        .filter(|s| !s.slot.is_bench())
        .map(|s| s.count)
        .sum()
}

/// Starting slots a player at `position` could fill: dedicated slots, FLEX
/// slots for flex-eligible positions, and every SUPERFLEX slot.
pub fn starter_slots_for_position(slots: &[RosterSlot], position: Position) -> usize {
    slots
        .iter()
        .filter(|s| !s.slot.is_bench() && s.slot.accepts(position))
        .map(|s| s.count)
        .sum()
}

// ---------------------------------------------------------------------------
// League config
// ---------------------------------------------------------------------------

/// Everything the engine needs to know about the league. Immutable for the
/// duration of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub team_count: usize,
    pub roster_slots: Vec<RosterSlot>,
    pub scoring: ScoringRuleSet,
    /// The user's seat, 1-indexed.
    pub draft_position: usize,
}

impl LeagueConfig {
    /// The user's 0-indexed team.
    pub fn user_team_index(&self) -> usize {
        self.draft_position.saturating_sub(1)
    }

    /// One round per roster slot.
    pub fn total_rounds(&self) -> usize {
        total_roster_size(&self.roster_slots)
    }

    pub fn total_picks(&self) -> usize {
        self.team_count * self.total_rounds()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
