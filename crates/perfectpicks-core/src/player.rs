// Player pool: positions, projected stat lines, and file loaders.
//
// Players are immutable once loaded. Projections are keyed by stat category
// name (e.g. "passYards", "receptions") so any scoring rule set can be applied
// to them without a fixed schema.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Football positions a player can be drafted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    /// Every position, in display order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DST,
    ];

    /// Positions that may fill a FLEX slot.
    pub const FLEX_ELIGIBLE: [Position; 3] = [Position::RB, Position::WR, Position::TE];

    /// Parse a position abbreviation (case-insensitive). "D/ST" and "DEF" are
    /// accepted as team defense.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" | "PK" => Some(Position::K),
            "DST" | "D/ST" | "DEF" => Some(Position::DST),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }

    /// Whether a player at this position can occupy a FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        Self::FLEX_ELIGIBLE.contains(self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A draftable player with projected seasonal stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    /// NFL team abbreviation.
    #[serde(default)]
    pub team: String,
    /// Bye week number.
    #[serde(default)]
    pub bye: u32,
    /// Average draft position. Lower means drafted earlier.
    pub adp: f64,
    /// Projected quantity per stat category.
    #[serde(default)]
    pub projections: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Pool selectors
// ---------------------------------------------------------------------------

/// Players whose ids are not in `drafted`, in pool order.
pub fn available_players<'a>(players: &'a [Player], drafted: &HashSet<&str>) -> Vec<&'a Player> {
    players
        .iter()
        .filter(|p| !drafted.contains(p.id.as_str()))
        .collect()
}

pub fn players_at_position<'a, I>(players: I, position: Position) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    players
        .into_iter()
        .filter(|p| p.position == position)
        .collect()
}

/// Case-insensitive substring search on player names.
pub fn search_players<'a, I>(players: I, query: &str) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let needle = query.trim().to_lowercase();
    players
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn find_player<'a>(players: &'a [Player], id: &str) -> Option<&'a Player> {
    players.iter().find(|p| p.id == id)
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlayerDataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// One CSV row. The fixed identity columns come first; every other column is
/// treated as a stat category. Empty cells mean "no projection".
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: serde_json::Value,
    name: String,
    position: String,
    // Loosely typed: under `flatten` a blank cell arrives as "" rather than
    // as a missing field.
    #[serde(default)]
    team: serde_json::Value,
    #[serde(default)]
    bye: serde_json::Value,
    adp: f64,
    #[serde(flatten)]
    stats: HashMap<String, serde_json::Value>,
}

impl RawPlayerRow {
    fn into_player(self) -> Option<Player> {
        let name = self.name.trim().to_string();
        let Some(position) = Position::from_str_pos(&self.position) else {
            warn!("skipping player '{}': unknown position '{}'", name, self.position);
            return None;
        };
        if !self.adp.is_finite() {
            warn!("skipping player '{}': non-finite ADP value", name);
            return None;
        }

        let team = cell_text(&self.team);
        let bye = match &self.bye {
            serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            serde_json::Value::String(s) if s.trim().is_empty() => Some(0),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            serde_json::Value::Null => Some(0),
            _ => None,
        }
        .unwrap_or_else(|| {
            warn!("player '{}': unreadable bye week {}, using 0", name, self.bye);
            0
        });

        let mut projections = BTreeMap::new();
        for (category, value) in self.stats {
            match value {
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(v) if v.is_finite() => {
                        projections.insert(category, v);
                    }
                    _ => warn!("player '{}': ignoring non-finite {}", name, category),
                },
                serde_json::Value::String(s) if s.trim().is_empty() => {}
                other => {
                    warn!("player '{}': ignoring non-numeric {} = {}", name, category, other);
                }
            }
        }

        Some(Player {
            id: cell_text(&self.id),
            name,
            position,
            team,
            bye,
            adp: self.adp,
            projections,
        })
    }
}

/// Text of a loosely typed cell. Blank and missing cells are empty.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_csv_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => players.extend(raw.into_player()),
            Err(e) => warn!("skipping malformed player row: {}", e),
        }
    }
    Ok(players)
}

fn load_players_from_json_reader<R: Read>(rdr: R) -> Result<Vec<Player>, serde_json::Error> {
    let players: Vec<Player> = serde_json::from_reader(rdr)?;
    Ok(players
        .into_iter()
        .filter(|p| {
            if p.adp.is_finite() {
                true
            } else {
                warn!("skipping player '{}': non-finite ADP value", p.name);
                false
            }
        })
        .collect())
}

/// Reject an empty pool or duplicated player ids.
fn validate_pool(players: &[Player]) -> Result<(), PlayerDataError> {
    if players.is_empty() {
        return Err(PlayerDataError::Validation(
            "player file produced zero valid rows".into(),
        ));
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.id.as_str()) {
            return Err(PlayerDataError::Validation(format!(
                "duplicate player id '{}'",
                p.id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load the player pool from a `.json` file (array of players) or any other
/// extension as CSV.
pub fn load_players(path: &Path) -> Result<Vec<Player>, PlayerDataError> {
    let file = std::fs::File::open(path).map_err(|e| PlayerDataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let players = if is_json {
        load_players_from_json_reader(file).map_err(|e| PlayerDataError::Json {
            path: path.display().to_string(),
            source: e,
        })?
    } else {
        load_players_from_csv_reader(file).map_err(|e| PlayerDataError::Csv {
            path: path.display().to_string(),
            source: e,
        })?
    };

    validate_pool(&players)?;
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
