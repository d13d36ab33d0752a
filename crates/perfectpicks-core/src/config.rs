// Configuration loading and parsing (league.toml, draft.toml).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::league::{LeagueConfig, RosterSlot};
use crate::scoring::preset;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },

    #[error("unknown scoring preset `{id}` (expected ppr, half_ppr or standard)")]
    UnknownScoringPreset { id: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    /// Recommendations shown per turn.
    pub recommendation_count: usize,
    /// Artificial delay before each simulated opponent pick.
    pub bot_pick_delay_ms: u64,
    /// Player data file, resolved against the base directory.
    pub players_path: PathBuf,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSection,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    name: String,
    num_teams: usize,
    /// 1-indexed seat of the user.
    draft_position: usize,
    /// Scoring preset id.
    scoring: String,
    roster: Vec<RosterSlot>,
    #[serde(default)]
    scoring_overrides: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    recommendations: RecommendationsSection,
    #[serde(default)]
    bots: BotsSection,
    data: DataSection,
}

#[derive(Debug, Clone, Deserialize)]
struct RecommendationsSection {
    count: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct BotsSection {
    #[serde(default = "default_pick_delay_ms")]
    pick_delay_ms: u64,
}

impl Default for BotsSection {
    fn default() -> Self {
        BotsSection {
            pick_delay_ms: default_pick_delay_ms(),
        }
    }
}

fn default_pick_delay_ms() -> u64 {
    800
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    players: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from `config/league.toml` and `config/draft.toml`,
/// both relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_file: LeagueFile = parse_file(&league_path)?;
    let section = league_file.league;

    let mut scoring = preset(&section.scoring).ok_or_else(|| ConfigError::UnknownScoringPreset {
        id: section.scoring.clone(),
    })?;
    scoring.rules.extend(section.scoring_overrides);

    let league = LeagueConfig {
        name: section.name,
        team_count: section.num_teams,
        roster_slots: section.roster,
        scoring,
        draft_position: section.draft_position,
    };

    // --- draft.toml (required) ---
    let draft_path = config_dir.join("draft.toml");
    let draft_file: DraftFile = parse_file(&draft_path)?;

    let config = Config {
        league,
        recommendation_count: draft_file.recommendations.count,
        bot_pick_delay_ms: draft_file.bots.pick_delay_ms,
        players_path: base_dir.join(draft_file.data.players),
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        // create_new never clobbers a user's edited config.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = read_file(path)?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.team_count == 0 {
        return Err(invalid("league.num_teams", "must be greater than 0"));
    }

    if league.draft_position == 0 || league.draft_position > league.team_count {
        return Err(invalid(
            "league.draft_position",
            format!(
                "must be between 1 and {} inclusive, got {}",
                league.team_count, league.draft_position
            ),
        ));
    }

    if league.roster_slots.is_empty() {
        return Err(invalid("league.roster", "must contain at least one slot"));
    }
    for (i, slot) in league.roster_slots.iter().enumerate() {
        if slot.count == 0 {
            return Err(invalid(
                format!("league.roster[{i}].count"),
                format!("{} slot count must be > 0", slot.slot),
            ));
        }
    }
    if league.roster_slots.iter().all(|s| s.slot.is_bench()) {
        return Err(invalid("league.roster", "must contain at least one starting slot"));
    }

    for (category, points) in &league.scoring.rules {
        if !points.is_finite() {
            return Err(invalid(
                format!("league.scoring.{category}"),
                format!("must be a finite number, got {points}"),
            ));
        }
    }

    if config.recommendation_count == 0 {
        return Err(invalid("recommendations.count", "must be > 0"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
