//! Runtime configuration from environment variables.

use std::env;
use std::fs::File;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::types::{default_roster, EntityKind, Roster, MAX_ROSTER};

pub const DEFAULT_LOG_PATH: &str = "terra.log";

/// Screen extents `(height, width)` used for headless runs.
pub const HEADLESS_EXTENTS: (u16, u16) = (32, 100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraConfig {
    /// Seed for terrain and automata randomness.
    pub seed: u64,
    /// Entities spawned on every new map, in draw order.
    pub roster: Roster,
    /// Run this many frames without a terminal, then exit.
    pub headless_frames: Option<u64>,
}

impl Default for TerraConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            roster: default_roster(),
            headless_frames: None,
        }
    }
}

impl TerraConfig {
    /// Read `TERRA_SEED`, `TERRA_ROSTER` and `TERRA_HEADLESS_FRAMES`.
    ///
    /// `TERRA_LOG_PATH` is read separately by [`log_path_from_env`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take defaults.
    ///
    /// Values that fail to parse are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = match lookup("TERRA_SEED") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid TERRA_SEED, using clock seed");
                clock_seed()
            }),
            None => clock_seed(),
        };

        let roster = match lookup("TERRA_ROSTER") {
            Some(raw) => parse_roster(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "invalid TERRA_ROSTER, using default roster");
                default_roster()
            }),
            None => default_roster(),
        };


        let headless_frames = lookup("TERRA_HEADLESS_FRAMES").and_then(|raw| {
            let parsed = raw.trim().parse::<u64>().ok();
            if parsed.is_none() {
                warn!(value = %raw, "invalid TERRA_HEADLESS_FRAMES, running interactively");
            }
            parsed
        });

        Self {
            seed,
            roster,
            headless_frames,
        }
    }
}

/// Log file path from `TERRA_LOG_PATH`.
///
/// Read on its own so logging can be installed before the rest of the
/// configuration is parsed and warned about.
pub fn log_path_from_env() -> String {
    log_path_from(|key| env::var(key).ok())
}

fn log_path_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("TERRA_LOG_PATH")
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
}

/// Create the log file at `path`, or at `fallback` if `path` cannot be
/// created. Returns the file and the path actually used.
pub fn open_log_file(path: &str, fallback: &str) -> io::Result<(File, String)> {
    match File::create(path) {
        Ok(file) => Ok((file, path.to_string())),
        Err(_) if path != fallback => Ok((File::create(fallback)?, fallback.to_string())),
        Err(err) => Err(err),
    }
}

/// Parse a comma-separated roster such as `"wanderer,zipper,zipper"`.
///
/// Returns `None` if any entry is not an entity kind. Blank entries are
/// skipped, so an empty string is an empty roster. Entries past
/// [`MAX_ROSTER`] are dropped with a warning.
pub fn parse_roster(raw: &str) -> Option<Roster> {
    let mut roster = Roster::new();
    let mut dropped = 0usize;
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = EntityKind::from_str(name)?;
        if roster.try_push(kind).is_err() {
            dropped += 1;
        }
    }
    if dropped > 0 {
        warn!(dropped, max = MAX_ROSTER, "roster truncated");
    }
    Some(roster)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
