//! Episode history and best-score tracking
//!
//! The session records one entry per finished episode (a fail). The log is
//! diagnostic history; gameplay only ever reads the running best.

use serde::{Deserialize, Serialize};

/// Final tally of one play episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Successful taps this episode
    pub score: u32,
    /// Total clicks this episode, hits and misses
    pub clicks: u32,
}

/// All episodes of one session plus the running best score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    pub episodes: Vec<EpisodeRecord>,
    best: u32,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished episode. Returns true if it set a new best.
    pub fn record(&mut self, score: u32, clicks: u32) -> bool {
        self.episodes.push(EpisodeRecord { score, clicks });
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    pub fn best_score(&self) -> u32 {
        self.best
    }

    /// Number of finished episodes (equals the number of fails)
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Clicks across every recorded episode
    pub fn total_clicks(&self) -> u32 {
        self.episodes.iter().map(|e| e.clicks).sum()
    }

    /// Save the log as JSON. Used by the demo binary at shutdown.
    pub fn save_to_path(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Session log saved ({} episodes)", self.episodes.len());
        Ok(())
    }

    /// Load a previously saved log, falling back to an empty one.
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(log) => {
                    let log: SessionLog = log;
                    log::info!("Loaded session log ({} episodes)", log.episodes.len());
                    log
                }
                Err(err) => {
                    log::warn!("Session log unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No session log found, starting fresh");
                Self::new()
            }
        }
    }
}
