//! Per-level par records
//!
//! In-memory only; tracks the best (lowest) stroke count per level for the
//! current run.

use serde::{Deserialize, Serialize};

/// Best result for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: String,
    /// Fewest strokes taken
    pub best_par: u32,
    /// Times the level was completed
    pub completions: u32,
}

/// Run scorecard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scorecard {
    pub entries: Vec<LevelResult>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished level. Returns true if this is a new best.
    pub fn record(&mut self, level: &str, par: u32) -> bool {
        match self.entries.iter_mut().find(|e| e.level == level) {
            Some(entry) => {
                entry.completions += 1;
                if par < entry.best_par {
                    log::info!("New best on {}: {} (was {})", level, par, entry.best_par);
                    entry.best_par = par;
                    true
                } else {
                    false
                }
            }
            None => {
                self.entries.push(LevelResult {
                    level: level.to_string(),
                    best_par: par,
                    completions: 1,
                });
                true
            }
        }
    }

    /// Best par for a level, if completed
    pub fn best(&self, level: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.level == level)
            .map(|e| e.best_par)
    }

    /// Sum of best pars across completed levels
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.best_par).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
