use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use uuid::Uuid;

use crate::puzzle::Puzzle;

/// A puzzle as the surrounding application stores it. The engine types carry
/// no persistence logic themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPuzzle {
    pub id: Uuid,
    pub date_utc: String,
    pub puzzle: Puzzle,
}

impl SavedPuzzle {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            id: Uuid::new_v4(),
            date_utc: Utc::now().to_rfc3339(),
            puzzle,
        }
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<SavedPuzzle> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))
}

pub fn save<P: AsRef<Path>>(path: P, saved: &SavedPuzzle) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
