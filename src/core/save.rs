//! Core domain: persisted progress between runs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAVE_PATH: &str = "saves/progress.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Survival time of the most recent run, already formatted as mm:ss
    pub last_run_time: Option<String>,
    pub best_time_secs: f32,
    pub runs_played: u32,
}

impl SaveData {
    /// Record a finished run. Returns true if it set a new best time.
    pub fn record_run(&mut self, seconds: f32) -> bool {
        self.last_run_time = Some(super::format_clock(seconds));
        self.runs_played += 1;
        if seconds > self.best_time_secs {
            self.best_time_secs = seconds;
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
pub struct SaveError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save file {}: {}", self.path, self.message)
    }
}

pub fn load_save(path: &Path) -> Result<SaveData, SaveError> {
    let contents = fs::read_to_string(path).map_err(|e| SaveError {
        path: path.display().to_string(),
        message: format!("IO error: {}", e),
    })?;

    serde_json::from_str(&contents).map_err(|e| SaveError {
        path: path.display().to_string(),
        message: format!("Parse error: {}", e),
    })
}

pub fn store_save(path: &Path, data: &SaveData) -> Result<(), SaveError> {
    let to_error = |message: String| SaveError {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_error(format!("IO error: {}", e)))?;
    }
    let json =
        serde_json::to_string_pretty(data).map_err(|e| to_error(format!("Encode error: {}", e)))?;
    fs::write(path, json).map_err(|e| to_error(format!("IO error: {}", e)))
}

/// In-memory copy of the save file plus where it lives on disk.
#[derive(Resource, Debug)]
pub struct SaveStore {
    pub path: PathBuf,
    pub data: SaveData,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SAVE_PATH),
            data: SaveData::default(),
        }
    }
}

impl SaveStore {
    pub fn persist(&self) -> Result<(), SaveError> {
        store_save(&self.path, &self.data)
    }
}

pub(crate) fn load_save_data(mut store: ResMut<SaveStore>) {
    if !store.path.exists() {
        debug!("No save file at {}, starting fresh", store.path.display());
        return;
    }

    match load_save(&store.path) {
        Ok(data) => {
            info!(
                "Loaded save: last run {:?}, best {:.1}s",
                data.last_run_time, data.best_time_secs
            );
            store.data = data;
        }
        Err(e) => warn!("{}", e),
    }
}
