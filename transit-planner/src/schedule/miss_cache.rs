//! Persistent record of stations the schedule source has no data for.
//!
//! Some stations in the catalogue (closed halts, aggregated stops) return
//! an error every time `/schedule` is queried for them. Remembering that
//! across restarts avoids re-paying the failed request on every search
//! that touches them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::StationCode;

use super::error::ScheduleError;

pub struct MissCache {
    path: PathBuf,
    misses: Mutex<HashSet<StationCode>>,
}

impl MissCache {
    /// Load the miss set from disk, starting empty if the file is absent
    /// or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let misses = std::fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).ok())
            .map(|codes| codes.into_iter().filter_map(|c| StationCode::parse(c).ok()).collect())
            .unwrap_or_default();
        Self {
            path,
            misses: Mutex::new(misses),
        }
    }

    pub fn contains(&self, code: &StationCode) -> bool {
        self.misses.lock().expect("miss cache mutex poisoned").contains(code)
    }

    /// Record a station as a miss and persist the updated set.
    pub fn record(&self, code: StationCode) -> Result<(), ScheduleError> {
        {
            let mut misses = self.misses.lock().expect("miss cache mutex poisoned");
            misses.insert(code);
        }
        self.save()
    }

    fn save(&self) -> Result<(), ScheduleError> {
        let codes: Vec<String> = {
            let misses = self.misses.lock().expect("miss cache mutex poisoned");
            misses.iter().map(|c| c.as_str().to_string()).collect()
        };
        self.write_codes(codes)
    }

    fn write_codes(&self, codes: Vec<String>) -> Result<(), ScheduleError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScheduleError::MissCache(e.to_string()))?;
        }
        let json = serde_json::to_vec_pretty(&codes).map_err(|e| ScheduleError::MissCache(e.to_string()))?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| ScheduleError::MissCache(e.to_string()))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| ScheduleError::MissCache(e.to_string()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.misses.lock().expect("miss cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
