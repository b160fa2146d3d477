//! Game tuning file
//!
//! One JSON document aggregating every component's knobs. Loading never
//! fails: a missing file means defaults, a corrupt file means defaults
//! plus a warning, and unknown sections are simply filled in. Designers
//! edit the file, the game rereads it on the next start.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::camera::CameraTuning;
use crate::collectable::CollectableTuning;
use crate::movement::MovementTuning;
use crate::pool::PoolConfig;
use crate::projectile::ProjectileTuning;

/// Every tunable value of the game in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub movement: MovementTuning,
    pub projectile: ProjectileTuning,
    pub collectable: CollectableTuning,
    pub camera: CameraTuning,
    pub pool: PoolConfig,
}

impl GameTuning {
    /// Read tuning from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    warn!(
                        "Tuning file {} is invalid ({err}), using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current tuning to `path` as indented JSON. Best effort,
    /// failures are logged and swallowed.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                warn!("Could not serialize tuning: {err}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => info!("Tuning saved to {}", path.display()),
            Err(err) => warn!("Could not write tuning to {}: {err}", path.display()),
        }
    }
}
