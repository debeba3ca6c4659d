//! User-tunable settings, read from `config.json` in the application data directory.

use crate::constants::{
    MAX_ROTATION_DEG, MAX_SCALE, MIN_SCALE, PHOTO_SIZE, PLACEMENT_RETRY_BUDGET, WALL_MARGIN,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Unscaled side length of a photo tile.
    pub item_size: f32,
    pub margin: f32,
    /// Placement samples shared by one whole generation pass.
    pub retry_budget: usize,
    pub max_rotation_deg: f32,
    pub scale_range: [f32; 2],
    /// Viewing someone else's wall: drags are not committed and photos cannot be deleted.
    pub read_only: bool,
    pub owner: Option<String>,
    pub background: String,
    pub show_file_names: bool,
    /// Overrides the default photo library directory.
    pub library_dir: Option<PathBuf>,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            item_size: PHOTO_SIZE,
            margin: WALL_MARGIN,
            retry_budget: PLACEMENT_RETRY_BUDGET,
            max_rotation_deg: MAX_ROTATION_DEG,
            scale_range: [MIN_SCALE, MAX_SCALE],
            read_only: false,
            owner: None,
            background: crate::background::DEFAULT_BACKGROUND.to_string(),
            show_file_names: false,
            library_dir: None,
        }
    }
}

impl WallConfig {
    /// Loads the config from `dir/config.json`. A missing file yields the defaults;
    /// an unreadable or malformed file is reported and also yields the defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded wall config from {}", path.display());
                config.sanitized()
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path).map_err(|err| format!("read failed: {err}"))?;
        serde_json::from_str(&text).map_err(|err| format!("parse failed: {err}"))
    }

    /// Repairs values that would make placement meaningless.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            log::warn!("item_size {} is invalid, using default", self.item_size);
            self.item_size = defaults.item_size;
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            self.margin = defaults.margin;
        }
        if !self.max_rotation_deg.is_finite() {
            self.max_rotation_deg = defaults.max_rotation_deg;
        }
        self.max_rotation_deg = self.max_rotation_deg.abs();

        let [lo, hi] = self.scale_range;
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || hi <= 0.0 {
            self.scale_range = defaults.scale_range;
        } else if lo > hi {
            self.scale_range = [hi, lo];
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("photo_wall_config_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = temp_dir();
        assert_eq!(WallConfig::load_or_default(&dir), WallConfig::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = temp_dir();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "read_only": true, "owner": "sam@example.com", "retry_budget": 50 }"#,
        )
        .unwrap();

        let config = WallConfig::load_or_default(&dir);
        assert!(config.read_only);
        assert_eq!(config.retry_budget, 50);
        assert_eq!(config.item_size, PHOTO_SIZE);
        assert_eq!(config.owner.as_deref(), Some("sam@example.com"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert_eq!(WallConfig::load_or_default(&dir), WallConfig::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn inverted_scale_range_is_swapped() {
        let config = WallConfig {
            scale_range: [1.5, 0.5],
            item_size: -3.0,
            ..WallConfig::default()
        }
        .sanitized();
        assert_eq!(config.scale_range, [0.5, 1.5]);
        assert_eq!(config.item_size, PHOTO_SIZE);
    }
}
