//! The `marquee.toml` configuration file.
//!
//! Every field has a default, so running in a directory with no config file
//! works out of the box with the conventional layout (content files in the
//! current directory, images under `img/`). Paths support `~` expansion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use marquee_core::catalog::{Catalog, DEFAULT_COLORS};

use crate::images;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The flat events CSV the devices import.
    pub events_csv: String,
    /// Directory holding one schedule CSV per calendar key.
    pub schedules_dir: String,
    /// Folder scanned for event banner images.
    pub event_images_dir: String,
    /// Folder scanned for schedule images.
    pub schedule_images_dir: String,
    /// Optional palette override; defaults to the firmware palette.
    pub colors: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            events_csv: "ephemeral_events.csv".to_string(),
            schedules_dir: "schedules".to_string(),
            event_images_dir: "img/events".to_string(),
            schedule_images_dir: "img/schedules".to_string(),
            colors: None,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file is not an error: defaults apply.
    pub fn load(path: &str) -> Result<Config> {
        let path = expand(path);
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn events_csv_path(&self) -> PathBuf {
        expand(&self.events_csv)
    }

    pub fn schedules_dir_path(&self) -> PathBuf {
        expand(&self.schedules_dir)
    }

    pub fn event_images_path(&self) -> PathBuf {
        expand(&self.event_images_dir)
    }

    pub fn schedule_images_path(&self) -> PathBuf {
        expand(&self.schedule_images_dir)
    }

    /// Build the validation catalog: configured (or stock) palette plus the
    /// image allow-lists scanned from the configured folders. A missing
    /// folder just yields an empty list -- validators fall back to a suffix
    /// check so offline editing still works.
    pub fn catalog(&self) -> Catalog {
        let colors = self
            .colors
            .clone()
            .unwrap_or_else(|| DEFAULT_COLORS.iter().map(|c| c.to_string()).collect());
        Catalog::new(
            colors,
            images::list_bmp(&self.event_images_path()),
            images::list_bmp(&self.schedule_images_path()),
        )
    }
}

/// Expand `~` in a configured path. Relative paths stay relative to the
/// working directory, which is where the content repository is.
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
