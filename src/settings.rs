//! User settings.
//!
//! Chart preferences are read from a JSON file in the platform config
//! directory. Every field has a serde default, so partial or older files load
//! and unknown values fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ChartError;
use crate::history::DEFAULT_RECENT_LIMIT;
use crate::layout::{ChartLayout, Margins, OutOfRange};
use crate::stats::HIGH_RISK_THRESHOLD;

/// Optional overrides applied on top of a layout preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOverride {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub margins: Option<Margins>,
}

impl LayoutOverride {
    pub fn apply(&self, mut layout: ChartLayout) -> ChartLayout {
        if let Some(width) = self.width {
            layout.width = width;
        }
        if let Some(height) = self.height {
            layout.height = height;
        }
        if let Some(margins) = self.margins {
            layout.margins = margins;
        }
        layout
    }
}

/// Chart preferences that persist across runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// How values outside 0-100 are placed
    #[serde(default)]
    pub out_of_range: OutOfRange,
    /// Values strictly above this count as high risk
    #[serde(default = "default_threshold")]
    pub high_risk_threshold: f64,
    /// Rows in the recent-predictions list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Pixels per logical unit for PNG export
    #[serde(default = "default_png_scale")]
    pub png_scale: u32,
    #[serde(default)]
    pub forecast_layout: LayoutOverride,
    #[serde(default)]
    pub history_layout: LayoutOverride,
}

fn default_version() -> u32 {
    1
}

fn default_threshold() -> f64 {
    HIGH_RISK_THRESHOLD
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_png_scale() -> u32 {
    4
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            out_of_range: OutOfRange::default(),
            high_risk_threshold: default_threshold(),
            recent_limit: default_recent_limit(),
            png_scale: default_png_scale(),
            forecast_layout: LayoutOverride::default(),
            history_layout: LayoutOverride::default(),
        }
    }
}

impl ChartSettings {
    /// Get the config directory path for riskchart
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("riskchart"))
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine config directory for settings");
                return Self::default();
            }
        };

        if !path.exists() {
            tracing::debug!("Settings file not found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        tracing::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ChartError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Forecast layout with overrides and the out-of-range policy applied
    pub fn forecast_layout(&self) -> ChartLayout {
        self.forecast_layout
            .apply(ChartLayout::forecast())
            .with_out_of_range(self.out_of_range)
    }

    /// History layout with overrides and the out-of-range policy applied
    pub fn history_layout(&self) -> ChartLayout {
        self.history_layout
            .apply(ChartLayout::history())
            .with_out_of_range(self.out_of_range)
    }
}
