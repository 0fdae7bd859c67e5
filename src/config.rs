use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::input::HeatmapForm;
use crate::models::surface::SurfaceSpec;

/// Pre-filled bounds for the heatmap form. Volatilities are in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeatmapDefaults {
    pub min_spot: f64,
    pub max_spot: f64,
    pub min_vol_pct: f64,
    pub max_vol_pct: f64,
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self {
            min_spot: 50.0,
            max_spot: 150.0,
            min_vol_pct: 10.0,
            max_vol_pct: 50.0,
        }
    }
}

impl HeatmapDefaults {
    /// Heatmap form pre-filled with these bounds.
    pub fn to_form(&self) -> HeatmapForm {
        HeatmapForm {
            min_spot: self.min_spot.to_string(),
            max_spot: self.max_spot.to_string(),
            min_vol_pct: self.min_vol_pct.to_string(),
            max_vol_pct: self.max_vol_pct.to_string(),
        }
    }
}

/// Output settings for the rendered heatmap pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Default output path for the SVG
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            output: "heatmap.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration, read from TOML.
///
/// Every section is optional; missing keys take their defaults.
///
/// ```toml
/// [surface]
/// strike = 100.0
/// time_to_maturity = 1.0
/// risk_free_rate = 0.05
/// grid_points = 10
///
/// [heatmap_defaults]
/// min_spot = 50.0
/// max_spot = 150.0
///
/// [render]
/// output = "heatmap.svg"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceSpec,
    pub heatmap_defaults: HeatmapDefaults,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `path`, or return the defaults when no path is given.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file {}", p.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("Invalid config file {}", p.display()))
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.surface.grid_points < 2 {
            return Err(anyhow!(
                "surface.grid_points must be at least 2, got {}",
                self.surface.grid_points
            ));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(anyhow!(
                "render size must be non-zero, got {}x{}",
                self.render.width,
                self.render.height
            ));
        }
        Ok(())
    }
}
