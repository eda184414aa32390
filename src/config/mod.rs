//! Configuration file support for incident-sketch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/incident-sketch/config.toml`. Settings include canvas colors,
//! annotation defaults, gesture tuning, icon artwork and export locations.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{AnnotationsConfig, CanvasConfig, ExportConfig, IconsConfig, InputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All sections have sensible defaults and will use those if not specified in the file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// background_color = [0.1, 0.1, 0.1, 1.0]
/// guide_dim_alpha = 0.5
///
/// [annotations]
/// default_icon_size = 120.0
/// font_family = "DejaVu Sans"
///
/// [input]
/// drag_threshold = 4.0
///
/// [icons]
/// directory = "/usr/share/incident-sketch/icons"
///
/// [export]
/// output_directory = "~/Reports"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Canvas background and crop guide
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Annotation defaults and resize steps
    #[serde(default)]
    pub annotations: AnnotationsConfig,

    /// Gesture and navigation tuning
    #[serde(default)]
    pub input: InputConfig,

    /// Icon artwork source
    #[serde(default)]
    pub icons: IconsConfig,

    /// Export output location
    #[serde(default)]
    pub export: ExportConfig,
}

fn clamp_logged(name: &str, value: &mut f64, min: f64, max: f64) {
    if !value.is_finite() {
        log::warn!("Invalid {} (not a number), using {:.2}", name, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {:.2}-{:.2} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}

fn clamp_color(name: &str, color: &mut [f64; 4]) {
    for (i, component) in color.iter_mut().enumerate() {
        clamp_logged(&format!("{name}[{i}]"), component, 0.0, 1.0);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    pub(crate) fn validate_and_clamp(&mut self) {
        clamp_color("canvas.background_color", &mut self.canvas.background_color);
        clamp_color("canvas.guide_border_color", &mut self.canvas.guide_border_color);
        clamp_logged("canvas.guide_dim_alpha", &mut self.canvas.guide_dim_alpha, 0.0, 1.0);
        clamp_logged(
            "canvas.guide_dash_length",
            &mut self.canvas.guide_dash_length,
            2.0,
            100.0,
        );

        let annotations = &mut self.annotations;
        clamp_logged(
            "annotations.default_icon_size",
            &mut annotations.default_icon_size,
            24.0,
            220.0,
        );
        clamp_logged(
            "annotations.icon_size_step",
            &mut annotations.icon_size_step,
            1.0,
            100.0,
        );
        clamp_logged(
            "annotations.default_text_size",
            &mut annotations.default_text_size,
            14.0,
            96.0,
        );
        clamp_logged(
            "annotations.text_size_step",
            &mut annotations.text_size_step,
            1.0,
            40.0,
        );

        let input = &mut self.input;
        clamp_logged("input.drag_threshold", &mut input.drag_threshold, 0.0, 50.0);
        clamp_logged("input.wheel_zoom_step", &mut input.wheel_zoom_step, 0.01, 1.0);
        clamp_logged("input.zoom_step", &mut input.zoom_step, 0.01, 1.0);
        clamp_logged("input.nudge_offset", &mut input.nudge_offset, 1.0, 500.0);
        if !(1..=1000).contains(&input.notify_interval_ms) {
            log::warn!(
                "Invalid input.notify_interval_ms {}, clamping to 1-1000 range",
                input.notify_interval_ms
            );
            input.notify_interval_ms = input.notify_interval_ms.clamp(1, 1000);
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.annotations.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .annotations
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.annotations.font_weight
            );
            self.annotations.font_weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.annotations.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.annotations.font_style
            );
            self.annotations.font_style = "normal".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export.filename_template, using the default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/incident-sketch/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("incident-sketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file exists
    /// but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a documented default configuration file at the default location.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or the file cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
