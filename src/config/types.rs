//! Configuration type definitions.

use crate::draw::FontDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Canvas appearance.
///
/// Colors are `[r, g, b, a]` arrays with components in 0.0 - 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Fill behind the base photograph (visible when it is panned away or
    /// failed to load)
    #[serde(default = "default_background_color")]
    pub background_color: [f64; 4],

    /// Opacity of the darkening outside the square guide (0.0 - 1.0)
    #[serde(default = "default_guide_dim_alpha")]
    pub guide_dim_alpha: f64,

    /// Color of the dashed guide border
    #[serde(default = "default_guide_border_color")]
    pub guide_border_color: [f64; 4],

    /// Dash length of the guide border in logical pixels (valid range: 2.0 - 100.0)
    #[serde(default = "default_guide_dash_length")]
    pub guide_dash_length: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            guide_dim_alpha: default_guide_dim_alpha(),
            guide_border_color: default_guide_border_color(),
            guide_dash_length: default_guide_dash_length(),
        }
    }
}

/// Defaults and steps for new and resized annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotationsConfig {
    /// Size of newly placed icons (valid range: 24.0 - 220.0)
    #[serde(default = "default_icon_size")]
    pub default_icon_size: f64,

    /// Size change per grow/shrink command on icons (valid range: 1.0 - 100.0)
    #[serde(default = "default_icon_size_step")]
    pub icon_size_step: f64,

    /// Font size of new labels (valid range: 14.0 - 96.0)
    #[serde(default = "default_text_size")]
    pub default_text_size: f64,

    /// Size change per grow/shrink command on labels (valid range: 1.0 - 40.0)
    #[serde(default = "default_text_size_step")]
    pub text_size_step: f64,

    /// Font family for labels (e.g., "Sans", "DejaVu Sans")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style ("normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl AnnotationsConfig {
    /// Label font, shared by rendering and hit-testing.
    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font_family.clone(),
            self.font_weight.clone(),
            self.font_style.clone(),
        )
    }
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self {
            default_icon_size: default_icon_size(),
            icon_size_step: default_icon_size_step(),
            default_text_size: default_text_size(),
            text_size_step: default_text_size_step(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Gesture and navigation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Distance a press must travel before it pans instead of clicking
    /// (valid range: 0.0 - 50.0)
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,

    /// Scale change per wheel notch (valid range: 0.01 - 1.0)
    #[serde(default = "default_zoom_step")]
    pub wheel_zoom_step: f64,

    /// Scale change for the zoom in/out commands (valid range: 0.01 - 1.0)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Pan distance of the nudge commands (valid range: 1.0 - 500.0)
    #[serde(default = "default_nudge_offset")]
    pub nudge_offset: f64,

    /// Minimum spacing of live drag notifications in milliseconds
    /// (valid range: 1 - 1000)
    #[serde(default = "default_notify_interval_ms")]
    pub notify_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_threshold: default_drag_threshold(),
            wheel_zoom_step: default_zoom_step(),
            zoom_step: default_zoom_step(),
            nudge_offset: default_nudge_offset(),
            notify_interval_ms: default_notify_interval_ms(),
        }
    }
}

/// Icon artwork source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IconsConfig {
    /// Directory containing `<tool>.png` files (arrow.png, crash.png, ...).
    /// Built-in artwork is used when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Output location for saved exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for exported files (supports ~ expansion)
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// File name template without extension (chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_background_color() -> [f64; 4] {
    [0.11, 0.12, 0.13, 1.0]
}

fn default_guide_dim_alpha() -> f64 {
    0.45
}

fn default_guide_border_color() -> [f64; 4] {
    [1.0, 1.0, 1.0, 0.9]
}

fn default_guide_dash_length() -> f64 {
    14.0
}

fn default_icon_size() -> f64 {
    140.0
}

fn default_icon_size_step() -> f64 {
    10.0
}

fn default_text_size() -> f64 {
    32.0
}

fn default_text_size_step() -> f64 {
    4.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_drag_threshold() -> f64 {
    2.0
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_nudge_offset() -> f64 {
    40.0
}

fn default_notify_interval_ms() -> u64 {
    16
}

fn default_output_directory() -> String {
    "~/Pictures/Incidents".to_string()
}

fn default_filename_template() -> String {
    "incident_%Y-%m-%d_%H%M%S".to_string()
}
