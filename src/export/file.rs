//! Writing export artifacts to disk.

use super::types::{ExportArtifacts, ExportError, SavedArtifacts};
use crate::config::ExportConfig;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and under which name exports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving `<name>.png` and `<name>.json`.
    pub directory: PathBuf,
    /// File stem template (supports chrono format specifiers).
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Incidents"),
            filename_template: "incident_%Y-%m-%d_%H%M%S".to_string(),
        }
    }
}

impl From<&ExportConfig> for OutputConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            directory: expand_tilde(&config.output_directory),
            filename_template: config.filename_template.clone(),
        }
    }
}

/// Expands the template against the current local time.
///
/// Templates with invalid format specifiers are used literally.
pub fn generate_stem(template: &str) -> String {
    let mut stem = String::new();
    if write!(stem, "{}", Local::now().format(template)).is_err() {
        log::warn!("Invalid filename template '{template}'; using it verbatim");
        return template.to_string();
    }
    stem
}

/// Creates the directory if needed and returns its canonical path.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf()))
}

/// Picks `<stem>.png` / `<stem>.json`, adding `-N` when either is taken.
fn unique_paths(directory: &Path, stem: &str) -> (PathBuf, PathBuf) {
    let mut counter = 0u32;
    loop {
        let name = if counter == 0 {
            stem.to_string()
        } else {
            format!("{stem}-{counter}")
        };
        let png = directory.join(format!("{name}.png"));
        let json = directory.join(format!("{name}.json"));
        if !png.exists() && !json.exists() {
            return (png, json);
        }
        counter += 1;
    }
}

/// Writes the PNG and the state JSON side by side.
pub fn save_artifacts(
    artifacts: &ExportArtifacts,
    config: &OutputConfig,
) -> Result<SavedArtifacts, ExportError> {
    let directory = ensure_directory_exists(&config.directory)?;
    let (png_path, state_path) = unique_paths(&directory, &generate_stem(&config.filename_template));

    log::info!(
        "Saving export to: {} ({} bytes)",
        png_path.display(),
        artifacts.png.len()
    );
    fs::write(&png_path, &artifacts.png)?;
    fs::write(&state_path, artifacts.state_json.as_bytes())?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&png_path, Permissions::from_mode(0o600))?;
        fs::set_permissions(&state_path, Permissions::from_mode(0o600))?;
    }

    Ok(SavedArtifacts {
        png_path,
        state_path,
    })
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
