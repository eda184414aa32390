use super::codec;
use crate::draw::EditorState;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a state file and restores it, cover-fitting when it has no transform.
///
/// A missing file is not an error; the state is then freshly fitted.
pub fn load_state_file(path: &Path, image_size: Option<(f64, f64)>) -> Result<EditorState> {
    if !path.exists() {
        debug!("No editor state at {}; starting fresh", path.display());
        return Ok(codec::deserialize_or_fit(None, image_size));
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read editor state {}", path.display()))?;
    Ok(codec::deserialize_or_fit(Some(&json), image_size))
}

/// Writes the state as JSON, replacing `path` atomically.
pub fn save_state_file(path: &Path, state: &EditorState) -> Result<()> {
    let json = codec::serialize(state).context("failed to serialise editor state")?;
    write_atomic(path, json.as_bytes())?;
    info!(
        "Saved editor state ({} annotations) to {}",
        state.annotations.len(),
        path.display()
    );
    Ok(())
}

/// Writes through a sibling temp file and renames it into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "failed to move temporary file {} to {}",
            tmp.display(),
            path.display()
        )
    })
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "state".to_string());
    let mut candidate = target.with_file_name(format!("{name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!("{name}.tmp{counter}"));
    }
    candidate
}
