//! Data types for export.

use crate::draw::{EditorState, IconCache, RasterImage, RenderStyle};
use std::path::PathBuf;
use thiserror::Error;

/// The two outputs of a save.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifacts {
    /// Flattened 1920×1080 PNG
    pub png: Vec<u8>,
    /// Re-editable state JSON
    pub state_json: String,
}

/// Where [`save_artifacts`](super::file::save_artifacts) put the files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub png_path: PathBuf,
    pub state_path: PathBuf,
}

/// Owned inputs for an export that runs off the editing thread.
///
/// Everything here is `Send`; Cairo surfaces are created inside the job.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub state: EditorState,
    pub image: Option<RasterImage>,
    pub icons: IconCache,
    pub style: RenderStyle,
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rendering failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("Failed to serialise editor state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to save export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}
