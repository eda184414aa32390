//! Interactive raster-annotation editor.
//!
//! A base photograph is panned and zoomed under a fixed 1920×1080 logical
//! canvas, annotated with icon markers and text labels, and flattened into a
//! PNG alongside a re-editable JSON state. The editor core is UI-agnostic:
//! hosts feed pointer events and commands into an [`EditorSession`], render
//! it with [`draw::render_preview`], and save with [`export`].

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{EditorState, IconCache, RasterImage};
pub use input::EditorSession;

/// Version string including the git revision the binary was built from.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("INCIDENT_SKETCH_GIT_HASH"),
    ")"
);
