//! Editor state persistence.
//!
//! Converts an [`EditorState`](crate::draw::EditorState) to and from the
//! re-editable JSON handed to the host, and reads/writes it on disk. Loading
//! is lenient: corrupt or partial state falls back to defaults instead of
//! blocking the editor.

mod codec;
mod storage;

pub use codec::{CURRENT_VERSION, deserialize, deserialize_or_fit, serialize};
pub use storage::{load_state_file, save_state_file};

#[cfg(test)]
mod tests;
