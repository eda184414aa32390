//! Pointer input, gesture recognition and host commands.
//!
//! Mouse and touch events are reduced to [`PointerEvent`]s in logical canvas
//! coordinates and fed to an [`EditorSession`], which owns the editor state
//! and runs the gesture state machine (pan, drag, pinch, click-to-place).

pub mod action;
pub mod events;
pub mod mapping;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use action::Action;
pub use events::{PointerEvent, PointerRelease};
pub use mapping::DisplayMapping;
pub use state::{
    EditorSession, EditorSettings, GestureState, Notification, SelectionFields, SelectionInfo,
    SubscriptionId,
};
pub use tool::Tool;
