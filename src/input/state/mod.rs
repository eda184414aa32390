mod actions;
mod core;
mod notify;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{EditorSession, EditorSettings, GestureState};
pub use notify::{
    DEFAULT_NOTIFY_INTERVAL, FrameThrottle, Notification, SelectionFields, SelectionInfo,
    SubscriptionId,
};
