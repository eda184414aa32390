//! Outbound notifications for host UI chrome.
//!
//! After each state change the session builds a [`Notification`] and hands
//! it to every subscriber. Drag, pan and pinch moves go through a
//! [`FrameThrottle`] so observers see at most one update per refresh
//! interval; the model itself is always current.

use crate::draw::{Annotation, AnnotationKind, IconKind};
use crate::input::tool::Tool;
use crate::util::Point;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default refresh interval (~60 Hz).
pub const DEFAULT_NOTIFY_INTERVAL: Duration = Duration::from_millis(16);

/// Payload delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Placement tool armed for the next click, if any
    pub armed_tool: Option<Tool>,
    /// Currently selected annotation
    pub selection: Option<SelectionInfo>,
}

/// Snapshot of the selected annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionInfo {
    pub id: String,
    /// `"icon"` or `"text"`
    pub kind: &'static str,
    pub position: Point,
    pub fields: SelectionFields,
}

/// Type-specific fields of the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectionFields {
    Icon {
        tool: IconKind,
        rotation: f64,
        size: f64,
    },
    Text {
        content: String,
        size: f64,
    },
}

impl From<&Annotation> for SelectionInfo {
    fn from(annotation: &Annotation) -> Self {
        let fields = match &annotation.kind {
            AnnotationKind::Icon {
                tool,
                size,
                rotation,
            } => SelectionFields::Icon {
                tool: *tool,
                rotation: *rotation,
                size: *size,
            },
            AnnotationKind::Text { content, size } => SelectionFields::Text {
                content: content.clone(),
                size: *size,
            },
        };
        Self {
            id: annotation.id.clone(),
            kind: annotation.type_name(),
            position: annotation.position,
            fields,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Notification)>;

/// Subscriber list.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn emit(&mut self, notification: &Notification) {
        for (_, callback) in &mut self.callbacks {
            callback(notification);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

/// Coalesces bursts of notifications to one per interval.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: bool,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: false,
        }
    }

    /// Records a change at `now`. Returns `true` if it may be emitted now;
    /// otherwise the change is remembered as pending.
    pub fn should_emit(&mut self, now: Instant) -> bool {
        if self.interval_elapsed(now) {
            self.last_emit = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns `true` (and clears the flag) if a held-back change is due.
    pub fn take_pending(&mut self, now: Instant) -> bool {
        if self.pending && self.interval_elapsed(now) {
            self.last_emit = Some(now);
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Forgets pending state; the next change emits immediately.
    pub fn reset(&mut self) {
        self.last_emit = None;
        self.pending = false;
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        self.last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_INTERVAL)
    }
}
