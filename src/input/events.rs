//! Unified pointer event types.
//!
//! Mouse and touch input are both reduced to these events before reaching
//! the gesture state machine. Coordinates are always logical canvas
//! coordinates; see [`super::mapping::DisplayMapping`] for the conversion.

use super::mapping::DisplayMapping;
use crate::util::Point;
use std::time::Instant;

/// A press or move carrying every contact that is currently down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// First (or only) contact
    pub primary: Point,
    /// Second touch contact, when two fingers are down
    pub secondary: Option<Point>,
    /// When the event happened; used for notification throttling
    pub at: Instant,
}

impl PointerEvent {
    /// Mouse or single-finger event.
    pub fn single(primary: Point) -> Self {
        Self {
            primary,
            secondary: None,
            at: Instant::now(),
        }
    }

    /// Two-finger touch event.
    pub fn pair(primary: Point, secondary: Point) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            at: Instant::now(),
        }
    }

    /// Builds an event from display-space contacts.
    pub fn from_display(mapping: &DisplayMapping, primary: Point, secondary: Option<Point>) -> Self {
        Self {
            primary: mapping.to_logical(primary),
            secondary: secondary.map(|p| mapping.to_logical(p)),
            at: Instant::now(),
        }
    }

    /// Overrides the timestamp.
    pub fn at(mut self, at: Instant) -> Self {
        self.at = at;
        self
    }

    pub fn pointer_count(&self) -> usize {
        if self.secondary.is_some() { 2 } else { 1 }
    }
}

/// A contact being lifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRelease {
    /// Where the lifted contact was
    pub position: Point,
    /// Contact still down after this release (touch only)
    pub remaining: Option<Point>,
}

impl PointerRelease {
    /// Last (or only) contact lifted.
    pub fn lifted(position: Point) -> Self {
        Self {
            position,
            remaining: None,
        }
    }

    /// One of two touch contacts lifted; `remaining` stays down.
    pub fn with_remaining(position: Point, remaining: Point) -> Self {
        Self {
            position,
            remaining: Some(remaining),
        }
    }
}
