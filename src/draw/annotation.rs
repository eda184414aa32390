//! Annotation definitions: icon markers and text labels.

use super::font::FontDescriptor;
use super::text;
use crate::util::{self, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowed icon side lengths in logical pixels.
pub const ICON_SIZE_MIN: f64 = 24.0;
pub const ICON_SIZE_MAX: f64 = 220.0;
/// Side length of freshly placed icons.
pub const DEFAULT_ICON_SIZE: f64 = 140.0;

/// Allowed label font sizes in logical pixels.
pub const TEXT_SIZE_MIN: f64 = 14.0;
pub const TEXT_SIZE_MAX: f64 = 96.0;
pub const DEFAULT_TEXT_SIZE: f64 = 32.0;

/// Icons rotate in fixed steps.
pub const ROTATION_STEP: f64 = 45.0;

/// Marker artwork available for icon annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Arrow,
    Circle,
    Crash,
    Warning,
    Injury,
    Cross,
}

impl IconKind {
    pub const ALL: [IconKind; 6] = [
        IconKind::Arrow,
        IconKind::Circle,
        IconKind::Crash,
        IconKind::Warning,
        IconKind::Injury,
        IconKind::Cross,
    ];

    /// Stable lowercase name, used in persisted state and icon file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::Arrow => "arrow",
            IconKind::Circle => "circle",
            IconKind::Crash => "crash",
            IconKind::Warning => "warning",
            IconKind::Injury => "injury",
            IconKind::Cross => "cross",
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown icon '{s}'"))
    }
}

/// Variant-specific annotation payload.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationKind {
    /// Icon marker drawn as a `size × size` square centred on the position
    Icon {
        tool: IconKind,
        /// Side length in logical pixels (24-220)
        size: f64,
        /// Degrees, multiple of 45 in `[0, 360)`
        rotation: f64,
    },
    /// Multi-line text label, top-left anchored at the position
    Text {
        /// Label content; `\n` starts a new line
        content: String,
        /// Font size in logical pixels (14-96)
        size: f64,
    },
}

/// A single annotation record in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    pub position: Point,
    pub kind: AnnotationKind,
}

impl Annotation {
    /// New icon at `position` with the default size and no rotation.
    pub fn icon(tool: IconKind, position: Point) -> Self {
        Self {
            id: util::generate_id(),
            position,
            kind: AnnotationKind::Icon {
                tool,
                size: DEFAULT_ICON_SIZE,
                rotation: 0.0,
            },
        }
    }

    /// New text label at `position`.
    pub fn text(content: impl Into<String>, size: f64, position: Point) -> Self {
        Self {
            id: util::generate_id(),
            position,
            kind: AnnotationKind::Text {
                content: content.into(),
                size: clamp_text_size(size),
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            AnnotationKind::Icon { .. } => "icon",
            AnnotationKind::Text { .. } => "text",
        }
    }

    pub fn size(&self) -> f64 {
        match self.kind {
            AnnotationKind::Icon { size, .. } | AnnotationKind::Text { size, .. } => size,
        }
    }

    /// Sets the size, clamped to the variant's range.
    pub fn set_size(&mut self, value: f64) {
        match &mut self.kind {
            AnnotationKind::Icon { size, .. } => *size = clamp_icon_size(value),
            AnnotationKind::Text { size, .. } => *size = clamp_text_size(value),
        }
    }

    pub fn resize_by(&mut self, delta: f64) {
        let current = self.size();
        self.set_size(current + delta);
    }

    /// Sets an icon's rotation, snapped to the 45° grid. Text ignores rotation.
    pub fn set_rotation(&mut self, value: f64) {
        if let AnnotationKind::Icon { rotation, .. } = &mut self.kind {
            *rotation = snap_rotation(value);
        }
    }

    /// Rotates an icon by one 45° step clockwise, wrapping at 360°.
    pub fn rotate_step(&mut self) {
        if let AnnotationKind::Icon { rotation, .. } = self.kind {
            self.set_rotation(rotation + ROTATION_STEP);
        }
    }

    /// Replaces a label's content. Returns `false` for icons.
    pub fn set_content(&mut self, value: impl Into<String>) -> bool {
        match &mut self.kind {
            AnnotationKind::Text { content, .. } => {
                *content = value.into();
                true
            }
            AnnotationKind::Icon { .. } => false,
        }
    }

    /// Whether this annotation produces any visible output.
    ///
    /// Blank labels are kept in the model but neither drawn nor hit-tested.
    pub fn is_visible(&self) -> bool {
        match &self.kind {
            AnnotationKind::Icon { .. } => true,
            AnnotationKind::Text { content, .. } => !text::is_blank(content),
        }
    }

    /// Region used for hit-testing.
    ///
    /// Icons use an unrotated square; labels use the measured plate drawn
    /// with `font`.
    pub fn hit_bounds(&self, font: &FontDescriptor) -> Option<Rect> {
        match &self.kind {
            AnnotationKind::Icon { size, .. } => Rect::centered_square(self.position, *size),
            AnnotationKind::Text { content, size } => {
                text::layout_label(content, *size, font).map(|label| Rect {
                    x: self.position.x,
                    y: self.position.y,
                    width: label.width,
                    height: label.height,
                })
            }
        }
    }
}

pub fn clamp_icon_size(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(ICON_SIZE_MIN, ICON_SIZE_MAX)
    } else {
        DEFAULT_ICON_SIZE
    }
}

pub fn clamp_text_size(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(TEXT_SIZE_MIN, TEXT_SIZE_MAX)
    } else {
        DEFAULT_TEXT_SIZE
    }
}

/// Normalises into `[0, 360)` and snaps to the nearest 45° step.
pub fn snap_rotation(value: f64) -> f64 {
    let steps = (util::normalize_degrees(value) / ROTATION_STEP).round();
    util::normalize_degrees(steps * ROTATION_STEP)
}
