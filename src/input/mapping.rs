//! Display-to-logical coordinate mapping.

use crate::util::{CANVAS_HEIGHT, CANVAS_WIDTH, Point};

/// Maps pointer positions on the displayed canvas element into the fixed
/// 1920×1080 logical space.
///
/// The displayed element can be any size (CSS scaling, HiDPI, window
/// resizes); stored coordinates never are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    display_width: f64,
    display_height: f64,
}

impl Default for DisplayMapping {
    fn default() -> Self {
        Self {
            display_width: CANVAS_WIDTH,
            display_height: CANVAS_HEIGHT,
        }
    }
}

impl DisplayMapping {
    /// Mapping for a canvas shown at `width × height` display pixels.
    ///
    /// Non-positive sizes fall back to an identity mapping.
    pub fn new(display_width: f64, display_height: f64) -> Self {
        if display_width > 0.0 && display_height > 0.0 {
            Self {
                display_width,
                display_height,
            }
        } else {
            log::warn!(
                "Ignoring invalid display size {}x{}",
                display_width,
                display_height
            );
            Self::default()
        }
    }

    pub fn to_logical(&self, point: Point) -> Point {
        Point::new(
            point.x * CANVAS_WIDTH / self.display_width,
            point.y * CANVAS_HEIGHT / self.display_height,
        )
    }

    pub fn to_display(&self, point: Point) -> Point {
        Point::new(
            point.x * self.display_width / CANVAS_WIDTH,
            point.y * self.display_height / CANVAS_HEIGHT,
        )
    }
}
