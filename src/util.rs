//! Utility types and functions for canvas geometry.
//!
//! This module provides:
//! - [`Point`] and [`Rect`] in logical canvas coordinates
//! - Distance/midpoint helpers used by gesture recognition
//! - Random identifier generation for annotations

use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

// ============================================================================
// Canvas Geometry
// ============================================================================

/// Fixed logical canvas width. All stored coordinates use this space.
pub const CANVAS_WIDTH: f64 = 1920.0;

/// Fixed logical canvas height. All stored coordinates use this space.
pub const CANVAS_HEIGHT: f64 = 1080.0;

/// Centre of the logical canvas.
pub const CANVAS_CENTER: Point = Point {
    x: CANVAS_WIDTH / 2.0,
    y: CANVAS_HEIGHT / 2.0,
};

/// A point in logical canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle used for hit areas and selection outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered_square(center: Point, size: f64) -> Option<Self> {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Returns true if the point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// Normalises an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Generates a short random identifier (8 alphanumeric characters).
pub fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}
