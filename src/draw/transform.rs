//! Pan/zoom transform of the base photograph.
//!
//! Maps image-local pixels into logical canvas space:
//! `canvas = image * scale + (x, y)`.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Smallest allowed scale; every mutation clamps to this floor.
pub const MIN_SCALE: f64 = 0.1;

/// Upper scale bound applied by pinch gestures.
pub const MAX_PINCH_SCALE: f64 = 5.0;

/// Affine pan/zoom state of the base image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }

    /// Creates a transform, clamping the scale to [`MIN_SCALE`].
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        let mut transform = Self { x, y, scale };
        transform.sanitize();
        transform
    }

    /// Replaces non-finite components and enforces the scale floor.
    pub(crate) fn sanitize(&mut self) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        if !self.scale.is_finite() {
            self.scale = 1.0;
        }
        self.scale = self.scale.max(MIN_SCALE);
    }

    /// Maps an image-local point to canvas space.
    pub fn image_to_canvas(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.x,
            point.y * self.scale + self.y,
        )
    }

    /// Maps a canvas point back to image-local space.
    pub fn canvas_to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.x) / self.scale,
            (point.y - self.y) / self.scale,
        )
    }

    /// Changes the scale by `delta`, keeping `anchor` fixed on the canvas.
    ///
    /// The new scale is floored at [`MIN_SCALE`]. Returns `false` when the
    /// clamped scale equals the current one (nothing changed).
    pub fn zoom_by(&mut self, delta: f64, anchor: Point) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let next = (self.scale + delta).max(MIN_SCALE);
        if next == self.scale {
            return false;
        }
        *self = self.zoomed_to(next, anchor);
        true
    }

    /// Returns a copy of `self` rescaled to `scale` around `anchor`.
    ///
    /// The image point under `anchor` stays under `anchor`. No clamping is
    /// applied beyond the global floor; callers pick their own ceiling.
    pub fn zoomed_to(&self, scale: f64, anchor: Point) -> Transform {
        let scale = scale.max(MIN_SCALE);
        let ratio = scale / self.scale;
        Transform {
            x: anchor.x - (anchor.x - self.x) * ratio,
            y: anchor.y - (anchor.y - self.y) * ratio,
            scale,
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.x += dx;
            self.y += dy;
        }
    }

    /// Scales and centres the image so it fully covers the canvas.
    ///
    /// One axis may overflow (and be cropped). Degenerate image or canvas
    /// sizes reset to identity instead.
    pub fn fit_cover(
        &mut self,
        image_width: f64,
        image_height: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) {
        if image_width <= 0.0 || image_height <= 0.0 || canvas_width <= 0.0 || canvas_height <= 0.0
        {
            log::warn!(
                "Cannot cover-fit image {}x{} into canvas {}x{}; using identity transform",
                image_width,
                image_height,
                canvas_width,
                canvas_height
            );
            *self = Self::identity();
            return;
        }

        let scale = (canvas_width / image_width).max(canvas_height / image_height);
        self.scale = scale.max(MIN_SCALE);
        self.x = (canvas_width - image_width * self.scale) / 2.0;
        self.y = (canvas_height - image_height * self.scale) / 2.0;
    }

    pub fn snapshot(&self) -> Transform {
        *self
    }

    pub fn restore(&mut self, snapshot: Transform) {
        *self = snapshot;
        self.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn fit_cover_scenario_landscape_photo() {
        let mut t = Transform::identity();
        t.fit_cover(800.0, 600.0, 1920.0, 1080.0);
        assert!((t.scale - 2.4).abs() < EPS);
        assert!(t.x.abs() < EPS);
        assert!((t.y + 180.0).abs() < EPS);
    }

    #[test]
    fn fit_cover_portrait_overflows_vertically() {
        let mut t = Transform::identity();
        t.fit_cover(1080.0, 1920.0, 1920.0, 1080.0);
        assert!((t.scale - 1920.0 / 1080.0).abs() < EPS);
        assert!(t.x.abs() < EPS);
        assert!(t.y < 0.0);
    }

    #[test]
    fn fit_cover_degenerate_image_uses_identity() {
        let mut t = Transform::new(10.0, 10.0, 3.0);
        t.fit_cover(0.0, 600.0, 1920.0, 1080.0);
        assert_eq!(t, Transform::identity());
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let cases = [
            (Transform::new(0.0, 0.0, 1.0), Point::new(500.0, 300.0), 0.5),
            (Transform::new(-120.0, 40.0, 2.4), Point::new(10.0, 1000.0), -1.3),
            (Transform::new(300.0, -50.0, 0.3), Point::new(960.0, 540.0), 4.0),
            (Transform::new(5.0, 5.0, 1.0), Point::new(-200.0, 2000.0), -0.25),
        ];

        for (start, anchor, delta) in cases {
            let image_point = start.canvas_to_image(anchor);
            let mut zoomed = start;
            zoomed.zoom_by(delta, anchor);
            assert_point_eq(zoomed.image_to_canvas(image_point), anchor);
        }
    }

    #[test]
    fn zoom_never_drops_below_floor() {
        let mut t = Transform::identity();
        for delta in [-0.5, -0.5, -10.0, 0.05, -0.2, -1e9] {
            t.zoom_by(delta, Point::new(100.0, 100.0));
            assert!(t.scale >= MIN_SCALE);
        }
        assert!((t.scale - MIN_SCALE).abs() < EPS);
    }

    #[test]
    fn zoom_at_floor_is_noop() {
        let mut t = Transform::new(12.0, 34.0, MIN_SCALE);
        assert!(!t.zoom_by(-1.0, Point::new(500.0, 500.0)));
        assert_eq!(t, Transform::new(12.0, 34.0, MIN_SCALE));
    }

    #[test]
    fn pan_moves_offset() {
        let mut t = Transform::identity();
        t.pan_by(15.0, -5.0);
        t.pan_by(5.0, 5.0);
        assert_eq!((t.x, t.y), (20.0, 0.0));
    }

    #[test]
    fn restore_clamps_scale() {
        let mut t = Transform::identity();
        t.restore(Transform {
            x: 1.0,
            y: 2.0,
            scale: 0.0,
        });
        assert_eq!(t.scale, MIN_SCALE);
        let snap = t.snapshot();
        t.pan_by(10.0, 10.0);
        assert_ne!(t, snap);
    }
}
