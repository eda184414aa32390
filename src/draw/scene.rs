//! Editor state and the borrowed inputs the renderer draws from.

use super::icons::IconCache;
use super::image::RasterImage;
use super::store::AnnotationStore;
use super::transform::Transform;
use crate::util::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// The re-editable composition: base-image transform plus annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub transform: Transform,
    pub annotations: AnnotationStore,
}

impl EditorState {
    pub fn new(transform: Transform, annotations: AnnotationStore) -> Self {
        Self {
            transform,
            annotations,
        }
    }

    /// Fresh state with the image cover-fitted onto the canvas.
    pub fn fitted(image_width: f64, image_height: f64) -> Self {
        let mut transform = Transform::identity();
        transform.fit_cover(image_width, image_height, CANVAS_WIDTH, CANVAS_HEIGHT);
        Self::new(transform, AnnotationStore::new())
    }
}

/// Everything needed to draw one frame.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub state: &'a EditorState,
    /// Base photograph; `None` when it failed to load
    pub image: Option<&'a RasterImage>,
    pub icons: &'a IconCache,
}

impl<'a> Scene<'a> {
    pub fn new(
        state: &'a EditorState,
        image: Option<&'a RasterImage>,
        icons: &'a IconCache,
    ) -> Self {
        Self {
            state,
            image,
            icons,
        }
    }
}
