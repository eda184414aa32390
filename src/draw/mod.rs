//! Canvas model and rendering primitives (Cairo-based).
//!
//! This module defines the core types of the annotation editor:
//! - [`Transform`]: pan/zoom of the base photograph
//! - [`Annotation`]: icon markers and text labels
//! - [`AnnotationStore`]: paint-ordered annotation collection
//! - [`EditorState`]: the persisted composition
//! - Rendering functions for Cairo-based output

pub mod annotation;
pub mod color;
pub mod font;
pub mod hit;
pub mod icons;
pub mod image;
pub mod render;
pub mod scene;
pub mod store;
pub mod text;
pub mod transform;

// Re-export commonly used types at module level
pub use annotation::{Annotation, AnnotationKind, IconKind};
pub use color::Color;
pub use font::FontDescriptor;
pub use hit::hit_test;
pub use icons::{BuiltinIconSource, DirectoryIconSource, IconCache, IconError, IconSource};
pub use image::{ImageError, RasterImage};
pub use render::{RenderOptions, RenderStyle, render_preview, render_scene};
pub use scene::{EditorState, Scene};
pub use store::{AnnotationPatch, AnnotationStore};
pub use transform::Transform;
