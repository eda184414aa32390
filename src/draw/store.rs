//! Ordered annotation collection.

use super::annotation::Annotation;
use crate::util::{self, Point};

/// Partial update applied by [`AnnotationStore::update`].
///
/// Fields left as `None` are untouched. Size and rotation go through the
/// annotation's clamped setters; fields that don't apply to the variant
/// (rotation or content on the wrong kind) are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPatch {
    pub position: Option<Point>,
    pub size: Option<f64>,
    pub rotation: Option<f64>,
    pub content: Option<String>,
}

/// Container for all annotations of one editor session.
///
/// The vector order is the paint order: first = bottom, last = top. The
/// topmost entry is hit-tested first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a list, regenerating any duplicate ids.
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut store = Self::new();
        for annotation in annotations {
            store.add(annotation);
        }
        store
    }

    /// Appends an annotation on top and returns the id it is stored under.
    ///
    /// An empty or already-used id is replaced with a fresh one.
    pub fn add(&mut self, mut annotation: Annotation) -> String {
        if annotation.id.is_empty() || self.contains(&annotation.id) {
            let replaced = std::mem::take(&mut annotation.id);
            annotation.id = self.fresh_id();
            if !replaced.is_empty() {
                log::debug!(
                    "Annotation id '{}' already in use; stored as '{}'",
                    replaced,
                    annotation.id
                );
            }
        }
        let id = annotation.id.clone();
        self.annotations.push(annotation);
        id
    }

    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.index_of(id)?;
        Some(self.annotations.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Applies a patch. Returns `false` if no annotation has that id.
    pub fn update(&mut self, id: &str, patch: AnnotationPatch) -> bool {
        let Some(annotation) = self.find_mut(id) else {
            return false;
        };

        if let Some(position) = patch.position.filter(|p| p.is_finite()) {
            annotation.position = position;
        }
        if let Some(size) = patch.size {
            annotation.set_size(size);
        }
        if let Some(rotation) = patch.rotation {
            annotation.set_rotation(rotation);
        }
        if let Some(content) = patch.content {
            annotation.set_content(content);
        }
        true
    }

    /// Moves the annotation to the top of the paint order.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let annotation = self.annotations.remove(index);
                self.annotations.push(annotation);
                true
            }
            None => false,
        }
    }

    /// All annotations in paint order (bottom first).
    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = util::generate_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
