//! Hit-testing annotations against a canvas point.

use super::annotation::Annotation;
use super::font::FontDescriptor;
use crate::util::Point;

/// Returns the topmost visible annotation whose hit area contains `point`.
///
/// Iterates from the last (top) entry to the first, so overlapping
/// annotations resolve to the most recently placed or touched one. Labels
/// are measured with `font`, the font they are drawn with.
pub fn hit_test<'a>(
    annotations: &'a [Annotation],
    point: Point,
    font: &FontDescriptor,
) -> Option<&'a Annotation> {
    annotations.iter().rev().find(|annotation| {
        annotation.is_visible()
            && annotation
                .hit_bounds(font)
                .is_some_and(|bounds| bounds.contains(point))
    })
}
