//! Primitive content operations
//!
//! Each operation mutates exactly one destination layer and leaves it
//! metrics-consistent (width re-derived). Source content always arrives
//! as a pre-cloned snapshot, so same-document transfers never alias the
//! layer they are writing to.

use crate::editing::transfer::policy::ShapeScope;
use crate::font_source::{Layer, Shape};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of one [`copy_shapes`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCopyStats {
    pub copied: usize,
    /// Components whose target glyph does not exist in the destination
    /// document. They are left out rather than copied dangling.
    pub skipped: usize,
}

fn in_scope(shape: &Shape, scope: ShapeScope) -> bool {
    match shape {
        Shape::Path(_) => scope.includes_paths(),
        Shape::Component(_) => scope.includes_components(),
    }
}

/// Remove every in-scope shape from the layer. No-op when there are none.
pub fn clear_shapes(layer: &mut Layer, scope: ShapeScope) {
    layer.shapes.retain(|shape| !in_scope(shape, scope));
    layer.recompute_width();
}

/// Remove every anchor from the layer.
pub fn clear_anchors(layer: &mut Layer) {
    layer.clear_anchors();
}

/// Append value copies of the source's in-scope shapes to the destination.
///
/// A component whose `base_glyph` is not in `known_glyphs` (the
/// destination document's glyph names) is skipped and counted; one
/// unresolvable reference never aborts the rest of the copy.
pub fn copy_shapes(
    source: &Layer,
    destination: &mut Layer,
    scope: ShapeScope,
    known_glyphs: &HashSet<String>,
) -> ShapeCopyStats {
    let mut stats = ShapeCopyStats::default();
    for shape in &source.shapes {
        if !in_scope(shape, scope) {
            continue;
        }
        if let Shape::Component(component) = shape {
            if !known_glyphs.contains(&component.base_glyph) {
                debug!(
                    base_glyph = %component.base_glyph,
                    "skipping component, target glyph not in destination document"
                );
                stats.skipped += 1;
                continue;
            }
        }
        destination.shapes.push(shape.clone());
        stats.copied += 1;
    }
    destination.recompute_width();
    stats
}

/// Copy every source anchor into the destination, replacing same-named
/// anchors so names stay unique. Returns the number copied.
pub fn copy_anchors(source: &Layer, destination: &mut Layer) -> usize {
    for anchor in source.anchors() {
        destination.insert_anchor(anchor.clone());
    }
    source.anchors().len()
}

/// Copy the side bearings and re-derive the destination width.
pub fn copy_sidebearings(source: &Layer, destination: &mut Layer) {
    destination.lsb = source.lsb;
    destination.rsb = source.rsb;
    destination.recompute_width();
}
