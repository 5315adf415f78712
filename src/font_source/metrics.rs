//! Layer width derivation
//!
//! The advance width of a layer is derived from its side bearings and the
//! horizontal extent of its drawn outlines. Content operations call
//! [`Layer::recompute_width`] after every mutation so callers always see a
//! metrics-consistent layer.

use crate::font_source::data::{Layer, Shape};

impl Layer {
    /// Horizontal extent of the control box spanned by all path points.
    ///
    /// Components do not contribute: resolving their transformed extent
    /// needs document-wide outline math, which belongs to the host. An
    /// empty or component-only layer has zero ink width.
    pub fn ink_width(&self) -> f64 {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for shape in &self.shapes {
            if let Shape::Path(path) = shape {
                for point in &path.points {
                    min_x = min_x.min(point.x);
                    max_x = max_x.max(point.x);
                }
            }
        }
        if min_x <= max_x {
            max_x - min_x
        } else {
            0.0
        }
    }

    /// Re-derive `width` from the side bearings and the current ink.
    pub fn recompute_width(&mut self) {
        self.width = self.lsb + self.ink_width() + self.rsb;
    }
}
