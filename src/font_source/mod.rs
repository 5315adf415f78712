//! Font source data structures
//!
//! Everything related to the documents being edited: masters, glyphs,
//! layers, and the content they hold. The transfer engine treats this
//! graph as an external mutable store reached through narrow lookups.

pub mod data;
pub mod metrics;

// Explicit re-exports for public API
pub use data::{
    Anchor, ComponentRef, Document, Glyph, Layer, Master, MasterId, Path, PathPoint, PointKind,
    Shape,
};
