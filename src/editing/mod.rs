//! Editing operations over the font source graph.

pub mod selection;
pub mod transfer;

pub use selection::LayerRef;
pub use transfer::{ShapeScope, TransferEngine, TransferPolicy, TransferReport};
