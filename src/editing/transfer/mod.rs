//! Master-to-master content transfer
//!
//! The engine and its pieces: the policy record that selects what a run
//! does, the primitive per-layer content operations, and the orchestrator
//! that runs them over a normalized selection.

pub mod engine;
pub mod ops;
pub mod policy;

pub use engine::{TransferEngine, TransferReport};
pub use policy::{ShapeScope, TransferPolicy};
