//! Transfer error taxonomy
//!
//! Only policy-level problems surface as errors: they are reported before
//! any mutation happens. Resolution gaps (a glyph without a layer for the
//! requested master, a component target missing in the destination) are
//! skipped and counted instead, and per-glyph faults are isolated inside
//! the engine run.

use crate::font_source::MasterId;
use thiserror::Error;

pub type TransferResult<T> = Result<T, TransferError>;

/// A transfer request that is rejected before any work is performed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("source and destination master are the same")]
    SameMaster,

    #[error("document \"{0}\" has no masters")]
    NoMasters(String),

    #[error("no master with id \"{id}\" in document \"{document}\"")]
    UnknownMaster { id: MasterId, document: String },
}
