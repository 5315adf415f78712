//! Transfer policy
//!
//! One immutable configuration record selects which content operations a
//! run performs. Earlier takes on this tool existed as separate
//! paths-only, components-only, and everything variants; the policy flags
//! are the single extension point that replaces those forks.

use crate::font_source::MasterId;
use serde::{Deserialize, Serialize};

/// Which kinds of shapes a run clears and copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeScope {
    /// Drawn paths and component references alike.
    #[default]
    All,
    PathsOnly,
    ComponentsOnly,
}

impl ShapeScope {
    pub fn includes_paths(self) -> bool {
        matches!(self, ShapeScope::All | ShapeScope::PathsOnly)
    }

    pub fn includes_components(self) -> bool {
        matches!(self, ShapeScope::All | ShapeScope::ComponentsOnly)
    }
}

/// Configuration for one transfer run.
///
/// Source and destination documents are not part of the policy; they are
/// arguments to the engine entry points, and default to being the same
/// document. The master ids must differ for same-document runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPolicy {
    pub source_master: MasterId,
    pub destination_master: MasterId,
    /// Copy shapes from source to destination layers.
    pub transfer_shapes: bool,
    /// Restrict shape clearing and copying to one kind.
    pub shape_scope: ShapeScope,
    /// Clear in-scope destination shapes before copying. Only meaningful
    /// together with `transfer_shapes`.
    pub clear_destination_first: bool,
    /// Copy anchors, replacing same-named destination anchors.
    pub transfer_anchors: bool,
    /// Copy side bearings and re-derive the destination width.
    pub inherit_sidebearings: bool,
}

impl TransferPolicy {
    /// A policy with the stated defaults: shapes on, everything else off.
    pub fn new(source_master: MasterId, destination_master: MasterId) -> Self {
        Self {
            source_master,
            destination_master,
            transfer_shapes: true,
            shape_scope: ShapeScope::default(),
            clear_destination_first: false,
            transfer_anchors: false,
            inherit_sidebearings: false,
        }
    }
}
