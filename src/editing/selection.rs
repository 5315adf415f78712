//! Selection normalization
//!
//! The host's selection surface hands us an ordered list of layer
//! references: whatever the user highlighted in the font overview, or a
//! single active edit-view layer as the fallback the surface supplies on
//! its own. The list may repeat a glyph (several masters of it selected
//! at once), so before transferring we reduce it to distinct work items.

use crate::font_source::MasterId;
use std::collections::HashSet;

/// A reference to one selected layer, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRef {
    pub glyph: String,
    pub master: MasterId,
}

impl LayerRef {
    pub fn new(glyph: impl Into<String>, master: MasterId) -> Self {
        Self {
            glyph: glyph.into(),
            master,
        }
    }
}

/// Reduce a raw selection to distinct glyph names in first-seen order.
///
/// Distinctness is keyed by (glyph, destination master): two selected
/// layers of the same glyph always land on the same destination layer,
/// whichever masters they came from. The destination master is fixed for
/// a whole run, so the key degenerates to the glyph name here.
pub fn normalize_selection(raw: &[LayerRef], _destination: &MasterId) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut work = Vec::new();
    for layer_ref in raw {
        if seen.insert(layer_ref.glyph.as_str()) {
            work.push(layer_ref.glyph.clone());
        }
    }
    work
}
