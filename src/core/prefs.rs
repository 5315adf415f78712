//! Per-document transfer preferences
//!
//! The last-used policy is remembered per document inside its free-form
//! `user_data` blob, keyed under [`USER_DATA_KEY`], so a document carries
//! its own transfer setup between sessions. Missing or unreadable blobs
//! fall back to the stated defaults: shapes on, everything else off.

use crate::editing::transfer::policy::{ShapeScope, TransferPolicy};
use crate::font_source::{Document, MasterId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key of the preference blob in [`Document::user_data`].
pub const USER_DATA_KEY: &str = "com.glyphsync.transfer";

fn default_transfer_shapes() -> bool {
    true
}

/// Serialized mirror of [`TransferPolicy`] plus the remembered master
/// choice. Master ids are stored rather than list positions, so the
/// selection survives master reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyPrefs {
    #[serde(default)]
    pub source_master: Option<MasterId>,
    #[serde(default)]
    pub destination_master: Option<MasterId>,
    #[serde(default = "default_transfer_shapes")]
    pub transfer_shapes: bool,
    #[serde(default)]
    pub shape_scope: ShapeScope,
    #[serde(default)]
    pub clear_destination_first: bool,
    #[serde(default)]
    pub transfer_anchors: bool,
    #[serde(default)]
    pub inherit_sidebearings: bool,
}

impl Default for PolicyPrefs {
    fn default() -> Self {
        Self {
            source_master: None,
            destination_master: None,
            transfer_shapes: true,
            shape_scope: ShapeScope::default(),
            clear_destination_first: false,
            transfer_anchors: false,
            inherit_sidebearings: false,
        }
    }
}

impl PolicyPrefs {
    /// Read the preferences stored in a document. An absent or malformed
    /// blob yields the defaults.
    pub fn load(document: &Document) -> Self {
        let Some(value) = document.user_data.get(USER_DATA_KEY) else {
            return Self::default();
        };
        match serde_json::from_value(value.clone()) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(document = %document.family_name, error = %err,
                    "unreadable transfer preferences, using defaults");
                Self::default()
            }
        }
    }

    /// Write the preferences into the document's user data.
    pub fn save(&self, document: &mut Document) -> anyhow::Result<()> {
        let value = serde_json::to_value(self)?;
        document.user_data.insert(USER_DATA_KEY.to_string(), value);
        debug!(document = %document.family_name, "saved transfer preferences");
        Ok(())
    }

    /// Build a runnable policy. `None` until both masters are chosen.
    pub fn to_policy(&self) -> Option<TransferPolicy> {
        let source = self.source_master.clone()?;
        let destination = self.destination_master.clone()?;
        Some(TransferPolicy {
            source_master: source,
            destination_master: destination,
            transfer_shapes: self.transfer_shapes,
            shape_scope: self.shape_scope,
            clear_destination_first: self.clear_destination_first,
            transfer_anchors: self.transfer_anchors,
            inherit_sidebearings: self.inherit_sidebearings,
        })
    }

    pub fn from_policy(policy: &TransferPolicy) -> Self {
        Self {
            source_master: Some(policy.source_master.clone()),
            destination_master: Some(policy.destination_master.clone()),
            transfer_shapes: policy.transfer_shapes,
            shape_scope: policy.shape_scope,
            clear_destination_first: policy.clear_destination_first,
            transfer_anchors: policy.transfer_anchors,
            inherit_sidebearings: policy.inherit_sidebearings,
        }
    }
}
