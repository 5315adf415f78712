//! Transfer engine
//!
//! Orchestrates a whole run: validate the policy, normalize the raw
//! selection, resolve source/destination layer pairs, then apply the
//! selected content operations to every resolved glyph inside a single
//! update-suspension scope on the destination document. The run is
//! synchronous and uninterruptible; a fault in one glyph is recorded and
//! the remaining glyphs still process.

use crate::core::errors::{TransferError, TransferResult};
use crate::editing::selection::{normalize_selection, LayerRef};
use crate::editing::transfer::ops::{self, ShapeCopyStats};
use crate::editing::transfer::policy::TransferPolicy;
use crate::font_source::{Document, Layer};
use anyhow::anyhow;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Aggregate outcome of one transfer run.
///
/// This record and the mutated destination document are the only outputs
/// of a run; [`TransferReport::summary`] renders the notification text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Distinct glyphs in the normalized work list.
    pub selected_glyphs: usize,
    /// Glyphs whose layers resolved and processed without a fault.
    pub glyphs_touched: usize,
    pub shapes_copied: usize,
    /// Components left out because their target glyph is missing in the
    /// destination document.
    pub components_skipped: usize,
    pub anchors_copied: usize,
    pub sidebearings_inherited: usize,
    /// Glyphs dropped during resolution (source or destination layer
    /// absent).
    pub glyphs_skipped: usize,
    /// Glyphs that raised an unexpected fault mid-run.
    pub glyphs_faulted: usize,
    pub source_label: String,
    pub destination_label: String,
    /// Names of the touched glyphs, in work-list order.
    pub affected_glyphs: Vec<String>,
}

impl TransferReport {
    /// User-facing summary, one notification per run.
    pub fn summary(&self) -> String {
        if self.selected_glyphs == 0 {
            return "No glyphs selected.".to_string();
        }
        if self.glyphs_touched == 0 && self.glyphs_faulted == 0 {
            return format!(
                "No selected glyph has layers in both {} and {}.",
                self.source_label, self.destination_label
            );
        }
        let mut lines = vec![
            format!("Source: {}", self.source_label),
            format!("Target: {}", self.destination_label),
            format!("Glyphs updated: {}", self.glyphs_touched),
            format!("Shapes copied: {}", self.shapes_copied),
            format!("Anchors copied: {}", self.anchors_copied),
            format!("Side bearings inherited: {}", self.sidebearings_inherited),
        ];
        if self.components_skipped > 0 {
            lines.push(format!("Components skipped: {}", self.components_skipped));
        }
        if self.glyphs_skipped > 0 {
            lines.push(format!("Glyphs without matching layers: {}", self.glyphs_skipped));
        }
        if self.glyphs_faulted > 0 {
            lines.push(format!("Glyphs failed: {}", self.glyphs_faulted));
        }
        lines.join("\n")
    }
}

/// Per-glyph tallies collected while applying the content operations.
#[derive(Debug, Clone, Copy, Default)]
struct GlyphStats {
    shapes: ShapeCopyStats,
    anchors: usize,
    sidebearings: bool,
}

/// A resolved work item: the glyph name plus a snapshot of its source
/// layer. Snapshotting up front keeps same-document runs from reading a
/// layer the loop is about to mutate.
struct WorkItem {
    glyph: String,
    source: Layer,
}

/// Runs transfers under one [`TransferPolicy`].
pub struct TransferEngine {
    policy: TransferPolicy,
}

impl TransferEngine {
    pub fn new(policy: TransferPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TransferPolicy {
        &self.policy
    }

    /// Transfer between two masters of one document.
    pub fn run_within(
        &self,
        document: &mut Document,
        selection: &[LayerRef],
    ) -> TransferResult<TransferReport> {
        self.validate(document, document, true)?;
        let source_label = document.label(&self.policy.source_master);
        let destination_label = document.label(&self.policy.destination_master);
        let glyphs = normalize_selection(selection, &self.policy.destination_master);
        let (work, skipped) = self.resolve(document, document, &glyphs);
        Ok(self.execute(document, work, glyphs.len(), skipped, source_label, destination_label))
    }

    /// Transfer from one document into another. Glyphs correspond by
    /// name; the update-suspension scope opens on the destination only
    /// and the source stays read-only for the whole run.
    pub fn run_between(
        &self,
        source: &Document,
        destination: &mut Document,
        selection: &[LayerRef],
    ) -> TransferResult<TransferReport> {
        self.validate(source, destination, false)?;
        let source_label = source.label(&self.policy.source_master);
        let destination_label = destination.label(&self.policy.destination_master);
        let glyphs = normalize_selection(selection, &self.policy.destination_master);
        let (work, skipped) = self.resolve(source, destination, &glyphs);
        Ok(self.execute(destination, work, glyphs.len(), skipped, source_label, destination_label))
    }

    /// Reject bad policies before any mutation happens.
    fn validate(
        &self,
        source: &Document,
        destination: &Document,
        same_document: bool,
    ) -> TransferResult<()> {
        if source.masters().is_empty() {
            return Err(TransferError::NoMasters(source.family_name.clone()));
        }
        if destination.masters().is_empty() {
            return Err(TransferError::NoMasters(destination.family_name.clone()));
        }
        if source.master(&self.policy.source_master).is_none() {
            return Err(TransferError::UnknownMaster {
                id: self.policy.source_master.clone(),
                document: source.family_name.clone(),
            });
        }
        if destination.master(&self.policy.destination_master).is_none() {
            return Err(TransferError::UnknownMaster {
                id: self.policy.destination_master.clone(),
                document: destination.family_name.clone(),
            });
        }
        if same_document && self.policy.source_master == self.policy.destination_master {
            return Err(TransferError::SameMaster);
        }
        Ok(())
    }

    /// Turn glyph names into work items, snapshotting each source layer.
    /// Glyphs missing either layer are dropped and counted, not fatal.
    fn resolve(
        &self,
        source: &Document,
        destination: &Document,
        glyphs: &[String],
    ) -> (Vec<WorkItem>, usize) {
        let mut work = Vec::with_capacity(glyphs.len());
        let mut skipped = 0;
        for name in glyphs {
            let src = source.resolve_layer(name, &self.policy.source_master);
            let dst = destination.resolve_layer(name, &self.policy.destination_master);
            match (src, dst) {
                (Some(layer), Some(_)) => work.push(WorkItem {
                    glyph: name.clone(),
                    source: layer.clone(),
                }),
                _ => {
                    debug!(glyph = %name, "dropping glyph, source or destination layer absent");
                    skipped += 1;
                }
            }
        }
        (work, skipped)
    }

    fn execute(
        &self,
        destination: &mut Document,
        work: Vec<WorkItem>,
        selected: usize,
        skipped: usize,
        source_label: String,
        destination_label: String,
    ) -> TransferReport {
        let mut report = TransferReport {
            selected_glyphs: selected,
            glyphs_skipped: skipped,
            source_label,
            destination_label,
            ..Default::default()
        };
        if work.is_empty() {
            debug!("nothing to transfer, work list is empty");
            return report;
        }

        let known_glyphs = destination.glyph_names();

        // One suspension scope around the whole work list. The closure
        // always returns, so the scope closes even when glyphs fault.
        destination.with_updates_suspended(|doc| {
            for item in &work {
                match self.apply(doc, item, &known_glyphs) {
                    Ok(stats) => {
                        report.glyphs_touched += 1;
                        report.shapes_copied += stats.shapes.copied;
                        report.components_skipped += stats.shapes.skipped;
                        report.anchors_copied += stats.anchors;
                        if stats.sidebearings {
                            report.sidebearings_inherited += 1;
                        }
                        report.affected_glyphs.push(item.glyph.clone());
                    }
                    Err(err) => {
                        warn!(glyph = %item.glyph, error = %err, "glyph failed, continuing with the rest");
                        report.glyphs_faulted += 1;
                    }
                }
            }
        });

        info!(
            source = %report.source_label,
            target = %report.destination_label,
            glyphs = report.glyphs_touched,
            shapes = report.shapes_copied,
            anchors = report.anchors_copied,
            "transfer finished"
        );
        report
    }

    /// Apply the policy's operations to one glyph, in fixed order:
    /// clear, copy shapes, copy anchors, inherit side bearings.
    fn apply(
        &self,
        destination: &mut Document,
        item: &WorkItem,
        known_glyphs: &HashSet<String>,
    ) -> anyhow::Result<GlyphStats> {
        let policy = &self.policy;
        let layer = destination
            .resolve_layer_mut(&item.glyph, &policy.destination_master)
            .ok_or_else(|| anyhow!("destination layer for \"{}\" vanished mid-run", item.glyph))?;

        if policy.transfer_shapes && policy.clear_destination_first {
            ops::clear_shapes(layer, policy.shape_scope);
        }

        let mut stats = GlyphStats::default();
        if policy.transfer_shapes {
            stats.shapes = ops::copy_shapes(&item.source, layer, policy.shape_scope, known_glyphs);
        }
        if policy.transfer_anchors {
            stats.anchors = ops::copy_anchors(&item.source, layer);
        }
        if policy.inherit_sidebearings {
            ops::copy_sidebearings(&item.source, layer);
            stats.sidebearings = true;
        }
        layer.recompute_width();
        Ok(stats)
    }
}
