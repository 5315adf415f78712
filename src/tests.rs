#[cfg(test)]
mod fixtures {
    use crate::font_source::{
        Anchor, ComponentRef, Document, Glyph, Layer, MasterId, Path, PathPoint, PointKind, Shape,
    };

    pub fn regular() -> MasterId {
        MasterId::new("m-regular")
    }

    pub fn bold() -> MasterId {
        MasterId::new("m-bold")
    }

    pub fn sample_path() -> Path {
        Path::new(
            vec![
                PathPoint::new(30.0, 0.0, PointKind::Line),
                PathPoint::new(430.0, 0.0, PointKind::Line),
                PathPoint::new(230.0, 700.0, PointKind::Line),
            ],
            true,
        )
    }

    pub fn drawn_layer() -> Layer {
        let mut layer = Layer {
            lsb: 30.0,
            rsb: 40.0,
            ..Default::default()
        };
        layer.shapes.push(Shape::Path(sample_path()));
        layer.insert_anchor(Anchor::new("top", 100.0, 200.0));
        layer.recompute_width();
        layer
    }

    pub fn component_layer(bases: &[&str]) -> Layer {
        let mut layer = Layer::default();
        for base in bases {
            layer
                .shapes
                .push(Shape::Component(ComponentRef::new(*base)));
        }
        layer
    }

    /// Two masters, a drawn "A" (Regular filled, Bold holding only a
    /// diverging "top" anchor), a drawn "B", and a composed "Aacute".
    pub fn two_master_doc() -> Document {
        let mut doc = Document::new("Testfamily");
        doc.add_master(regular(), "Regular");
        doc.add_master(bold(), "Bold");

        let mut a = Glyph::new("A");
        a.set_layer(regular(), drawn_layer());
        let mut a_bold = Layer::default();
        a_bold.insert_anchor(Anchor::new("top", 90.0, 210.0));
        a.set_layer(bold(), a_bold);
        doc.insert_glyph(a);

        let mut b = Glyph::new("B");
        b.set_layer(regular(), drawn_layer());
        doc.insert_glyph(b);

        doc.insert_glyph(Glyph::new("acute"));

        let mut aacute = Glyph::new("Aacute");
        aacute.set_layer(regular(), component_layer(&["A", "acute"]));
        doc.insert_glyph(aacute);

        doc
    }
}

#[cfg(test)]
mod engine_tests {
    use super::fixtures::*;
    use crate::core::errors::TransferError;
    use crate::editing::selection::LayerRef;
    use crate::editing::transfer::{TransferEngine, TransferPolicy};
    use kurbo::Point;

    fn select(glyphs: &[&str]) -> Vec<LayerRef> {
        glyphs
            .iter()
            .map(|g| LayerRef::new(*g, regular()))
            .collect()
    }

    #[test]
    fn merges_path_and_anchor_into_bold() {
        let mut doc = two_master_doc();
        let mut policy = TransferPolicy::new(regular(), bold());
        policy.transfer_anchors = true;

        let report = TransferEngine::new(policy)
            .run_within(&mut doc, &select(&["A"]))
            .unwrap();

        assert_eq!(report.glyphs_touched, 1);
        assert_eq!(report.shapes_copied, 1);
        assert_eq!(report.anchors_copied, 1);

        let dst = doc.resolve_layer("A", &bold()).unwrap();
        let src = doc.resolve_layer("A", &regular()).unwrap();
        assert_eq!(dst.shapes, src.shapes);
        // The source's "top" replaced the diverging destination anchor.
        assert_eq!(dst.anchors().len(), 1);
        assert_eq!(dst.anchor("top").unwrap().position, Point::new(100.0, 200.0));
        // Source content is untouched.
        assert_eq!(src.anchor("top").unwrap().position, Point::new(100.0, 200.0));
    }

    #[test]
    fn clear_first_transfer_is_idempotent() {
        let mut doc = two_master_doc();
        let mut policy = TransferPolicy::new(regular(), bold());
        policy.clear_destination_first = true;
        let engine = TransferEngine::new(policy);

        for _ in 0..2 {
            let report = engine.run_within(&mut doc, &select(&["A", "B"])).unwrap();
            assert_eq!(report.glyphs_touched, 2);
            for name in ["A", "B"] {
                let src = doc.resolve_layer(name, &regular()).unwrap();
                let dst = doc.resolve_layer(name, &bold()).unwrap();
                assert_eq!(dst.shapes, src.shapes);
            }
        }
    }

    #[test]
    fn merge_without_clear_accumulates_shapes() {
        let mut doc = two_master_doc();
        let engine = TransferEngine::new(TransferPolicy::new(regular(), bold()));

        engine.run_within(&mut doc, &select(&["A"])).unwrap();
        engine.run_within(&mut doc, &select(&["A"])).unwrap();

        assert_eq!(doc.resolve_layer("A", &bold()).unwrap().shapes.len(), 2);
    }

    #[test]
    fn duplicate_selection_counts_one_glyph() {
        let mut doc = two_master_doc();
        // Both masters of "A" highlighted: same (glyph, destination) pair.
        let raw = vec![
            LayerRef::new("A", regular()),
            LayerRef::new("A", bold()),
        ];

        let report = TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &raw)
            .unwrap();

        assert_eq!(report.selected_glyphs, 1);
        assert_eq!(report.glyphs_touched, 1);
        assert_eq!(doc.resolve_layer("A", &bold()).unwrap().shapes.len(), 1);
    }

    #[test]
    fn same_master_is_rejected_before_any_mutation() {
        let mut doc = two_master_doc();
        let err = TransferEngine::new(TransferPolicy::new(regular(), regular()))
            .run_within(&mut doc, &select(&["A"]))
            .unwrap_err();

        assert_eq!(err, TransferError::SameMaster);
        assert_eq!(doc.update_batches(), 0);
        let bold_a = doc.resolve_layer("A", &bold()).unwrap();
        assert!(bold_a.shapes.is_empty());
        assert_eq!(bold_a.anchor("top").unwrap().position, Point::new(90.0, 210.0));
    }

    #[test]
    fn unknown_master_is_rejected() {
        let mut doc = two_master_doc();
        let stranger = crate::font_source::MasterId::new("m-stranger");
        let err = TransferEngine::new(TransferPolicy::new(regular(), stranger.clone()))
            .run_within(&mut doc, &select(&["A"]))
            .unwrap_err();

        assert_eq!(
            err,
            TransferError::UnknownMaster {
                id: stranger,
                document: "Testfamily".to_string(),
            }
        );
    }

    #[test]
    fn empty_document_is_rejected() {
        let mut doc = crate::font_source::Document::new("Empty");
        let err = TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &[])
            .unwrap_err();

        assert_eq!(err, TransferError::NoMasters("Empty".to_string()));
    }

    #[test]
    fn resolution_gaps_are_skipped_not_fatal() {
        let mut doc = two_master_doc();
        doc.glyph_mut("B").unwrap().remove_layer(&bold());

        let report = TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &select(&["A", "B"]))
            .unwrap();

        assert_eq!(report.glyphs_touched, 1);
        assert_eq!(report.glyphs_skipped, 1);
        assert_eq!(report.glyphs_faulted, 0);
        assert_eq!(report.affected_glyphs, vec!["A".to_string()]);
    }

    #[test]
    fn update_scope_opens_once_for_the_whole_run() {
        crate::logging::init();
        let mut doc = two_master_doc();
        TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &select(&["A", "B", "Aacute"]))
            .unwrap();

        assert_eq!(doc.update_batches(), 1);
        assert!(!doc.updates_suspended());
    }

    #[test]
    fn sidebearing_inheritance_rederives_width() {
        let mut doc = two_master_doc();
        let mut policy = TransferPolicy::new(regular(), bold());
        policy.inherit_sidebearings = true;

        let report = TransferEngine::new(policy)
            .run_within(&mut doc, &select(&["A"]))
            .unwrap();
        assert_eq!(report.sidebearings_inherited, 1);

        let dst = doc.resolve_layer("A", &bold()).unwrap();
        assert_eq!(dst.lsb, 30.0);
        assert_eq!(dst.rsb, 40.0);
        // lsb + triangle extent (400) + rsb
        assert_eq!(dst.width, 470.0);
    }

    #[test]
    fn empty_selection_reports_nothing_selected() {
        let mut doc = two_master_doc();
        let report = TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &[])
            .unwrap();

        assert_eq!(report.selected_glyphs, 0);
        assert_eq!(report.glyphs_touched, 0);
        assert_eq!(doc.update_batches(), 0);
        assert_eq!(report.summary(), "No glyphs selected.");
    }

    #[test]
    fn zero_resolved_reads_differently_from_nothing_selected() {
        let mut doc = two_master_doc();
        doc.glyph_mut("B").unwrap().remove_layer(&bold());

        let report = TransferEngine::new(TransferPolicy::new(regular(), bold()))
            .run_within(&mut doc, &select(&["B"]))
            .unwrap();

        assert_eq!(report.selected_glyphs, 1);
        assert_eq!(report.glyphs_touched, 0);
        assert_ne!(report.summary(), "No glyphs selected.");
        assert!(report.summary().contains("No selected glyph"));
    }
}

#[cfg(test)]
mod cross_document_tests {
    use super::fixtures::*;
    use crate::editing::selection::LayerRef;
    use crate::editing::transfer::{TransferEngine, TransferPolicy};
    use crate::font_source::{Document, Glyph, MasterId};

    fn destination_doc() -> Document {
        let mut doc = Document::new("Otherfamily");
        doc.add_master(MasterId::new("m-black"), "Black");
        doc.insert_glyph(Glyph::new("A"));
        doc.insert_glyph(Glyph::new("Aacute"));
        doc
    }

    #[test]
    fn components_resolve_by_name_in_the_destination() {
        let source = two_master_doc();
        let mut destination = destination_doc();
        let policy = TransferPolicy::new(regular(), MasterId::new("m-black"));
        let selection = vec![LayerRef::new("Aacute", regular())];

        let report = TransferEngine::new(policy)
            .run_between(&source, &mut destination, &selection)
            .unwrap();

        // "A" exists in the destination under its own identity; "acute"
        // does not exist there at all and is skipped.
        assert_eq!(report.shapes_copied, 1);
        assert_eq!(report.components_skipped, 1);

        let layer = destination
            .resolve_layer("Aacute", &MasterId::new("m-black"))
            .unwrap();
        let component = layer.components().next().unwrap();
        assert_eq!(component.base_glyph, "A");
        assert!(destination.glyph(&component.base_glyph).is_some());
    }

    #[test]
    fn same_master_id_is_allowed_across_documents() {
        // Ids are document-scoped; only same-document runs reject equal
        // source and destination ids.
        let source = two_master_doc();
        let mut destination = two_master_doc();
        let policy = TransferPolicy::new(regular(), regular());
        let selection = vec![LayerRef::new("A", regular())];

        let report = TransferEngine::new(policy)
            .run_between(&source, &mut destination, &selection)
            .unwrap();
        assert_eq!(report.glyphs_touched, 1);
    }

    #[test]
    fn scope_opens_on_the_destination_only() {
        let source = two_master_doc();
        let mut destination = destination_doc();
        let policy = TransferPolicy::new(regular(), MasterId::new("m-black"));
        let selection = vec![
            LayerRef::new("A", regular()),
            LayerRef::new("Aacute", regular()),
        ];

        TransferEngine::new(policy)
            .run_between(&source, &mut destination, &selection)
            .unwrap();

        assert_eq!(source.update_batches(), 0);
        assert_eq!(destination.update_batches(), 1);
    }

    #[test]
    fn glyphs_missing_in_the_destination_are_skipped() {
        let source = two_master_doc();
        let mut destination = destination_doc();
        let policy = TransferPolicy::new(regular(), MasterId::new("m-black"));
        let selection = vec![
            LayerRef::new("A", regular()),
            LayerRef::new("B", regular()),
        ];

        let report = TransferEngine::new(policy)
            .run_between(&source, &mut destination, &selection)
            .unwrap();

        assert_eq!(report.glyphs_touched, 1);
        assert_eq!(report.glyphs_skipped, 1);
    }
}

#[cfg(test)]
mod scope_tests {
    use super::fixtures::*;
    use crate::editing::selection::LayerRef;
    use crate::editing::transfer::{ShapeScope, TransferEngine, TransferPolicy};
    use crate::font_source::{ComponentRef, Glyph, Layer, Shape};

    #[test]
    fn paths_only_leaves_destination_components_alone() {
        let mut doc = two_master_doc();
        // Give Bold "A" a component that a paths-only clear must keep.
        let mut mixed = component_layer(&["B"]);
        mixed.shapes.push(Shape::Path(sample_path()));
        let mut glyph = Glyph::new("A");
        glyph.set_layer(regular(), drawn_layer());
        glyph.set_layer(bold(), mixed);
        doc.insert_glyph(glyph);

        let mut policy = TransferPolicy::new(regular(), bold());
        policy.shape_scope = ShapeScope::PathsOnly;
        policy.clear_destination_first = true;

        TransferEngine::new(policy)
            .run_within(&mut doc, &[LayerRef::new("A", regular())])
            .unwrap();

        let dst = doc.resolve_layer("A", &bold()).unwrap();
        assert_eq!(dst.components().count(), 1);
        assert_eq!(dst.paths().count(), 1);
    }

    #[test]
    fn components_only_copies_no_paths() {
        let mut doc = two_master_doc();
        let mut source: Layer = drawn_layer();
        source
            .shapes
            .push(Shape::Component(ComponentRef::new("B")));
        doc.glyph_mut("A").unwrap().set_layer(regular(), source);

        let mut policy = TransferPolicy::new(regular(), bold());
        policy.shape_scope = ShapeScope::ComponentsOnly;

        let report = TransferEngine::new(policy)
            .run_within(&mut doc, &[LayerRef::new("A", regular())])
            .unwrap();

        assert_eq!(report.shapes_copied, 1);
        let dst = doc.resolve_layer("A", &bold()).unwrap();
        assert_eq!(dst.paths().count(), 0);
        assert_eq!(dst.components().count(), 1);
    }
}
