//! In-memory font source graph
//!
//! This module contains the document/glyph/layer structures the transfer
//! engine reads from and writes to. The graph is a plain value model: the
//! host editor owns loading and persistence, we only mutate content.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Stable identifier for a master, scoped to one document.
///
/// Ids survive master reordering and renaming, so preferences and
/// transfer policies store ids rather than list indices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MasterId(String);

impl MasterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MasterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One master (weight, width, optical size...) of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Master {
    pub id: MasterId,
    pub name: String,
}

/// Point types used by glyph outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

/// A single on- or off-curve point in a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub kind: PointKind,
    pub smooth: bool,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, kind: PointKind) -> Self {
        Self {
            x,
            y,
            kind,
            smooth: false,
        }
    }
}

/// A drawn outline: an ordered point sequence, open or closed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl Path {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        Self { points, closed }
    }
}

/// A reference to another glyph placed inside a layer.
///
/// All fields are always present; hosts that lack a value report the
/// identity transform, an empty value map, and `auto_align = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Name of the referenced glyph, resolved within the owning document.
    pub base_glyph: String,
    pub transform: Affine,
    pub auto_align: bool,
    /// Smart component axis values, keyed by axis name.
    pub smart_values: BTreeMap<String, f64>,
}

impl ComponentRef {
    pub fn new(base_glyph: impl Into<String>) -> Self {
        Self {
            base_glyph: base_glyph.into(),
            transform: Affine::IDENTITY,
            auto_align: false,
            smart_values: BTreeMap::new(),
        }
    }
}

/// Layer content: either a drawn path or a component reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Path(Path),
    Component(ComponentRef),
}

impl Shape {
    pub fn is_path(&self) -> bool {
        matches!(self, Shape::Path(_))
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Shape::Component(_))
    }

    pub fn as_component(&self) -> Option<&ComponentRef> {
        match self {
            Shape::Component(component) => Some(component),
            Shape::Path(_) => None,
        }
    }
}

/// A named anchor position, e.g. "top" on a base glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub position: Point,
}

impl Anchor {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
        }
    }
}

/// The content bucket for one (glyph, master) pair.
///
/// Shapes and anchors are value types throughout; cloning a layer yields
/// fully independent content. Anchor names are unique within a layer,
/// enforced by [`Layer::insert_anchor`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    pub shapes: Vec<Shape>,
    pub(crate) anchors: Vec<Anchor>,
    /// Left side bearing.
    pub lsb: f64,
    /// Right side bearing.
    pub rsb: f64,
    /// Advance width, derived from the side bearings and the outline
    /// extent. See [`Layer::recompute_width`].
    pub width: f64,
}

impl Layer {
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.name == name)
    }

    /// Insert an anchor, replacing any existing anchor of the same name.
    pub fn insert_anchor(&mut self, anchor: Anchor) {
        self.anchors.retain(|a| a.name != anchor.name);
        self.anchors.push(anchor);
    }

    pub fn clear_anchors(&mut self) {
        self.anchors.clear();
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Path(path) => Some(path),
            Shape::Component(_) => None,
        })
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentRef> {
        self.shapes.iter().filter_map(Shape::as_component)
    }
}

/// A named design unit owning one layer per master of its document.
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    pub name: String,
    layers: BTreeMap<MasterId, Layer>,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: BTreeMap::new(),
        }
    }

    pub fn layer(&self, master: &MasterId) -> Option<&Layer> {
        self.layers.get(master)
    }

    pub fn layer_mut(&mut self, master: &MasterId) -> Option<&mut Layer> {
        self.layers.get_mut(master)
    }

    /// Install the layer for a master, replacing any previous content.
    pub fn set_layer(&mut self, master: MasterId, layer: Layer) {
        self.layers.insert(master, layer);
    }

    /// Remove a layer. Host-side editing operation; the transfer engine
    /// never creates or destroys layers.
    pub fn remove_layer(&mut self, master: &MasterId) -> Option<Layer> {
        self.layers.remove(master)
    }

    fn ensure_layer(&mut self, master: &MasterId) {
        self.layers.entry(master.clone()).or_default();
    }
}

/// A font source: masters in insertion order plus glyphs keyed by name.
///
/// Two documents are independent namespaces. Glyph identity is
/// document-scoped, so cross-document lookups go by glyph name.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub family_name: String,
    masters: Vec<Master>,
    glyphs: HashMap<String, Glyph>,
    /// Free-form per-document storage, used for persisted preferences.
    pub user_data: HashMap<String, serde_json::Value>,
    update_depth: usize,
    update_batches: usize,
}

impl Document {
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            ..Default::default()
        }
    }

    /// Append a master. Every existing glyph implicitly gains an empty
    /// layer for it, mirroring how editing hosts back-fill masters.
    pub fn add_master(&mut self, id: MasterId, name: impl Into<String>) {
        for glyph in self.glyphs.values_mut() {
            glyph.ensure_layer(&id);
        }
        self.masters.push(Master {
            id,
            name: name.into(),
        });
    }

    pub fn masters(&self) -> &[Master] {
        &self.masters
    }

    pub fn master(&self, id: &MasterId) -> Option<&Master> {
        self.masters.iter().find(|m| &m.id == id)
    }

    /// Insert a glyph, back-filling an empty layer for every master the
    /// glyph does not already cover.
    pub fn insert_glyph(&mut self, mut glyph: Glyph) {
        for master in &self.masters {
            glyph.ensure_layer(&master.id);
        }
        self.glyphs.insert(glyph.name.clone(), glyph);
    }

    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    pub fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.glyphs.get_mut(name)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Snapshot of all glyph names, used for component target checks.
    pub fn glyph_names(&self) -> HashSet<String> {
        self.glyphs.keys().cloned().collect()
    }

    /// Look up the layer for (glyph, master). `None` means the glyph is
    /// unknown or carries no layer for that master; callers treat this
    /// as a resolution gap, never as a request to create one.
    pub fn resolve_layer(&self, glyph: &str, master: &MasterId) -> Option<&Layer> {
        self.glyphs.get(glyph)?.layer(master)
    }

    pub fn resolve_layer_mut(&mut self, glyph: &str, master: &MasterId) -> Option<&mut Layer> {
        self.glyphs.get_mut(glyph)?.layer_mut(master)
    }

    /// Human-readable "Family (Master)" label for notifications.
    pub fn label(&self, master: &MasterId) -> String {
        match self.master(master) {
            Some(m) => format!("{} ({})", self.family_name, m.name),
            None => format!("{} ({})", self.family_name, master),
        }
    }

    /// Run `f` with interface refresh notifications suspended.
    ///
    /// Nested calls share one batch; the suspension is released when the
    /// outermost scope returns, so a single engine run never signals the
    /// host more than once.
    pub fn with_updates_suspended<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        if self.update_depth == 0 {
            self.update_batches += 1;
        }
        self.update_depth += 1;
        let out = f(self);
        self.update_depth -= 1;
        out
    }

    pub fn updates_suspended(&self) -> bool {
        self.update_depth > 0
    }

    /// Number of top-level suspension scopes opened so far.
    pub fn update_batches(&self) -> usize {
        self.update_batches
    }
}
