//! Shape nodes and their containment rules

use std::fmt;

use crate::error::KmlError;
use crate::style::validate;
use crate::style::StyleRecord;

use super::ring::Ring;
use super::settings::{SettingValue, Settings};

/// The kind of a shape node, which is also its KML element name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Folder,
    Placemark,
    MultiGeometry,
    Polygon,
    ScreenOverlay,
}

impl NodeKind {
    /// KML element name
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Folder => "Folder",
            NodeKind::Placemark => "Placemark",
            NodeKind::MultiGeometry => "MultiGeometry",
            NodeKind::Polygon => "Polygon",
            NodeKind::ScreenOverlay => "ScreenOverlay",
        }
    }

    /// Whether this kind is a geometry (Polygon or MultiGeometry)
    pub fn is_geometry(self) -> bool {
        matches!(self, NodeKind::Polygon | NodeKind::MultiGeometry)
    }

    /// Containment predicate: may a node of this kind be appended to a
    /// `parent` that currently holds `parent_children` children?
    ///
    /// - geometries go into a MultiGeometry, or into a Placemark that has
    ///   no geometry yet
    /// - Placemarks and ScreenOverlays go into a Folder or the Document root
    /// - Folders go into the Document root only
    /// - the Document root is never a child
    pub fn may_be_added_to(self, parent: NodeKind, parent_children: usize) -> bool {
        match self {
            NodeKind::Polygon | NodeKind::MultiGeometry => {
                parent == NodeKind::MultiGeometry
                    || (parent == NodeKind::Placemark && parent_children == 0)
            }
            NodeKind::Placemark | NodeKind::ScreenOverlay => {
                matches!(parent, NodeKind::Document | NodeKind::Folder)
            }
            NodeKind::Folder => parent == NodeKind::Document,
            NodeKind::Document => false,
        }
    }

    fn rejection_reason(self, parent: NodeKind) -> &'static str {
        match self {
            NodeKind::Polygon | NodeKind::MultiGeometry if parent == NodeKind::Placemark => {
                "a Placemark holds at most one geometry"
            }
            NodeKind::Polygon | NodeKind::MultiGeometry => {
                "geometries may only be added to a MultiGeometry or an empty Placemark"
            }
            NodeKind::Placemark | NodeKind::ScreenOverlay => {
                "features may only be added to a Folder or the Document"
            }
            NodeKind::Folder => "folders may only be added to the Document",
            NodeKind::Document => "the Document is the root and cannot be nested",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Style attached to a node: a reference to a registered style, or records
/// rendered inline
#[derive(Debug, Clone, PartialEq)]
pub enum NodeStyle {
    Reference(String),
    Inline(Vec<StyleRecord>),
}

impl NodeStyle {
    /// The `styleUrl` text for a reference; a leading `#` is not doubled
    pub fn url(&self) -> Option<String> {
        match self {
            NodeStyle::Reference(name) => {
                Some(format!("#{}", name.strip_prefix('#').unwrap_or(name)))
            }
            NodeStyle::Inline(_) => None,
        }
    }
}

impl From<&str> for NodeStyle {
    fn from(name: &str) -> Self {
        NodeStyle::Reference(name.to_string())
    }
}

impl From<String> for NodeStyle {
    fn from(name: String) -> Self {
        NodeStyle::Reference(name)
    }
}

impl From<Vec<StyleRecord>> for NodeStyle {
    fn from(records: Vec<StyleRecord>) -> Self {
        NodeStyle::Inline(records)
    }
}

impl From<StyleRecord> for NodeStyle {
    fn from(record: StyleRecord) -> Self {
        NodeStyle::Inline(vec![record])
    }
}

/// Construction options for Placemarks and Folders
#[derive(Debug, Clone)]
pub struct PlacemarkOptions {
    pub name: Option<String>,
    pub visibility: bool,
    pub open: bool,
    pub description: Option<String>,
    pub id: Option<String>,
    pub style: Option<NodeStyle>,
}

impl Default for PlacemarkOptions {
    fn default() -> Self {
        Self {
            name: None,
            visibility: true,
            open: false,
            description: None,
            id: None,
            style: None,
        }
    }
}

impl PlacemarkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, visibility: bool) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<NodeStyle>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Construction options for Polygons
#[derive(Debug, Clone, Default)]
pub struct PolygonOptions {
    altitude_mode: Option<String>,
    extrude: bool,
    id: Option<String>,
}

impl PolygonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the altitude mode: `clampToGround`, `relativeToGround` or `absolute`
    pub fn with_altitude_mode(mut self, mode: &str) -> Result<Self, KmlError> {
        self.altitude_mode = Some(validate::choice(
            "altitudeMode",
            mode,
            validate::ALTITUDE_MODES,
        )?);
        Ok(self)
    }

    pub fn with_extrude(mut self, extrude: bool) -> Self {
        self.extrude = extrude;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Construction options for ScreenOverlays
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    name: Option<String>,
    description: Option<String>,
    visibility: bool,
    rotation: Option<f64>,
    id: Option<String>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            visibility: true,
            rotation: None,
            id: None,
        }
    }
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, visibility: bool) -> Self {
        self.visibility = visibility;
        self
    }

    /// Rotation in degrees, within [-180, 180]
    pub fn with_rotation(mut self, rotation: f64) -> Result<Self, KmlError> {
        self.rotation = Some(validate::angle180("rotation", rotation)?);
        Ok(self)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Outer and inner boundaries of a Polygon
#[derive(Debug, Clone, PartialEq)]
struct Boundaries {
    outer: Ring,
    inner: Vec<Ring>,
}

/// A node of the renderable document tree
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    kind: NodeKind,
    id: Option<String>,
    style: Option<NodeStyle>,
    settings: Settings,
    boundaries: Option<Boundaries>,
    children: Vec<ShapeNode>,
}

impl ShapeNode {
    fn bare(kind: NodeKind, settings: Settings) -> Self {
        Self {
            kind,
            id: None,
            style: None,
            settings,
            boundaries: None,
            children: vec![],
        }
    }

    fn feature(kind: NodeKind, options: PlacemarkOptions) -> Self {
        let settings = Settings::new()
            .with_opt("name", options.name)
            .with("visibility", options.visibility)
            .with("open", options.open)
            .with_opt("description", options.description);
        Self {
            id: options.id,
            style: options.style,
            ..Self::bare(kind, settings)
        }
    }

    /// Create a Placemark, which holds at most one geometry
    pub fn placemark(options: PlacemarkOptions) -> Self {
        Self::feature(NodeKind::Placemark, options)
    }

    /// Create a Folder
    pub fn folder(options: PlacemarkOptions) -> Self {
        Self::feature(NodeKind::Folder, options)
    }

    /// Create a Polygon bounded by `outer`
    pub fn polygon(outer: Ring, options: PolygonOptions) -> Self {
        let settings = Settings::new()
            .with("extrude", options.extrude)
            .with_opt("altitudeMode", options.altitude_mode);
        Self {
            id: options.id,
            boundaries: Some(Boundaries {
                outer,
                inner: vec![],
            }),
            ..Self::bare(NodeKind::Polygon, settings)
        }
    }

    /// Create an empty MultiGeometry
    pub fn multi_geometry() -> Self {
        Self::bare(NodeKind::MultiGeometry, Settings::new())
    }

    /// Create a ScreenOverlay showing the image at `href`
    pub fn screen_overlay(href: impl Into<String>, options: OverlayOptions) -> Self {
        let icon = Settings::new().with("href", href.into());
        let settings = Settings::new()
            .with_opt("name", options.name)
            .with("visibility", options.visibility)
            .with_opt("description", options.description)
            .with("Icon", icon)
            .with_opt("rotation", options.rotation);
        Self {
            id: options.id,
            ..Self::bare(NodeKind::ScreenOverlay, settings)
        }
    }

    /// Create the Document root node
    pub(crate) fn document_root(settings: Settings) -> Self {
        Self::bare(NodeKind::Document, settings)
    }

    /// Set the `id` attribute
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a style reference or inline style records
    pub fn with_style(mut self, style: impl Into<NodeStyle>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Append `child` and return `self` for chaining
    ///
    /// Fails with a placement error when the containment rules reject the
    /// pairing.
    pub fn add(mut self, child: ShapeNode) -> Result<Self, KmlError> {
        self.push(child)?;
        Ok(self)
    }

    /// Append `child` in place
    pub fn push(&mut self, child: ShapeNode) -> Result<&mut Self, KmlError> {
        if !child.kind.may_be_added_to(self.kind, self.children.len()) {
            tracing::trace!(
                child = child.kind.tag(),
                parent = self.kind.tag(),
                children = self.children.len(),
                "containment rejected"
            );
            return Err(KmlError::placement(
                child.kind.tag(),
                self.kind.tag(),
                child.kind.rejection_reason(self.kind),
            ));
        }
        self.children.push(child);
        Ok(self)
    }

    /// Add a hole to a Polygon
    ///
    /// Fails with a type error when this node is not a Polygon.
    pub fn add_inner_boundary(&mut self, ring: Ring) -> Result<&mut Self, KmlError> {
        let Some(boundaries) = self.boundaries.as_mut() else {
            return Err(KmlError::type_mismatch(
                NodeKind::Polygon.tag(),
                self.kind.tag(),
            ));
        };
        boundaries.inner.push(ring);
        Ok(self)
    }

    /// Builder form of [`ShapeNode::add_inner_boundary`]
    pub fn with_inner_boundary(mut self, ring: Ring) -> Result<Self, KmlError> {
        self.add_inner_boundary(ring)?;
        Ok(self)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn style(&self) -> Option<&NodeStyle> {
        self.style.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Look up a single setting
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    pub fn children(&self) -> &[ShapeNode] {
        &self.children
    }

    /// Outer boundary of a Polygon
    pub fn outer_boundary(&self) -> Option<&Ring> {
        self.boundaries.as_ref().map(|b| &b.outer)
    }

    /// Inner boundaries (holes) of a Polygon; empty for other kinds
    pub fn inner_boundaries(&self) -> &[Ring] {
        self.boundaries
            .as_ref()
            .map(|b| b.inner.as_slice())
            .unwrap_or(&[])
    }
}
