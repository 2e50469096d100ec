//! The document root: settings, named styles and top-level features

use std::path::Path;

use crate::error::KmlError;
use crate::renderer::{KmlConfig, KmlSerializer};
use crate::shape::{Settings, ShapeNode};
use crate::style::{StyleEntry, StyleRegistry};

/// Construction options for a [`Document`]
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: bool,
    pub open: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            visibility: true,
            open: false,
        }
    }
}

impl DocumentOptions {
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
}

/// A KML document under construction
///
/// # Example
///
/// ```rust
/// use kml_chart::{Document, DocumentOptions, PlacemarkOptions, PolyStyle, PolygonOptions, Ring, ShapeNode};
///
/// let mut doc = Document::new(DocumentOptions::new().with_name("Example"));
/// doc.add_style("red", PolyStyle::new().with_color("ff0000ff").unwrap());
///
/// let ring = Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap();
/// let placemark = ShapeNode::placemark(PlacemarkOptions::new().with_style("red"))
///     .add(ShapeNode::polygon(ring, PolygonOptions::new()))
///     .unwrap();
/// doc.add(placemark).unwrap();
///
/// let kml = doc.to_kml_string();
/// assert!(kml.contains("<styleUrl>#red</styleUrl>"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    root: ShapeNode,
    styles: StyleRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentOptions::default())
    }
}

impl Document {
    /// Create an empty document
    pub fn new(options: DocumentOptions) -> Self {
        let settings = Settings::new()
            .with_opt("name", options.name)
            .with("visibility", options.visibility)
            .with("open", options.open)
            .with_opt("description", options.description);
        Self {
            root: ShapeNode::document_root(settings),
            styles: StyleRegistry::new(),
        }
    }

    /// Append a top-level Folder, Placemark or ScreenOverlay
    pub fn add(&mut self, child: ShapeNode) -> Result<&mut Self, KmlError> {
        self.root.push(child)?;
        Ok(self)
    }

    /// Register (or replace) a named style
    pub fn add_style(&mut self, name: impl Into<String>, entry: impl Into<StyleEntry>) {
        self.styles.add_style(name, entry);
    }

    /// The root node holding document settings and top-level children
    pub fn root(&self) -> &ShapeNode {
        &self.root
    }

    pub fn children(&self) -> &[ShapeNode] {
        self.root.children()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Serialize with the default configuration
    pub fn to_kml_string(&self) -> String {
        self.to_kml_string_with_config(&KmlConfig::default())
    }

    /// Serialize with a custom configuration
    pub fn to_kml_string_with_config(&self, config: &KmlConfig) -> String {
        KmlSerializer::new(config.clone()).serialize(self)
    }

    /// Write the serialized document to `path`, replacing its content
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KmlError> {
        self.save_with_config(path, &KmlConfig::default())
    }

    /// Write the serialized document to `path` with a custom configuration
    pub fn save_with_config(
        &self,
        path: impl AsRef<Path>,
        config: &KmlConfig,
    ) -> Result<(), KmlError> {
        let text = self.to_kml_string_with_config(config);
        std::fs::write(path.as_ref(), text)?;
        tracing::debug!(path = %path.as_ref().display(), "saved document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{NodeKind, OverlayOptions, PlacemarkOptions, PolygonOptions, Ring};
    use crate::style::PolyStyle;

    fn square() -> Ring {
        Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let kml = Document::default().to_kml_string();
        assert!(kml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(kml.contains(r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#));
        assert!(kml.contains("<visibility>1</visibility>"));
        assert!(kml.contains("<open>0</open>"));
        assert!(!kml.contains("<name>"));
    }

    #[test]
    fn test_polygon_into_root_is_rejected() {
        let mut doc = Document::default();
        let err = doc
            .add(ShapeNode::polygon(square(), PolygonOptions::new()))
            .unwrap_err();
        assert!(matches!(err, KmlError::Placement { .. }));
        assert!(doc.children().is_empty());
    }

    #[test]
    fn test_features_into_root() {
        let mut doc = Document::default();
        doc.add(ShapeNode::folder(PlacemarkOptions::new()))
            .unwrap()
            .add(ShapeNode::placemark(PlacemarkOptions::new()))
            .unwrap()
            .add(ShapeNode::screen_overlay("legend.png", OverlayOptions::new()))
            .unwrap();
        let kinds: Vec<_> = doc.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Folder, NodeKind::Placemark, NodeKind::ScreenOverlay]
        );
    }

    #[test]
    fn test_styles_before_children() {
        let mut doc = Document::new(DocumentOptions::new().with_name("D"));
        doc.add(ShapeNode::folder(PlacemarkOptions::new().with_name("F")))
            .unwrap();
        doc.add_style("s", PolyStyle::new());
        let kml = doc.to_kml_string();
        let style_at = kml.find(r#"<Style id="s">"#).unwrap();
        let folder_at = kml.find("<Folder>").unwrap();
        assert!(style_at < folder_at);
    }

    #[test]
    fn test_gx_namespace_declared_when_used() {
        let mut doc = Document::default();
        assert!(!doc.to_kml_string().contains("xmlns:gx"));
        doc.add_style(
            "outlined",
            crate::style::LineStyle::new()
                .with_outer_color("ff00ff00")
                .unwrap(),
        );
        let kml = doc.to_kml_string();
        assert!(kml.contains(r#"xmlns:gx="http://www.google.com/kml/ext/2.2""#));
        assert!(kml.contains("<gx:outerColor>ff00ff00</gx:outerColor>"));
        assert!(!kml.contains("xmlns:atom"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.kml");
        let doc = Document::new(DocumentOptions::new().with_name("Saved"));
        doc.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_kml_string());
    }
}
