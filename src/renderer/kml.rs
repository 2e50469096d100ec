//! KML generation from shape trees and style registries

use std::collections::BTreeSet;

use crate::document::Document;
use crate::shape::{NodeStyle, Ring, SettingValue, Settings, ShapeNode};
use crate::style::{StyleRecord, StyleRegistry};

use super::markup::Element;
use super::KmlConfig;

/// Default namespace of KML 2.2 documents
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

const AUXILIARY_NAMESPACES: [(&str, &str); 3] = [
    ("gx", "http://www.google.com/kml/ext/2.2"),
    ("atom", "http://www.w3.org/2005/Atom"),
    ("xal", "urn:oasis:names:tc:ciq:xsdschema:xAL:2.0"),
];

/// Namespace prefixes known to a serializer
#[derive(Debug, Clone, Default)]
pub struct Namespaces {
    prefixes: Vec<(&'static str, &'static str)>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the KML auxiliary prefixes; calling this again is a no-op
    pub fn register_defaults(&mut self) -> &mut Self {
        for (prefix, uri) in AUXILIARY_NAMESPACES {
            if self.uri(prefix).is_none() {
                self.prefixes.push((prefix, uri));
            }
        }
        self
    }

    /// URI registered for `prefix`
    pub fn uri(&self, prefix: &str) -> Option<&'static str> {
        self.prefixes
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// `xmlns` attributes for the root element: the default namespace plus
    /// every registered prefix that appears in `used`
    pub fn declarations(&self, used: &BTreeSet<String>) -> Vec<(String, String)> {
        std::iter::once(("xmlns".to_string(), KML_NAMESPACE.to_string()))
            .chain(
                self.prefixes
                    .iter()
                    .filter(|(prefix, _)| used.contains(*prefix))
                    .map(|(prefix, uri)| (format!("xmlns:{}", prefix), uri.to_string())),
            )
            .collect()
    }
}

/// Serializes documents to KML text
pub struct KmlSerializer {
    config: KmlConfig,
    namespaces: Namespaces,
}

impl KmlSerializer {
    /// Create a serializer; namespaces are registered on first use
    pub fn new(config: KmlConfig) -> Self {
        Self {
            config,
            namespaces: Namespaces::new(),
        }
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Build the `kml` root element for `document`
    ///
    /// The `Document` element contains its settings, then every registered
    /// style, then the top-level children. Styles must precede the content
    /// that references them.
    pub fn build_tree(&mut self, document: &Document) -> Element {
        self.namespaces.register_defaults();

        let root_node = document.root();
        let mut doc = Element::new(root_node.kind().tag());
        if let Some(id) = root_node.id() {
            doc.set_attribute("id", id);
        }
        render_settings(&mut doc, root_node.settings());
        render_styles(document.styles(), &mut doc);
        for child in root_node.children() {
            render_node(child, &mut doc);
        }

        let mut used = BTreeSet::new();
        doc.collect_prefixes(&mut used);
        let mut kml = Element::new("kml");
        for (name, uri) in self.namespaces.declarations(&used) {
            kml.set_attribute(name, uri);
        }
        kml.push(doc);
        kml
    }

    /// Serialize `document` to text
    pub fn serialize(&mut self, document: &Document) -> String {
        let tree = self.build_tree(document);
        let mut out = String::new();
        if self.config.xml_declaration {
            out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            out.push('\n');
        }
        out.push_str(&tree.to_text(&self.config));

        tracing::debug!(
            styles = document.styles().len(),
            children = document.root().children().len(),
            bytes = out.len(),
            "serialized document"
        );
        out
    }
}

/// Render a shape node and its subtree below `parent`
pub fn render_node(node: &ShapeNode, parent: &mut Element) {
    let xml = parent.child(node.kind().tag());
    if let Some(id) = node.id() {
        xml.set_attribute("id", id);
    }
    match node.style() {
        Some(NodeStyle::Inline(records)) => {
            let style = xml.child("Style");
            for record in records {
                render_style_record(record, style);
            }
        }
        Some(reference) => {
            if let Some(url) = reference.url() {
                xml.child("styleUrl").text = Some(url);
            }
        }
        None => {}
    }
    render_settings(xml, node.settings());

    if let Some(outer) = node.outer_boundary() {
        render_ring(outer, xml.child("outerBoundaryIs"));
        for inner in node.inner_boundaries() {
            render_ring(inner, xml.child("innerBoundaryIs"));
        }
    }

    for child in node.children() {
        render_node(child, xml);
    }
}

fn render_ring(ring: &Ring, parent: &mut Element) {
    parent
        .child(Ring::TAG)
        .child("coordinates")
        .text = Some(ring.coordinates_text());
}

/// Render a settings map as child elements, skipping omitted values
pub fn render_settings(parent: &mut Element, settings: &Settings) {
    for (key, value) in settings.iter() {
        let Some(value) = value else {
            continue;
        };
        let xml = parent.child(key);
        match value {
            SettingValue::Map(nested) => render_settings(xml, nested),
            scalar => xml.text = Some(scalar.to_string()),
        }
    }
}

/// Render one style record as an element named after its variant
pub fn render_style_record(record: &StyleRecord, parent: &mut Element) {
    let xml = parent.child(record.tag());
    for (field, value) in record.fields() {
        if let Some(value) = value {
            xml.child(field).text = Some(value);
        }
    }
}

/// Render every registered style as `<Style id="name">`
pub fn render_styles(registry: &StyleRegistry, parent: &mut Element) {
    for (name, entry) in registry.iter() {
        let style = parent.child("Style");
        style.set_attribute("id", name);
        for record in entry.records() {
            render_style_record(record, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{PlacemarkOptions, PolygonOptions};
    use crate::style::{LineStyle, PolyStyle};
    use pretty_assertions::assert_eq;

    fn square() -> Ring {
        Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_register_defaults_is_idempotent() {
        let mut namespaces = Namespaces::new();
        namespaces.register_defaults().register_defaults();
        assert_eq!(namespaces.len(), 3);
        assert_eq!(namespaces.uri("gx"), Some("http://www.google.com/kml/ext/2.2"));
    }

    #[test]
    fn test_declarations_only_for_used_prefixes() {
        let mut namespaces = Namespaces::new();
        namespaces.register_defaults();
        let none = namespaces.declarations(&BTreeSet::new());
        assert_eq!(none, vec![("xmlns".to_string(), KML_NAMESPACE.to_string())]);

        let used: BTreeSet<String> = ["gx".to_string()].into_iter().collect();
        let with_gx = namespaces.declarations(&used);
        assert_eq!(with_gx.len(), 2);
        assert_eq!(with_gx[1].0, "xmlns:gx");
    }

    #[test]
    fn test_render_polygon_structure() {
        let polygon = ShapeNode::polygon(
            square(),
            PolygonOptions::new()
                .with_extrude(true)
                .with_altitude_mode("absolute")
                .unwrap(),
        )
        .with_inner_boundary(Ring::new([[0.2, 0.2], [0.4, 0.2], [0.2, 0.2]]).unwrap())
        .unwrap();

        let mut parent = Element::new("root");
        render_node(&polygon, &mut parent);
        let xml = parent.find("Polygon").unwrap();

        let tags: Vec<_> = xml.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(
            tags,
            vec!["extrude", "altitudeMode", "outerBoundaryIs", "innerBoundaryIs"]
        );
        assert_eq!(xml.find("extrude").unwrap().text.as_deref(), Some("1"));
        assert_eq!(
            xml.find_path("outerBoundaryIs/LinearRing/coordinates")
                .unwrap()
                .text
                .as_deref(),
            Some("0,0 1,0 1,1 0,0")
        );
        assert_eq!(
            xml.find_path("innerBoundaryIs/LinearRing/coordinates")
                .unwrap()
                .text
                .as_deref(),
            Some("0.2,0.2 0.4,0.2 0.2,0.2")
        );
    }

    #[test]
    fn test_render_inline_style_and_children_order() {
        let placemark = ShapeNode::placemark(
            PlacemarkOptions::new()
                .with_name("P")
                .with_id("p1")
                .with_style(vec![
                    StyleRecord::from(PolyStyle::new().with_color("ff00ff00").unwrap()),
                    LineStyle::new().with_width(2.5).unwrap().into(),
                ]),
        )
        .add(ShapeNode::polygon(square(), PolygonOptions::new()))
        .unwrap();

        let mut parent = Element::new("root");
        render_node(&placemark, &mut parent);
        let xml = parent.find("Placemark").unwrap();

        assert_eq!(xml.attribute("id"), Some("p1"));
        let tags: Vec<_> = xml.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(
            tags,
            vec!["Style", "name", "visibility", "open", "Polygon"]
        );
        let style = xml.find("Style").unwrap();
        assert_eq!(style.attribute("id"), None);
        assert_eq!(
            style.find_path("PolyStyle/color").unwrap().text.as_deref(),
            Some("ff00ff00")
        );
        assert_eq!(
            style.find_path("LineStyle/width").unwrap().text.as_deref(),
            Some("2.5")
        );
    }

    #[test]
    fn test_render_style_reference() {
        let placemark =
            ShapeNode::placemark(PlacemarkOptions::new().with_style("myStyle"));
        let mut parent = Element::new("root");
        render_node(&placemark, &mut parent);
        assert_eq!(
            parent.find_path("Placemark/styleUrl").unwrap().text.as_deref(),
            Some("#myStyle")
        );
    }

    #[test]
    fn test_render_nested_settings() {
        let settings = Settings::new()
            .with("name", "legend")
            .with_opt::<&str>("description", None)
            .with("Icon", Settings::new().with("href", "legend.png"));
        let mut parent = Element::new("root");
        render_settings(&mut parent, &settings);

        let tags: Vec<_> = parent.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["name", "Icon"]);
        assert_eq!(
            parent.find_path("Icon/href").unwrap().text.as_deref(),
            Some("legend.png")
        );
    }

    #[test]
    fn test_style_record_skips_unset_fields() {
        let mut parent = Element::new("Style");
        let record = StyleRecord::from(PolyStyle::new().with_outline(0).unwrap());
        render_style_record(&record, &mut parent);
        let poly = parent.find("PolyStyle").unwrap();
        let tags: Vec<_> = poly.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["colorMode", "fill", "outline"]);
    }
}
