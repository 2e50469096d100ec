//! KML Chart - Build KML documents and 3D charts for virtual globes
//!
//! This library provides a shape tree with containment rules, validated style
//! records, a per-document style registry and a KML serializer. A chart layer
//! on top turns measurement series into colored bars and surfaces.
//!
//! # Example
//!
//! ```rust
//! use kml_chart::{Document, DocumentOptions, PlacemarkOptions, PolyStyle, PolygonOptions, Ring, ShapeNode};
//!
//! let mut doc = Document::new(DocumentOptions::new().with_name("Example"));
//! doc.add_style("myStyle", PolyStyle::new().with_color("ff0000ff").unwrap());
//!
//! let ring = Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap();
//! let folder = ShapeNode::folder(PlacemarkOptions::new().with_name("F"))
//!     .add(
//!         ShapeNode::placemark(PlacemarkOptions::new().with_style("myStyle"))
//!             .add(ShapeNode::polygon(ring, PolygonOptions::new()))
//!             .unwrap(),
//!     )
//!     .unwrap();
//! doc.add(folder).unwrap();
//!
//! let kml = doc.to_kml_string();
//! assert!(kml.contains("<coordinates>0,0 1,0 1,1 0,0</coordinates>"));
//! ```

pub mod chart;
pub mod document;
pub mod error;
pub mod renderer;
pub mod shape;
pub mod style;

pub use chart::{
    BarSeries, Chart, ChartConfigError, ChartDescription, ColorBar, Legend, PointText, Rgb,
    SurfaceSeries, Tick,
};
pub use document::{Document, DocumentOptions};
pub use error::KmlError;
pub use renderer::{KmlConfig, KmlSerializer};
pub use shape::{
    Coordinate, NodeKind, NodeStyle, OverlayOptions, PlacemarkOptions, PolygonOptions, Ring,
    SettingValue, Settings, ShapeNode,
};
pub use style::{BalloonStyle, FieldValue, LineStyle, PolyStyle, StyleEntry, StyleRecord, StyleRegistry};

/// Render a TOML chart description to KML with default configuration
///
/// # Example
///
/// ```rust
/// use kml_chart::render;
///
/// let kml = render(r#"
///     [chart]
///     title = "Heights"
///
///     [[bars]]
///     lon = [10.0, 10.01]
///     lat = [51.0, 51.0]
///     values = [1.0, 2.0]
/// "#).unwrap();
///
/// assert!(kml.contains("<name>Heights</name>"));
/// assert!(kml.contains("<extrude>1</extrude>"));
/// ```
pub fn render(source: &str) -> Result<String, ChartConfigError> {
    render_with_config(source, &KmlConfig::default())
}

/// Render a TOML chart description to KML with custom configuration
///
/// # Example
///
/// ```rust
/// use kml_chart::{render_with_config, KmlConfig};
///
/// let kml = render_with_config("[chart]\ntitle = \"T\"", &KmlConfig::compact()).unwrap();
/// assert_eq!(kml.lines().count(), 2);
/// ```
pub fn render_with_config(source: &str, config: &KmlConfig) -> Result<String, ChartConfigError> {
    let description = ChartDescription::from_str(source)?;
    let chart = description.build()?;
    Ok(chart.to_kml_string_with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_description() {
        let kml = render("").unwrap();
        assert!(kml.contains("<Document>"));
        assert!(kml.contains("</kml>"));
    }

    #[test]
    fn test_render_surface() {
        let kml = render(
            r#"
            [[surfaces]]
            name = "Ground"
            polygons = [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            values = [3.5]
            border_color = [255, 0, 0]
        "#,
        )
        .unwrap();
        assert!(kml.contains("<name>Ground</name>"));
        assert!(kml.contains("<outline>1</outline>"));
        assert!(kml.contains("<color>ff0000ff</color>"));
    }

    #[test]
    fn test_render_errors() {
        assert!(matches!(render("[chart"), Err(ChartConfigError::ParseError(_))));
        let err = render(
            r#"
            [[bars]]
            lon = [1.0, 1.0]
            lat = [1.0, 1.0]
            values = [1.0, 2.0]
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ChartConfigError::Invalid(KmlError::Config(_))));
    }
}
