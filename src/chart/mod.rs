//! Chart layer: bar and surface plots built on the document model
//!
//! A [`Chart`] owns a [`Document`] and turns measurement series into
//! Folders of styled Placemarks. Values are mapped to colors through a
//! [`ColorBar`]; missing values are skipped.

mod bars;
mod colorbar;
pub mod config;
pub mod geometry;
mod legend;
mod surface;

pub use bars::BarSeries;
pub use colorbar::{ColorBar, Rgb, DEFAULT_COLORBAR_SIZE};
pub use config::{ChartConfigError, ChartDescription};
pub use legend::{Legend, Tick};
pub use surface::SurfaceSeries;

use std::path::Path;

use crate::document::{Document, DocumentOptions};
use crate::error::KmlError;
use crate::renderer::KmlConfig;
use crate::shape::{OverlayOptions, ShapeNode};
use crate::style::StyleEntry;

/// Per-point label or description text
#[derive(Debug, Clone, PartialEq)]
pub enum PointText {
    /// The same text (or none) for every point
    Same(Option<String>),
    /// One text per point
    PerPoint(Vec<String>),
}

impl Default for PointText {
    fn default() -> Self {
        PointText::Same(None)
    }
}

impl PointText {
    /// Text for point `index`
    pub fn at(&self, index: usize) -> Option<String> {
        match self {
            PointText::Same(text) => text.clone(),
            PointText::PerPoint(texts) => texts.get(index).cloned(),
        }
    }

    fn check_len(&self, what: &str, expected: usize) -> Result<(), KmlError> {
        match self {
            PointText::PerPoint(texts) if texts.len() != expected => {
                Err(length_mismatch(what, texts.len(), expected))
            }
            _ => Ok(()),
        }
    }
}

impl From<&str> for PointText {
    fn from(text: &str) -> Self {
        PointText::Same(Some(text.to_string()))
    }
}

impl From<Vec<String>> for PointText {
    fn from(texts: Vec<String>) -> Self {
        PointText::PerPoint(texts)
    }
}

fn length_mismatch(what: &str, found: usize, expected: usize) -> KmlError {
    KmlError::config(format!(
        "{} has {} entries, expected {}",
        what, found, expected
    ))
}

/// A value, unless it is missing or NaN
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// (min, max) over the present values
fn value_range(values: &[Option<f64>]) -> Result<(f64, f64), KmlError> {
    values
        .iter()
        .filter_map(|v| present(*v))
        .fold(None, |range: Option<(f64, f64)>, v| match range {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .ok_or_else(|| KmlError::config("series has no values"))
}

/// A chart document
#[derive(Debug, Clone, Default)]
pub struct Chart {
    document: Document,
}

impl Chart {
    /// Create a chart whose document is named `title`
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let mut options = DocumentOptions::new().with_name(title);
        options.description = description;
        Self::with_options(options)
    }

    /// Create a chart with full control over the document settings
    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            document: Document::new(options),
        }
    }

    /// Add a bar series as a new Folder
    pub fn add_bars(&mut self, series: &BarSeries) -> Result<&mut Self, KmlError> {
        let folder = series.build_folder()?;
        self.document.add(folder)?;
        Ok(self)
    }

    /// Add a surface series as a new Folder
    pub fn add_surface(&mut self, series: &SurfaceSeries) -> Result<&mut Self, KmlError> {
        let folder = series.build_folder()?;
        self.document.add(folder)?;
        Ok(self)
    }

    /// Append a ScreenOverlay showing a legend image
    pub fn add_legend_overlay(
        &mut self,
        href: impl Into<String>,
        options: OverlayOptions,
    ) -> Result<&mut Self, KmlError> {
        self.document.add(ShapeNode::screen_overlay(href, options))?;
        Ok(self)
    }

    /// Register a named style that series can reference
    pub fn add_style(&mut self, name: impl Into<String>, entry: impl Into<StyleEntry>) {
        self.document.add_style(name, entry);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn to_kml_string(&self) -> String {
        self.document.to_kml_string()
    }

    pub fn to_kml_string_with_config(&self, config: &KmlConfig) -> String {
        self.document.to_kml_string_with_config(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KmlError> {
        self.document.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{NodeKind, SettingValue};
    use crate::style::PolyStyle;

    #[test]
    fn test_point_text() {
        assert_eq!(PointText::default().at(3), None);
        assert_eq!(PointText::from("all").at(7), Some("all".to_string()));
        let per_point = PointText::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(per_point.at(1), Some("b".to_string()));
        assert!(per_point.check_len("labels", 2).is_ok());
        assert!(matches!(
            per_point.check_len("labels", 3),
            Err(KmlError::Config(_))
        ));
    }

    #[test]
    fn test_value_range_skips_missing() {
        let values = [Some(3.0), None, Some(f64::NAN), Some(-1.0)];
        assert_eq!(value_range(&values).unwrap(), (-1.0, 3.0));
        assert!(value_range(&[None, Some(f64::NAN)]).is_err());
    }

    #[test]
    fn test_chart_document_settings() {
        let chart = Chart::new("Measurements", Some("Test run".to_string()));
        let root = chart.document().root();
        assert_eq!(
            root.setting("name"),
            Some(&SettingValue::Text("Measurements".to_string()))
        );
        assert!(chart.to_kml_string().contains("<description>Test run</description>"));
    }

    #[test]
    fn test_chart_series_and_overlay() {
        let mut chart = Chart::new("C", None);
        chart.add_style("hl", PolyStyle::new().with_color("ff0000ff").unwrap());
        chart
            .add_bars(
                &BarSeries::new(vec![10.0, 10.01], vec![51.0, 51.0], vec![Some(1.0), Some(2.0)])
                    .with_style("hl"),
            )
            .unwrap()
            .add_legend_overlay("legend.png", OverlayOptions::new())
            .unwrap();

        let kinds: Vec<_> = chart.document().children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Folder, NodeKind::ScreenOverlay]);
        let kml = chart.to_kml_string();
        assert!(kml.contains("<styleUrl>#hl</styleUrl>"));
        assert!(kml.contains("<href>legend.png</href>"));
    }

    #[test]
    fn test_failed_series_leaves_chart_unchanged() {
        let mut chart = Chart::new("C", None);
        let err = chart
            .add_bars(&BarSeries::new(vec![1.0], vec![1.0, 2.0], vec![Some(1.0)]))
            .unwrap_err();
        assert!(matches!(err, KmlError::Config(_)));
        assert!(chart.document().children().is_empty());
    }
}
