//! TOML chart descriptions
//!
//! A description names the chart, declares named styles and lists bar and
//! surface series. NaN values mark missing measurements.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::document::DocumentOptions;
use crate::error::KmlError;
use crate::shape::Ring;
use crate::style::{FieldValue, StyleEntry, StyleRecord};

use super::{BarSeries, Chart, ColorBar, Legend, PointText, Rgb, SurfaceSeries};

/// Errors that can occur when loading a chart description
#[derive(Error, Debug)]
pub enum ChartConfigError {
    #[error("Failed to read chart description: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse chart description TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid chart description: {0}")]
    Invalid(#[from] KmlError),
}

/// A parsed chart description, ready to be built into a [`Chart`]
#[derive(Debug, Clone)]
pub struct ChartDescription {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Named styles in name order
    pub styles: Vec<(String, StyleEntry)>,
    pub bars: Vec<BarSeries>,
    pub surfaces: Vec<SurfaceSeries>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDescription {
    chart: Option<TomlHeader>,
    #[serde(default)]
    styles: BTreeMap<String, TomlStyle>,
    #[serde(default)]
    bars: Vec<TomlBars>,
    #[serde(default)]
    surfaces: Vec<TomlSurface>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlHeader {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlStyle {
    records: Vec<toml::Table>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlBars {
    name: Option<String>,
    lon: Vec<f64>,
    lat: Vec<f64>,
    values: Vec<f64>,
    radius: Option<f64>,
    colorbar: Option<String>,
    #[serde(default)]
    relative_to_ground: bool,
    visibility: Option<bool>,
    style: Option<String>,
    label: Option<String>,
    labels: Option<Vec<String>>,
    description: Option<String>,
    descriptions: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSurface {
    name: Option<String>,
    polygons: Vec<Vec<Vec<f64>>>,
    values: Vec<f64>,
    colorbar: Option<String>,
    border_color: Option<[u8; 3]>,
    border_width: Option<f64>,
    opacity: Option<u8>,
    border_opacity: Option<u8>,
    visibility: Option<bool>,
    label: Option<String>,
    labels: Option<Vec<String>>,
    description: Option<String>,
    descriptions: Option<Vec<String>>,
}

impl ChartDescription {
    /// Load a chart description from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ChartConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a chart description from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ChartConfigError> {
        let parsed: TomlDescription = toml::from_str(content)?;
        let (title, description) = parsed
            .chart
            .map(|h| (h.title, h.description))
            .unwrap_or_default();

        let styles = parsed
            .styles
            .into_iter()
            .map(|(name, style)| Ok((name, convert_style(style)?)))
            .collect::<Result<Vec<_>, KmlError>>()?;
        let bars = parsed
            .bars
            .into_iter()
            .map(convert_bars)
            .collect::<Result<Vec<_>, KmlError>>()?;
        let surfaces = parsed
            .surfaces
            .into_iter()
            .map(convert_surface)
            .collect::<Result<Vec<_>, KmlError>>()?;

        tracing::debug!(
            styles = styles.len(),
            bars = bars.len(),
            surfaces = surfaces.len(),
            "loaded chart description"
        );
        Ok(Self {
            title,
            description,
            styles,
            bars,
            surfaces,
        })
    }

    /// Build the chart: styles first, then bar series, then surface series
    pub fn build(&self) -> Result<Chart, KmlError> {
        let mut options = DocumentOptions::new();
        options.name = self.title.clone();
        options.description = self.description.clone();
        let mut chart = Chart::with_options(options);
        for (name, entry) in &self.styles {
            chart.add_style(name.as_str(), entry.clone());
        }
        for series in &self.bars {
            chart.add_bars(series)?;
        }
        for series in &self.surfaces {
            chart.add_surface(series)?;
        }
        Ok(chart)
    }

    /// Legend of every series, labelled with the series display name
    pub fn legends(&self) -> Result<Vec<(String, Legend)>, KmlError> {
        let mut legends = Vec::with_capacity(self.bars.len() + self.surfaces.len());
        for series in &self.bars {
            legends.push((series.display_name.clone(), series.legend()?));
        }
        for series in &self.surfaces {
            legends.push((series.display_name.clone(), series.legend()?));
        }
        Ok(legends)
    }
}

fn convert_style(style: TomlStyle) -> Result<StyleEntry, KmlError> {
    let mut records = style
        .records
        .into_iter()
        .map(convert_record)
        .collect::<Result<Vec<_>, _>>()?;
    match records.len() {
        0 => Err(KmlError::config("style has no records")),
        1 => Ok(StyleEntry::Single(records.remove(0))),
        _ => Ok(StyleEntry::List(records)),
    }
}

fn convert_record(mut table: toml::Table) -> Result<StyleRecord, KmlError> {
    let kind = match table.remove("kind") {
        Some(toml::Value::String(kind)) => kind,
        Some(other) => return Err(KmlError::type_mismatch("string for 'kind'", other.type_str())),
        None => return Err(KmlError::config("style record is missing 'kind'")),
    };
    let mut record = StyleRecord::from_kind(&kind)?;
    for (name, value) in &table {
        record.set_field(name, &field_value(name, value)?)?;
    }
    Ok(record)
}

fn field_value(name: &str, value: &toml::Value) -> Result<FieldValue, KmlError> {
    match value {
        toml::Value::String(s) => Ok(FieldValue::Text(s.clone())),
        toml::Value::Integer(i) => Ok(FieldValue::Integer(*i)),
        toml::Value::Float(f) => Ok(FieldValue::Number(*f)),
        toml::Value::Boolean(b) => Ok(FieldValue::Integer(i64::from(*b))),
        other => Err(KmlError::type_mismatch(
            format!("scalar for '{}'", name),
            other.type_str(),
        )),
    }
}

fn point_text(single: Option<String>, per_point: Option<Vec<String>>, what: &str) -> Result<PointText, KmlError> {
    match (single, per_point) {
        (Some(_), Some(_)) => Err(KmlError::config(format!(
            "both '{}' and '{}s' are given",
            what, what
        ))),
        (_, Some(texts)) => Ok(PointText::PerPoint(texts)),
        (single, None) => Ok(PointText::Same(single)),
    }
}

fn colorbar(name: Option<&str>) -> Result<ColorBar, KmlError> {
    name.map_or_else(|| Ok(ColorBar::jet()), ColorBar::by_name)
}

fn missing_as_none(values: Vec<f64>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

fn convert_bars(bars: TomlBars) -> Result<BarSeries, KmlError> {
    let mut series = BarSeries::new(bars.lon, bars.lat, missing_as_none(bars.values))
        .with_colorbar(colorbar(bars.colorbar.as_deref())?)
        .with_relative_to_ground(bars.relative_to_ground);
    series.labels = point_text(bars.label, bars.labels, "label")?;
    series.descriptions = point_text(bars.description, bars.descriptions, "description")?;
    series.radius = bars.radius;
    series.style = bars.style;
    if let Some(name) = bars.name {
        series.display_name = name;
    }
    if let Some(visibility) = bars.visibility {
        series.visibility = visibility;
    }
    Ok(series)
}

fn convert_surface(surface: TomlSurface) -> Result<SurfaceSeries, KmlError> {
    let polygons = surface
        .polygons
        .iter()
        .map(Ring::new)
        .collect::<Result<Vec<_>, _>>()?;
    let mut series = SurfaceSeries::new(polygons, missing_as_none(surface.values))
        .with_colorbar(colorbar(surface.colorbar.as_deref())?);
    series.labels = point_text(surface.label, surface.labels, "label")?;
    series.descriptions = point_text(
        surface.description,
        surface.descriptions,
        "description",
    )?;
    series.border_color = surface.border_color.map(Rgb::from);
    series.border_opacity = surface.border_opacity;
    if let Some(width) = surface.border_width {
        series.border_width = width;
    }
    if let Some(opacity) = surface.opacity {
        series.opacity = opacity;
    }
    if let Some(name) = surface.name {
        series.display_name = name;
    }
    if let Some(visibility) = surface.visibility {
        series.visibility = visibility;
    }
    Ok(series)
}
