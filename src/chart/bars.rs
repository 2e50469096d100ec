//! Three-dimensional bar series

use crate::error::KmlError;
use crate::shape::{Coordinate, NodeStyle, PlacemarkOptions, PolygonOptions, Ring, ShapeNode};
use crate::style::{PolyStyle, StyleRecord};

use super::colorbar::ColorBar;
use super::geometry::{circle, smallest_positive_gap, DEFAULT_CORNERS};
use super::legend::Legend;
use super::{length_mismatch, present, value_range, PointText};

/// Fraction of the smallest longitude gap used as the default bar radius
const AUTO_RADIUS_FACTOR: f64 = 0.8;

/// One measurement series drawn as extruded cylinders
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    /// Bar heights; `None` (or NaN) marks a missing value
    pub values: Vec<Option<f64>>,
    pub labels: PointText,
    pub descriptions: PointText,
    pub colorbar: ColorBar,
    /// Radius in longitude degrees; detected from `lon` when unset
    pub radius: Option<f64>,
    pub relative_to_ground: bool,
    pub display_name: String,
    pub visibility: bool,
    /// Named style used instead of colorbar colors
    pub style: Option<String>,
}

impl BarSeries {
    pub fn new(lon: Vec<f64>, lat: Vec<f64>, values: Vec<Option<f64>>) -> Self {
        Self {
            lon,
            lat,
            values,
            labels: PointText::default(),
            descriptions: PointText::default(),
            colorbar: ColorBar::jet(),
            radius: None,
            relative_to_ground: false,
            display_name: "MeasSeries".to_string(),
            visibility: true,
            style: None,
        }
    }

    pub fn with_labels(mut self, labels: impl Into<PointText>) -> Self {
        self.labels = labels.into();
        self
    }

    pub fn with_descriptions(mut self, descriptions: impl Into<PointText>) -> Self {
        self.descriptions = descriptions.into();
        self
    }

    pub fn with_colorbar(mut self, colorbar: ColorBar) -> Self {
        self.colorbar = colorbar;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_relative_to_ground(mut self, relative: bool) -> Self {
        self.relative_to_ground = relative;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_visibility(mut self, visibility: bool) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.style = Some(name.into());
        self
    }

    /// The radius bars are drawn with
    pub fn effective_radius(&self) -> Result<f64, KmlError> {
        match self.radius {
            Some(radius) if radius.is_finite() && radius > 0.0 => Ok(radius),
            Some(radius) => Err(KmlError::config(format!(
                "bar radius must be positive, got {}",
                radius
            ))),
            None => auto_radius(&self.lon),
        }
    }

    /// Legend for the series' value range and color bar
    pub fn legend(&self) -> Result<Legend, KmlError> {
        Legend::new(value_range(&self.values)?, self.colorbar.clone())
    }

    fn check_lengths(&self) -> Result<(), KmlError> {
        let n = self.lon.len();
        if self.lat.len() != n {
            return Err(length_mismatch("lat", self.lat.len(), n));
        }
        if self.values.len() != n {
            return Err(length_mismatch("values", self.values.len(), n));
        }
        self.labels.check_len("labels", n)?;
        self.descriptions.check_len("descriptions", n)
    }

    /// Build the series Folder: one Placemark per present value
    pub(crate) fn build_folder(&self) -> Result<ShapeNode, KmlError> {
        self.check_lengths()?;
        let radius = self.effective_radius()?;
        let range = value_range(&self.values)?;
        let altitude_mode = if self.relative_to_ground {
            "relativeToGround"
        } else {
            "absolute"
        };

        let mut folder = ShapeNode::folder(
            PlacemarkOptions::new()
                .with_name(self.display_name.as_str())
                .with_visibility(self.visibility),
        );
        let points = self.lon.iter().zip(&self.lat).zip(&self.values);
        for (i, ((&lon, &lat), &value)) in points.enumerate() {
            let Some(value) = present(value) else {
                continue;
            };
            let corners = circle(
                DEFAULT_CORNERS,
                (lon, lat),
                (radius / lat.to_radians().cos(), radius),
            );
            let ring = Ring::from_coordinates(
                corners
                    .into_iter()
                    .map(|(x, y)| Coordinate::with_altitude(x, y, value)),
            );
            let polygon = ShapeNode::polygon(
                ring,
                PolygonOptions::new()
                    .with_extrude(true)
                    .with_altitude_mode(altitude_mode)?,
            );

            let mut options = PlacemarkOptions::new().with_style(self.point_style(value, range)?);
            options.name = self.labels.at(i);
            options.description = self.descriptions.at(i);
            folder.push(ShapeNode::placemark(options).add(polygon)?)?;
        }

        tracing::debug!(
            series = %self.display_name,
            bars = folder.children().len(),
            radius,
            "built bar series"
        );
        Ok(folder)
    }

    fn point_style(&self, value: f64, range: (f64, f64)) -> Result<NodeStyle, KmlError> {
        if let Some(name) = &self.style {
            return Ok(NodeStyle::Reference(name.clone()));
        }
        let color = self.colorbar.color_for(value, range).to_kml_color(0xff);
        let poly = PolyStyle::new().with_color(&color)?.with_outline(0)?;
        Ok(StyleRecord::from(poly).into())
    }
}

/// Default radius: a fraction of the smallest positive longitude step
pub fn auto_radius(lon: &[f64]) -> Result<f64, KmlError> {
    smallest_positive_gap(lon)
        .map(|gap| AUTO_RADIUS_FACTOR * gap)
        .ok_or_else(|| {
            KmlError::config("radius cannot be determined from longitudes; specify one")
        })
}
