//! Surface series: colored polygons on the ground

use crate::error::KmlError;
use crate::shape::{NodeStyle, PlacemarkOptions, PolygonOptions, Ring, ShapeNode};
use crate::style::{LineStyle, PolyStyle, StyleRecord};

use super::colorbar::{ColorBar, Rgb};
use super::legend::Legend;
use super::{length_mismatch, present, value_range, PointText};

/// One measurement series drawn as filled polygons
#[derive(Debug, Clone)]
pub struct SurfaceSeries {
    pub polygons: Vec<Ring>,
    pub values: Vec<Option<f64>>,
    pub labels: PointText,
    pub descriptions: PointText,
    pub colorbar: ColorBar,
    /// Outline color; polygons are drawn without outline when unset
    pub border_color: Option<Rgb>,
    pub border_width: f64,
    pub opacity: u8,
    /// Defaults to `opacity`
    pub border_opacity: Option<u8>,
    pub display_name: String,
    pub visibility: bool,
}

impl SurfaceSeries {
    pub fn new(polygons: Vec<Ring>, values: Vec<Option<f64>>) -> Self {
        Self {
            polygons,
            values,
            labels: PointText::default(),
            descriptions: PointText::default(),
            colorbar: ColorBar::jet(),
            border_color: None,
            border_width: 1.0,
            opacity: 0xff,
            border_opacity: None,
            display_name: "MeasSeries".to_string(),
            visibility: true,
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

    pub fn with_border(mut self, color: Rgb, width: f64) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_border_opacity(mut self, opacity: u8) -> Self {
        self.border_opacity = Some(opacity);
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

    pub fn legend(&self) -> Result<Legend, KmlError> {
        Legend::new(value_range(&self.values)?, self.colorbar.clone())
    }

    pub(crate) fn build_folder(&self) -> Result<ShapeNode, KmlError> {
        let n = self.polygons.len();
        if self.values.len() != n {
            return Err(length_mismatch("values", self.values.len(), n));
        }
        self.labels.check_len("labels", n)?;
        self.descriptions.check_len("descriptions", n)?;
        let range = value_range(&self.values)?;

        let mut folder = ShapeNode::folder(
            PlacemarkOptions::new()
                .with_name(self.display_name.as_str())
                .with_visibility(self.visibility),
        );
        for (i, (ring, &value)) in self.polygons.iter().zip(&self.values).enumerate() {
            let Some(value) = present(value) else {
                continue;
            };
            let mut options = PlacemarkOptions::new().with_style(self.point_style(value, range)?);
            options.name = self.labels.at(i);
            options.description = self.descriptions.at(i);
            let polygon = ShapeNode::polygon(ring.clone(), PolygonOptions::new());
            folder.push(ShapeNode::placemark(options).add(polygon)?)?;
        }

        tracing::debug!(
            series = %self.display_name,
            polygons = folder.children().len(),
            "built surface series"
        );
        Ok(folder)
    }

    fn point_style(&self, value: f64, range: (f64, f64)) -> Result<NodeStyle, KmlError> {
        let fill = self.colorbar.color_for(value, range).to_kml_color(self.opacity);
        let outline = i64::from(self.border_color.is_some());
        let mut records = vec![StyleRecord::from(
            PolyStyle::new().with_color(&fill)?.with_outline(outline)?,
        )];
        if let Some(border) = self.border_color {
            let alpha = self.border_opacity.unwrap_or(self.opacity);
            let line = LineStyle::new()
                .with_color(&border.to_kml_color(alpha))?
                .with_width(self.border_width)?;
            records.push(line.into());
        }
        Ok(records.into())
    }
}
