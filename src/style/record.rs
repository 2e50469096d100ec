//! Style records: validated, fixed-schema appearance descriptors
//!
//! Each record keeps its fields private so that every mutation goes through a
//! setter that re-runs the field's validator. Fields are rendered in the
//! order returned by `fields()`, skipping unset ones.

use crate::error::KmlError;

use super::validate;

/// A dynamically typed field value, used when records are built from
/// external descriptions rather than typed setters
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Number(_) => "number",
        }
    }

    fn as_text(&self, field: &str) -> Result<&str, KmlError> {
        match self {
            FieldValue::Text(s) => Ok(s),
            other => Err(KmlError::type_mismatch(
                format!("string for '{}'", field),
                other.type_name(),
            )),
        }
    }

    fn as_integer(&self, field: &str) -> Result<i64, KmlError> {
        match self {
            FieldValue::Integer(i) => Ok(*i),
            other => Err(KmlError::type_mismatch(
                format!("integer for '{}'", field),
                other.type_name(),
            )),
        }
    }

    fn as_number(&self, field: &str) -> Result<f64, KmlError> {
        match self {
            FieldValue::Integer(i) => Ok(*i as f64),
            FieldValue::Number(n) => Ok(*n),
            other => Err(KmlError::type_mismatch(
                format!("number for '{}'", field),
                other.type_name(),
            )),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

fn unknown_field(record: &str, field: &str) -> KmlError {
    KmlError::config(format!("{} has no field '{}'", record, field))
}

/// Fill appearance of polygons
#[derive(Debug, Clone, PartialEq)]
pub struct PolyStyle {
    color: Option<String>,
    color_mode: Option<String>,
    fill: Option<u8>,
    outline: Option<u8>,
}

impl Default for PolyStyle {
    fn default() -> Self {
        Self {
            color: None,
            color_mode: Some("normal".to_string()),
            fill: Some(1),
            outline: Some(1),
        }
    }
}

impl PolyStyle {
    pub const TAG: &'static str = "PolyStyle";

    /// Create a record with KML defaults (normal color mode, filled, outlined)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn color_mode(&self) -> Option<&str> {
        self.color_mode.as_deref()
    }

    pub fn fill(&self) -> Option<u8> {
        self.fill
    }

    pub fn outline(&self) -> Option<u8> {
        self.outline
    }

    pub fn set_color(&mut self, color: &str) -> Result<&mut Self, KmlError> {
        self.color = Some(validate::color("color", color)?);
        Ok(self)
    }

    pub fn set_color_mode(&mut self, mode: &str) -> Result<&mut Self, KmlError> {
        self.color_mode = Some(validate::choice("colorMode", mode, validate::COLOR_MODES)?);
        Ok(self)
    }

    pub fn set_fill(&mut self, fill: i64) -> Result<&mut Self, KmlError> {
        self.fill = Some(validate::num_boolean("fill", fill)?);
        Ok(self)
    }

    pub fn set_outline(&mut self, outline: i64) -> Result<&mut Self, KmlError> {
        self.outline = Some(validate::num_boolean("outline", outline)?);
        Ok(self)
    }

    pub fn with_color(mut self, color: &str) -> Result<Self, KmlError> {
        self.set_color(color)?;
        Ok(self)
    }

    pub fn with_color_mode(mut self, mode: &str) -> Result<Self, KmlError> {
        self.set_color_mode(mode)?;
        Ok(self)
    }

    pub fn with_fill(mut self, fill: i64) -> Result<Self, KmlError> {
        self.set_fill(fill)?;
        Ok(self)
    }

    pub fn with_outline(mut self, outline: i64) -> Result<Self, KmlError> {
        self.set_outline(outline)?;
        Ok(self)
    }

    /// Set a field by its KML element name
    pub fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<(), KmlError> {
        match name {
            "color" => self.set_color(value.as_text(name)?)?,
            "colorMode" => self.set_color_mode(value.as_text(name)?)?,
            "fill" => self.set_fill(value.as_integer(name)?)?,
            "outline" => self.set_outline(value.as_integer(name)?)?,
            _ => return Err(unknown_field(Self::TAG, name)),
        };
        Ok(())
    }

    /// Field values in declared order
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("color", self.color.clone()),
            ("colorMode", self.color_mode.clone()),
            ("fill", self.fill.map(|v| v.to_string())),
            ("outline", self.outline.map(|v| v.to_string())),
        ]
    }
}

/// Line appearance, including the `gx:` extensions
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    color: Option<String>,
    color_mode: Option<String>,
    width: Option<f64>,
    outer_color: Option<String>,
    outer_width: Option<f64>,
    physical_width: Option<f64>,
    label_visibility: Option<u8>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            color_mode: Some("normal".to_string()),
            width: Some(1.0),
            outer_color: None,
            outer_width: None,
            physical_width: None,
            label_visibility: None,
        }
    }
}

impl LineStyle {
    pub const TAG: &'static str = "LineStyle";

    /// Create a record with KML defaults (normal color mode, width 1)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn set_color(&mut self, color: &str) -> Result<&mut Self, KmlError> {
        self.color = Some(validate::color("color", color)?);
        Ok(self)
    }

    pub fn set_color_mode(&mut self, mode: &str) -> Result<&mut Self, KmlError> {
        self.color_mode = Some(validate::choice("colorMode", mode, validate::COLOR_MODES)?);
        Ok(self)
    }

    pub fn set_width(&mut self, width: f64) -> Result<&mut Self, KmlError> {
        self.width = Some(validate::non_negative("width", width)?);
        Ok(self)
    }

    pub fn set_outer_color(&mut self, color: &str) -> Result<&mut Self, KmlError> {
        self.outer_color = Some(validate::color("gx:outerColor", color)?);
        Ok(self)
    }

    pub fn set_outer_width(&mut self, width: f64) -> Result<&mut Self, KmlError> {
        self.outer_width = Some(validate::non_negative("gx:outerWidth", width)?);
        Ok(self)
    }

    pub fn set_physical_width(&mut self, width: f64) -> Result<&mut Self, KmlError> {
        self.physical_width = Some(validate::non_negative("gx:physicalWidth", width)?);
        Ok(self)
    }

    pub fn set_label_visibility(&mut self, visible: i64) -> Result<&mut Self, KmlError> {
        self.label_visibility = Some(validate::num_boolean("gx:labelVisibility", visible)?);
        Ok(self)
    }

    pub fn with_color(mut self, color: &str) -> Result<Self, KmlError> {
        self.set_color(color)?;
        Ok(self)
    }

    pub fn with_width(mut self, width: f64) -> Result<Self, KmlError> {
        self.set_width(width)?;
        Ok(self)
    }

    pub fn with_outer_color(mut self, color: &str) -> Result<Self, KmlError> {
        self.set_outer_color(color)?;
        Ok(self)
    }

    pub fn with_label_visibility(mut self, visible: i64) -> Result<Self, KmlError> {
        self.set_label_visibility(visible)?;
        Ok(self)
    }

    /// Set a field by its KML element name
    pub fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<(), KmlError> {
        match name {
            "color" => self.set_color(value.as_text(name)?)?,
            "colorMode" => self.set_color_mode(value.as_text(name)?)?,
            "width" => self.set_width(value.as_number(name)?)?,
            "gx:outerColor" => self.set_outer_color(value.as_text(name)?)?,
            "gx:outerWidth" => self.set_outer_width(value.as_number(name)?)?,
            "gx:physicalWidth" => self.set_physical_width(value.as_number(name)?)?,
            "gx:labelVisibility" => self.set_label_visibility(value.as_integer(name)?)?,
            _ => return Err(unknown_field(Self::TAG, name)),
        };
        Ok(())
    }

    /// Field values in declared order
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("color", self.color.clone()),
            ("colorMode", self.color_mode.clone()),
            ("width", self.width.map(|v| v.to_string())),
            ("gx:outerColor", self.outer_color.clone()),
            ("gx:outerWidth", self.outer_width.map(|v| v.to_string())),
            ("gx:physicalWidth", self.physical_width.map(|v| v.to_string())),
            ("gx:labelVisibility", self.label_visibility.map(|v| v.to_string())),
        ]
    }
}

/// Appearance of the description balloon
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalloonStyle {
    bg_color: Option<String>,
    text_color: Option<String>,
    text: Option<String>,
    display_mode: Option<String>,
}

impl BalloonStyle {
    pub const TAG: &'static str = "BalloonStyle";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_bg_color(&mut self, color: &str) -> Result<&mut Self, KmlError> {
        self.bg_color = Some(validate::color("bgColor", color)?);
        Ok(self)
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<&mut Self, KmlError> {
        self.text_color = Some(validate::color("textColor", color)?);
        Ok(self)
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<&mut Self, KmlError> {
        self.text = Some(text.into());
        Ok(self)
    }

    pub fn set_display_mode(&mut self, mode: &str) -> Result<&mut Self, KmlError> {
        self.display_mode = Some(validate::choice(
            "displayMode",
            mode,
            validate::DISPLAY_MODES,
        )?);
        Ok(self)
    }

    pub fn with_bg_color(mut self, color: &str) -> Result<Self, KmlError> {
        self.set_bg_color(color)?;
        Ok(self)
    }

    pub fn with_text_color(mut self, color: &str) -> Result<Self, KmlError> {
        self.set_text_color(color)?;
        Ok(self)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Result<Self, KmlError> {
        self.set_text(text)?;
        Ok(self)
    }

    pub fn with_display_mode(mut self, mode: &str) -> Result<Self, KmlError> {
        self.set_display_mode(mode)?;
        Ok(self)
    }

    /// Set a field by its KML element name
    pub fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<(), KmlError> {
        match name {
            "bgColor" => self.set_bg_color(value.as_text(name)?)?,
            "textColor" => self.set_text_color(value.as_text(name)?)?,
            "text" => self.set_text(value.as_text(name)?)?,
            "displayMode" => self.set_display_mode(value.as_text(name)?)?,
            _ => return Err(unknown_field(Self::TAG, name)),
        };
        Ok(())
    }

    /// Field values in declared order
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("bgColor", self.bg_color.clone()),
            ("textColor", self.text_color.clone()),
            ("text", self.text.clone()),
            ("displayMode", self.display_mode.clone()),
        ]
    }
}

/// One of the supported style record variants
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRecord {
    Line(LineStyle),
    Poly(PolyStyle),
    Balloon(BalloonStyle),
}

impl StyleRecord {
    /// Create a default record from its KML element name
    ///
    /// Fails with a configuration error for names outside the supported set.
    pub fn from_kind(kind: &str) -> Result<Self, KmlError> {
        match kind {
            LineStyle::TAG => Ok(StyleRecord::Line(LineStyle::new())),
            PolyStyle::TAG => Ok(StyleRecord::Poly(PolyStyle::new())),
            BalloonStyle::TAG => Ok(StyleRecord::Balloon(BalloonStyle::new())),
            other => Err(KmlError::config(format!(
                "invalid style kind '{}' (expected LineStyle, PolyStyle or BalloonStyle)",
                other
            ))),
        }
    }

    /// KML element name of this record
    pub fn tag(&self) -> &'static str {
        match self {
            StyleRecord::Line(_) => LineStyle::TAG,
            StyleRecord::Poly(_) => PolyStyle::TAG,
            StyleRecord::Balloon(_) => BalloonStyle::TAG,
        }
    }

    /// Field values in the record's declared order
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        match self {
            StyleRecord::Line(s) => s.fields(),
            StyleRecord::Poly(s) => s.fields(),
            StyleRecord::Balloon(s) => s.fields(),
        }
    }

    /// Set a field by its KML element name, re-running its validator
    pub fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<(), KmlError> {
        match self {
            StyleRecord::Line(s) => s.set_field(name, value),
            StyleRecord::Poly(s) => s.set_field(name, value),
            StyleRecord::Balloon(s) => s.set_field(name, value),
        }
    }
}

impl From<LineStyle> for StyleRecord {
    fn from(style: LineStyle) -> Self {
        StyleRecord::Line(style)
    }
}

impl From<PolyStyle> for StyleRecord {
    fn from(style: PolyStyle) -> Self {
        StyleRecord::Poly(style)
    }
}

impl From<BalloonStyle> for StyleRecord {
    fn from(style: BalloonStyle) -> Self {
        StyleRecord::Balloon(style)
    }
}
