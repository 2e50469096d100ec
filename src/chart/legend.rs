//! Tick placement for color-scale legends

use crate::error::KmlError;

use super::colorbar::ColorBar;

/// A labelled tick on the legend axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// A color-scale legend: value range, color bar and tick marks
#[derive(Debug, Clone)]
pub struct Legend {
    range: (f64, f64),
    colorbar: ColorBar,
    ticks: Vec<Tick>,
}

impl Legend {
    /// Create a legend for the value axis `range` (in either order)
    ///
    /// Fails when the range is empty or not finite.
    pub fn new(range: (f64, f64), colorbar: ColorBar) -> Result<Self, KmlError> {
        let range = (range.0.min(range.1), range.0.max(range.1));
        let ticks = generate_ticks(range)?;
        Ok(Self {
            range,
            colorbar,
            ticks,
        })
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn colorbar(&self) -> &ColorBar {
        &self.colorbar
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Position of `value` along the axis, 0 at the minimum and 1 at the
    /// maximum
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.range.0) / (self.range.1 - self.range.0)
    }
}

/// Ticks at multiples of a power-of-ten step chosen so that the range holds
/// roughly 2 to 20 of them
fn generate_ticks((min, max): (f64, f64)) -> Result<Vec<Tick>, KmlError> {
    let spread = max - min;
    if !spread.is_finite() || spread <= 0.0 {
        return Err(KmlError::config(format!(
            "legend range ({}, {}) is empty",
            min, max
        )));
    }
    let exponent = (spread.log10() - 2f64.log10()).floor() as i32;
    let step = 10f64.powi(exponent);
    if !step.is_normal() {
        return Err(KmlError::config(format!(
            "legend range ({}, {}) is too narrow for a tick step",
            min, max
        )));
    }
    let decimals = exponent.min(0).unsigned_abs() as usize;

    let lowest = (min / step).ceil() as i64;
    let highest = (max / step).floor() as i64;
    Ok((lowest..=highest)
        .map(|k| {
            let value = k as f64 * step;
            Tick {
                value,
                label: format!("{:.*}", decimals, value),
            }
        })
        .collect())
}
