//! Color bars mapping scalar values to colors

use crate::error::KmlError;

/// Number of entries the built-in color bars are inflated to
pub const DEFAULT_COLORBAR_SIZE: usize = 64;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// KML color string with the given alpha
    ///
    /// KML orders channels alpha, blue, green, red.
    pub fn to_kml_color(self, alpha: u8) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", alpha, self.b, self.g, self.r)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

const JET_ANCHORS: [Rgb; 9] = [
    Rgb::new(0x00, 0x00, 0x80),
    Rgb::new(0x00, 0x00, 0xff),
    Rgb::new(0x00, 0x80, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0x80, 0xff, 0x80),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0xff, 0x80, 0x00),
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x80, 0x00, 0x00),
];

const JET2_ANCHORS: [Rgb; 11] = [
    Rgb::new(0x00, 0x00, 0x80),
    Rgb::new(0x00, 0x00, 0xff),
    Rgb::new(0x00, 0x80, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0x00, 0xff, 0x80),
    Rgb::new(0x00, 0xff, 0x00),
    Rgb::new(0x80, 0xff, 0x00),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0xff, 0x80, 0x00),
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x80, 0x00, 0x00),
];

/// An ordered, non-empty sequence of colors
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    colors: Vec<Rgb>,
}

impl ColorBar {
    /// Create a color bar; fails when `colors` is empty
    pub fn new(colors: Vec<Rgb>) -> Result<Self, KmlError> {
        if colors.is_empty() {
            return Err(KmlError::config("a color bar needs at least one color"));
        }
        Ok(Self { colors })
    }

    /// Blue to red through cyan and yellow
    pub fn jet() -> Self {
        Self {
            colors: JET_ANCHORS.to_vec(),
        }
        .inflate(DEFAULT_COLORBAR_SIZE)
    }

    /// Like [`ColorBar::jet`] with a longer green section
    pub fn jet2() -> Self {
        Self {
            colors: JET2_ANCHORS.to_vec(),
        }
        .inflate(DEFAULT_COLORBAR_SIZE)
    }

    /// Look up a built-in color bar by name
    pub fn by_name(name: &str) -> Result<Self, KmlError> {
        match name {
            "jet" => Ok(Self::jet()),
            "jet2" => Ok(Self::jet2()),
            other => Err(KmlError::config(format!(
                "unknown color bar '{}' (expected jet or jet2)",
                other
            ))),
        }
    }

    /// Linearly interpolate to `size` entries; never shrinks
    ///
    /// Interpolated channels are truncated to integers.
    pub fn inflate(&self, size: usize) -> Self {
        if self.colors.len() >= size {
            return self.clone();
        }
        let last = self.colors.len() - 1;
        let step = last as f64 / (size - 1) as f64;
        let colors = (0..size)
            .map(|i| {
                let position = step * i as f64;
                let index = (position as usize).min(last);
                let fraction = position - index as f64;
                if fraction < 1e-5 || index == last {
                    self.colors[index]
                } else {
                    let a = self.colors[index];
                    let b = self.colors[index + 1];
                    let mix = |x: u8, y: u8| (x as f64 * (1.0 - fraction) + y as f64 * fraction) as u8;
                    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
                }
            })
            .collect();
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a normalized position, where 0 is the first entry and 1 is
    /// one past the last; out-of-range positions clamp
    pub fn lookup(&self, normalized: f64) -> Rgb {
        let len = self.colors.len();
        let index = (len as f64 * normalized) as i64;
        let index = index.clamp(0, len as i64 - 1) as usize;
        self.colors[index]
    }

    /// Color for `value` on the axis `range`, in either order
    ///
    /// A degenerate axis maps every value to the first color.
    pub fn color_for(&self, value: f64, range: (f64, f64)) -> Rgb {
        let (min, max) = (range.0.min(range.1), range.0.max(range.1));
        if max > min {
            self.lookup((value - min) / (max - min))
        } else {
            self.colors[0]
        }
    }
}

impl Default for ColorBar {
    fn default() -> Self {
        Self::jet()
    }
}
