//! Coordinate rings used as polygon boundaries

use std::fmt;

use crate::error::KmlError;

/// A longitude/latitude pair with optional altitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            alt: None,
        }
    }

    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> Self {
        Self {
            lon,
            lat,
            alt: Some(alt),
        }
    }

    /// Build a coordinate from a 2- or 3-component tuple
    pub fn from_slice(components: &[f64]) -> Result<Self, KmlError> {
        match *components {
            [lon, lat] => Ok(Self::new(lon, lat)),
            [lon, lat, alt] => Ok(Self::with_altitude(lon, lat, alt)),
            _ => Err(KmlError::format(components)),
        }
    }
}

/// Formats as `lon,lat[,alt]` using the shortest exact representation
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)?;
        if let Some(alt) = self.alt {
            write!(f, ",{}", alt)?;
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((lon, lat, alt): (f64, f64, f64)) -> Self {
        Self::with_altitude(lon, lat, alt)
    }
}

/// An ordered boundary (KML `LinearRing`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    coordinates: Vec<Coordinate>,
}

impl Ring {
    pub const TAG: &'static str = "LinearRing";

    /// Build a ring from coordinate tuples, each with 2 or 3 components
    ///
    /// ```rust
    /// use kml_chart::Ring;
    ///
    /// let ring = Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap();
    /// assert_eq!(ring.coordinates_text(), "0,0 1,0 1,1 0,0");
    /// assert!(Ring::new([vec![1.0]]).is_err());
    /// ```
    pub fn new<I, T>(tuples: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[f64]>,
    {
        let coordinates = tuples
            .into_iter()
            .map(|t| Coordinate::from_slice(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { coordinates })
    }

    /// Build a ring from already typed coordinates
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = impl Into<Coordinate>>) -> Self {
        Self {
            coordinates: coordinates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Text of the `coordinates` element: tuples separated by spaces
    pub fn coordinates_text(&self) -> String {
        self.coordinates
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_dimensions_preserved() {
        let ring = Ring::new(vec![vec![1.0, 1.0], vec![2.0, 2.0, 2.0], vec![3.0, 3.0]]).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.coordinates()[1], Coordinate::with_altitude(2.0, 2.0, 2.0));
        assert_eq!(ring.coordinates_text(), "1,1 2,2,2 3,3");
    }

    #[test]
    fn test_rejects_bad_tuple_lengths() {
        for bad in [vec![], vec![1.0], vec![1.0, 2.0, 3.0, 4.0]] {
            let err = Ring::new(vec![vec![0.0, 0.0], bad.clone()]).unwrap_err();
            assert!(
                matches!(err, KmlError::Format { len, .. } if len == bad.len()),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_full_precision_formatting() {
        let ring = Ring::new([[10.123456789, 51.0000001, 1500.25]]).unwrap();
        assert_eq!(ring.coordinates_text(), "10.123456789,51.0000001,1500.25");
    }

    #[test]
    fn test_from_coordinates() {
        let ring = Ring::from_coordinates([(0.5, -0.5), (1.0, 2.0)]);
        assert_eq!(ring.coordinates_text(), "0.5,-0.5 1,2");
    }
}
