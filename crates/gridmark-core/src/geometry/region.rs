//! Bounding region and coordinate types

use std::fmt;

use crate::error::{Error, Result};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl LatLon {
    /// Create a new coordinate pair
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// The fixed outer bounding box of the area being gridded
///
/// A region must satisfy `min_lat < max_lat` and `min_lon < max_lon`.
/// Use [`Region::new`] to construct a checked region; regions built from
/// struct literals or deserialized are checked again by [`Region::validate`]
/// before a [`Grid`](crate::Grid) accepts them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Southern edge
    pub min_lat: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl Region {
    /// Approximate bounds of Singapore
    pub const SINGAPORE: Region = Region {
        min_lat: 1.15,
        max_lat: 1.47,
        min_lon: 103.6,
        max_lon: 104.0,
    };

    /// Create a new region, checking its bounds
    ///
    /// # Examples
    /// ```
    /// use gridmark_core::Region;
    ///
    /// let region = Region::new(1.15, 1.47, 103.6, 104.0).unwrap();
    /// assert!(region.contains(1.3521, 103.8198));
    ///
    /// assert!(Region::new(1.47, 1.15, 103.6, 104.0).is_err());
    /// ```
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        let region = Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        };
        region.validate()?;
        Ok(region)
    }

    /// Check the region invariants
    pub fn validate(&self) -> Result<()> {
        let values = [self.min_lat, self.max_lat, self.min_lon, self.max_lon];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "region bounds must be finite: {}",
                self
            )));
        }
        if self.min_lat >= self.max_lat {
            return Err(Error::invalid_argument(format!(
                "min_lat {} must be less than max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lon >= self.max_lon {
            return Err(Error::invalid_argument(format!(
                "min_lon {} must be less than max_lon {}",
                self.min_lon, self.max_lon
            )));
        }
        Ok(())
    }

    /// Check if a coordinate lies inside the region (edges included)
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Check if a coordinate pair lies inside the region
    pub fn contains_point(&self, point: LatLon) -> bool {
        self.contains(point.lat, point.lon)
    }

    /// Latitude extent in degrees
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Center of the region
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::SINGAPORE
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}
