//! Cell address type

use std::fmt;
use std::str::FromStr;

use super::LatLon;
use crate::error::{Error, Result};
use crate::ADDRESS_PRECISION;

/// A cell address (e.g., "1.2689_103.8216")
///
/// The address is the lower-left corner of a lattice cell, formatted as
/// `{lat}_{lon}` with both components rounded to four decimal places. Two
/// coordinates share an address iff they fall in the same lattice cell, so
/// the address is the identity used for every state lookup and for snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CellAddress {
    key: String,
}

impl CellAddress {
    /// Create the address of a cell from its lower-left corner
    pub fn from_corner(lat: f64, lon: f64) -> Self {
        Self {
            key: format!(
                "{:.prec$}_{:.prec$}",
                lat,
                lon,
                prec = ADDRESS_PRECISION
            ),
        }
    }

    /// Parse an address from its `lat_lon` text form
    ///
    /// The components are re-formatted, so `"1.26890_103.8216"` and
    /// `"1.2689_103.8216"` parse to the same address.
    ///
    /// # Examples
    /// ```
    /// use gridmark_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("1.2689_103.8216").unwrap();
    /// assert_eq!(addr.as_str(), "1.2689_103.8216");
    /// assert_eq!(addr.corner().lat, 1.2689);
    ///
    /// assert!(CellAddress::parse("1.2689").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let (lat, lon) = split_key(s)
            .ok_or_else(|| Error::InvalidAddress(format!("expected 'lat_lon', got '{}'", s)))?;

        if !lat.is_finite() || !lon.is_finite() {
            return Err(Error::InvalidAddress(format!(
                "non-finite coordinate in '{}'",
                s
            )));
        }

        Ok(Self::from_corner(lat, lon))
    }

    /// The canonical text form
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The lower-left corner, at address precision
    pub fn corner(&self) -> LatLon {
        // keys are only built by `from_corner`, so they always split
        split_key(&self.key)
            .map(|(lat, lon)| LatLon::new(lat, lon))
            .unwrap_or_default()
    }
}

fn split_key(s: &str) -> Option<(f64, f64)> {
    let (lat, lon) = s.split_once('_')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellAddress {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CellAddress> for String {
    fn from(addr: CellAddress) -> Self {
        addr.key
    }
}

impl AsRef<str> for CellAddress {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corner_rounds_to_four_places() {
        assert_eq!(
            CellAddress::from_corner(1.268918918918919, 103.82162162162163).as_str(),
            "1.2689_103.8216"
        );
        assert_eq!(CellAddress::from_corner(1.15, 103.6).as_str(), "1.1500_103.6000");
    }

    #[test]
    fn test_parse() {
        let addr = CellAddress::parse("1.2689_103.8216").unwrap();
        assert_eq!(addr.to_string(), "1.2689_103.8216");

        // Canonicalised
        let addr = CellAddress::parse(" 1.15_103.6 ").unwrap();
        assert_eq!(addr.as_str(), "1.1500_103.6000");

        let addr: CellAddress = "-0.5000_-70.2500".parse().unwrap();
        assert_eq!(addr.corner(), LatLon::new(-0.5, -70.25));
    }

    #[test]
    fn test_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("1.2689").is_err());
        assert!(CellAddress::parse("1.2689-103.8216").is_err());
        assert!(CellAddress::parse("abc_103.8216").is_err());
        assert!(CellAddress::parse("1.2689_").is_err());
        assert!(CellAddress::parse("NaN_103.8216").is_err());
        assert!(CellAddress::parse("inf_103.8216").is_err());
    }

    #[test]
    fn test_ordering_follows_text() {
        let mut addrs = vec![
            CellAddress::parse("1.2743_103.8000").unwrap(),
            CellAddress::parse("1.2689_103.8216").unwrap(),
            CellAddress::parse("1.2689_103.8000").unwrap(),
        ];
        addrs.sort();
        let keys: Vec<_> = addrs.iter().map(|a| a.as_str()).collect();
        assert_eq!(
            keys,
            vec!["1.2689_103.8000", "1.2689_103.8216", "1.2743_103.8000"]
        );
    }
}
