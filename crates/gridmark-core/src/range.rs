//! Range type for resolving corner pairs into cell sets

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::{CellAddress, Grid, LatLon, Region};

/// An axis-aligned rectangle defined by two arbitrary corners
///
/// The corners are normalised on construction, so the order in which they
/// are given does not matter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoRange {
    /// South-west corner (minimum latitude and longitude)
    pub start: LatLon,
    /// North-east corner (maximum latitude and longitude)
    pub end: LatLon,
}

impl GeoRange {
    /// Create a range from any two corners, rejecting non-finite components
    ///
    /// `f64::min`/`f64::max` drop a NaN operand, so the corners are checked
    /// before they are normalised.
    pub fn try_new(a: LatLon, b: LatLon) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(Error::invalid_argument(format!(
                "range corners must be finite: {} to {}",
                a, b
            )));
        }
        Ok(Self::new(a, b))
    }

    /// Create a new range from any two corners
    ///
    /// Use [`GeoRange::try_new`] for unchecked input.
    pub fn new(a: LatLon, b: LatLon) -> Self {
        Self {
            start: LatLon::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            end: LatLon::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Create a single-point range
    pub fn single(point: LatLon) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Check if a coordinate is within this range (edges included)
    pub fn contains(&self, point: LatLon) -> bool {
        point.lat >= self.start.lat
            && point.lat <= self.end.lat
            && point.lon >= self.start.lon
            && point.lon <= self.end.lon
    }

    /// Number of latitude and longitude samples taken at `step`
    pub fn sample_counts(&self, step: f64) -> (usize, usize) {
        (
            samples(self.start.lat, self.end.lat, step),
            samples(self.start.lon, self.end.lon, step),
        )
    }

    /// Resolve the range into the addresses of the cells it covers
    ///
    /// Latitude and longitude are sampled from the south-west corner up to
    /// and including the north-east corner in steps of one cell. The `k`-th
    /// sample lies `k` cells past the corner's cell, so samples are taken by
    /// lattice index rather than by adding steps to the coordinate. A
    /// trailing edge that reaches into a cell by less than one step past the
    /// last sample is not sampled, so that cell may be left out.
    pub fn resolve(&self, grid: &Grid) -> Result<BTreeSet<CellAddress>> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(Error::invalid_argument(format!(
                "range corners must be finite: {} to {}",
                self.start, self.end
            )));
        }

        let step = grid.step();
        let (lat_samples, lon_samples) = self.sample_counts(step);

        let (row, col) = grid.index_of(self.start.lat, self.start.lon);

        let mut addresses = BTreeSet::new();
        for i in 0..lat_samples as i64 {
            for j in 0..lon_samples as i64 {
                addresses.insert(grid.cell_at_index(row + i, col + j).address);
            }
        }

        log::debug!(
            "range {} sampled {}x{} points into {} cells",
            self,
            lat_samples,
            lon_samples,
            addresses.len()
        );
        Ok(addresses)
    }
}

/// Count of points `min + k * step` with `k >= 0` that do not exceed `max`
///
/// A span that is a whole number of steps counts its far end even when the
/// sum lands an ulp past `max`.
fn samples(min: f64, max: f64, step: f64) -> usize {
    let limit = max + step * SAMPLE_TOLERANCE;
    let mut count = 0usize;
    while min + count as f64 * step <= limit {
        count += 1;
    }
    count.max(1)
}

/// Fraction of a step by which a sample may overshoot the far corner
const SAMPLE_TOLERANCE: f64 = 1e-9;

impl fmt::Display for GeoRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Resolve two corners into the set of cell addresses they cover
///
/// # Examples
/// ```
/// use gridmark_core::{resolve_range, LatLon, Region};
///
/// let a = LatLon::new(1.3521, 103.8198);
/// let cells = resolve_range(a, a, Region::SINGAPORE, 0.6).unwrap();
/// assert_eq!(cells.len(), 1);
///
/// assert!(resolve_range(a, a, Region::SINGAPORE, 0.0).is_err());
/// ```
pub fn resolve_range(
    a: LatLon,
    b: LatLon,
    region: Region,
    cell_size_km: f64,
) -> Result<BTreeSet<CellAddress>> {
    let grid = Grid::new(region, cell_size_km)?;
    GeoRange::try_new(a, b)?.resolve(&grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn singapore() -> Grid {
        Grid::new(Region::SINGAPORE, 0.6).unwrap()
    }

    #[test]
    fn test_range_normalises_corners() {
        let range = GeoRange::new(LatLon::new(1.36, 103.81), LatLon::new(1.35, 103.83));
        assert_eq!(range.start, LatLon::new(1.35, 103.81));
        assert_eq!(range.end, LatLon::new(1.36, 103.83));

        assert!(range.contains(LatLon::new(1.355, 103.82)));
        assert!(!range.contains(LatLon::new(1.37, 103.82)));
    }

    #[test]
    fn test_degenerate_range_is_one_cell() {
        let grid = singapore();
        let point = LatLon::new(1.3521, 103.8198);

        let cells = GeoRange::single(point).resolve(&grid).unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&grid.address_of(point.lat, point.lon)));
    }

    #[test]
    fn test_scenario_range_lies_on_lattice() {
        let grid = singapore();
        let cells = grid
            .resolve_range(LatLon::new(1.3521, 103.8198), LatLon::new(1.3621, 103.8298))
            .unwrap();

        assert!(!cells.is_empty());
        // Two samples per axis
        assert_eq!(cells.len(), 4);

        let lattice: BTreeSet<CellAddress> = grid.cells().map(|c| c.address).collect();
        assert!(cells.iter().all(|addr| lattice.contains(addr)));
    }

    #[test]
    fn test_inclusive_far_edge() {
        // Exactly two steps on each axis gives three samples
        let grid = Grid::new(Region::new(0.0, 10.0, 0.0, 10.0).unwrap(), 111.0).unwrap();
        let range = GeoRange::new(LatLon::new(1.5, 1.5), LatLon::new(3.5, 3.5));

        assert_eq!(range.sample_counts(grid.step()), (3, 3));
        assert_eq!(range.resolve(&grid).unwrap().len(), 9);
    }

    #[test]
    fn test_degenerate_range_on_every_corner() {
        let grid = singapore();
        for cell in grid.cells() {
            let cells = GeoRange::single(cell.lower_left).resolve(&grid).unwrap();
            assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![cell.address]);
        }
    }

    #[test]
    fn test_corners_on_lattice_lines() {
        let grid = singapore();
        let a = grid.corner_at(10, 20);
        let b = grid.corner_at(12, 23);

        let cells = grid.resolve_range(b, a).unwrap();
        let expected: BTreeSet<CellAddress> = (10..=12)
            .flat_map(|row| (20..=23).map(move |col| (row, col)))
            .map(|(row, col)| grid.cell_at_index(row, col).address)
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let a = LatLon::new(1.3, 103.8);
        let b = LatLon::new(1.31, 103.81);

        assert!(resolve_range(a, b, Region::SINGAPORE, 0.0).is_err());
        assert!(resolve_range(a, b, Region::SINGAPORE, -2.0).is_err());
        let nan = LatLon::new(f64::NAN, 103.8);
        assert!(resolve_range(a, nan, Region::SINGAPORE, 0.6).is_err());
        assert!(resolve_range(nan, a, Region::SINGAPORE, 0.6).is_err());
        assert!(singapore().resolve_range(a, LatLon::new(1.3, f64::NAN)).is_err());
        assert!(singapore()
            .resolve_range(a, LatLon::new(f64::INFINITY, 103.8))
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_resolution_ignores_corner_order(
            lat_a in 1.15f64..1.47,
            lon_a in 103.6f64..104.0,
            dlat in -0.03f64..0.03,
            dlon in -0.03f64..0.03,
        ) {
            let grid = singapore();
            let a = LatLon::new(lat_a, lon_a);
            let b = LatLon::new(lat_a + dlat, lon_a + dlon);

            prop_assert_eq!(
                grid.resolve_range(a, b).unwrap(),
                grid.resolve_range(b, a).unwrap()
            );
        }
    }
}
