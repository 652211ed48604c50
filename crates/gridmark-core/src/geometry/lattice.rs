//! Cell lattice generation and coordinate addressing

use std::collections::BTreeSet;

use super::{CellAddress, LatLon, Region};
use crate::error::{Error, Result};
use crate::range::GeoRange;
use crate::KM_PER_DEGREE;

/// Convert a cell size in kilometres to a step in degrees
///
/// Uses a flat approximation of 111 km per degree on both axes, so cells
/// are not geodesically square away from the equator.
///
/// # Examples
/// ```
/// use gridmark_core::cell_size_degrees;
///
/// let step = cell_size_degrees(0.6).unwrap();
/// assert!((step - 0.005405).abs() < 1e-6);
///
/// assert!(cell_size_degrees(0.0).is_err());
/// ```
pub fn cell_size_degrees(cell_size_km: f64) -> Result<f64> {
    if !cell_size_km.is_finite() || cell_size_km <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "cell size must be a positive number of kilometres, got {}",
            cell_size_km
        )));
    }
    Ok(cell_size_km / KM_PER_DEGREE)
}

/// Generate every cell of the lattice over `region`, row-major
pub fn generate_lattice(region: Region, cell_size_km: f64) -> Result<Vec<Cell>> {
    Ok(Grid::new(region, cell_size_km)?.lattice())
}

/// Compute the address of the cell enclosing `(lat, lon)`
pub fn address_of(lat: f64, lon: f64, region: Region, cell_size_km: f64) -> Result<CellAddress> {
    Ok(Grid::new(region, cell_size_km)?.address_of(lat, lon))
}

/// Coordinate of the `index`-th lattice line on one axis
///
/// Both lattice generation and addressing go through this function, which
/// is what keeps a cell's address and the address of any point inside it
/// identical.
#[inline]
fn axis_value(min: f64, step: f64, index: i64) -> f64 {
    min + index as f64 * step
}

/// Index of the lattice band holding `value` on one axis
///
/// The division can land an ulp either side of a lattice line, so the
/// index is checked against `axis_value` itself: band `i` is
/// `[axis_value(i), axis_value(i + 1))`.
fn axis_index(min: f64, step: f64, value: f64) -> i64 {
    let index = ((value - min) / step).floor() as i64;
    if axis_value(min, step, index + 1) <= value {
        index + 1
    } else if axis_value(min, step, index) > value {
        index - 1
    } else {
        index
    }
}

/// Number of lattice lines starting in `[min, max)`
fn axis_steps(min: f64, max: f64, step: f64) -> usize {
    ((max - min) / step).ceil().max(1.0) as usize
}

/// One lattice rectangle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Canonical address, derived from the lower-left corner
    pub address: CellAddress,
    /// South-west corner
    pub lower_left: LatLon,
    /// North-east corner, the lower-left corner of the next cell diagonally
    pub upper_right: LatLon,
}

impl Cell {
    /// Check if a coordinate falls in this cell (south and west edges inclusive)
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lower_left.lat
            && lat < self.upper_right.lat
            && lon >= self.lower_left.lon
            && lon < self.upper_right.lon
    }

    /// Bounds as `[[south, west], [north, east]]`
    pub fn bounds(&self) -> [[f64; 2]; 2] {
        [
            [self.lower_left.lat, self.lower_left.lon],
            [self.upper_right.lat, self.upper_right.lon],
        ]
    }

    /// Center of the cell
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.lower_left.lat + self.upper_right.lat) / 2.0,
            (self.lower_left.lon + self.upper_right.lon) / 2.0,
        )
    }
}

/// A region divided into square cells of a fixed size
///
/// Row `r` starts at latitude `min_lat + r * step` and column `c` at
/// longitude `min_lon + c * step`. The lattice covers rows `0..rows()` and
/// columns `0..cols()`; the last row and column start below the region's
/// maximum but may extend past it when the span is not a multiple of the step.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    region: Region,
    cell_size_km: f64,
    step: f64,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create a grid, validating the region and cell size
    pub fn new(region: Region, cell_size_km: f64) -> Result<Self> {
        region.validate()?;
        let step = cell_size_degrees(cell_size_km)?;

        let rows = axis_steps(region.min_lat, region.max_lat, step);
        let cols = axis_steps(region.min_lon, region.max_lon, step);
        log::debug!(
            "grid over {} with {} km cells: {} rows x {} cols",
            region,
            cell_size_km,
            rows,
            cols
        );

        Ok(Self {
            region,
            cell_size_km,
            step,
            rows,
            cols,
        })
    }

    /// The gridded region
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Cell size in kilometres
    pub fn cell_size_km(&self) -> f64 {
        self.cell_size_km
    }

    /// Cell size in degrees
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of lattice rows (latitude bands)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of lattice columns (longitude bands)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells in the lattice
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row and column index of the cell enclosing `(lat, lon)`
    ///
    /// Indices are not clamped: points outside the region give negative or
    /// out-of-range indices that extrapolate the lattice.
    pub fn index_of(&self, lat: f64, lon: f64) -> (i64, i64) {
        (
            axis_index(self.region.min_lat, self.step, lat),
            axis_index(self.region.min_lon, self.step, lon),
        )
    }

    /// Lower-left corner of the cell at a (possibly extrapolated) index
    pub fn corner_at(&self, row: i64, col: i64) -> LatLon {
        LatLon::new(
            axis_value(self.region.min_lat, self.step, row),
            axis_value(self.region.min_lon, self.step, col),
        )
    }

    /// The cell at a (possibly extrapolated) index
    pub fn cell_at_index(&self, row: i64, col: i64) -> Cell {
        let lower_left = self.corner_at(row, col);
        Cell {
            address: CellAddress::from_corner(lower_left.lat, lower_left.lon),
            lower_left,
            upper_right: self.corner_at(row + 1, col + 1),
        }
    }

    /// Address of the cell enclosing `(lat, lon)`
    ///
    /// Coordinates outside the region still produce a well-formed address
    /// for the extrapolated cell; callers decide whether to reject it.
    pub fn address_of(&self, lat: f64, lon: f64) -> CellAddress {
        let (row, col) = self.index_of(lat, lon);
        let corner = self.corner_at(row, col);
        CellAddress::from_corner(corner.lat, corner.lon)
    }

    /// The cell enclosing `(lat, lon)`
    pub fn cell_at(&self, lat: f64, lon: f64) -> Cell {
        let (row, col) = self.index_of(lat, lon);
        self.cell_at_index(row, col)
    }

    /// Check if an address names one of the lattice's cells
    pub fn contains_address(&self, address: &CellAddress) -> bool {
        let corner = address.corner();
        // Corners are rounded to address precision, so snap to the nearest line
        let row = ((corner.lat - self.region.min_lat) / self.step).round() as i64;
        let col = ((corner.lon - self.region.min_lon) / self.step).round() as i64;

        (0..self.rows as i64).contains(&row)
            && (0..self.cols as i64).contains(&col)
            && self.cell_at_index(row, col).address == *address
    }

    /// Iterate over the lattice, row-major by increasing latitude then longitude
    pub fn cells(&self) -> LatticeIter<'_> {
        LatticeIter {
            grid: self,
            row: 0,
            col: 0,
        }
    }

    /// Collect the lattice into a vector
    pub fn lattice(&self) -> Vec<Cell> {
        self.cells().collect()
    }

    /// Resolve two corners into the addresses of the cells they cover
    pub fn resolve_range(&self, a: LatLon, b: LatLon) -> Result<BTreeSet<CellAddress>> {
        GeoRange::try_new(a, b)?.resolve(self)
    }
}

/// Iterator over the cells of a [`Grid`]
pub struct LatticeIter<'a> {
    grid: &'a Grid,
    row: usize,
    col: usize,
}

impl<'a> Iterator for LatticeIter<'a> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.grid.rows {
            return None;
        }

        let cell = self.grid.cell_at_index(self.row as i64, self.col as i64);

        // Move to next cell
        self.col += 1;
        if self.col >= self.grid.cols {
            self.col = 0;
            self.row += 1;
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.row >= self.grid.rows {
            0
        } else {
            (self.grid.rows - self.row) * self.grid.cols - self.col
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LatticeIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn singapore() -> Grid {
        Grid::new(Region::SINGAPORE, 0.6).unwrap()
    }

    #[test]
    fn test_cell_size_degrees() {
        assert_eq!(cell_size_degrees(111.0).unwrap(), 1.0);
        assert!((cell_size_degrees(0.6).unwrap() - 0.005405).abs() < 1e-6);

        assert!(cell_size_degrees(0.0).is_err());
        assert!(cell_size_degrees(-1.0).is_err());
        assert!(cell_size_degrees(f64::NAN).is_err());
    }

    #[test]
    fn test_lattice_dimensions() {
        let grid = singapore();

        // 0.32 / step = 59.2; the longitude span rounds just above 74 steps
        assert_eq!(grid.rows(), 60);
        assert_eq!(grid.cols(), 75);
        assert_eq!(grid.lattice().len(), grid.cell_count());
        assert_eq!(grid.cells().len(), 60 * 75);
    }

    #[test]
    fn test_lattice_order_is_row_major() {
        let grid = Grid::new(Region::new(0.0, 2.0, 10.0, 13.0).unwrap(), 111.0).unwrap();
        let ids: Vec<String> = grid.cells().map(|c| c.address.to_string()).collect();

        assert_eq!(
            ids,
            vec![
                "0.0000_10.0000",
                "0.0000_11.0000",
                "0.0000_12.0000",
                "1.0000_10.0000",
                "1.0000_11.0000",
                "1.0000_12.0000",
            ]
        );
    }

    #[test]
    fn test_last_row_may_extend_past_region() {
        let grid = Grid::new(Region::new(0.0, 2.5, 0.0, 1.0).unwrap(), 111.0).unwrap();
        assert_eq!(grid.rows(), 3);

        let last = grid.lattice().pop().unwrap();
        assert_eq!(last.lower_left, LatLon::new(2.0, 0.0));
        assert_eq!(last.upper_right, LatLon::new(3.0, 1.0));
    }

    #[test]
    fn test_known_addresses() {
        let grid = singapore();

        // Cell of the sample gold list
        assert_eq!(grid.address_of(1.2700, 103.8230).as_str(), "1.2689_103.8216");
        // First cell
        assert_eq!(grid.address_of(1.15, 103.6).as_str(), "1.1500_103.6000");
    }

    #[test]
    fn test_center_of_singapore_address() {
        let grid = singapore();
        let addr = grid.address_of(1.3521, 103.8198);

        let cell = grid
            .cells()
            .find(|c| c.contains(1.3521, 103.8198))
            .unwrap();
        assert_eq!(addr, cell.address);
        // Repeated calls agree
        assert_eq!(addr, grid.address_of(1.3521, 103.8198));
        assert_eq!(addr, address_of(1.3521, 103.8198, Region::SINGAPORE, 0.6).unwrap());
    }

    #[test]
    fn test_outside_region_extrapolates() {
        let grid = singapore();
        let addr = grid.address_of(1.10, 103.55);

        let (row, col) = grid.index_of(1.10, 103.55);
        assert!(row < 0 && col < 0);
        assert!(CellAddress::parse(addr.as_str()).is_ok());
        assert!(!grid.contains_address(&addr));
    }

    #[test]
    fn test_contains_address() {
        let grid = singapore();

        assert!(grid.contains_address(&CellAddress::parse("1.2689_103.8216").unwrap()));
        assert!(grid.contains_address(&CellAddress::parse("1.1500_103.6000").unwrap()));
        // Off the lattice lines
        assert!(!grid.contains_address(&CellAddress::parse("1.2690_103.8216").unwrap()));
        assert!(!grid.contains_address(&CellAddress::parse("9.9999_999.9999").unwrap()));
    }

    #[test]
    fn test_every_corner_addresses_its_own_cell() {
        let grid = singapore();

        let mismatches: Vec<(String, String)> = grid
            .cells()
            .filter(|c| grid.address_of(c.lower_left.lat, c.lower_left.lon) != c.address)
            .map(|c| {
                let got = grid.address_of(c.lower_left.lat, c.lower_left.lon);
                (c.address.to_string(), got.to_string())
            })
            .collect();
        assert_eq!(mismatches, Vec::<(String, String)>::new());
    }

    #[test]
    fn test_cells_tile_without_gaps() {
        let grid = singapore();
        let cell = grid.cell_at_index(7, 9);
        let north_east = grid.cell_at_index(8, 10);

        assert_eq!(cell.upper_right, north_east.lower_left);
        assert!(!cell.contains(cell.upper_right.lat, cell.upper_right.lon));
        assert_eq!(
            grid.address_of(cell.upper_right.lat, cell.upper_right.lon),
            north_east.address
        );
    }

    #[test]
    fn test_address_of_rejects_bad_cell_size() {
        assert!(address_of(1.3, 103.8, Region::SINGAPORE, 0.0).is_err());
        assert!(generate_lattice(Region::SINGAPORE, -0.6).is_err());
    }

    proptest! {
        #[test]
        fn prop_points_inside_cell_share_its_address(
            row in 0i64..60,
            col in 0i64..75,
            fy in 0.0f64..1.0,
            fx in 0.0f64..1.0,
        ) {
            let grid = singapore();
            let cell = grid.cell_at_index(row, col);
            let lat = cell.lower_left.lat + fy * grid.step();
            let lon = cell.lower_left.lon + fx * grid.step();
            // fy close to 1 can round onto the next lattice line
            prop_assume!(cell.contains(lat, lon));

            prop_assert_eq!(grid.address_of(lat, lon), cell.address.clone());
            prop_assert!(grid.contains_address(&cell.address));
        }
    }
}
