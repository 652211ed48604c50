//! Sample seed data

use gridmark_core::CellAddress;

use crate::error::Result;

/// Cells of the sample area marked gold, on the default Singapore lattice
/// with 0.6 km cells
pub const SAMPLE_GOLD_CELLS: &[&str] = &[
    "1.2689_103.8216", "1.2689_103.8162", "1.2689_103.8108", "1.2689_103.8054",
    "1.2689_103.8000", "1.2743_103.8000", "1.2743_103.8054", "1.2743_103.8108",
    "1.2743_103.8162", "1.2797_103.8054", "1.2797_103.8000", "1.2797_103.7946",
    "1.2797_103.7892", "1.2797_103.7838", "1.2851_103.7838", "1.2851_103.7784",
    "1.2851_103.7892", "1.2851_103.8108", "1.2905_103.8108", "1.2959_103.8054",
    "1.2959_103.8000", "1.2743_103.8486", "1.2797_103.8486", "1.2797_103.8432",
    "1.2797_103.8378", "1.2797_103.8541", "1.2797_103.8595", "1.2743_103.8595",
    "1.2797_103.8703", "1.2797_103.8649", "1.2851_103.8541", "1.2851_103.8595",
    "1.2905_103.8541", "1.2905_103.8595", "1.2905_103.8649", "1.2905_103.8703",
    "1.2851_103.8703", "1.2851_103.8432", "1.2851_103.8378", "1.2905_103.8432",
    "1.2959_103.8432", "1.2959_103.8378", "1.2959_103.8324", "1.2905_103.8324",
    "1.2959_103.8270", "1.2905_103.8270", "1.2959_103.8703", "1.2959_103.8757",
    "1.2959_103.8811", "1.2959_103.8865", "1.2959_103.8919", "1.3014_103.8919",
    "1.3014_103.8973", "1.3014_103.8865", "1.3014_103.8811", "1.3014_103.8486",
    "1.3014_103.8595", "1.3014_103.8649", "1.3014_103.8703", "1.3068_103.8757",
    "1.3068_103.8703", "1.3068_103.8649", "1.3068_103.8595", "1.3068_103.8541",
    "1.3068_103.8486", "1.3068_103.8432", "1.3122_103.8757", "1.3176_103.8757",
    "1.3230_103.8757", "1.3068_103.8919", "1.3122_103.8865", "1.3122_103.8919",
    "1.3122_103.8973", "1.3122_103.9027", "1.3176_103.9027", "1.3176_103.8973",
    "1.3176_103.8919", "1.2959_103.9027", "1.2959_103.9081", "1.3014_103.9135",
    "1.3068_103.9189", "1.3068_103.9135", "1.3068_103.9081", "1.3068_103.9027",
    "1.3122_103.9189",
];

/// Parse [`SAMPLE_GOLD_CELLS`] into addresses
pub fn sample_seed() -> Result<Vec<CellAddress>> {
    parse_addresses(SAMPLE_GOLD_CELLS.iter().copied())
}

/// Parse a list of address strings, failing on the first malformed one
pub fn parse_addresses<'a, I>(addresses: I) -> Result<Vec<CellAddress>>
where
    I: IntoIterator<Item = &'a str>,
{
    addresses
        .into_iter()
        .map(|s| CellAddress::parse(s).map_err(Into::into))
        .collect()
}
