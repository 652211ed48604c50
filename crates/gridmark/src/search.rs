//! Location search
//!
//! Geocoding is a collaborator: anything implementing [`Geocoder`] can back
//! a [`LocationSearch`]. [`GazetteerGeocoder`] is an offline implementation
//! over a CSV table of named places.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gridmark_core::LatLon;
use thiserror::Error;

use crate::error::{Error, Result};

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Human-readable address shown next to the marker
    pub display_address: String,
}

impl Place {
    /// The place's coordinate
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Failure reported by a geocoding provider
#[derive(Debug, Error)]
#[error("{provider}: {message}")]
pub struct GeocodeError {
    /// Provider name
    pub provider: String,
    /// What went wrong
    pub message: String,
}

impl GeocodeError {
    /// Create a new provider error
    pub fn new<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Something that turns free text into a coordinate
pub trait Geocoder {
    /// Look up `query`; `Ok(None)` when nothing matches
    fn geocode(&self, query: &str) -> std::result::Result<Option<Place>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> std::result::Result<Option<Place>, GeocodeError> {
        (**self).geocode(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> std::result::Result<Option<Place>, GeocodeError> {
        (**self).geocode(query)
    }
}

/// Result of a search that reached the provider
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query matched a place
    Found(Place),
    /// The provider answered but matched nothing
    NotFound,
}

/// Search scoped to a locale
///
/// Queries get `", {locale}"` appended before they reach the geocoder, the
/// way a user would qualify a search with the country name.
pub struct LocationSearch<G> {
    geocoder: G,
    locale: String,
}

impl<G: Geocoder> LocationSearch<G> {
    /// Create a search over `geocoder` scoped to `locale`
    pub fn new<S: Into<String>>(geocoder: G, locale: S) -> Self {
        Self {
            geocoder,
            locale: locale.into(),
        }
    }

    /// The locale appended to queries
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Build the query sent to the geocoder
    pub fn qualified_query(&self, query: &str) -> String {
        if self.locale.is_empty() {
            query.trim().to_string()
        } else {
            format!("{}, {}", query.trim(), self.locale)
        }
    }

    /// Search for a place
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        if query.trim().is_empty() {
            return Err(Error::InvalidArgument("search query is empty".into()));
        }

        let qualified = self.qualified_query(query);
        log::debug!("geocoding '{}'", qualified);

        match self.geocoder.geocode(&qualified) {
            Ok(Some(place)) => Ok(SearchOutcome::Found(place)),
            Ok(None) => Ok(SearchOutcome::NotFound),
            Err(e) => {
                log::warn!("geocoding '{}' failed: {}", qualified, e);
                Err(Error::collaborator(e.to_string()))
            }
        }
    }
}

/// Offline geocoder over a table of named places
///
/// The table is CSV with a `name,lat,lon,address` header. Lookups use the
/// text before the first comma of the query, ignore case, and prefer an
/// exact name over a name that merely starts with the query.
#[derive(Debug, Clone, Default)]
pub struct GazetteerGeocoder {
    places: Vec<(String, Place)>,
}

impl GazetteerGeocoder {
    /// Create an empty gazetteer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named place
    pub fn insert<S: Into<String>>(&mut self, name: S, place: Place) {
        self.places.push((name.into().to_lowercase(), place));
    }

    /// Number of places
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Check if the gazetteer has no places
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Read a gazetteer file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::collaborator(format!("opening '{}': {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Read a gazetteer from CSV
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut gazetteer = Self::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| Error::collaborator(e.to_string()))?;
            let bad = |what: &str| {
                Error::collaborator(format!("gazetteer record {}: bad {}", idx + 1, what))
            };

            let name = record.get(0).filter(|n| !n.is_empty()).ok_or_else(|| bad("name"))?;
            let lat: f64 = record
                .get(1)
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| bad("latitude"))?;
            let lon: f64 = record
                .get(2)
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| bad("longitude"))?;
            let address = record.get(3).unwrap_or(name).to_string();

            gazetteer.insert(
                name,
                Place {
                    lat,
                    lon,
                    display_address: address,
                },
            );
        }

        log::debug!("gazetteer holds {} places", gazetteer.len());
        Ok(gazetteer)
    }
}

impl Geocoder for GazetteerGeocoder {
    fn geocode(&self, query: &str) -> std::result::Result<Option<Place>, GeocodeError> {
        let name = query.split(',').next().unwrap_or("").trim().to_lowercase();
        if name.is_empty() {
            return Ok(None);
        }

        let exact = self.places.iter().find(|(n, _)| *n == name);
        let found = exact.or_else(|| self.places.iter().find(|(n, _)| n.starts_with(&name)));
        Ok(found.map(|(_, place)| place.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const TABLE: &str = "name,lat,lon,address\n\
        Marina Bay,1.2834,103.8607,\"Marina Bay, Downtown Core, Singapore\"\n\
        Marina South,1.2720,103.8630,\"Marina South, Singapore\"\n\
        Changi Airport,1.3644,103.9915,\"Changi Airport, Singapore\"\n";

    struct Recording {
        queries: RefCell<Vec<String>>,
    }

    impl Geocoder for Recording {
        fn geocode(&self, query: &str) -> std::result::Result<Option<Place>, GeocodeError> {
            self.queries.borrow_mut().push(query.to_string());
            Ok(None)
        }
    }

    struct Failing;

    impl Geocoder for Failing {
        fn geocode(&self, _query: &str) -> std::result::Result<Option<Place>, GeocodeError> {
            Err(GeocodeError::new("test", "connection refused"))
        }
    }

    #[test]
    fn test_query_is_qualified_with_locale() {
        let recording = Recording {
            queries: RefCell::new(Vec::new()),
        };
        let search = LocationSearch::new(&recording, "Singapore");

        assert_eq!(search.search("  Orchard Road ").unwrap(), SearchOutcome::NotFound);
        assert_eq!(*recording.queries.borrow(), vec!["Orchard Road, Singapore"]);
    }

    #[test]
    fn test_gazetteer_lookup() {
        let gazetteer = GazetteerGeocoder::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(gazetteer.len(), 3);
        let search = LocationSearch::new(gazetteer, "Singapore");

        match search.search("marina").unwrap() {
            SearchOutcome::Found(place) => {
                assert_eq!(place.display_address, "Marina Bay, Downtown Core, Singapore")
            }
            other => panic!("unexpected {:?}", other),
        }

        // Exact name beats an earlier prefix match
        match search.search("Marina South").unwrap() {
            SearchOutcome::Found(place) => {
                assert_eq!(place.position(), LatLon::new(1.2720, 103.8630))
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(search.search("Sentosa").unwrap(), SearchOutcome::NotFound);
    }

    #[test]
    fn test_errors() {
        let search = LocationSearch::new(Failing, "Singapore");
        assert!(matches!(search.search("anything"), Err(Error::Collaborator(_))));
        assert!(matches!(search.search("   "), Err(Error::InvalidArgument(_))));

        let bad = "name,lat,lon,address\nNowhere,north,103.8,x\n";
        assert!(GazetteerGeocoder::from_reader(bad.as_bytes()).is_err());
    }
}
