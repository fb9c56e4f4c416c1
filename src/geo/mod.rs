pub mod nominatim;

use crate::errors::ServerError;
use serde::{Deserialize, Serialize};

pub use nominatim::NominatimClient;

/// A place suggestion returned to the location pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Common trait for geocoding providers.
/// The search core never calls this; only the location pickers and admin form do.
pub trait PlacesLookup: Send + Sync {
    /// Free-text search ("Condesa, CDMX").
    fn search(&self, query: &str) -> Result<Vec<Place>, ServerError>;

    /// Coordinate to nearest address.
    fn reverse(&self, lat: f64, lng: f64) -> Result<Option<Place>, ServerError>;
}

/// Used when lookups are turned off in config: always answers with nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLookup;

impl PlacesLookup for DisabledLookup {
    fn search(&self, _query: &str) -> Result<Vec<Place>, ServerError> {
        Ok(Vec::new())
    }

    fn reverse(&self, _lat: f64, _lng: f64) -> Result<Option<Place>, ServerError> {
        Ok(None)
    }
}

impl<T: PlacesLookup + ?Sized> PlacesLookup for Box<T> {
    fn search(&self, query: &str) -> Result<Vec<Place>, ServerError> {
        (**self).search(query)
    }

    fn reverse(&self, lat: f64, lng: f64) -> Result<Option<Place>, ServerError> {
        (**self).reverse(lat, lng)
    }
}
