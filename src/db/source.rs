// src/db/source.rs
use crate::domain::listing::{Amenity, Listing, NewListing};
use crate::errors::ServerError;

/// Where the public pages get their listings from. Assumed fallible.
pub trait ListingSource {
    fn list_all(&self) -> Result<Vec<Listing>, ServerError>;
}

/// Admin CRUD on top of `ListingSource`.
pub trait ListingStore: ListingSource {
    fn get(&self, id: i64) -> Result<Listing, ServerError>;
    fn create(&self, input: &NewListing) -> Result<Listing, ServerError>;
    fn update(&self, id: i64, input: &NewListing) -> Result<Listing, ServerError>;
    fn delete(&self, id: i64) -> Result<(), ServerError>;
    fn amenities(&self) -> Result<Vec<Amenity>, ServerError>;
}

impl<T: ListingSource + ?Sized> ListingSource for &T {
    fn list_all(&self) -> Result<Vec<Listing>, ServerError> {
        (**self).list_all()
    }
}
