pub mod connection;
pub mod listings;
pub mod source;

pub use connection::{init_db, Database};
pub use listings::SqliteListings;
pub use source::{ListingSource, ListingStore};
