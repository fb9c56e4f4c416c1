//! Property search site: a pure filter/sort/URL-sync core under [`search`],
//! a SQLite listing store, and the astra + maud web layer that drives it.

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod geo;
pub mod lifecycle;
pub mod responses;
pub mod router;
pub mod search;
pub mod spreadsheets;
pub mod templates;

#[cfg(test)]
mod tests;
