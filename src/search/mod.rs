pub mod controller;
pub mod filters;
pub mod lookup;
pub mod page;
pub mod predicates;
pub mod sort;
pub mod url_codec;
