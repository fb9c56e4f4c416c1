pub mod admin;

pub use admin::AdminGate;
