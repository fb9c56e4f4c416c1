pub mod admin;
pub mod home;
pub mod properties;
pub mod property_detail;

pub use admin::{admin_login_page, admin_page, AdminVm};
pub use home::home_page;
pub use properties::properties_page;
pub use property_detail::property_detail_page;
