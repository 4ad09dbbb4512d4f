pub mod error;
pub mod profile_service;
pub mod style_service;

pub use error::ServiceError;
pub use profile_service::{ProfileService, EDITABLE_PROFILE_FIELDS, PROFILES_TABLE};
pub use style_service::{StyleService, STYLES_TABLE};
