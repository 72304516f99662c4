pub mod errors;
pub mod models;
pub mod value_objects;

// Re-export commonly used types
pub use errors::{ValidationError as DomainValidationError, VersionError, VersionResult};
pub use models::*;
pub use value_objects::*;
