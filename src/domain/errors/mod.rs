mod validation_errors;
mod version_errors;

pub use validation_errors::*;
pub use version_errors::*;
