//! Plumbing shared by the `show-versions` and `cleanup-objects` binaries.

pub mod args;
pub mod output;
pub mod shutdown;

pub use args::{LoggingArgs, StorageArgs};
pub use output::{OutputFormat, render_versions};
pub use shutdown::shutdown_token;

use std::process::ExitCode;
use tracing::debug;

use crate::domain::errors::VersionError;

/// Print the user-facing message for a failed command and pick its exit status.
///
/// Only the terse message reaches stdout; the full error chain is logged at
/// debug level.
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    debug!(error = ?err, "Command failed");

    match err.downcast_ref::<VersionError>() {
        Some(version_err) => {
            println!("{}", version_err.user_message());
            ExitCode::from(version_err.exit_code())
        }
        None => {
            println!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
