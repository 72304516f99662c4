use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Exit status used when the process is stopped by a signal
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Token cancelled on the first SIGINT or SIGTERM.
///
/// Running services notice the token before their next page fetch or delete
/// call. A second signal exits immediately without waiting for an in-flight
/// request.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        warn!("Shutdown signal received, stopping before the next request");
        trigger.cancel();

        wait_for_signal().await;
        std::process::exit(INTERRUPTED_EXIT_CODE);
    });

    token
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Unable to listen for SIGINT");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(err) => {
            warn!(error = %err, "Unable to listen for SIGTERM");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}
