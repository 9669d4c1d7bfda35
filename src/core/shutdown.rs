//! # OS signal wait used by [`Roulette::run_until_signal`](crate::Roulette::run_until_signal).
//!
//! **Unix:** `SIGINT`, `SIGTERM` or `SIGQUIT`.
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].
//!
//! The wheel is unloaded (ring released) only after the signal arrives; an
//! in-flight spin finishes first.

/// Completes when the process is asked to stop.
///
/// Returns `Err` if a signal listener cannot be installed.
#[cfg(unix)]
pub(crate) async fn wait_for_stop_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Completes when the process is asked to stop.
#[cfg(not(unix))]
pub(crate) async fn wait_for_stop_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
