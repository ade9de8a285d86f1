use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolve on SIGTERM or SIGINT (Ctrl+C elsewhere).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Spawn a task that cancels `token` once a shutdown signal arrives.
pub fn cancel_on_signal(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            res = wait_for_shutdown() => match res {
                Ok(()) => {
                    tracing::info!("shutdown signal received");
                    token.cancel();
                }
                Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signals"),
            },
            _ = token.cancelled() => {}
        }
    })
}
