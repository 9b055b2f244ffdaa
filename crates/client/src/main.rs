mod config;

use anyhow::Context;
use dotenvy::dotenv;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use config::Settings;
use domain::{PatchEvent, WorkId};
use page::ThreadPage;
use poller::PollerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let work_id = WorkId::new(settings.forum.work_id)
        .map_err(|e| anyhow::anyhow!("Invalid work id: {}", e))?;

    let page = Arc::new(Mutex::new(ThreadPage::new()));
    let (tx_events, rx_events) = broadcast::channel(100);
    let cancel_token = CancellationToken::new();

    let poller_config = PollerConfig {
        base_url: settings.endpoint.base_url.clone(),
        work_id,
        interval: Duration::from_millis(settings.poll.interval_ms),
    };

    let poller_handle = {
        let page = page.clone();
        let token = cancel_token.clone();
        tokio::spawn(poller::start(poller_config, page, tx_events, token))
    };

    let log_handle = tokio::spawn(log_events(rx_events));

    shutdown_signal().await;
    cancel_token.cancel();

    let cursor = poller_handle.await?;
    // sender dropped with the poller, so the log stream ends on its own
    let _ = log_handle.await;

    info!("Stopped at cursor {}", cursor);
    println!("{}", page.lock().unwrap().render());
    Ok(())
}

async fn log_events(rx: broadcast::Receiver<PatchEvent>) {
    let mut stream = BroadcastStream::new(rx);
    while let Some(item) = stream.next().await {
        match item {
            Ok(PatchEvent::ContributionAdded { contribution }) => {
                info!(
                    "New contribution #{} by {}",
                    contribution.id, contribution.author
                );
            }
            Ok(PatchEvent::CommentAttached { comment }) => {
                info!(
                    "New comment on contribution {} by {}",
                    comment.contrib_id, comment.author
                );
            }
            Ok(PatchEvent::CommentDropped {
                contrib_id,
                comment_id,
            }) => {
                warn!(
                    "Dropped comment {} for missing contribution {}",
                    comment_id, contrib_id
                );
            }
            Ok(PatchEvent::ReactionObserved { contrib_id }) => {
                info!("Reaction activity on contribution {}", contrib_id);
            }
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                warn!("Event log lagged by {} event(s)", n);
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
