mod error;
mod source;
mod worker;

pub use error::FetchError;
pub use source::{HttpSource, UpdateSource};
pub use worker::UpdatePoller;

use domain::{Cursor, PatchEvent, WorkId};
use page::ThreadPage;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub base_url: String,
    pub work_id: WorkId,
    pub interval: Duration,
}

/// Wires an HTTP source to a fresh poller and runs it until the token
/// is cancelled. Returns the final cursor.
pub async fn start(
    config: PollerConfig,
    page: Arc<Mutex<ThreadPage>>,
    tx_events: broadcast::Sender<PatchEvent>,
    cancel_token: CancellationToken,
) -> Cursor {
    info!(
        "Polling work {} at {} every {:?}",
        config.work_id, config.base_url, config.interval
    );
    let source = HttpSource::new(&config.base_url, config.work_id);
    let poller = UpdatePoller::new(source, Cursor::now(), page, tx_events, config.interval);
    poller.run(cancel_token).await
}
