use std::sync::{Arc, Mutex};
use std::time::Duration;

use domain::{Cursor, PatchEvent, UpdateBatch};
use page::ThreadPage;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::source::UpdateSource;

/// Fetches "what changed since the cursor" on a fixed interval and
/// patches the page model. Failures never advance the cursor; the loop
/// self-heals by retrying on the next tick.
pub struct UpdatePoller<S: UpdateSource> {
    source: S,
    cursor: Cursor,
    page: Arc<Mutex<ThreadPage>>,
    tx_events: broadcast::Sender<PatchEvent>,
    interval: Duration,
}

impl<S: UpdateSource> UpdatePoller<S> {
    pub fn new(
        source: S,
        cursor: Cursor,
        page: Arc<Mutex<ThreadPage>>,
        tx_events: broadcast::Sender<PatchEvent>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            cursor,
            page,
            tx_events,
            interval,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// One fetch-and-apply round.
    pub async fn tick(&mut self) {
        match self.source.fetch_since(&self.cursor).await {
            Ok(batch) => {
                self.apply(&batch);
                self.cursor.advance(batch.now);
            }
            Err(e) => {
                warn!("Update fetch failed: {}. Retrying on next tick.", e);
            }
        }
    }

    fn apply(&mut self, batch: &UpdateBatch) {
        if batch.is_empty() {
            return;
        }
        let mut page = self.page.lock().unwrap();

        for c in &batch.contributions {
            page.insert_contribution(c);
            let _ = self.tx_events.send(PatchEvent::ContributionAdded {
                contribution: c.clone(),
            });
        }

        for cm in &batch.comments {
            if page.append_comment(cm) {
                let _ = self.tx_events.send(PatchEvent::CommentAttached {
                    comment: cm.clone(),
                });
            } else {
                debug!(
                    "Comment {} targets contribution {} which is not on the page; dropped",
                    cm.id, cm.contrib_id
                );
                let _ = self.tx_events.send(PatchEvent::CommentDropped {
                    contrib_id: cm.contrib_id,
                    comment_id: cm.id,
                });
            }
        }

        for r in &batch.reactions {
            if page.observe_reaction(r) {
                let _ = self.tx_events.send(PatchEvent::ReactionObserved {
                    contrib_id: r.contrib_id,
                });
            }
        }
    }

    /// Polls until cancelled, then returns the final cursor. Only one
    /// request is in flight at a time: the loop awaits the current
    /// round before the interval can fire again, so a slow response
    /// delays the next tick instead of racing it for the cursor.
    pub async fn run(mut self, cancel_token: CancellationToken) -> Cursor {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; consume that so the first fetch
        // happens one period after startup
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = cancel_token.cancelled() => break,
            }
        }

        info!("Poller stopped at cursor {}", self.cursor);
        self.cursor
    }
}
