use async_trait::async_trait;
use domain::{protocol, Cursor, UpdateBatch, WorkId};

use crate::error::FetchError;

/// Where update batches come from. The worker only ever sees this
/// trait, so tests can script a source without a network.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch_since(&self, cursor: &Cursor) -> Result<UpdateBatch, FetchError>;
}

pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    work_id: WorkId,
}

impl HttpSource {
    pub fn new(base_url: &str, work_id: WorkId) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            work_id,
        }
    }

    fn updates_url(&self) -> String {
        format!("{}/forum/api/updates/{}/", self.base_url, self.work_id)
    }
}

#[async_trait]
impl UpdateSource for HttpSource {
    async fn fetch_since(&self, cursor: &Cursor) -> Result<UpdateBatch, FetchError> {
        let resp = self
            .client
            .get(self.updates_url())
            .query(&[("since", cursor.to_query_value())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let raw = resp.text().await?;
        Ok(protocol::parse_batch(&raw)?)
    }
}
