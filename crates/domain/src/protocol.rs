use crate::models::{Comment, Contribution, Reaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /forum/api/updates/{id}/?since=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBatch {
    pub now: DateTime<Utc>,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    #[serde(rename = "commentaires", default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl UpdateBatch {
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty() && self.comments.is_empty() && self.reactions.is_empty()
    }
}

pub fn parse_batch(raw: &str) -> serde_json::Result<UpdateBatch> {
    serde_json::from_str(raw)
}
