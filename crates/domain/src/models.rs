use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(i64);

impl WorkId {
    pub fn new(raw: i64) -> Result<Self, String> {
        if raw <= 0 {
            return Err("Work ID must be a positive integer.".to_string());
        }
        Ok(Self(raw))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A top-level forum post. Field names are English, wire keys stay the
/// French ones the endpoint emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: i64,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "date_post")]
    pub posted_at: DateTime<Utc>,
    #[serde(rename = "texte", default)]
    pub text: Option<String>,
    #[serde(rename = "fichier_url", default)]
    pub file_url: Option<String>,
}

impl Contribution {
    /// The endpoint sends `texte: ""` for file-only posts.
    pub fn body_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn dom_id(&self) -> String {
        format!("contrib-{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: i64,
    pub contrib_id: i64,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "date_com")]
    pub commented_at: DateTime<Utc>,
    #[serde(rename = "contenu")]
    pub content: String,
}

/// Like/dislike tallies for a contribution. The apply path currently
/// only locates the counters; the tallies are carried for later use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub contrib_id: i64,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub dislike_count: Option<u64>,
}

/// The "last successfully observed update" timestamp. Advanced only
/// with the server-echoed `now` after a successful fetch; a failed
/// fetch leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(DateTime<Utc>);

impl Cursor {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn advance(&mut self, server_now: DateTime<Utc>) {
        self.0 = server_now;
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }

    /// Value for the `since` query parameter.
    pub fn to_query_value(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn work_id_rejects_non_positive() {
        assert!(WorkId::new(0).is_err());
        assert!(WorkId::new(-3).is_err());
        assert_eq!(WorkId::new(42).unwrap().as_i64(), 42);
    }

    #[test]
    fn cursor_advances_to_server_now() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 5).unwrap();
        let mut cursor = Cursor::at(t0);
        cursor.advance(t1);
        assert_eq!(cursor.timestamp(), t1);
    }

    #[test]
    fn empty_text_means_file_only() {
        let c = Contribution {
            id: 7,
            author: "Bob".into(),
            posted_at: Utc::now(),
            text: Some(String::new()),
            file_url: Some("/media/report.pdf".into()),
        };
        assert!(c.body_text().is_none());
        assert_eq!(c.dom_id(), "contrib-7");
    }
}
