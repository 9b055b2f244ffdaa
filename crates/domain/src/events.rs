use crate::models::{Comment, Contribution};
use serde::{Deserialize, Serialize};

/// One applied (or deliberately skipped) change, broadcast to whoever
/// watches the page being patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatchEvent {
    ContributionAdded {
        contribution: Contribution,
    },
    CommentAttached {
        comment: Comment,
    },
    /// The target contribution is not on the page; the comment is
    /// dropped, not queued.
    CommentDropped {
        contrib_id: i64,
        comment_id: i64,
    },
    ReactionObserved {
        contrib_id: i64,
    },
}
