mod events;
mod models;
pub mod protocol;

pub use events::PatchEvent;
pub use models::{Comment, Contribution, Cursor, Reaction, WorkId};
pub use protocol::UpdateBatch;
