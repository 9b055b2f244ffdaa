use thiserror::Error;

/// Everything a fetch round can fail with. All variants are handled
/// the same way: logged, swallowed, retried on the next tick.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed update payload: {0}")]
    Decode(#[from] serde_json::Error),
}
