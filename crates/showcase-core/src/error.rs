use thiserror::Error;

/// Failures the presentation core surfaces to its caller.
///
/// Expected conditions (unloaded item, re-activating the current item, a busy
/// camera) are not errors; they come back as `Ok(false)` or are dropped.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("item index {index} out of range (gallery has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
