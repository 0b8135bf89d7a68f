#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to open {url}: {reason}")]
    Launch { url: String, reason: String },

    #[error("selection index {index} out of range for {count} candidates")]
    InvalidSelection { index: usize, count: usize },

    #[error("unsupported on this platform: {0}")]
    Unsupported(String),

    #[error("platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
