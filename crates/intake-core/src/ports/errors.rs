use thiserror::Error;

/// Failure of a backend call.
///
/// `Display` is the user-facing message that ends up in the save badge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` is the body's `error` field or a fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body could not be understood.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
