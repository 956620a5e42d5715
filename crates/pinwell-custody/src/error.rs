use thiserror::Error;

/// Errors produced by a content-custody provider.
#[derive(Error, Debug)]
pub enum CustodyError {
    /// The HTTP request never completed (DNS, TLS, connect, timeout).
    #[error("Provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider answered 2xx but the body did not parse.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Any other provider-side failure (used by the mock).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CustodyError>;
