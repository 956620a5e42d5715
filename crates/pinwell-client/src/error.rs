use thiserror::Error;

use pinwell_custody::CustodyError;
use pinwell_shared::AccountId;
use pinwell_store::StoreError;

/// Errors produced by session operations.
///
/// Write-type operations both record the message in the shared error slot
/// and return it; read-type operations only record.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Operation requires a current account and none is set.
    #[error("No account selected")]
    NoAccount,

    /// The requested account is not in the known-accounts list.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Login was called with an empty email.
    #[error("Email must not be empty")]
    EmptyEmail,

    /// Upload was called with an empty payload.
    #[error("Upload payload is empty")]
    EmptyUpload,

    /// Upload payload exceeds the local size cap.
    #[error("Upload too large: {size} bytes (max {max})")]
    UploadTooLarge { size: usize, max: usize },

    /// The custody provider rejected or failed the call.
    #[error(transparent)]
    Custody(#[from] CustodyError),

    /// The snapshot store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SessionError>;
