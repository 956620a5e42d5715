//! # pinwell-custody
//!
//! The seam between the Pinwell session store and the external
//! content-custody provider (the service that performs real authentication,
//! storage, and retrieval).
//!
//! The [`ContentCustody`] trait captures the provider capability set;
//! [`HttpCustody`] is the production HTTP-backed implementation and
//! [`MockCustody`] is an in-memory fake for tests and local development.

pub mod config;
pub mod http;
pub mod mock;

mod error;

use async_trait::async_trait;

use pinwell_shared::{Account, Content, ContentId, Space, SpaceId, UploadRequest};

pub use config::CustodyConfig;
pub use error::{CustodyError, Result};
pub use http::HttpCustody;
pub use mock::MockCustody;

/// Capability set offered by a content-custody provider.
///
/// Every call is attempted exactly once; retry and backoff are the caller's
/// concern (the session store performs neither).
#[async_trait]
pub trait ContentCustody: Send + Sync {
    /// Authenticate an email handle, yielding the provider-issued account.
    async fn authenticate(&self, email: &str) -> Result<Account>;

    /// List all spaces owned by the account.
    async fn list_spaces(&self, account: &Account) -> Result<Vec<Space>>;

    /// Create a named space under the account.
    async fn create_space(&self, account: &Account, name: &str) -> Result<Space>;

    /// Delete a space and everything in it.
    async fn delete_space(&self, account: &Account, space_id: &SpaceId) -> Result<()>;

    /// List the contents of a space.
    async fn list_contents(&self, account: &Account, space_id: &SpaceId) -> Result<Vec<Content>>;

    /// Upload a payload into a space, yielding the stored content record.
    async fn upload_content(
        &self,
        account: &Account,
        space_id: &SpaceId,
        upload: UploadRequest,
    ) -> Result<Content>;

    /// Delete a single content item from a space.
    async fn delete_content(
        &self,
        account: &Account,
        space_id: &SpaceId,
        content_id: &ContentId,
    ) -> Result<()>;
}
