//! In-memory content-custody provider for tests and local development.
//!
//! Behaves like a well-formed provider: identifiers are issued server-side,
//! authentication is idempotent per email, and deleting a missing entity is
//! rejected. Failures can be injected one call at a time with
//! [`MockCustody::fail_next`], and every call is appended to an inspectable
//! log so cascading workflows can be asserted stage by stage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use pinwell_shared::{Account, AccountId, Content, ContentId, Space, SpaceId, UploadRequest};

use crate::error::{CustodyError, Result};
use crate::ContentCustody;

#[derive(Debug, Default)]
struct MockInner {
    /// Accounts keyed by email; authenticate returns the same id for the
    /// same email across calls.
    accounts: HashMap<String, Account>,
    spaces: HashMap<AccountId, Vec<Space>>,
    contents: HashMap<SpaceId, Vec<Content>>,
    calls: Vec<String>,
    fail_next: Option<String>,
}

/// In-memory fake provider.
#[derive(Debug, Default)]
pub struct MockCustody {
    inner: Mutex<MockInner>,
}

impl MockCustody {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a test assertion failed mid-call; the data
    // is still usable.
    fn inner(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next provider call fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.inner().fail_next = Some(message.into());
    }

    /// Names of every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner().calls.clone()
    }

    /// Pre-populate a space for an account without going through
    /// `create_space`.
    pub fn seed_space(&self, account_id: &AccountId, space: Space) {
        self.inner()
            .spaces
            .entry(account_id.clone())
            .or_default()
            .push(space);
    }

    /// Pre-populate a content entry without going through `upload_content`.
    pub fn seed_content(&self, space_id: &SpaceId, content: Content) {
        self.inner()
            .contents
            .entry(space_id.clone())
            .or_default()
            .push(content);
    }

    fn begin(&self, call: &str) -> Result<MutexGuard<'_, MockInner>> {
        let mut inner = self.inner();
        inner.calls.push(call.to_string());
        if let Some(message) = inner.fail_next.take() {
            return Err(CustodyError::Other(message));
        }
        Ok(inner)
    }
}

#[async_trait]
impl ContentCustody for MockCustody {
    async fn authenticate(&self, email: &str) -> Result<Account> {
        let mut inner = self.begin("authenticate")?;

        if let Some(account) = inner.accounts.get(email) {
            return Ok(account.clone());
        }

        let account = Account {
            id: AccountId::new(format!("acct-{}", Uuid::new_v4())),
            email: email.to_string(),
        };
        inner.accounts.insert(email.to_string(), account.clone());
        Ok(account)
    }

    async fn list_spaces(&self, account: &Account) -> Result<Vec<Space>> {
        let inner = self.begin("list_spaces")?;
        Ok(inner.spaces.get(&account.id).cloned().unwrap_or_default())
    }

    async fn create_space(&self, account: &Account, name: &str) -> Result<Space> {
        let mut inner = self.begin("create_space")?;

        let space = Space {
            id: SpaceId::new(format!("space-{}", Uuid::new_v4())),
            name: name.to_string(),
        };
        inner
            .spaces
            .entry(account.id.clone())
            .or_default()
            .push(space.clone());
        Ok(space)
    }

    async fn delete_space(&self, account: &Account, space_id: &SpaceId) -> Result<()> {
        let mut inner = self.begin("delete_space")?;
        let inner = &mut *inner;

        let spaces = inner.spaces.entry(account.id.clone()).or_default();
        let before = spaces.len();
        spaces.retain(|s| &s.id != space_id);
        if spaces.len() == before {
            return Err(CustodyError::Rejected {
                status: 404,
                message: format!("space not found: {space_id}"),
            });
        }

        inner.contents.remove(space_id);
        Ok(())
    }

    async fn list_contents(&self, _account: &Account, space_id: &SpaceId) -> Result<Vec<Content>> {
        let inner = self.begin("list_contents")?;
        Ok(inner.contents.get(space_id).cloned().unwrap_or_default())
    }

    async fn upload_content(
        &self,
        _account: &Account,
        space_id: &SpaceId,
        upload: UploadRequest,
    ) -> Result<Content> {
        let mut inner = self.begin("upload_content")?;

        let id = ContentId::new(format!("content-{}", Uuid::new_v4()));
        let content = Content {
            cid: Some(format!("mockcid-{id}")),
            size: Some(upload.size()),
            media_type: upload.media_type.clone(),
            name: upload.name.clone(),
            id,
        };
        inner
            .contents
            .entry(space_id.clone())
            .or_default()
            .push(content.clone());
        Ok(content)
    }

    async fn delete_content(
        &self,
        _account: &Account,
        space_id: &SpaceId,
        content_id: &ContentId,
    ) -> Result<()> {
        let mut inner = self.begin("delete_content")?;

        let contents = inner.contents.entry(space_id.clone()).or_default();
        let before = contents.len();
        contents.retain(|c| &c.id != content_id);
        if contents.len() == before {
            return Err(CustodyError::Rejected {
                status: 404,
                message: format!("content not found: {content_id}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_is_idempotent_per_email() {
        let mock = MockCustody::new();

        let first = mock.authenticate("a@x.com").await.unwrap();
        let second = mock.authenticate("a@x.com").await.unwrap();
        assert_eq!(first.id, second.id);

        let other = mock.authenticate("b@x.com").await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_space_lifecycle() {
        let mock = MockCustody::new();
        let account = mock.authenticate("a@x.com").await.unwrap();

        let space = mock.create_space(&account, "Team").await.unwrap();
        assert_eq!(space.name, "Team");

        let spaces = mock.list_spaces(&account).await.unwrap();
        assert_eq!(spaces.len(), 1);

        mock.delete_space(&account, &space.id).await.unwrap();
        assert!(mock.list_spaces(&account).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_space_rejected() {
        let mock = MockCustody::new();
        let account = mock.authenticate("a@x.com").await.unwrap();

        let err = mock
            .delete_space(&account, &SpaceId::new("space-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustodyError::Rejected { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_upload_echoes_metadata() {
        let mock = MockCustody::new();
        let account = mock.authenticate("a@x.com").await.unwrap();
        let space = mock.create_space(&account, "Team").await.unwrap();

        let upload = UploadRequest::new("doc.txt", &b"0123456789"[..])
            .with_media_type("text/plain");
        let content = mock.upload_content(&account, &space.id, upload).await.unwrap();

        assert_eq!(content.name, "doc.txt");
        assert_eq!(content.size, Some(10));
        assert_eq!(content.media_type.as_deref(), Some("text/plain"));
        assert!(content.cid.is_some());
    }

    #[tokio::test]
    async fn test_fail_next_fails_exactly_once() {
        let mock = MockCustody::new();
        mock.fail_next("provider offline");

        let err = mock.authenticate("a@x.com").await.unwrap_err();
        assert_eq!(err.to_string(), "provider offline");

        // Next call goes through.
        mock.authenticate("a@x.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_call_log_records_order() {
        let mock = MockCustody::new();
        let account = mock.authenticate("a@x.com").await.unwrap();
        let _ = mock.list_spaces(&account).await.unwrap();

        assert_eq!(mock.calls(), vec!["authenticate", "list_spaces"]);
    }
}
