//! The session store: every state transition of the client lives here.
//!
//! Operations follow a fixed shape: take the lock for the synchronous part
//! of the transition, release it across the provider await, then re-lock and
//! apply the result to the latest state.  The lock is never held across an
//! await, so concurrent operations interleave at the provider boundary
//! exactly as the UI event loop would.
//!
//! Error policy: write-type operations (login, switch, create, delete,
//! upload) record the message in the shared error slot *and* return `Err`;
//! read-type operations (the `fetch_*` pair) record and swallow.  Every
//! external call is attempted exactly once; there is no retry, timeout, or
//! cancellation here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use pinwell_custody::ContentCustody;
use pinwell_shared::constants::MAX_UPLOAD_SIZE;
use pinwell_shared::{Account, AccountId, Content, ContentId, Space, SpaceId, UploadRequest};
use pinwell_store::SnapshotStore;

use crate::error::{Result, SessionError};
use crate::state::SessionState;

/// Session state container.
///
/// Built once at the application root with an injected custody provider and
/// snapshot store, then shared by reference.  Every mutation of the
/// persisted subset rewrites the snapshot through the adapter.
pub struct SessionStore {
    state: Mutex<SessionState>,
    custody: Arc<dyn ContentCustody>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl SessionStore {
    /// Build the store, restoring the persisted subset from the snapshot
    /// store (or starting from defaults when nothing was ever saved).
    pub fn open(
        custody: Arc<dyn ContentCustody>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Result<Self> {
        let snapshot = snapshots.load()?.unwrap_or_default();
        let state = SessionState::from_snapshot(snapshot);

        info!(
            authenticated = state.is_authenticated,
            accounts = state.accounts.len(),
            "session store opened"
        );

        Ok(Self {
            state: Mutex::new(state),
            custody,
            snapshots,
        })
    }

    /// Current state snapshot.  Clones, so the caller never observes a
    /// half-applied transition.
    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    // A poisoned lock means a panic elsewhere already aborted that
    // operation; the state itself is still consistent transition-wise.
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrite the persisted snapshot from the given state.  A write failure
    /// does not roll back the in-memory transition.
    fn persist(&self, state: &SessionState) {
        if let Err(e) = self.snapshots.save(&state.snapshot()) {
            warn!(error = %e, "failed to persist session snapshot");
        }
    }

    /// Clone the current account, recording `NoAccount` when there is none.
    fn require_account(&self) -> Result<Account> {
        let mut state = self.lock();
        match state.current_account.clone() {
            Some(account) => Ok(account),
            None => {
                let err = SessionError::NoAccount;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // -- authentication -----------------------------------------------------

    /// Authenticate an email handle with the custody provider.
    ///
    /// On success the resulting account becomes current and is added to the
    /// known-accounts list unless an entry with the same id already exists.
    pub async fn login(&self, email: &str) -> Result<Account> {
        let email = email.trim();
        if email.is_empty() {
            let err = SessionError::EmptyEmail;
            self.lock().error = Some(err.to_string());
            return Err(err);
        }

        {
            let mut state = self.lock();
            state.is_authenticating = true;
            state.error = None;
        }

        let result = self.custody.authenticate(email).await;

        let mut state = self.lock();
        state.is_authenticating = false;

        match result {
            Ok(account) => {
                state.current_account = Some(account.clone());
                state.is_authenticated = true;
                if !state.accounts.iter().any(|a| a.id == account.id) {
                    state.accounts.push(account.clone());
                }
                self.persist(&state);

                info!(account_id = %account.id, email = %account.email, "logged in");
                Ok(account)
            }
            Err(e) => {
                let err = SessionError::from(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the active identity and everything scoped to it.
    ///
    /// The account stays in the known-accounts list for future switch-in.
    pub fn logout(&self) {
        let mut state = self.lock();
        state.current_account = None;
        state.is_authenticated = false;
        state.clear_account_context();
        self.persist(&state);

        info!("logged out");
    }

    /// Make a known account current and refresh its spaces.
    ///
    /// An unknown id records an error and changes nothing.  The cascaded
    /// space refresh handles its own failures; they never fail the switch.
    pub async fn switch_account(&self, account_id: &AccountId) -> Result<()> {
        {
            let mut state = self.lock();
            let Some(account) = state
                .accounts
                .iter()
                .find(|a| &a.id == account_id)
                .cloned()
            else {
                let err = SessionError::AccountNotFound(account_id.clone());
                state.error = Some(err.to_string());
                return Err(err);
            };

            state.current_account = Some(account);
            state.is_authenticated = true;
            state.clear_account_context();
            self.persist(&state);
        }

        info!(account_id = %account_id, "switched account");

        self.fetch_spaces().await;
        Ok(())
    }

    /// Insert an account into the known list; a duplicate id is a no-op.
    /// No authentication side effect.
    pub fn add_account(&self, account: Account) {
        let mut state = self.lock();
        if state.accounts.iter().any(|a| a.id == account.id) {
            debug!(account_id = %account.id, "account already known");
            return;
        }
        state.accounts.push(account);
        self.persist(&state);
    }

    /// Remove an account from the known list.  Removing the current account
    /// is an implicit logout.
    pub fn remove_account(&self, account_id: &AccountId) {
        let mut state = self.lock();
        state.accounts.retain(|a| &a.id != account_id);

        if state
            .current_account
            .as_ref()
            .is_some_and(|a| &a.id == account_id)
        {
            state.current_account = None;
            state.is_authenticated = false;
            state.clear_account_context();
            info!(account_id = %account_id, "removed current account");
        }

        self.persist(&state);
    }

    // -- spaces -------------------------------------------------------------

    /// Replace the space list with a fresh listing for the current account.
    ///
    /// Failures (including a missing account) are recorded in the error
    /// slot; the prior list is left untouched.
    pub async fn fetch_spaces(&self) {
        let account = {
            let mut state = self.lock();
            match state.current_account.clone() {
                Some(account) => {
                    state.is_loading_spaces = true;
                    account
                }
                None => {
                    state.error = Some(SessionError::NoAccount.to_string());
                    return;
                }
            }
        };

        let result = self.custody.list_spaces(&account).await;

        let mut state = self.lock();
        state.is_loading_spaces = false;
        match result {
            Ok(spaces) => {
                debug!(count = spaces.len(), "fetched spaces");
                state.spaces = spaces;
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    /// Create a named space under the current account and append it to the
    /// space list.
    pub async fn create_space(&self, name: &str) -> Result<Space> {
        let account = self.require_account()?;

        self.lock().is_loading_spaces = true;

        let result = self.custody.create_space(&account, name).await;

        let mut state = self.lock();
        state.is_loading_spaces = false;
        match result {
            Ok(space) => {
                state.spaces.push(space.clone());
                info!(space_id = %space.id, name = %space.name, "created space");
                Ok(space)
            }
            Err(e) => {
                let err = SessionError::from(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a space.  On success the space entry and its content listing
    /// are purged, and the selection is cleared if it pointed there.
    pub async fn delete_space(&self, space_id: &SpaceId) -> Result<()> {
        let account = self.require_account()?;

        self.lock().is_loading_spaces = true;

        let result = self.custody.delete_space(&account, space_id).await;

        let mut state = self.lock();
        state.is_loading_spaces = false;
        match result {
            Ok(()) => {
                state.spaces.retain(|s| &s.id != space_id);
                state.space_contents.remove(space_id);
                if state
                    .selected_space
                    .as_ref()
                    .is_some_and(|s| &s.id == space_id)
                {
                    state.selected_space = None;
                    self.persist(&state);
                }
                info!(space_id = %space_id, "deleted space");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::from(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Change the selection, then refresh the selected space's contents.
    ///
    /// The cascaded fetch captures its own failure; nothing propagates to
    /// the selector.
    pub async fn select_space(&self, space: Option<Space>) {
        let fetch_id = {
            let mut state = self.lock();
            state.selected_space = space.clone();
            self.persist(&state);
            space.map(|s| s.id)
        };

        if let Some(space_id) = fetch_id {
            self.fetch_space_contents(&space_id).await;
        }
    }

    // -- contents -----------------------------------------------------------

    /// Replace the content listing for one space.  Failures are recorded;
    /// the prior listing for that space is left untouched.
    pub async fn fetch_space_contents(&self, space_id: &SpaceId) {
        let account = {
            let mut state = self.lock();
            match state.current_account.clone() {
                Some(account) => {
                    state.is_loading_contents = true;
                    account
                }
                None => {
                    state.error = Some(SessionError::NoAccount.to_string());
                    return;
                }
            }
        };

        let result = self.custody.list_contents(&account, space_id).await;

        let mut state = self.lock();
        state.is_loading_contents = false;
        match result {
            Ok(contents) => {
                debug!(space_id = %space_id, count = contents.len(), "fetched contents");
                state.space_contents.insert(space_id.clone(), contents);
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    /// Upload a payload into a space and append the resulting content record
    /// to that space's listing.
    ///
    /// Empty and oversized payloads are rejected before any provider call.
    pub async fn upload_to_space(
        &self,
        space_id: &SpaceId,
        upload: UploadRequest,
    ) -> Result<Content> {
        if upload.data.is_empty() {
            let err = SessionError::EmptyUpload;
            self.lock().error = Some(err.to_string());
            return Err(err);
        }
        if upload.data.len() > MAX_UPLOAD_SIZE {
            let err = SessionError::UploadTooLarge {
                size: upload.data.len(),
                max: MAX_UPLOAD_SIZE,
            };
            self.lock().error = Some(err.to_string());
            return Err(err);
        }

        let account = self.require_account()?;

        self.lock().is_loading_contents = true;

        let result = self.custody.upload_content(&account, space_id, upload).await;

        let mut state = self.lock();
        state.is_loading_contents = false;
        match result {
            Ok(content) => {
                state
                    .space_contents
                    .entry(space_id.clone())
                    .or_default()
                    .push(content.clone());
                info!(
                    space_id = %space_id,
                    content_id = %content.id,
                    name = %content.name,
                    "uploaded content"
                );
                Ok(content)
            }
            Err(e) => {
                let err = SessionError::from(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete one content item from a space's listing.
    pub async fn delete_from_space(
        &self,
        space_id: &SpaceId,
        content_id: &ContentId,
    ) -> Result<()> {
        let account = self.require_account()?;

        self.lock().is_loading_contents = true;

        let result = self
            .custody
            .delete_content(&account, space_id, content_id)
            .await;

        let mut state = self.lock();
        state.is_loading_contents = false;
        match result {
            Ok(()) => {
                if let Some(contents) = state.space_contents.get_mut(space_id) {
                    contents.retain(|c| &c.id != content_id);
                }
                info!(space_id = %space_id, content_id = %content_id, "deleted content");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::from(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // -- utility ------------------------------------------------------------

    /// Clear the shared error slot only.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Restore the entire store, including the persisted subset, to its
    /// default empty state.
    pub fn reset(&self) {
        let mut state = self.lock();
        *state = SessionState::default();
        self.persist(&state);

        info!("session reset to defaults");
    }
}
