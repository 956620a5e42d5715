//! Session state observed by the UI layer.
//!
//! [`SessionState`] is the unit of visibility: the store hands out clones,
//! so observers never see a half-applied transition.

use std::collections::HashMap;

use pinwell_shared::{Account, Content, Space, SpaceId};
use pinwell_store::SessionSnapshot;

/// Complete session state.
///
/// The persisted subset is {`current_account`, `is_authenticated`,
/// `accounts`, `selected_space`}; everything else is transient and resets
/// to defaults on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The active identity, if authenticated.
    pub current_account: Option<Account>,

    /// Always equal to `current_account.is_some()` after every operation.
    pub is_authenticated: bool,

    /// Every identity that has logged in or been added, available for
    /// switching.  Unique by account id.
    pub accounts: Vec<Account>,

    /// Spaces of the current account, as of the last listing.
    pub spaces: Vec<Space>,

    /// The space the UI is focused on, if any.
    pub selected_space: Option<Space>,

    /// Content listings keyed by space id; independent per-space lists.
    pub space_contents: HashMap<SpaceId, Vec<Content>>,

    /// In-flight flag for authentication calls.
    pub is_authenticating: bool,

    /// In-flight flag for space listing/creation/deletion calls.
    pub is_loading_spaces: bool,

    /// In-flight flag for content listing/upload/deletion calls.
    pub is_loading_contents: bool,

    /// Last error message, shared across all operation classes.  Newest
    /// failure wins; cleared by `clear_error` or at the start of a login.
    pub error: Option<String>,
}

impl SessionState {
    /// Rebuild state from a persisted snapshot.  Transient fields start at
    /// their defaults.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            current_account: snapshot.current_account,
            is_authenticated: snapshot.is_authenticated,
            accounts: snapshot.accounts,
            selected_space: snapshot.selected_space,
            ..Self::default()
        }
    }

    /// Extract the persisted subset.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_account: self.current_account.clone(),
            is_authenticated: self.is_authenticated,
            accounts: self.accounts.clone(),
            selected_space: self.selected_space.clone(),
        }
    }

    /// Contents of a space, or an empty slice if never fetched.
    pub fn contents(&self, space_id: &SpaceId) -> &[Content] {
        self.space_contents
            .get(space_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drop everything scoped to the current account: spaces, contents, and
    /// the selection.  Used on logout and account switch.
    pub(crate) fn clear_account_context(&mut self) {
        self.spaces.clear();
        self.selected_space = None;
        self.space_contents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinwell_shared::AccountId;

    #[test]
    fn from_snapshot_resets_transient_fields() {
        let account = Account {
            id: AccountId::new("acct-1"),
            email: "a@x.com".into(),
        };
        let snapshot = SessionSnapshot {
            current_account: Some(account.clone()),
            is_authenticated: true,
            accounts: vec![account],
            selected_space: None,
        };

        let state = SessionState::from_snapshot(snapshot.clone());
        assert!(state.is_authenticated);
        assert!(state.spaces.is_empty());
        assert!(state.space_contents.is_empty());
        assert!(!state.is_authenticating);
        assert!(!state.is_loading_spaces);
        assert!(!state.is_loading_contents);
        assert!(state.error.is_none());

        // And the snapshot round-trips.
        assert_eq!(state.snapshot(), snapshot);
    }

    #[test]
    fn contents_defaults_to_empty() {
        let state = SessionState::default();
        assert!(state.contents(&SpaceId::new("space-1")).is_empty());
    }
}
