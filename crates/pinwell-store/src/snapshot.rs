//! Persisted session snapshot and the [`SnapshotStore`] adapter.
//!
//! Only a subset of session state survives a restart: the current account,
//! the authenticated flag, the known-accounts list, and the selected space.
//! Loading flags and the error slot are transient by design and never
//! persisted.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use pinwell_shared::constants::SNAPSHOT_ROW_ID;
use pinwell_shared::{Account, Space};

use crate::database::Database;
use crate::error::Result;

/// The durable subset of session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_account: Option<Account>,
    pub is_authenticated: bool,
    pub accounts: Vec<Account>,
    pub selected_space: Option<Space>,
}

/// Persistence adapter for the session snapshot.
///
/// The session layer talks to this trait only, so tests can swap in
/// [`MemorySnapshots`] and production uses [`SqliteSnapshots`].
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}

impl Database {
    /// Read the snapshot row, if present.
    pub fn load_snapshot(&self) -> Result<Option<SessionSnapshot>> {
        let row: Option<String> = self
            .conn()
            .query_row(
                "SELECT json FROM session_snapshot WHERE id = ?1",
                params![SNAPSHOT_ROW_ID],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        match row {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the snapshot row.
    pub fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO session_snapshot (id, json, updated_at)
             VALUES (?1, ?2, ?3)",
            params![SNAPSHOT_ROW_ID, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// SQLite-backed [`SnapshotStore`].
///
/// `rusqlite::Connection` is not `Sync`, so the handle lives behind a mutex;
/// snapshot reads and writes are short single-row operations.
pub struct SqliteSnapshots {
    db: Mutex<Database>,
}

impl SqliteSnapshots {
    /// Open the default application database.
    pub fn new() -> Result<Self> {
        Ok(Self {
            db: Mutex::new(Database::new()?),
        })
    }

    /// Open a database at an explicit path (tests, custom layouts).
    pub fn open_at(path: &Path) -> Result<Self> {
        Ok(Self {
            db: Mutex::new(Database::open_at(path)?),
        })
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStore for SqliteSnapshots {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        self.db().load_snapshot()
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        tracing::debug!(
            accounts = snapshot.accounts.len(),
            authenticated = snapshot.is_authenticated,
            "persisting session snapshot"
        );
        self.db().save_snapshot(snapshot)
    }
}

/// In-memory [`SnapshotStore`] for tests.
#[derive(Default)]
pub struct MemorySnapshots {
    slot: Mutex<Option<SessionSnapshot>>,
}

impl MemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshots {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinwell_shared::{AccountId, SpaceId};

    fn sample_snapshot() -> SessionSnapshot {
        let account = Account {
            id: AccountId::new("acct-1"),
            email: "a@x.com".into(),
        };
        SessionSnapshot {
            current_account: Some(account.clone()),
            is_authenticated: true,
            accounts: vec![account],
            selected_space: Some(Space {
                id: SpaceId::new("space-1"),
                name: "Team".into(),
            }),
        }
    }

    #[test]
    fn load_before_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteSnapshots::open_at(&dir.path().join("test.db")).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let snapshot = sample_snapshot();

        {
            let store = SqliteSnapshots::open_at(&path).unwrap();
            store.save(&snapshot).unwrap();
        }

        // Re-open to prove the data survived the handle.
        let store = SqliteSnapshots::open_at(&path).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteSnapshots::open_at(&dir.path().join("test.db")).unwrap();

        store.save(&sample_snapshot()).unwrap();
        store.save(&SessionSnapshot::default()).unwrap();

        assert_eq!(store.load().unwrap(), Some(SessionSnapshot::default()));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySnapshots::new();
        assert_eq!(store.load().unwrap(), None);

        let snapshot = sample_snapshot();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }
}
