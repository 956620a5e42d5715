//! # pinwell-store
//!
//! Durable storage for the Pinwell session.
//!
//! The persisted subset of session state (current account, authenticated
//! flag, known accounts, selected space) is written as a single JSON blob
//! under a fixed key, rewritten on every mutation.  The crate exposes a
//! synchronous `Database` handle wrapping a `rusqlite::Connection`, plus the
//! [`SnapshotStore`] adapter trait so the session layer never depends on
//! SQLite directly.

pub mod database;
pub mod migrations;
pub mod snapshot;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use snapshot::{MemorySnapshots, SessionSnapshot, SnapshotStore, SqliteSnapshots};
