/// Application name
pub const APP_NAME: &str = "Pinwell";

/// Fixed storage key for the persisted session snapshot.
/// The snapshot table holds exactly one row under this id.
pub const SNAPSHOT_ROW_ID: i64 = 1;

/// Maximum upload payload size in bytes (50 MiB)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Default base URL for the content-custody provider
pub const DEFAULT_CUSTODY_URL: &str = "http://127.0.0.1:8080";

/// Default HTTP request timeout for provider calls, in seconds
pub const DEFAULT_CUSTODY_TIMEOUT_SECS: u64 = 30;
