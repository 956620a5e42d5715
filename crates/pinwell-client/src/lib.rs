//! # pinwell-client
//!
//! Client-side session management for the Pinwell content-pinning service:
//! authentication, multi-account switching, per-account spaces, and
//! per-space content, with a persisted session snapshot.
//!
//! The [`SessionStore`] is an explicit, constructor-injected state
//! container: the application root builds it once with a custody provider
//! and a snapshot store, then shares it by reference.  All mutations go
//! through its operations; observers read cloned state snapshots.

pub mod error;
pub mod session;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use error::SessionError;
pub use session::SessionStore;
pub use state::SessionState;

/// Install the global tracing subscriber.
///
/// Call once from the application entry point.  `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("pinwell_client=debug,pinwell_custody=debug,pinwell_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
