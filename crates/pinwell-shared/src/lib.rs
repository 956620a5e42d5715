//! # pinwell-shared
//!
//! Domain types shared by every Pinwell crate: identifiers, the
//! account/space/content models, and workspace-wide constants.
//!
//! Identifiers are provider-issued opaque strings; this crate never
//! generates them.

pub mod constants;
pub mod types;

pub use types::*;
