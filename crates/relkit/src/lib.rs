//! # Relkit
//!
//! Typed ingestion of release artifacts: BBCode spec posts, MediaInfo text
//! reports and BitTorrent metainfo files.
//!
//! This crate re-exports [`relkit_core`]; see its documentation for the
//! individual components.
//!
//! ```rust
//! let flags = relkit::ingest::language_flags(["Japanese", "English (SDH)"]).unwrap();
//! assert_eq!(flags.len(), 2);
//! ```
pub use relkit_core::*;
