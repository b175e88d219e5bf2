//! Domain models for release-notes-sync.
//!
//! # Core Concepts
//!
//! ## Catalog Entities
//!
//! Owned and persisted by the release catalog; the sync engine only reads them
//! for the duration of one pass.
//!
//! - [`ReleaseSource`]: One upstream release origin, e.g. `github.com/owner/repo`.
//! - [`LocalVersionRecord`]: A release version tracked under a source.
//! - [`NoteRecord`]: The note text stored for a version.
//!
//! ## Transient Entities
//!
//! Rebuilt on every run and never persisted:
//!
//! - [`RemoteRepoRef`]: Structured GitHub repository reference for a source.
//! - [`RemoteRelease`]: One release as published on GitHub.
//! - [`ReleasePage`]: One page of the releases listing plus the rate window.

mod release;
mod source;
mod version;

pub use release::*;
pub use source::*;
pub use version::*;
