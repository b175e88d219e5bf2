//! Keeps release notes in a local release catalog in sync with the notes
//! published on GitHub releases.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod fetcher;
pub mod github;
pub mod importer;
pub mod matcher;
pub mod models;
pub mod source;
