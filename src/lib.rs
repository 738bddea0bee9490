//! Parchment host layer
//!
//! The bridge between the Parchment reader UI and host-runtime services:
//! executable lookup, text decoding, file manipulation, profile storage and
//! purge flows, preferences, and application lifecycle.
//!
//! # Architecture
//!
//! - [`core`] - Lookup, decoding, file operations, profiles, history, purge
//! - [`config`] - Preference persistence
//! - [`host`] - Capability traits the reader shell injects (dialogs, lifecycle)
//! - [`session`] - Per-run state and the restart/quit/close flows
//! - [`utils`] - Storage directory resolution (XDG)
//!
//! # Design Notes
//!
//! - Host capabilities are statically-typed traits injected at construction,
//!   not a runtime service lookup
//! - Absence ("not found") is an `Option`/normal outcome, never an error
//! - Malformed decoder input is a reported error, never a silent mis-decode

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;
pub mod host;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use core::decode::{DecodeError, decode_url, decode_utf8};
pub use core::error::{Error, Result};
pub use core::lookup::{PathStyle, SearchPath, locate, which};
pub use core::profile::Profile;
