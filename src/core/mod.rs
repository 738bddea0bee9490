//! Core host-layer functionality
//!
//! This module contains the routines the reader UI delegates host concerns to.
//! It provides:
//!
//! - [`lookup`]: Executable lookup on a delimited search path
//! - [`decode`]: URL and UTF-8 text decoding
//! - [`fsops`]: Thin file-system operations (existence, move, atomic write)
//! - [`profile`]: Reader profile storage and lifecycle
//! - [`history`]: Per-profile visit history log
//! - [`purge`]: Cache/history/cookie eviction flows
//! - [`error`]: Error types for host operations

pub mod decode;
pub mod error;
pub mod fsops;
pub mod history;
pub mod lookup;
pub mod profile;
pub mod purge;

#[cfg(test)]
pub mod test_helpers;
