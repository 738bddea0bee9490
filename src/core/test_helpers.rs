//! Shared test utilities for core module tests
//!
//! Provides common test helpers to avoid duplication across test suites.
//! This module is only compiled in test mode.

use std::sync::{Mutex, MutexGuard};

/// Mutex for tests that need exclusive access to environment variables.
///
/// Use this when your test needs to:
/// 1. Temporarily change env vars to different values
/// 2. Restore env vars after the test
/// 3. Test behavior when env vars are absent
///
/// For tests that just need an isolated data directory, use
/// `scratch_data_dir()` instead - it takes the lock for you.
pub static ENV_VAR_MUTEX: Mutex<()> = Mutex::new(());

/// Points the application data directory at a fresh temp directory.
///
/// Holds the env-var mutex for the duration of the returned guard so tests
/// redirecting `PARCHMENT_DATA_DIR` never race each other. Keep both values
/// alive for the whole test:
///
/// ```ignore
/// let (_guard, _temp) = scratch_data_dir();
/// // ... everything below reads and writes under the temp dir ...
/// ```
pub fn scratch_data_dir() -> (MutexGuard<'static, ()>, tempfile::TempDir) {
    let guard = match ENV_VAR_MUTEX.lock() {
        Ok(guard) => guard,
        // A previous test panicking while holding the lock doesn't invalidate
        // the environment; take the guard anyway.
        Err(poisoned) => poisoned.into_inner(),
    };
    let temp = tempfile::tempdir().expect("Failed to create temp data dir");
    // SAFETY: the mutex guarantees no concurrent env mutation from other
    // tests using these helpers.
    unsafe {
        std::env::set_var("PARCHMENT_DATA_DIR", temp.path());
        std::env::set_var("PARCHMENT_STATE_DIR", temp.path().join("state"));
    }
    (guard, temp)
}
