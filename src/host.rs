//! Host capability interfaces
//!
//! The reader shell injects these at construction time: dialog presentation
//! and process lifecycle are the two things the host layer needs from its
//! embedder but cannot own. Each is a small trait with a concrete default
//! where one makes sense, so the session flows stay testable with scripted
//! implementations.

use crate::core::error::{Error, Result};

/// How the application should go down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    /// Exit without coming back
    Quit,
    /// Exit and hand over to a fresh instance of the same executable
    Restart,
}

/// A confirmation put in front of the user
#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    /// Label of the "don't ask me again" checkbox, when the dialog offers one
    pub remember_label: Option<String>,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            remember_label: None,
        }
    }

    pub fn with_remember_label(mut self, label: impl Into<String>) -> Self {
        self.remember_label = Some(label.into());
        self
    }
}

/// What came back from a confirmation dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmOutcome {
    pub accepted: bool,
    /// The "don't ask me again" checkbox was ticked
    pub dont_ask_again: bool,
}

/// Dialog presentation capability, implemented by the reader shell
pub trait DialogHost {
    fn confirm(&self, request: &ConfirmRequest) -> ConfirmOutcome;
}

/// Dialog host for headless contexts: accepts everything, never remembers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDialogs;

impl DialogHost for SilentDialogs {
    fn confirm(&self, _request: &ConfirmRequest) -> ConfirmOutcome {
        ConfirmOutcome {
            accepted: true,
            dont_ask_again: false,
        }
    }
}

/// Process lifecycle capability
///
/// `begin_shutdown` performs any preparation the shutdown kind needs (for a
/// restart, spawning the replacement process) and returns. Actually exiting
/// stays with the caller, which still owns an event loop to unwind.
pub trait LifecycleHost {
    fn begin_shutdown(&self, kind: ShutdownKind) -> Result<()>;
}

/// Lifecycle host backed by the current process: restart re-executes the
/// running binary with the arguments it was started with.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLifecycle;

impl LifecycleHost for ProcessLifecycle {
    fn begin_shutdown(&self, kind: ShutdownKind) -> Result<()> {
        if kind == ShutdownKind::Restart {
            let exe = std::env::current_exe()?;
            let args: Vec<String> = std::env::args().skip(1).collect();

            std::process::Command::new(&exe)
                .args(&args)
                .spawn()
                .map_err(|e| {
                    Error::Shutdown(format!(
                        "failed to spawn replacement process from {}: {e}",
                        exe.display()
                    ))
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_dialogs_accept() {
        let outcome = SilentDialogs.confirm(&ConfirmRequest::new("Confirm", "Proceed?"));
        assert!(outcome.accepted);
        assert!(!outcome.dont_ask_again);
    }

    #[test]
    fn test_confirm_request_builder() {
        let request =
            ConfirmRequest::new("Confirm", "Remove profile?").with_remember_label("Don't ask again");
        assert_eq!(request.remember_label.as_deref(), Some("Don't ask again"));
    }

    #[test]
    fn test_process_lifecycle_quit_is_noop() {
        // Quit needs no preparation; it must not spawn anything or fail
        ProcessLifecycle.begin_shutdown(ShutdownKind::Quit).unwrap();
    }
}
