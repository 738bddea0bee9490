//! Session state and application lifecycle flows
//!
//! One [`Session`] lives for the duration of a reader run and is owned by the
//! shell, not by this crate. It carries the state the lifecycle decisions
//! consult: the one-shot sidebar notice, how much background work is still in
//! flight, and session-scoped overrides of the close-time purge preferences.
//!
//! The restart/quit/close flows take their capabilities ([`DialogHost`],
//! [`LifecycleHost`]) as arguments, so headless callers and tests can script
//! them.

use crate::config::{self, AppConfig};
use crate::core::error::Result;
use crate::core::profile::{self, Profile};
use crate::core::purge::{self, PurgeReport};
use crate::host::{ConfirmRequest, DialogHost, LifecycleHost, ShutdownKind};
use tracing::info;

/// Per-run state owned by the reader shell
#[derive(Debug, Default)]
pub struct Session {
    sidebar_notice_shown: bool,
    pending_jobs: usize,
    /// Session-scoped override of [`AppConfig::purge_profile_on_close`]
    pub purge_on_close_override: Option<bool>,
    /// Session-scoped suppression of [`AppConfig::confirm_purge_on_close`]:
    /// `Some(true)` closes without asking this run, `Some(false)` forces the
    /// question even when the preference says not to ask
    pub skip_purge_confirm: Option<bool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a background job (download, index rebuild) started.
    pub fn job_started(&mut self) {
        self.pending_jobs += 1;
    }

    pub fn job_finished(&mut self) {
        self.pending_jobs = self.pending_jobs.saturating_sub(1);
    }

    pub fn has_pending_jobs(&self) -> bool {
        self.pending_jobs > 0
    }

    /// Whether the first-use sidebar notice should be shown right now.
    ///
    /// Only true once per session, and only for live (portable) sessions.
    /// Subsequent calls return false.
    pub fn take_sidebar_notice(&mut self, live_session: bool) -> bool {
        if live_session && !self.sidebar_notice_shown {
            self.sidebar_notice_shown = true;
            return true;
        }
        false
    }

    /// The effective close-time purge decision before any dialog: the session
    /// override when set, the stored preference otherwise.
    pub fn effective_purge_on_close(&self, config: &AppConfig) -> bool {
        self.purge_on_close_override
            .unwrap_or(config.purge_profile_on_close)
    }

    /// Whether the close-time purge still needs a confirmation dialog: the
    /// session suppression when set, the stored preference otherwise.
    pub fn effective_confirm_purge(&self, config: &AppConfig) -> bool {
        self.skip_purge_confirm
            .map_or(config.confirm_purge_on_close, |skip| !skip)
    }
}

/// Startup reconciliation.
///
/// Removes the profile a previous session marked for deletion (failures are
/// logged and swallowed; a stuck stale profile must not block startup),
/// records the current UI locale, and persists the updated preferences.
pub async fn startup(config: &mut AppConfig, locale: &str) -> Result<()> {
    if let Some(name) = config.profile_to_remove.take()
        && !name.is_empty()
    {
        profile::remove_stale_profile(&name).await;
    }

    // Keep the language even if the profile is recreated from scratch later
    config.locale = Some(locale.to_string());
    config::save_config(config).await?;
    Ok(())
}

/// Asks to restart the application.
///
/// Unless `silent`, the user confirms first. On acceptance the preferences
/// are saved and the lifecycle host prepares the restart. Returns whether
/// shutdown is now in progress; the caller exits its event loop when true.
pub async fn request_restart(
    config: &AppConfig,
    dialogs: &dyn DialogHost,
    lifecycle: &dyn LifecycleHost,
    silent: bool,
) -> Result<bool> {
    if !silent {
        let request = ConfirmRequest::new("Restart", "Restart Parchment now?");
        if !dialogs.confirm(&request).accepted {
            return Ok(false);
        }
    }

    config::save_config(config).await?;
    lifecycle.begin_shutdown(ShutdownKind::Restart)?;
    info!("Restart under way");
    Ok(true)
}

/// Asks to quit the application.
///
/// If background work is still running the user confirms aborting it first.
/// On acceptance the preferences are saved and the lifecycle host is told to
/// quit. Returns whether shutdown is now in progress.
pub async fn request_quit(
    session: &Session,
    config: &AppConfig,
    dialogs: &dyn DialogHost,
    lifecycle: &dyn LifecycleHost,
) -> Result<bool> {
    if session.has_pending_jobs() {
        let request = ConfirmRequest::new(
            "Quit",
            "Background work is still running. Abort it and quit?",
        );
        if !dialogs.confirm(&request).accepted {
            return Ok(false);
        }
    }

    config::save_config(config).await?;
    lifecycle.begin_shutdown(ShutdownKind::Quit)?;
    info!("Quit under way");
    Ok(true)
}

/// What the close-time cleanup did
#[derive(Debug, Default)]
pub struct CloseReport {
    /// The profile was purged and its directory removed
    pub purged: bool,
    /// Sweep details when a purge ran
    pub purge: Option<PurgeReport>,
}

/// The on-close cleanup flow for live (portable) sessions.
///
/// Resolves the purge decision from the session override and the stored
/// preference; when the confirm decision (session suppression, then the
/// stored preference) still asks for it, puts the question in front of the
/// user with a remember-choice checkbox whose outcome is written back into
/// the preferences. A positive decision sweeps the profile's stores and
/// removes its directory.
///
/// Installed (non-live) sessions never purge on close.
pub async fn prepare_close(
    session: &Session,
    config: &mut AppConfig,
    dialogs: &dyn DialogHost,
    target: &Profile,
    live_session: bool,
) -> Result<CloseReport> {
    if !live_session {
        return Ok(CloseReport::default());
    }

    let mut do_purge = session.effective_purge_on_close(config);

    if session.effective_confirm_purge(config) {
        let request = ConfirmRequest::new(
            "Confirm",
            "Remove this profile and all reading data before closing?",
        )
        .with_remember_label("Don't ask me again");

        let outcome = dialogs.confirm(&request);
        do_purge = outcome.accepted;

        if outcome.dont_ask_again {
            config.confirm_purge_on_close = false;
            config.purge_profile_on_close = do_purge;
            config::save_config(config).await?;
        }
    }

    if !do_purge {
        return Ok(CloseReport::default());
    }

    info!("Removing profile '{}' on close", target.name());
    let report = purge::purge_all(target).await;
    purge::remove_profile_dir(target).await?;

    Ok(CloseReport {
        purged: true,
        purge: Some(report),
    })
}
