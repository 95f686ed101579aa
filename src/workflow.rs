//! Download orchestration: resolution, idempotence check, backup
//! prompting, transfer, and marker persistence.

use std::fs;
use std::path::PathBuf;

use crate::api::ReleaseApi;
use crate::config::{AppConfig, DEFAULT_BACKUP_NAME};
use crate::error::UpdateError;
use crate::ledger::InstallLedger;
use crate::resolver::{ResolvedRelease, Resolver};

/// Sub-state for the interactive backup prompt. `Normal` is both the
/// initial and the resting state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Normal,
    BackupPrompt,
    BackupInput,
}

#[derive(Debug)]
pub enum RunOutcome {
    Success(ResolvedRelease),
    /// The marker already names the resolved build; nothing was written.
    AlreadyCurrent(ResolvedRelease),
    /// An artifact occupies the download path. The caller must resolve
    /// the backup prompt before the download can happen.
    BackupRequired,
    Failed(UpdateError),
}

pub struct DownloadWorkflow<A> {
    resolver: Resolver<A>,
    ledger: InstallLedger,
    config: AppConfig,
    state: WorkflowState,
    retries: u32,
    persist_warning: Option<String>,
}

impl<A: ReleaseApi> DownloadWorkflow<A> {
    pub fn new(config: AppConfig, resolver: Resolver<A>, ledger: InstallLedger) -> Self {
        Self {
            resolver,
            ledger,
            config,
            state: WorkflowState::Normal,
            retries: 0,
            persist_warning: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// User-initiated retries since this workflow was constructed.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Set when the download completed but the marker or log could not be
    /// written. The download still counts; the inconsistency is surfaced.
    pub fn persist_warning(&self) -> Option<&str> {
        self.persist_warning.as_deref()
    }

    /// One full update pass. Resolution always starts from scratch, so a
    /// retry picks up builds published since the previous attempt.
    pub fn run(&mut self) -> RunOutcome {
        self.state = WorkflowState::Normal;
        self.persist_warning = None;

        let release = match self.resolver.resolve_latest() {
            Ok(release) => release,
            Err(err) => return RunOutcome::Failed(err),
        };

        match self.ledger.last_installed() {
            Ok(last) if last == release.identifier() => {
                return RunOutcome::AlreadyCurrent(release);
            }
            Ok(_) => {}
            Err(err) => return RunOutcome::Failed(err),
        }

        if self.config.artifact_path.exists() {
            self.log(&format!(
                "{} already exists, prompting for backup",
                self.config.artifact_path.display()
            ));
            self.state = WorkflowState::BackupPrompt;
            return RunOutcome::BackupRequired;
        }

        self.log(&format!("downloading {}", release.identifier()));
        let url = self.resolver.download_url(&release);
        if let Err(err) = self
            .resolver
            .api()
            .download(&url, &self.config.artifact_path)
        {
            self.log(&format!(
                "download of {} failed: {err}",
                release.identifier()
            ));
            return RunOutcome::Failed(err);
        }

        // The artifact is on disk at this point. A marker write failure is
        // reported but does not undo the download.
        if let Err(err) = self.ledger.save_installed(release.identifier()) {
            self.persist_warning = Some(err.to_string());
        }
        self.log(&format!("download of {} complete", release.identifier()));
        RunOutcome::Success(release)
    }

    pub fn retry(&mut self) -> RunOutcome {
        self.retries += 1;
        self.run()
    }

    /// `BackupPrompt` -> `BackupInput`.
    pub fn accept_backup(&mut self) {
        self.state = WorkflowState::BackupInput;
    }

    /// Declining leaves the existing artifact untouched and abandons the
    /// whole cycle; the caller navigates away and must re-trigger.
    pub fn decline_backup(&mut self) {
        self.log("backup declined, update cancelled");
        self.state = WorkflowState::Normal;
    }

    /// `BackupInput` -> `BackupPrompt`.
    pub fn cancel_backup_input(&mut self) {
        self.state = WorkflowState::BackupPrompt;
    }

    /// Renames the existing artifact to `filename` (default backup name
    /// when blank), then re-runs the update against the freed path.
    pub fn confirm_backup(&mut self, filename: &str) -> RunOutcome {
        let filename = filename.trim();
        let filename = if filename.is_empty() {
            DEFAULT_BACKUP_NAME
        } else {
            filename
        };
        let target = match self.config.artifact_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(filename),
            _ => PathBuf::from(filename),
        };

        if let Err(source) = fs::rename(&self.config.artifact_path, &target) {
            self.state = WorkflowState::Normal;
            return RunOutcome::Failed(UpdateError::Backup {
                path: self.config.artifact_path.clone(),
                source,
            });
        }
        self.log(&format!(
            "backed up {} as {}",
            self.config.artifact_path.display(),
            target.display()
        ));
        self.run()
    }

    fn log(&self, message: &str) {
        // Ledger failures must not abort an update in flight.
        self.ledger.append(message).ok();
    }
}
