use crate::io::diagnostics::{Diagnostic, DiagnosticKind};
use crate::io::gateway::PersistenceGateway;
use crate::io::loader::{LoadSource, load_state};
use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use crate::model::checklist::Checklist;
use crate::model::config::EngineConfig;
use crate::ops::checklist_ops::StoreError;
use crate::ops::command::{Applied, Command};
use crate::ops::id::{IdSource, RandomIds};
use crate::parse::{SnapshotError, encode, query_value, serialize_snapshot, share_link};

/// Oldest diagnostics are dropped past this many
const MAX_DIAGNOSTICS: usize = 100;

/// A loaded checklist plus the gateway it is saved through.
///
/// Every successful command is followed by a save. Save failures never touch
/// the in-memory checklist; they are recorded as diagnostics. Only the most
/// recent diagnostics are kept; drain them with [`Session::take_diagnostics`].
pub struct Session<G: PersistenceGateway> {
    checklist: Checklist,
    source: LoadSource,
    gateway: G,
    ids: Box<dyn IdSource>,
    config: EngineConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<G: PersistenceGateway> Session<G> {
    /// Load the initial state (token, then snapshot, then default) with
    /// random ids
    pub fn open(config: EngineConfig, gateway: G, token: Option<&str>) -> Self {
        Session::open_with_ids(config, gateway, Box::new(RandomIds), token)
    }

    pub fn open_with_ids(
        config: EngineConfig,
        gateway: G,
        mut ids: Box<dyn IdSource>,
        token: Option<&str>,
    ) -> Self {
        let loaded = load_state(token, &gateway, &config, ids.as_mut());
        Session {
            checklist: loaded.checklist,
            source: loaded.source,
            gateway,
            ids,
            config,
            diagnostics: loaded.diagnostics,
        }
    }

    /// Open from a page URL (or query string), reading the token from the
    /// configured share parameter
    pub fn open_url(config: EngineConfig, gateway: G, url: &str) -> Self {
        let token = query_value(url, &config.share.param);
        Session::open(config, gateway, token.as_deref())
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn into_checklist(self) -> Checklist {
        self.checklist
    }

    /// Apply a command, then save. A rejected command changes nothing and
    /// is not saved.
    pub fn dispatch(&mut self, command: Command) -> Result<Applied, StoreError> {
        if command == Command::ResetToDefault
            && let Err(e) = self.gateway.remove(&self.config.storage.key)
        {
            tracing::warn!(error = %e, "could not clear persisted snapshot before reset");
        }

        match command.apply(&mut self.checklist, self.ids.as_mut(), &self.config.labels) {
            Ok(applied) => {
                self.save();
                Ok(applied)
            }
            Err(e) => {
                tracing::debug!(command = command.name(), error = %e, "command rejected");
                self.push_diagnostic(Diagnostic::new(
                    DiagnosticKind::CommandRejected,
                    format!("{}: {}", command.name(), e),
                ));
                Err(e)
            }
        }
    }

    /// Persist the current checklist. Returns whether the write succeeded.
    pub fn save(&mut self) -> bool {
        let snapshot = match serialize_snapshot(&self.checklist) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report_save_failure(e.to_string(), String::new());
                return false;
            }
        };
        match self.gateway.write(&self.config.storage.key, &snapshot) {
            Ok(()) => true,
            Err(e) => {
                self.report_save_failure(e.to_string(), snapshot);
                false
            }
        }
    }

    /// Share token for the current state
    pub fn share_token(&self) -> Result<String, SnapshotError> {
        encode(&self.checklist)
    }

    /// `base_url` with the current state attached under the share parameter
    pub fn share_link(&self, base_url: &str) -> Result<String, SnapshotError> {
        let token = self.share_token()?;
        Ok(share_link(base_url, &self.config.share.param, &token))
    }

    fn report_save_failure(&mut self, error: String, snapshot: String) {
        tracing::warn!(key = %self.config.storage.key, error = %error, "failed to save checklist");
        if let Some(path) = &self.config.recovery.log {
            log_recovery(
                path,
                &RecoveryEntry::now(RecoveryCategory::Write, "snapshot not saved", snapshot)
                    .with_field("Key", self.config.storage.key.clone())
                    .with_field("Error", error.clone()),
            );
        }
        self.push_diagnostic(Diagnostic::new(DiagnosticKind::SaveFailed, error));
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            let excess = self.diagnostics.len() + 1 - MAX_DIAGNOSTICS;
            self.diagnostics.drain(..excess);
        }
        self.diagnostics.push(diagnostic);
    }
}
