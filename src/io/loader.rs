use crate::io::diagnostics::{Diagnostic, DiagnosticKind};
use crate::io::gateway::PersistenceGateway;
use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use crate::model::checklist::Checklist;
use crate::model::config::EngineConfig;
use crate::model::defaults::default_checklist;
use crate::ops::id::IdSource;
use crate::parse::{decode, parse_snapshot};

/// Where the initial state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from a share token
    Token,
    /// Read from the persisted snapshot
    Snapshot,
    /// Built-in default dataset
    Default,
}

/// The resolved initial state plus anything that went wrong on the way
#[derive(Debug, Clone)]
pub struct Loaded {
    pub checklist: Checklist,
    pub source: LoadSource,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve the initial checklist: share token, then persisted snapshot, then
/// the default dataset. Failures fall through to the next tier and are
/// reported as diagnostics (and in the recovery log, if configured).
///
/// A token-loaded state is not written back here; it is persisted by the
/// first save.
pub fn load_state(
    token: Option<&str>,
    gateway: &dyn PersistenceGateway,
    config: &EngineConfig,
    ids: &mut dyn IdSource,
) -> Loaded {
    let mut diagnostics = Vec::new();

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        match decode(token) {
            Ok(checklist) => {
                tracing::debug!(categories = checklist.categories.len(), "loaded checklist from share token");
                return Loaded {
                    checklist,
                    source: LoadSource::Token,
                    diagnostics,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to decode share token");
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidToken, e.to_string()));
                record(
                    config,
                    RecoveryEntry::now(RecoveryCategory::Token, "share token rejected", token)
                        .with_field("Error", e.to_string()),
                );
            }
        }
    }

    match gateway.read(&config.storage.key) {
        Ok(Some(stored)) if !stored.is_empty() => match parse_snapshot(&stored) {
            Ok(checklist) => {
                tracing::debug!(key = %config.storage.key, "loaded persisted snapshot");
                return Loaded {
                    checklist,
                    source: LoadSource::Snapshot,
                    diagnostics,
                };
            }
            Err(e) => {
                tracing::warn!(key = %config.storage.key, error = %e, "failed to parse persisted snapshot");
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidSnapshot, e.to_string()));
                record(
                    config,
                    RecoveryEntry::now(RecoveryCategory::Snapshot, "persisted snapshot rejected", stored)
                        .with_field("Key", config.storage.key.clone())
                        .with_field("Error", e.to_string()),
                );
            }
        },
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(key = %config.storage.key, error = %e, "failed to read persisted snapshot");
            diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidSnapshot, e.to_string()));
        }
    }

    tracing::debug!("using default checklist");
    Loaded {
        checklist: default_checklist(ids),
        source: LoadSource::Default,
        diagnostics,
    }
}

fn record(config: &EngineConfig, entry: RecoveryEntry) {
    if let Some(path) = &config.recovery.log {
        log_recovery(path, &entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gateway::MemoryGateway;
    use crate::model::checklist::Category;
    use crate::ops::id::SequentialIds;
    use crate::parse::{encode, serialize_snapshot};
    use pretty_assertions::assert_eq;

    fn one_category(name: &str) -> Checklist {
        Checklist {
            categories: vec![Category::new(format!("{}-id", name), name.to_string())],
            show_optional: false,
        }
    }

    fn gateway_with(config: &EngineConfig, snapshot: &Checklist) -> MemoryGateway {
        let mut gw = MemoryGateway::new();
        gw.write(&config.storage.key, &serialize_snapshot(snapshot).unwrap())
            .unwrap();
        gw
    }

    #[test]
    fn token_beats_snapshot() {
        let config = EngineConfig::default();
        let persisted = one_category("Persisted");
        let shared = one_category("Shared");
        let gw = gateway_with(&config, &persisted);
        let token = encode(&shared).unwrap();

        let loaded = load_state(Some(token.as_str()), &gw, &config, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Token);
        assert_eq!(loaded.checklist, shared);
        assert!(loaded.diagnostics.is_empty());
    }

    #[test]
    fn bad_token_falls_back_to_snapshot() {
        let config = EngineConfig::default();
        let persisted = one_category("Persisted");
        let gw = gateway_with(&config, &persisted);

        let loaded = load_state(Some("%%%garbage"), &gw, &config, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Snapshot);
        assert_eq!(loaded.checklist, persisted);
        assert_eq!(loaded.diagnostics.len(), 1);
        assert_eq!(loaded.diagnostics[0].kind, DiagnosticKind::InvalidToken);
    }

    #[test]
    fn empty_token_is_ignored() {
        let config = EngineConfig::default();
        let gw = gateway_with(&config, &one_category("Persisted"));
        let loaded = load_state(Some(""), &gw, &config, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Snapshot);
        assert!(loaded.diagnostics.is_empty());
    }

    #[test]
    fn nothing_available_gives_default() {
        let config = EngineConfig::default();
        let loaded = load_state(None, &MemoryGateway::new(), &config, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Default);
        assert_eq!(loaded.checklist.categories.len(), 5);
        assert!(loaded.checklist.show_optional);
    }

    #[test]
    fn corrupt_snapshot_and_token_fall_through_to_default() {
        let config = EngineConfig::default();
        let mut gw = MemoryGateway::new();
        gw.write(&config.storage.key, "{\"categories\": [").unwrap();

        let loaded = load_state(Some("e30%3D"), &gw, &config, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Default);
        let kinds: Vec<DiagnosticKind> = loaded.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::InvalidToken, DiagnosticKind::InvalidSnapshot]
        );
    }

    #[test]
    fn custom_storage_key() {
        let mut config = EngineConfig::default();
        config.storage.key = "other".into();
        let persisted = one_category("Elsewhere");
        let gw = gateway_with(&config, &persisted);
        let loaded = load_state(None, &gw, &config, &mut SequentialIds::new());
        assert_eq!(loaded.checklist, persisted);

        let default_key = EngineConfig::default();
        let loaded = load_state(None, &gw, &default_key, &mut SequentialIds::new());
        assert_eq!(loaded.source, LoadSource::Default);
    }

    #[test]
    fn rejected_inputs_go_to_recovery_log() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = EngineConfig::default();
        config.recovery.log = Some(tmp.path().join(".recovery.log"));
        let mut gw = MemoryGateway::new();
        gw.write(&config.storage.key, "not json").unwrap();

        load_state(Some("bad*token"), &gw, &config, &mut SequentialIds::new());

        let entries =
            crate::io::recovery::read_recovery_entries(tmp.path().join(".recovery.log").as_path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, RecoveryCategory::Snapshot);
        assert_eq!(entries[0].body, "not json");
        assert_eq!(entries[1].category, RecoveryCategory::Token);
        assert_eq!(entries[1].body, "bad*token");
    }
}
