use packlist::io::recovery::{RecoveryCategory, read_recovery_entries};
use packlist::io::{DiagnosticKind, FileGateway, LoadSource, PersistenceGateway};
use packlist::ops::command::Applied;
use packlist::ops::{ReorderEvent, SequentialIds};
use packlist::parse::share_link;
use packlist::{Command, EngineConfig, Session};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn open(dir: &TempDir, token: Option<&str>) -> Session<FileGateway> {
    let gateway = FileGateway::open(&dir.path().join("store")).unwrap();
    Session::open(EngineConfig::default(), gateway, token)
}

fn created(applied: Applied) -> String {
    match applied {
        Applied::Created(id) => id,
        other => panic!("expected Created, got {:?}", other),
    }
}

#[test]
fn state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, None);
    assert_eq!(session.source(), LoadSource::Default);

    let kitchen = session.checklist().categories[1].clone();
    session
        .dispatch(Command::SetItemChecked {
            category: kitchen.id.clone(),
            item: kitchen.items[0].id.clone(),
            checked: true,
        })
        .unwrap();
    session
        .dispatch(Command::Reorder(ReorderEvent::Categories {
            old_index: 1,
            new_index: 0,
        }))
        .unwrap();
    let expected = session.checklist().clone();

    let reopened = open(&dir, None);
    assert_eq!(reopened.source(), LoadSource::Snapshot);
    assert_eq!(reopened.checklist(), &expected);
    assert_eq!(reopened.checklist().categories[0].name, "Kitchen");
    assert!(reopened.checklist().categories[0].items[0].checked);
}

#[test]
fn share_token_takes_precedence_over_snapshot() {
    let dir = TempDir::new().unwrap();

    // Someone else's list, shared as a token
    let mut ids = SequentialIds::new();
    let mut shared = packlist::model::Checklist::default();
    let gear = packlist::ops::checklist_ops::add_category(&mut shared, &mut ids, "Gear").unwrap();
    packlist::ops::checklist_ops::add_item(&mut shared, &mut ids, &gear, "Rope").unwrap();
    let token = packlist::encode(&shared).unwrap();

    // Our own persisted list
    let mut session = open(&dir, None);
    session.dispatch(Command::SetShowOptional(false)).unwrap();

    let from_token = open(&dir, Some(token.as_str()));
    assert_eq!(from_token.source(), LoadSource::Token);
    assert_eq!(from_token.checklist(), &shared);

    // Loading from a token does not overwrite the snapshot by itself
    let again = open(&dir, None);
    assert_eq!(again.source(), LoadSource::Snapshot);
    assert!(!again.checklist().show_optional);
}

#[test]
fn invalid_token_falls_back_to_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, None);
    let id = created(
        session
            .dispatch(Command::AddCategory {
                name: "Fishing".into(),
            })
            .unwrap(),
    );

    let link = share_link("https://example.org/", "data", "bm90IGpzb24%3D");
    let gateway = FileGateway::open(&dir.path().join("store")).unwrap();
    let reopened = Session::open_url(EngineConfig::default(), gateway, &link);

    assert_eq!(reopened.source(), LoadSource::Snapshot);
    assert!(reopened.checklist().find_category(&id).is_some());
    assert_eq!(reopened.diagnostics().len(), 1);
    assert_eq!(reopened.diagnostics()[0].kind, DiagnosticKind::InvalidToken);
}

#[test]
fn token_session_persists_on_first_change() {
    let dir = TempDir::new().unwrap();
    let mut shared = packlist::model::Checklist::default();
    shared.show_optional = false;
    let token = packlist::encode(&shared).unwrap();

    let mut session = open(&dir, Some(token.as_str()));
    session.dispatch(Command::SetShowOptional(true)).unwrap();

    let stored = session
        .gateway()
        .read("campingChecklistData")
        .unwrap()
        .unwrap();
    assert_eq!(stored, r#"{"categories":[],"showOptional":true}"#);
}

#[test]
fn failed_writes_are_recorded_for_recovery() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("packlist.toml");
    std::fs::write(
        &config_path,
        "[storage]\nkey = \"../outside\"\n\n[recovery]\nlog = \".recovery.log\"\n",
    )
    .unwrap();
    let config = packlist::io::config_io::load_config(&config_path).unwrap();
    let gateway = FileGateway::open(&dir.path().join("store")).unwrap();

    let mut session = Session::open(config, gateway, None);
    // The unusable key is also reported when reading at startup
    assert_eq!(session.source(), LoadSource::Default);
    assert_eq!(session.diagnostics()[0].kind, DiagnosticKind::InvalidSnapshot);

    session
        .dispatch(Command::AddCategory {
            name: "Bikes".into(),
        })
        .unwrap();
    assert_eq!(session.checklist().categories.last().unwrap().name, "Bikes");
    assert_eq!(
        session.diagnostics().last().unwrap().kind,
        DiagnosticKind::SaveFailed
    );

    let entries = read_recovery_entries(&dir.path().join(".recovery.log"), None);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, RecoveryCategory::Write);
    assert!(entries[0].body.contains("\"name\":\"Bikes\""));
}

#[test]
fn shared_item_id_across_categories_survives_restart() {
    use packlist::model::{Category, Checklist, Item};
    use packlist::ops::StoreError;

    let dir = TempDir::new().unwrap();
    let mut mine = Category::new("a".into(), "Mine".into());
    mine.items.push(Item::new("x".into(), "Mine".into()));
    let mut theirs = Category::new("b".into(), "Theirs".into());
    theirs.items.push(Item::new("x".into(), "Theirs".into()));
    let shared = Checklist {
        categories: vec![mine, theirs],
        show_optional: true,
    };
    let token = packlist::encode(&shared).unwrap();

    let mut session = open(&dir, Some(token.as_str()));
    let err = session
        .dispatch(Command::Reorder(ReorderEvent::Items {
            from_category: "a".into(),
            from_index: 0,
            to_category: "b".into(),
            to_index: 0,
        }))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateItem { .. }));
    assert_eq!(
        session.diagnostics().last().unwrap().kind,
        DiagnosticKind::CommandRejected
    );
    session.dispatch(Command::SetShowOptional(false)).unwrap();
    assert!(packlist::decode(&session.share_token().unwrap()).is_ok());

    let reopened = open(&dir, None);
    assert_eq!(reopened.source(), LoadSource::Snapshot);
    assert_eq!(reopened.checklist().categories.len(), 2);
    assert_eq!(reopened.checklist().categories[1].items.len(), 1);
    assert!(reopened.diagnostics().is_empty());
}
