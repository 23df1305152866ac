//! Header toggling and the per-file header setting

mod common;

use std::path::{Path, PathBuf};

use common::{config, loaded, session_with_store, SharedStore};
use csv_view::view_state::{FileViewState, ViewStateStore};
use csv_view::Msg;

#[test]
fn test_toggle_roundtrip_keeps_text() {
    let mut session = loaded("a,b\nc,d", false);

    session.dispatch(Msg::toggle_headers(true)).unwrap();
    assert_eq!(session.view().table().labels(), ["a", "b"]);
    assert_eq!(session.host().last_save(), Some("a,b\nc,d"));

    session.dispatch(Msg::toggle_headers(false)).unwrap();
    assert_eq!(session.view().table().labels(), ["A", "B"]);
    assert_eq!(
        session.view().table().data(),
        vec![vec!["a", "b"], vec!["c", "d"]]
    );
    assert_eq!(session.host().last_save(), Some("a,b\nc,d"));
    assert_eq!(session.host().saves.len(), 2);
}

#[test]
fn test_toggle_to_same_state_is_ignored() {
    let mut session = loaded("a,b", true);
    session.dispatch(Msg::toggle_headers(true)).unwrap();
    assert!(session.host().saves.is_empty());
}

#[test]
fn test_toggle_is_remembered_per_file() {
    let store = SharedStore::default();
    let mut session = session_with_store(config(false), store.clone());
    session
        .dispatch(Msg::open(Some(PathBuf::from("/data/a.csv")), "h\nv"))
        .unwrap();
    session.flush().unwrap();

    session.dispatch(Msg::toggle_headers(true)).unwrap();

    assert_eq!(
        store.get(Path::new("/data/a.csv")),
        Some(FileViewState { has_headings: true })
    );
    assert_eq!(store.get(Path::new("/data/b.csv")), None);
}

#[test]
fn test_reopen_uses_remembered_flag() {
    let store = SharedStore::default();
    store
        .borrow_mut()
        .set(Path::new("/data/a.csv"), FileViewState { has_headings: true })
        .unwrap();

    let mut session = session_with_store(config(false), store);
    session
        .dispatch(Msg::open(Some(PathBuf::from("/data/a.csv")), "name\nbob\n"))
        .unwrap();
    session.flush().unwrap();

    assert!(session.view().has_headers());
    assert_eq!(session.view().table().labels(), ["name"]);
    assert_eq!(session.view().table().row_count(), 1);
}

#[test]
fn test_unremembered_file_uses_default() {
    let mut session = session_with_store(config(true), SharedStore::default());
    session
        .dispatch(Msg::open(Some(PathBuf::from("/data/new.csv")), "x,y\n1,2\n"))
        .unwrap();
    session.flush().unwrap();

    assert!(session.view().has_headers());
    assert_eq!(session.view().table().labels(), ["x", "y"]);
}

#[test]
fn test_extra_columns_beyond_header_get_labels() {
    let session = loaded("name\nbob,42\n", true);
    assert_eq!(session.view().table().labels(), ["name", "B"]);
    assert_eq!(session.view().table().data(), vec![vec!["bob", "42"]]);
}

#[test]
fn test_grid_columns_follow_headers() {
    let mut session = loaded("a,a\n1,2\n", false);
    session.dispatch(Msg::toggle_headers(true)).unwrap();

    let defs = session.view().column_defs();
    let ids: Vec<&str> = defs.iter().map(|d| d.col_id.as_str()).collect();
    let names: Vec<&str> = defs.iter().map(|d| d.header_name.as_str()).collect();

    assert_eq!(names, ["a", "a"]);
    assert_ne!(ids[0], ids[1]);
    assert!(defs[0].dnd_source);
    assert!(!defs[1].dnd_source);
}
