//! Cell and row editing through the session

mod common;

use common::loaded;
use csv_view::csv::{RowProjection, SortOrder};
use csv_view::messages::GridMsg;
use csv_view::{Msg, ViewError};

#[test]
fn test_edit_saves_new_text() {
    let mut session = loaded("x,y", false);
    let row = session.view().table().row_id_at(0).unwrap();

    session.dispatch(Msg::set_cell(row, "B", "z")).unwrap();

    assert_eq!(session.host().saves.len(), 1);
    assert_eq!(session.host().last_save(), Some("x,z"));
    assert_eq!(
        session.host().saves[0].0.as_deref(),
        Some(std::path::Path::new("/data/test.csv"))
    );
}

#[test]
fn test_unchanged_edit_does_not_save() {
    let mut session = loaded("x,y", false);
    let row = session.view().table().row_id_at(0).unwrap();

    session.dispatch(Msg::set_cell(row, "A", "x")).unwrap();

    assert!(session.host().saves.is_empty());
    assert!(!session.view().is_dirty());
}

#[test]
fn test_each_action_saves_once() {
    let mut session = loaded("a,b\nc,d\n", false);
    let first = session.view().table().row_id_at(0).unwrap();

    session.dispatch(Msg::set_cell(first, "A", "1")).unwrap();
    session.dispatch(Msg::Grid(GridMsg::AddRow)).unwrap();
    session
        .dispatch(Msg::Grid(GridMsg::InsertRow { index: 0 }))
        .unwrap();
    session
        .dispatch(Msg::Grid(GridMsg::MoveColumn { from: 0, to: 1 }))
        .unwrap();
    session.dispatch(Msg::Grid(GridMsg::RemoveRow(first))).unwrap();

    assert_eq!(session.host().saves.len(), 5);
    assert_eq!(session.host().last_save(), Some(",\nd,c\n,\n"));
}

#[test]
fn test_row_changes_request_redraw() {
    let mut session = loaded("a\n", false);
    session.take_redraw();

    session.dispatch(Msg::Grid(GridMsg::AddRow)).unwrap();
    assert!(session.take_redraw());
    assert!(!session.take_redraw());
}

#[test]
fn test_edit_after_sort_targets_row_identity() {
    let mut session = loaded("name,qty\npear,3\napple,1\nkiwi,2\n", true);
    let table = session.view().table();
    let qty = table.resolve_column("qty").unwrap();
    let order = RowProjection::new()
        .sorted_by(qty, SortOrder::Ascending)
        .apply(table);

    // First visual row is "apple", third in table order
    assert_eq!(table.row(order[0]).unwrap(), ["apple", "1"]);
    session.dispatch(Msg::set_cell(order[0], "qty", "10")).unwrap();

    assert_eq!(
        session.host().last_save(),
        Some("name,qty\npear,3\napple,10\nkiwi,2\n")
    );
}

#[test]
fn test_delete_after_filter_removes_that_row() {
    let mut session = loaded("a\nb\nc\n", false);
    let table = session.view().table();
    let order = RowProjection::new().filtered_by(0, "c").apply(table);
    assert_eq!(order.len(), 1);

    session.dispatch(Msg::Grid(GridMsg::RemoveRow(order[0]))).unwrap();

    assert_eq!(session.host().last_save(), Some("a\nb\n"));
}

#[test]
fn test_delete_unknown_row_reports_error() {
    let mut session = loaded("a\nb\n", false);
    let row = session.view().table().row_id_at(1).unwrap();
    session.dispatch(Msg::Grid(GridMsg::RemoveRow(row))).unwrap();

    let result = session.dispatch(Msg::Grid(GridMsg::RemoveRow(row)));

    assert!(matches!(result, Err(ViewError::UnknownRow(r)) if r == row));
    assert_eq!(session.host().saves.len(), 1);
    assert_eq!(session.host().errors.len(), 1);
}

#[test]
fn test_edit_before_load_is_rejected() {
    let mut session = common::session_with_store(common::config(false), Default::default());
    session.dispatch(Msg::open(None, "x,y")).unwrap();
    let result = session.dispatch(Msg::Grid(GridMsg::AddRow));

    assert!(matches!(result, Err(ViewError::NotLoaded)));
    assert!(session.host().saves.is_empty());

    session.flush().unwrap();
    assert_eq!(session.view().table().row_count(), 1);
}

#[test]
fn test_edit_by_header_name() {
    let mut session = loaded("name,qty\npear,3\n", true);
    let row = session.view().table().row_id_at(0).unwrap();

    session.dispatch(Msg::set_cell(row, "name", "plum")).unwrap();

    assert_eq!(session.host().last_save(), Some("name,qty\nplum,3\n"));
}

#[test]
fn test_edit_preserves_quoting_and_crlf() {
    let mut session = loaded("\"a,1\",b\r\nc,d\r\n", false);
    let row = session.view().table().row_id_at(1).unwrap();

    session.dispatch(Msg::set_cell(row, "A", "say \"hi\"")).unwrap();

    assert_eq!(
        session.host().last_save(),
        Some("\"a,1\",b\r\n\"say \"\"hi\"\"\",d\r\n")
    );
}
