//! Grid event update functions
//!
//! Translates widget events into table mutations.

use super::{report, save_cmd};
use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::view::CsvView;

/// Handle grid widget messages
pub fn update_grid(view: &mut CsvView, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::CellValueChanged { row, column, value } => {
            match view.set_cell(row, &column, &value) {
                Ok(true) => Some(save_cmd(view)),
                Ok(false) => None,
                Err(e) => report(e),
            }
        }
        GridMsg::AddRow => match view.add_row() {
            Ok(_) => Some(Cmd::batch(vec![save_cmd(view), Cmd::Redraw])),
            Err(e) => report(e),
        },
        GridMsg::InsertRow { index } => match view.insert_row(index) {
            Ok(_) => Some(Cmd::batch(vec![save_cmd(view), Cmd::Redraw])),
            Err(e) => report(e),
        },
        GridMsg::RemoveRow(row) => match view.remove_row(row) {
            Ok(()) => Some(Cmd::batch(vec![save_cmd(view), Cmd::Redraw])),
            Err(e) => report(e),
        },
        GridMsg::MoveColumn { from, to } => match view.move_column(from, to) {
            Ok(true) => Some(save_cmd(view)),
            Ok(false) => None,
            Err(e) => report(e),
        },
        GridMsg::ToggleHeaders(value) => toggle_headers(view, value),
    }
}

/// Toggle headers, remember the choice for the file, then save and redraw
fn toggle_headers(view: &mut CsvView, value: bool) -> Option<Cmd> {
    match view.toggle_headers(value) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => return report(e),
    }

    let mut cmds = vec![save_cmd(view), Cmd::Redraw];
    if let Err(e) = view.remember_headers() {
        tracing::warn!("Failed to remember header setting: {}", e);
        cmds.push(Cmd::ReportError(e));
    }
    Some(Cmd::batch(cmds))
}
