//! Document lifecycle update functions

use super::save_cmd;
use crate::commands::Cmd;
use crate::error::ViewError;
use crate::messages::DocumentMsg;
use crate::view::CsvView;

/// Handle document lifecycle messages
pub fn update_document(view: &mut CsvView, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::Open { path, text } => {
            let generation = view.open(path, text);
            Some(deferred_parse(view, generation))
        }
        DocumentMsg::SetViewData { text, clear } => {
            if clear {
                view.clear();
            }
            let generation = view.begin_load(text);
            Some(deferred_parse(view, generation))
        }
        DocumentMsg::ParseTick { generation } => {
            let errors = view.finish_load(generation)?;
            let mut cmds = vec![Cmd::Redraw];
            cmds.extend(
                errors
                    .into_iter()
                    .map(|e| Cmd::ReportError(ViewError::Parse(e))),
            );
            Some(Cmd::batch(cmds))
        }
        DocumentMsg::Saved => {
            view.mark_saved();
            None
        }
        DocumentMsg::SaveFailed(error) => {
            tracing::warn!("Save failed, keeping unsaved table: {}", error);
            Some(Cmd::ReportError(ViewError::Persistence(error)))
        }
        DocumentMsg::RetrySave => view.is_dirty().then(|| save_cmd(view)),
        DocumentMsg::Clear => {
            view.clear();
            Some(Cmd::Redraw)
        }
        DocumentMsg::Close => {
            view.close();
            None
        }
    }
}

fn deferred_parse(view: &CsvView, generation: u64) -> Cmd {
    Cmd::DeferredParse {
        generation,
        delay: view.config().parse_delay(),
    }
}
