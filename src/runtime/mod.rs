//! Runtime - executes commands against a host
//!
//! A [`Session`] pairs one [`CsvView`] with the [`DocumentHost`] it lives
//! in. Messages go through [`update`], and the resulting commands are carried
//! out here: saves are sent to the host and their outcome fed back as
//! messages, errors are reported, and deferred parses are scheduled.

use std::collections::VecDeque;
use std::time::Instant;

use crate::commands::Cmd;
use crate::error::ViewError;
use crate::host::DocumentHost;
use crate::messages::{DocumentMsg, Msg};
use crate::update::update;
use crate::view::CsvView;

/// A view bound to its host
#[derive(Debug)]
pub struct Session<H: DocumentHost> {
    view: CsvView,
    host: H,
    /// Pending parse: load generation and when it is due
    deferred_parse: Option<(u64, Instant)>,
    redraw_pending: bool,
}

impl<H: DocumentHost> Session<H> {
    pub fn new(view: CsvView, host: H) -> Self {
        Self {
            view,
            host,
            deferred_parse: None,
            redraw_pending: false,
        }
    }

    pub fn view(&self) -> &CsvView {
        &self.view
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// When the deferred parse is due, if one is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deferred_parse.map(|(_, due)| due)
    }

    /// Handle a message and every command and follow-up message it causes
    ///
    /// Every error is sent to the host's error surface; the first one is
    /// also returned.
    pub fn dispatch(&mut self, msg: Msg) -> Result<(), ViewError> {
        let mut queue = VecDeque::from([msg]);
        let mut first_error = None;

        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.view, msg) {
                self.process_cmd(cmd, &mut queue, &mut first_error);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run the deferred parse if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> Result<(), ViewError> {
        match self.deferred_parse {
            Some((_, due)) if due <= now => self.flush(),
            _ => Ok(()),
        }
    }

    /// Run the deferred parse immediately
    pub fn flush(&mut self) -> Result<(), ViewError> {
        match self.deferred_parse.take() {
            Some((generation, _)) => {
                self.dispatch(Msg::Document(DocumentMsg::ParseTick { generation }))
            }
            None => Ok(()),
        }
    }

    fn process_cmd(
        &mut self,
        cmd: Cmd,
        queue: &mut VecDeque<Msg>,
        first_error: &mut Option<ViewError>,
    ) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraw_pending = true,
            Cmd::SaveFile { path, content } => {
                let result = self.host.save(path.as_deref(), &content);
                queue.push_back(Msg::Document(match result {
                    Ok(()) => DocumentMsg::Saved,
                    Err(e) => DocumentMsg::SaveFailed(e),
                }));
            }
            Cmd::DeferredParse { generation, delay } => {
                let due = Instant::now() + delay;
                self.deferred_parse = Some((generation, due));
            }
            Cmd::ReportError(e) => {
                self.host.report_error(&e);
                if first_error.is_none() {
                    *first_error = Some(e);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, queue, first_error);
                }
            }
        }
    }
}
