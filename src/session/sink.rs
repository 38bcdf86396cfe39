use std::cell::RefCell;
use std::rc::Rc;

use super::action::{ConfirmationId, DoneType, EditModeDisplay};

/// Receives everything an edit session renders. The session never reads back.
pub trait DisplaySink<D> {
    fn send_display(&mut self, display: D);

    fn send_edit_mode(&mut self, edit_mode: EditModeDisplay);

    /// Ask the user to confirm finishing with `done`. The answer comes back
    /// through `resolve_confirmation` with the same `id`.
    fn request_confirmation(&mut self, done: DoneType, id: ConfirmationId);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<D> DisplaySink<D> for NullSink {
    fn send_display(&mut self, _display: D) {}

    fn send_edit_mode(&mut self, _edit_mode: EditModeDisplay) {}

    fn request_confirmation(&mut self, _done: DoneType, _id: ConfirmationId) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkMessage<D> {
    Display(D),
    EditMode(EditModeDisplay),
    Confirmation(DoneType, ConfirmationId),
}

/// Sink that records every message into a shared buffer.
///
/// Clones share the buffer, so keep one clone to inspect what a session sent.
#[derive(Debug)]
pub struct RecordingSink<D> {
    buffer: Rc<RefCell<Vec<SinkMessage<D>>>>,
}

impl<D> Clone for RecordingSink<D> {
    fn clone(&self) -> Self {
        Self {
            buffer: Rc::clone(&self.buffer),
        }
    }
}

impl<D> Default for RecordingSink<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> RecordingSink<D> {
    pub fn new() -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    /// Drains the recorded messages.
    pub fn take(&self) -> Vec<SinkMessage<D>> {
        self.buffer.borrow_mut().drain(..).collect()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }

    pub fn last_edit_mode(&self) -> Option<EditModeDisplay> {
        self.buffer.borrow().iter().rev().find_map(|message| match message {
            SinkMessage::EditMode(mode) => Some(*mode),
            _ => None,
        })
    }

    pub fn confirmation_requests(&self) -> Vec<(DoneType, ConfirmationId)> {
        self.buffer
            .borrow()
            .iter()
            .filter_map(|message| match message {
                SinkMessage::Confirmation(done, id) => Some((*done, *id)),
                _ => None,
            })
            .collect()
    }

    pub fn display_count(&self) -> usize {
        self.buffer
            .borrow()
            .iter()
            .filter(|message| matches!(message, SinkMessage::Display(_)))
            .count()
    }
}

impl<D: Clone> RecordingSink<D> {
    pub fn messages(&self) -> Vec<SinkMessage<D>> {
        self.buffer.borrow().clone()
    }

    pub fn last_display(&self) -> Option<D> {
        self.buffer.borrow().iter().rev().find_map(|message| match message {
            SinkMessage::Display(display) => Some(display.clone()),
            _ => None,
        })
    }
}

impl<D> DisplaySink<D> for RecordingSink<D> {
    fn send_display(&mut self, display: D) {
        self.buffer.borrow_mut().push(SinkMessage::Display(display));
    }

    fn send_edit_mode(&mut self, edit_mode: EditModeDisplay) {
        self.buffer.borrow_mut().push(SinkMessage::EditMode(edit_mode));
    }

    fn request_confirmation(&mut self, done: DoneType, id: ConfirmationId) {
        self.buffer
            .borrow_mut()
            .push(SinkMessage::Confirmation(done, id));
    }
}
