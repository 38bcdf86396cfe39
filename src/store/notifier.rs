use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::SaverToken;

/// Out-of-band listener told about every committed save, after the
/// in-process fan-out has run.
pub trait SaveNotifier<T> {
    fn notify(&mut self, value: &T, saver: SaverToken);
}

/// Writes one `[SAVED] <event> <json>` line per save to a buffer, or to the
/// `tracing` log when no buffer is attached.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    event: String,
    buffer: Option<Rc<RefCell<Vec<String>>>>,
}

impl LogNotifier {
    pub fn new(event: impl Into<String>) -> Self {
        LogNotifier {
            event: event.into(),
            buffer: None,
        }
    }

    pub fn with_buffer(event: impl Into<String>, buffer: Rc<RefCell<Vec<String>>>) -> Self {
        LogNotifier {
            event: event.into(),
            buffer: Some(buffer),
        }
    }
}

impl<T: Serialize> SaveNotifier<T> for LogNotifier {
    fn notify(&mut self, value: &T, _saver: SaverToken) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(event = %self.event, error = %err, "cannot serialize saved value");
                return;
            }
        };
        let line = format!("[SAVED] {} {}", self.event, payload);
        match &self.buffer {
            Some(buffer) => buffer.borrow_mut().push(line),
            None => tracing::info!("{}", line),
        }
    }
}

/// Emits every save as a JSON string through an [`EventEmitter`](crate::EventEmitter).
///
/// Listeners run on the emitter's own threads, so they only ever see the
/// serialized payload.
#[cfg(feature = "emitter")]
pub struct EmitterNotifier {
    event: String,
    emitter: event_emitter_rs::EventEmitter,
}

#[cfg(feature = "emitter")]
impl EmitterNotifier {
    pub fn new(event: impl Into<String>, emitter: event_emitter_rs::EventEmitter) -> Self {
        EmitterNotifier {
            event: event.into(),
            emitter,
        }
    }

    pub fn emitter_mut(&mut self) -> &mut event_emitter_rs::EventEmitter {
        &mut self.emitter
    }
}

#[cfg(feature = "emitter")]
impl<T: Serialize> SaveNotifier<T> for EmitterNotifier {
    fn notify(&mut self, value: &T, _saver: SaverToken) {
        match serde_json::to_string(value) {
            Ok(payload) => {
                self.emitter.emit(&self.event, payload);
            }
            Err(err) => {
                tracing::warn!(event = %self.event, error = %err, "cannot serialize saved value");
            }
        }
    }
}
