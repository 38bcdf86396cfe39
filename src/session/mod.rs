//! Edit sessions: a stored snapshot, a working copy, and the state machine
//! that reconciles the two.
//!
//! ```text
//! Viewing --StartEditing--> Editing
//! Editing --FinishEditing(Save), valid--> Viewing (commit)
//! Editing --FinishEditing(Save), invalid--> Editing
//! Editing --FinishEditing(Cancel), no changes--> Viewing (revert)
//! Editing --FinishEditing(Cancel), changes--> AwaitingConfirmation
//! AwaitingConfirmation --confirmed--> Viewing (revert)
//! AwaitingConfirmation --declined--> Editing
//! ```

mod action;
mod edit_session;
mod sink;

pub use action::{ConfirmationId, DoneType, EditAction, EditModeDisplay, SessionState};
pub use edit_session::EditSession;
pub use sink::{DisplaySink, NullSink, RecordingSink, SinkMessage};
