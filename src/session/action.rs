use std::fmt;

use serde::{Deserialize, Serialize};

/// How an edit is being finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoneType {
    Save,
    Cancel,
}

/// Input driving the edit session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditAction {
    StartEditing,
    FinishEditing(DoneType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Viewing,
    Editing,
    /// Cancel with unsaved changes, waiting for the user to confirm the discard.
    AwaitingConfirmation,
}

impl SessionState {
    pub fn is_editing(self) -> bool {
        !matches!(self, SessionState::Viewing)
    }
}

/// Edit chrome state pushed alongside the display model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditModeDisplay {
    pub is_editing: bool,
    pub can_save: bool,
}

/// Handle for one outstanding confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfirmationId(pub(crate) u64);

impl fmt::Display for ConfirmationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "confirmation-{}", self.0)
    }
}
