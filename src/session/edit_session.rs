use std::fmt;

use tracing::{debug, trace, warn};

use super::action::{ConfirmationId, DoneType, EditAction, EditModeDisplay, SessionState};
use super::sink::DisplaySink;
use crate::config::SessionOptions;
use crate::model::{Model, TouchedFields};
use crate::projection::Projector;
use crate::validation::{ValidationResult, Validator};

type SaveHook<T> = Box<dyn FnMut(&T)>;
type Completion = Box<dyn FnOnce()>;

struct PendingCancel {
    id: ConfirmationId,
    on_cancelled: Vec<Completion>,
}

/// One working copy of a domain value under edit.
///
/// `stored` is the last value received from the store or committed by this
/// session; `active` is the working copy. While viewing, the two are equal.
/// External pushes never clobber an edit in progress.
///
/// Invalid saves, stale confirmations and actions in the wrong state are
/// silent no-ops: the display model is what tells the user why.
pub struct EditSession<T: Model, V, P: Projector<T>> {
    stored: T,
    active: T,
    state: SessionState,
    touched: TouchedFields<T::Field>,
    validator: V,
    projector: P,
    sink: Box<dyn DisplaySink<P::Display>>,
    on_save: SaveHook<T>,
    options: SessionOptions,
    pending: Option<PendingCancel>,
    next_confirmation: u64,
}

impl<T, V, P> fmt::Debug for EditSession<T, V, P>
where
    T: Model,
    P: Projector<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("stored", &self.stored)
            .field("active", &self.active)
            .field("state", &self.state)
            .field("touched", &self.touched)
            .field("options", &self.options)
            .field("pending", &self.pending.as_ref().map(|p| p.id))
            .finish()
    }
}

impl<T, V, P> EditSession<T, V, P>
where
    T: Model,
    V: Validator<T>,
    P: Projector<T>,
{
    /// Creates a session in the viewing state and pushes the initial display model.
    pub fn new<S>(initial: T, validator: V, projector: P, sink: S) -> Self
    where
        S: DisplaySink<P::Display> + 'static,
    {
        let mut session = EditSession {
            stored: initial.clone(),
            active: initial,
            state: SessionState::Viewing,
            touched: TouchedFields::new(),
            validator,
            projector,
            sink: Box::new(sink),
            on_save: Box::new(|_: &T| {}),
            options: SessionOptions::default(),
            pending: None,
            next_confirmation: 1,
        };
        session.push_display();
        session.push_edit_mode();
        session
    }

    /// Hook invoked with the committed value after every successful save.
    pub fn on_save<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.on_save = Box::new(hook);
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_on_save<F>(&mut self, hook: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.on_save = Box::new(hook);
    }

    pub fn active_model(&self) -> &T {
        &self.active
    }

    pub fn stored_model(&self) -> &T {
        &self.stored
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.state == SessionState::AwaitingConfirmation
    }

    pub fn has_changes(&self) -> bool {
        self.active != self.stored
    }

    pub fn touched(&self) -> &TouchedFields<T::Field> {
        &self.touched
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn edit_mode(&self) -> EditModeDisplay {
        EditModeDisplay {
            is_editing: self.is_editing(),
            can_save: self.has_changes(),
        }
    }

    /// Validates the working copy.
    pub fn validation(&self) -> ValidationResult<V::Reason> {
        self.validator.validate(&self.active)
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Mutable access to the validator, e.g. to swap in a fresh name lookup.
    /// Call [`refresh`](Self::refresh) afterwards if the display depends on it.
    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }

    /// Re-projects the working copy and pushes it.
    pub fn refresh(&mut self) {
        self.push_display();
    }

    /// Receives a snapshot from the store.
    ///
    /// While viewing, the working copy follows and the display is refreshed.
    /// While editing, only `stored` changes and the edit stays untouched.
    pub fn update_stored_model(&mut self, value: T) {
        self.stored = value;
        if self.state.is_editing() {
            trace!(state = ?self.state, "stored model updated under edit");
            return;
        }
        self.active = self.stored.clone();
        self.push_display();
    }

    /// Applies `mutator` to the working copy and pushes the new display and
    /// edit mode. Starts editing when called while viewing.
    pub fn update_active_model<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut T),
    {
        if self.is_suspended() {
            debug!("ignoring edit while a confirmation is outstanding");
            return;
        }
        if self.state == SessionState::Viewing {
            self.state = SessionState::Editing;
        }
        mutator(&mut self.active);
        trace!(has_changes = self.has_changes(), "active model updated");
        self.push_display();
        self.push_edit_mode();
    }

    /// Marks `field` as touched, then applies `mutator` like
    /// [`update_active_model`](Self::update_active_model).
    pub fn edit_field<F>(&mut self, field: T::Field, mutator: F)
    where
        F: FnOnce(&mut T),
    {
        if self.is_suspended() {
            debug!(?field, "ignoring field edit while a confirmation is outstanding");
            return;
        }
        self.touched.touch(field);
        self.update_active_model(mutator);
    }

    /// Marks `field` as touched without changing the value, e.g. when the
    /// user leaves an input untouched but focused it.
    pub fn touch(&mut self, field: T::Field) {
        if self.is_suspended() || !self.state.is_editing() {
            return;
        }
        if self.touched.touch(field) {
            self.push_display();
        }
    }

    pub fn send(&mut self, action: EditAction) {
        match action {
            EditAction::StartEditing => self.start_editing(),
            EditAction::FinishEditing(DoneType::Save) => self.save(),
            EditAction::FinishEditing(DoneType::Cancel) => self.cancel(None),
        }
    }

    /// Same as sending `FinishEditing(Cancel)`, but runs `on_cancelled` once
    /// the cancellation actually happens: immediately when there is nothing
    /// to discard, or after the user confirms. While a confirmation is
    /// already outstanding it waits on that one. It is dropped if the user
    /// declines.
    pub fn cancel_editing<F>(&mut self, on_cancelled: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel(Some(Box::new(on_cancelled)));
    }

    /// Answers an outstanding confirmation request. Unknown or stale ids are ignored.
    pub fn resolve_confirmation(&mut self, id: ConfirmationId, confirmed: bool) {
        if self.pending.as_ref().map(|pending| pending.id) != Some(id) {
            warn!(%id, "ignoring answer to unknown confirmation");
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        if confirmed {
            debug!(%id, "discard confirmed");
            self.revert();
            for on_cancelled in pending.on_cancelled {
                on_cancelled();
            }
        } else {
            debug!(%id, "discard declined, still editing");
            self.state = SessionState::Editing;
            self.push_edit_mode();
        }
    }

    fn is_suspended(&self) -> bool {
        self.state == SessionState::AwaitingConfirmation && self.options.suspend_while_confirming
    }

    fn start_editing(&mut self) {
        if self.state != SessionState::Viewing {
            return;
        }
        self.state = SessionState::Editing;
        debug!("editing started");
        self.push_edit_mode();
    }

    fn save(&mut self) {
        match self.state {
            SessionState::Viewing => return,
            SessionState::AwaitingConfirmation if self.options.suspend_while_confirming => {
                debug!("ignoring save while a confirmation is outstanding");
                return;
            }
            _ => {}
        }
        if !self.validator.is_valid(&self.active) {
            debug!("save refused, active model is invalid");
            return;
        }

        self.stored = self.active.clone();
        self.state = SessionState::Viewing;
        self.touched.clear();
        self.pending = None;
        debug!("edit committed");
        (self.on_save)(&self.stored);
        self.push_display();
        self.push_edit_mode();
    }

    fn cancel(&mut self, on_cancelled: Option<Completion>) {
        match self.state {
            SessionState::Viewing => {
                if let Some(on_cancelled) = on_cancelled {
                    on_cancelled();
                }
                return;
            }
            SessionState::AwaitingConfirmation if self.options.suspend_while_confirming => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.on_cancelled.extend(on_cancelled);
                }
                debug!("cancel already awaiting confirmation");
                return;
            }
            _ => {}
        }

        // completions still waiting on a replaced request move to this one
        let mut completions = self
            .pending
            .take()
            .map(|pending| pending.on_cancelled)
            .unwrap_or_default();
        completions.extend(on_cancelled);

        if !self.has_changes() || !self.options.confirm_discard {
            self.revert();
            for on_cancelled in completions {
                on_cancelled();
            }
            return;
        }

        let id = ConfirmationId(self.next_confirmation);
        self.next_confirmation += 1;
        self.pending = Some(PendingCancel {
            id,
            on_cancelled: completions,
        });
        self.state = SessionState::AwaitingConfirmation;
        debug!(%id, "unsaved changes, requesting confirmation");
        self.sink.request_confirmation(DoneType::Cancel, id);
    }

    fn revert(&mut self) {
        self.active = self.stored.clone();
        self.state = SessionState::Viewing;
        self.touched.clear();
        debug!("edit reverted");
        self.push_display();
        self.push_edit_mode();
    }

    fn push_display(&mut self) {
        let display = self.projector.project(&self.active, &self.touched);
        self.sink.send_display(display);
    }

    fn push_edit_mode(&mut self) {
        let edit_mode = self.edit_mode();
        self.sink.send_edit_mode(edit_mode);
    }
}
