//! List screens: an [`EditSession`] over a whole collection, with deletion
//! and selection addressed by grouped `(section, index)` and reordering
//! addressed by plain position.

use tracing::debug;

use crate::config::GroupingOptions;
use crate::grouping::{group_by_name_with, GroupedCollection};
use crate::model::Model;
use crate::projection::Projector;
use crate::session::{ConfirmationId, DoneType, EditAction, EditSession};
use crate::validation::Validator;
use crate::Named;

#[derive(Debug)]
pub struct ListEditController<T: Model, V, P: Projector<Vec<T>>> {
    session: EditSession<Vec<T>, V, P>,
    grouping: GroupingOptions,
}

impl<T, V, P> ListEditController<T, V, P>
where
    T: Model,
    V: Validator<Vec<T>>,
    P: Projector<Vec<T>>,
{
    pub fn new(session: EditSession<Vec<T>, V, P>) -> Self {
        Self {
            session,
            grouping: GroupingOptions::default(),
        }
    }

    pub fn with_grouping(mut self, grouping: GroupingOptions) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn session(&self) -> &EditSession<Vec<T>, V, P> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession<Vec<T>, V, P> {
        &mut self.session
    }

    pub fn into_session(self) -> EditSession<Vec<T>, V, P> {
        self.session
    }

    pub fn items(&self) -> &[T] {
        self.session.active_model()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn start_editing(&mut self) {
        self.session.send(EditAction::StartEditing);
    }

    pub fn finish(&mut self, done: DoneType) {
        self.session.send(EditAction::FinishEditing(done));
    }

    pub fn resolve_confirmation(&mut self, id: ConfirmationId, confirmed: bool) {
        self.session.resolve_confirmation(id, confirmed);
    }

    pub fn update_stored_model(&mut self, items: Vec<T>) {
        self.session.update_stored_model(items);
    }

    /// Appends `item` to the working list, starting an edit if needed.
    pub fn add_item(&mut self, item: T) {
        self.session.update_active_model(|items| items.push(item));
    }

    /// Moves the item at `from` to `to` in the ungrouped list.
    ///
    /// Only permitted while editing. Out-of-range positions are ignored.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if !self.session.is_editing() {
            debug!(from, to, "ignoring move outside of editing");
            return;
        }
        let len = self.session.active_model().len();
        if from >= len || to >= len {
            debug!(from, to, len, "ignoring out of range move");
            return;
        }
        if from == to {
            return;
        }
        self.session.update_active_model(|items| {
            let item = items.remove(from);
            items.insert(to, item);
        });
    }

    /// Removes the item at `index` in the ungrouped list.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.session.active_model().len() {
            return None;
        }
        let mut removed = None;
        self.session.update_active_model(|items| {
            removed = Some(items.remove(index));
        });
        removed
    }
}

impl<T, V, P> ListEditController<T, V, P>
where
    T: Model + Named,
    V: Validator<Vec<T>>,
    P: Projector<Vec<T>>,
{
    /// Groups the live working list. Never cached: every deletion shifts
    /// the sections.
    pub fn grouped(&self) -> GroupedCollection<&T> {
        group_by_name_with(self.session.active_model().iter(), &self.grouping)
    }

    /// The item displayed at `(section, index)`, if any.
    pub fn select_item(&self, section: usize, index: usize) -> Option<T> {
        self.grouped().get(section, index).map(|item| (*item).clone())
    }

    /// Deletes the item displayed at `(section, index)`, starting an edit if
    /// needed. Returns the removed item; a stale position is a no-op.
    pub fn delete_item(&mut self, section: usize, index: usize) -> Option<T> {
        let target = self.select_item(section, index)?;
        let position = self
            .session
            .active_model()
            .iter()
            .position(|item| *item == target)?;

        self.session.send(EditAction::StartEditing);
        let mut removed = None;
        self.session.update_active_model(|items| {
            removed = Some(items.remove(position));
        });
        if removed.is_some() {
            debug!(section, index, id = target.id(), "item deleted");
        }
        removed
    }
}
