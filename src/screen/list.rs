use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::config::BarkeepConfig;
use crate::list::ListEditController;
use crate::model::Model;
use crate::projection::Projector;
use crate::session::{ConfirmationId, DisplaySink, DoneType, EditSession};
use crate::store::{InMemoryStore, Store, Subscription};
use crate::validation::Validator;
use crate::Named;

type SharedController<T, V, P> = Rc<RefCell<ListEditController<T, V, P>>>;
type KnownIds = Rc<RefCell<HashSet<String>>>;

/// List screen over a collection store: grouped display, delete while
/// editing, commit writes the list's deletions, additions and order back.
///
/// A commit does not overwrite the store with the list's working copy.
/// Items saved elsewhere during the edit keep their stored version, and
/// items added elsewhere are kept.
pub struct ListScreen<T, V, P>
where
    T: Model,
    P: Projector<Vec<T>>,
{
    controller: SharedController<T, V, P>,
    store: InMemoryStore<Vec<T>>,
    subscription: Subscription,
}

impl<T, V, P> ListScreen<T, V, P>
where
    T: Model + Named + 'static,
    V: Validator<Vec<T>> + 'static,
    P: Projector<Vec<T>> + 'static,
{
    pub fn open<S>(
        store: &InMemoryStore<Vec<T>>,
        validator: V,
        projector: P,
        sink: S,
        config: &BarkeepConfig,
    ) -> Self
    where
        S: DisplaySink<P::Display> + 'static,
    {
        let session = EditSession::new(store.current(), validator, projector, sink)
            .with_options(config.session);
        let controller = Rc::new(RefCell::new(
            ListEditController::new(session).with_grouping(config.grouping),
        ));

        let known: KnownIds = Rc::new(RefCell::new(ids_of(&store.current())));

        let weak: Weak<RefCell<ListEditController<T, V, P>>> = Rc::downgrade(&controller);
        let observed = Rc::clone(&known);
        let subscription = store.subscribe(Box::new(move |items: &Vec<T>| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                warn!("list controller busy, dropping store update");
                return;
            };
            controller.update_stored_model(items.clone());
            if !controller.is_editing() {
                *observed.borrow_mut() = ids_of(items);
            }
        }));

        let saver = subscription.saver();
        let hook_store = store.clone();
        let committed_ids = Rc::clone(&known);
        controller
            .borrow_mut()
            .session_mut()
            .set_on_save(move |items: &Vec<T>| {
                let result = hook_store.update(saver, |current| {
                    let merged = merge_commit(items, current, &committed_ids.borrow());
                    *current = merged;
                });
                if let Err(err) = result {
                    warn!(error = %err, "saving list failed");
                }
                *committed_ids.borrow_mut() = ids_of(&hook_store.current());
            });

        debug!(items = store.current().len(), "list screen attached");
        ListScreen {
            controller,
            store: store.clone(),
            subscription,
        }
    }

    pub fn with_controller<R>(&self, f: impl FnOnce(&mut ListEditController<T, V, P>) -> R) -> R {
        f(&mut self.controller.borrow_mut())
    }

    pub fn items(&self) -> Vec<T> {
        self.controller.borrow().items().to_vec()
    }

    pub fn is_editing(&self) -> bool {
        self.controller.borrow().is_editing()
    }

    pub fn select_item(&self, section: usize, index: usize) -> Option<T> {
        self.controller.borrow().select_item(section, index)
    }

    pub fn delete_item(&self, section: usize, index: usize) -> Option<T> {
        self.controller.borrow_mut().delete_item(section, index)
    }

    pub fn move_item(&self, from: usize, to: usize) {
        self.controller.borrow_mut().move_item(from, to);
    }

    pub fn start_editing(&self) {
        self.controller.borrow_mut().start_editing();
    }

    pub fn finish(&self, done: DoneType) {
        let mut controller = self.controller.borrow_mut();
        controller.finish(done);
        if controller.is_editing() {
            return;
        }
        // our own commit is not echoed back, pick up what the merge kept
        let current = self.store.current();
        if controller.items() != current.as_slice() {
            controller.update_stored_model(current);
        }
    }

    pub fn resolve_confirmation(&self, id: ConfirmationId, confirmed: bool) {
        self.controller.borrow_mut().resolve_confirmation(id, confirmed);
    }

    pub fn close(self) {
        self.store.unsubscribe(&self.subscription);
    }
}

fn ids_of<T: Named>(items: &[T]) -> HashSet<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

/// Applies a committed list to the store's current items.
///
/// The committed list decides order and membership. Each surviving item
/// takes its current stored version. A committed item missing from the
/// store was deleted elsewhere if the list had seen it (`known`), otherwise
/// the list added it. Stored items the list never saw are appended.
fn merge_commit<T: Named + Clone>(
    committed: &[T],
    current: &[T],
    known: &HashSet<String>,
) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(committed.len());
    for item in committed {
        match current.iter().find(|stored| stored.id() == item.id()) {
            Some(stored) => merged.push(stored.clone()),
            None if known.contains(item.id()) => {
                debug!(id = item.id(), "dropping item deleted elsewhere");
            }
            None => merged.push(item.clone()),
        }
    }
    let committed_ids = ids_of(committed);
    merged.extend(
        current
            .iter()
            .filter(|stored| !committed_ids.contains(stored.id()) && !known.contains(stored.id()))
            .cloned(),
    );
    merged
}
