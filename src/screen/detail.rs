use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use super::upsert;
use crate::bar::NameAware;
use crate::config::SessionOptions;
use crate::model::Model;
use crate::projection::Projector;
use crate::session::{ConfirmationId, DisplaySink, EditAction, EditSession};
use crate::store::{InMemoryStore, Store, Subscription};
use crate::validation::{NameLookup, Validator};
use crate::Named;

type SharedSession<T, V, P> = Rc<RefCell<EditSession<T, V, P>>>;

/// Detail screen for one entity of a collection store.
///
/// Incoming saves from other screens refresh the name lookup and, unless an
/// edit is in progress, the entity itself. Commits are written back into the
/// collection.
pub struct DetailScreen<T, V, P>
where
    T: Model + Named,
    P: Projector<T>,
{
    session: SharedSession<T, V, P>,
    store: InMemoryStore<Vec<T>>,
    subscription: Subscription,
}

impl<T, V, P> DetailScreen<T, V, P>
where
    T: Model + Named + 'static,
    V: Validator<T> + NameAware + 'static,
    P: Projector<T> + NameAware + 'static,
{
    /// Opens the entity with `id`, or `None` if the store has no such entity.
    pub fn open<S>(
        store: &InMemoryStore<Vec<T>>,
        id: &str,
        validator: V,
        projector: P,
        sink: S,
        options: SessionOptions,
    ) -> Option<Self>
    where
        S: DisplaySink<P::Display> + 'static,
    {
        let current = store.current().into_iter().find(|item| item.id() == id)?;
        Some(Self::attach(store, current, validator, projector, sink, options))
    }

    /// Opens a screen for a new entity, already editing.
    pub fn create<S>(
        store: &InMemoryStore<Vec<T>>,
        draft: T,
        validator: V,
        projector: P,
        sink: S,
        options: SessionOptions,
    ) -> Self
    where
        S: DisplaySink<P::Display> + 'static,
    {
        let screen = Self::attach(store, draft, validator, projector, sink, options);
        screen.send(EditAction::StartEditing);
        screen
    }

    fn attach<S>(
        store: &InMemoryStore<Vec<T>>,
        initial: T,
        mut validator: V,
        mut projector: P,
        sink: S,
        options: SessionOptions,
    ) -> Self
    where
        S: DisplaySink<P::Display> + 'static,
    {
        let names = NameLookup::from_items(&store.current());
        validator.set_names(names.clone());
        projector.set_names(names);

        let session = Rc::new(RefCell::new(
            EditSession::new(initial, validator, projector, sink).with_options(options),
        ));

        let weak: Weak<RefCell<EditSession<T, V, P>>> = Rc::downgrade(&session);
        let subscription = store.subscribe(Box::new(move |items: &Vec<T>| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            let Ok(mut session) = session.try_borrow_mut() else {
                warn!("detail session busy, dropping store update");
                return;
            };
            apply_update(&mut session, items);
        }));

        let saver = subscription.saver();
        let hook_store = store.clone();
        session.borrow_mut().set_on_save(move |value: &T| {
            let value = value.clone();
            if let Err(err) = hook_store.update(saver, |items| upsert(items, value)) {
                warn!(error = %err, "saving detail into collection failed");
            }
        });

        debug!(id = session.borrow().stored_model().id(), "detail screen attached");
        DetailScreen {
            session,
            store: store.clone(),
            subscription,
        }
    }

    pub fn with_session<R>(&self, f: impl FnOnce(&mut EditSession<T, V, P>) -> R) -> R {
        f(&mut self.session.borrow_mut())
    }

    pub fn active(&self) -> T {
        self.session.borrow().active_model().clone()
    }

    pub fn is_editing(&self) -> bool {
        self.session.borrow().is_editing()
    }

    pub fn send(&self, action: EditAction) {
        self.session.borrow_mut().send(action);
        self.sync_names();
    }

    pub fn edit_field(&self, field: T::Field, mutator: impl FnOnce(&mut T)) {
        self.session.borrow_mut().edit_field(field, mutator);
    }

    pub fn resolve_confirmation(&self, id: ConfirmationId, confirmed: bool) {
        self.session.borrow_mut().resolve_confirmation(id, confirmed);
    }

    /// Unregisters from the store. The session is dropped with the screen.
    pub fn close(self) {
        self.store.unsubscribe(&self.subscription);
    }

    // our own saves are not echoed back, so pick up the committed names here
    fn sync_names(&self) {
        let mut session = self.session.borrow_mut();
        if session.is_editing() {
            return;
        }
        let names = NameLookup::from_items(&self.store.current());
        session.validator_mut().set_names(names.clone());
        session.projector_mut().set_names(names);
    }
}

fn apply_update<T, V, P>(session: &mut EditSession<T, V, P>, items: &[T])
where
    T: Model + Named,
    V: Validator<T> + NameAware,
    P: Projector<T> + NameAware,
{
    let names = NameLookup::from_items(items);
    session.validator_mut().set_names(names.clone());
    session.projector_mut().set_names(names);

    let id = session.stored_model().id().to_string();
    match items.iter().find(|item| item.id() == id) {
        Some(item) if session.is_editing() => {
            session.update_stored_model(item.clone());
            session.refresh();
        }
        Some(item) => session.update_stored_model(item.clone()),
        None => {
            debug!(%id, "entity not in collection, keeping last stored value");
            session.refresh();
        }
    }
}
