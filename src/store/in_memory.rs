use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{
    Ephemeral, ObserverId, Persistence, SaveNotifier, SaverToken, Store, Subscription,
};
use crate::error::StoreError;

type Observer<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    value: T,
    observers: Vec<(ObserverId, Observer<T>)>,
    next_observer: u64,
    persistence: Box<dyn Persistence<T>>,
    notifiers: Vec<Box<dyn SaveNotifier<T>>>,
    fanning_out: bool,
    removed_during_fan_out: Vec<ObserverId>,
    last_error: Option<StoreError>,
}

/// Single-threaded store with an explicit observer registry.
///
/// Cloning yields another handle to the same store. Observers are called
/// without the store borrowed, so they may read [`current`](Store::current),
/// subscribe or unsubscribe; saving from inside a fan-out is refused with
/// [`StoreError::Busy`].
///
/// The in-memory value is replaced before the durable write. A failed write
/// is returned and remembered in [`last_error`](Self::last_error) but the
/// value is not rolled back.
pub struct InMemoryStore<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> InMemoryStore<T> {
    pub fn new(initial: T) -> Self {
        Self::with_persistence(initial, Ephemeral::default())
    }

    pub fn with_persistence<P>(initial: T, persistence: P) -> Self
    where
        P: Persistence<T> + 'static,
    {
        InMemoryStore {
            inner: Rc::new(RefCell::new(Inner {
                value: initial,
                observers: Vec::new(),
                next_observer: 1,
                persistence: Box::new(persistence),
                notifiers: Vec::new(),
                fanning_out: false,
                removed_during_fan_out: Vec::new(),
                last_error: None,
            })),
        }
    }

    /// Opens a store on whatever `persistence` holds, or `default` when it
    /// holds nothing yet.
    pub fn load<P>(mut persistence: P, default: T) -> Result<Self, StoreError>
    where
        P: Persistence<T> + 'static,
    {
        let value = match persistence.load()? {
            Some(value) => value,
            None => {
                debug!("nothing persisted yet, starting from default");
                default
            }
        };
        Ok(Self::with_persistence(value, persistence))
    }

    pub fn add_notifier<N>(&self, notifier: N)
    where
        N: SaveNotifier<T> + 'static,
    {
        self.inner.borrow_mut().notifiers.push(Box::new(notifier));
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// The most recent persistence failure, if any.
    pub fn last_error(&self) -> Option<StoreError> {
        self.inner.borrow().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.inner.borrow_mut().last_error = None;
    }

    /// Save hook for an [`EditSession`](crate::EditSession): forwards every
    /// commit to this store as `saver`. Failures are logged and kept in
    /// [`last_error`](Self::last_error).
    pub fn save_hook(&self, saver: SaverToken) -> impl FnMut(&T) + 'static {
        let store = self.clone();
        move |value: &T| {
            if let Err(err) = store.save(value.clone(), saver) {
                warn!(error = %err, "save from edit session failed");
            }
        }
    }

    /// Applies `mutator` to a copy of the current value and saves it.
    pub fn update<F>(&self, saver: SaverToken, mutator: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.current();
        mutator(&mut value);
        self.save(value, saver)
    }
}

impl<T: Clone + 'static> Store<T> for InMemoryStore<T> {
    fn current(&self) -> T {
        self.inner.borrow().value.clone()
    }

    fn subscribe(&self, observer: Box<dyn FnMut(&T)>) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = ObserverId(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push((id, observer));
        debug!(%id, "observer subscribed");
        Subscription { id }
    }

    fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut inner = self.inner.borrow_mut();
        let id = subscription.id;
        let before = inner.observers.len();
        inner.observers.retain(|(observer, _)| *observer != id);
        if inner.observers.len() != before {
            debug!(%id, "observer unsubscribed");
            return true;
        }
        if inner.fanning_out && !inner.removed_during_fan_out.contains(&id) {
            // the observer list is detached for the fan-out; drop it on reattach
            inner.removed_during_fan_out.push(id);
            debug!(%id, "observer unsubscribed during fan-out");
            return true;
        }
        false
    }

    fn save(&self, value: T, saver: SaverToken) -> Result<(), StoreError> {
        let (mut observers, persisted) = {
            let mut inner = self
                .inner
                .try_borrow_mut()
                .map_err(|_| StoreError::Busy("save"))?;
            if inner.fanning_out {
                return Err(StoreError::Busy("save"));
            }
            inner.value = value.clone();
            let persisted = inner.persistence.save(&value);
            if let Err(err) = &persisted {
                warn!(error = %err, "persisting saved value failed, keeping in-memory value");
                inner.last_error = Some(err.clone());
            }
            inner.fanning_out = true;
            (mem::take(&mut inner.observers), persisted)
        };

        let mut notified = 0usize;
        for (id, observer) in observers.iter_mut() {
            if saver.excludes(*id) {
                continue;
            }
            observer(&value);
            notified += 1;
        }

        let mut inner = self.inner.borrow_mut();
        inner.fanning_out = false;
        let removed = mem::take(&mut inner.removed_during_fan_out);
        observers.retain(|(id, _)| !removed.contains(id));
        let added = mem::take(&mut inner.observers);
        observers.extend(added);
        inner.observers = observers;
        for notifier in inner.notifiers.iter_mut() {
            notifier.notify(&value, saver);
        }
        debug!(notified, saver = ?saver.observer(), "save fanned out");

        persisted
    }
}
