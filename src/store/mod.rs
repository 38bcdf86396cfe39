//! The domain store collaborator: holds the committed value, persists it and
//! fans every save out to the other registered observers.

mod in_memory;
mod notifier;
mod persistence;

use std::fmt;

use crate::error::StoreError;

pub use in_memory::InMemoryStore;
#[cfg(feature = "emitter")]
pub use notifier::EmitterNotifier;
pub use notifier::{LogNotifier, SaveNotifier};
pub use persistence::{Ephemeral, JsonFilePersistence, MemoryPersistence, Persistence};

/// Stable identity of a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Opaque token naming who requested a save. The store does not echo a save
/// back to the observer it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaverToken(Option<ObserverId>);

impl SaverToken {
    /// A saver that is not a registered observer; every observer is notified.
    pub const ANONYMOUS: SaverToken = SaverToken(None);

    pub fn observer(&self) -> Option<ObserverId> {
        self.0
    }

    fn excludes(&self, id: ObserverId) -> bool {
        self.0 == Some(id)
    }
}

/// Lifetime handle for a registration. Pass it back to
/// [`Store::unsubscribe`]; dropping it does not unregister.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: ObserverId,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Token to save with so this observer is not echoed its own save.
    pub fn saver(&self) -> SaverToken {
        SaverToken(Some(self.id))
    }
}

pub trait Store<T> {
    /// Clone of the current committed value.
    fn current(&self) -> T;

    /// Registers `observer`; it receives every save except its own.
    fn subscribe(&self, observer: Box<dyn FnMut(&T)>) -> Subscription;

    /// Returns `true` if the observer was registered.
    fn unsubscribe(&self, subscription: &Subscription) -> bool;

    /// Replaces the committed value, persists it and notifies every observer
    /// except `saver`.
    fn save(&self, value: T, saver: SaverToken) -> Result<(), StoreError>;
}
