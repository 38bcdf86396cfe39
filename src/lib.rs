//! Edit-session reconciliation core for a home bar inventory and recipe book.
//!
//! A screen holds an [`EditSession`] over a domain value: the last value the
//! [`Store`] pushed, plus a working copy the user edits. Saves are gated by a
//! [`Validator`], every change is rendered through a [`Projector`] into a
//! [`DisplaySink`], and lists are sectioned alphabetically with
//! [`group_by_name`].

// lets `#[derive(Model, Named)]` name `barkeep::` from inside this crate
extern crate self as barkeep;

pub mod bar;
mod config;
mod error;
mod grouping;
mod list;
mod model;
mod projection;
pub mod screen;
mod session;
mod store;
mod validation;

pub use config::{BarkeepConfig, GroupingOptions, SessionOptions};
pub use error::{ConfigError, StoreError};
pub use grouping::{
    all_tags, by_name, filter_by_tags, group_by, group_by_name, group_by_name_with, section_key,
    GroupedCollection, Section, TagMatch, Tagged, COLLAPSED_TITLE,
};
pub use list::ListEditController;
pub use model::{ListField, Model, Named, TouchedFields};
pub use projection::{show_error, Identity, Projector};
pub use session::{
    ConfirmationId, DisplaySink, DoneType, EditAction, EditModeDisplay, EditSession, NullSink,
    RecordingSink, SessionState, SinkMessage,
};
#[cfg(feature = "emitter")]
pub use store::EmitterNotifier;
pub use store::{
    Ephemeral, InMemoryStore, JsonFilePersistence, LogNotifier, MemoryPersistence, ObserverId,
    Persistence, SaveNotifier, SaverToken, Store, Subscription,
};
pub use validation::{suggest_name, AlwaysValid, NameLookup, ValidationResult, Validator};

// Derive macros share names with the traits they implement.
pub use barkeep_macros::{Model, Named};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
