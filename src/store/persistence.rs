use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;

/// Durable home of a store's value.
pub trait Persistence<T> {
    /// Previously persisted value, if any.
    fn load(&mut self) -> Result<Option<T>, StoreError>;

    fn save(&mut self, value: &T) -> Result<(), StoreError>;
}

/// Persists nothing.
#[derive(Debug)]
pub struct Ephemeral<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> Default for Ephemeral<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Persistence<T> for Ephemeral<T> {
    fn load(&mut self) -> Result<Option<T>, StoreError> {
        Ok(None)
    }

    fn save(&mut self, _value: &T) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Keeps the latest value as a JSON snapshot in memory.
///
/// Clones share the snapshot, so a clone kept outside the store can inspect
/// what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    snapshot: Rc<RefCell<Option<String>>>,
    writes: Rc<RefCell<u64>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(json: impl Into<String>) -> Self {
        let persistence = Self::new();
        *persistence.snapshot.borrow_mut() = Some(json.into());
        persistence
    }

    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> u64 {
        *self.writes.borrow()
    }
}

impl<T: Serialize + DeserializeOwned> Persistence<T> for MemoryPersistence {
    fn load(&mut self) -> Result<Option<T>, StoreError> {
        match self.snapshot.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        *self.snapshot.borrow_mut() = Some(json);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Persistence<T> for JsonFilePersistence {
    fn load(&mut self) -> Result<Option<T>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
