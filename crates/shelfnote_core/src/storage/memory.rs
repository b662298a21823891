//! In-memory slot storage.
//!
//! Clones share the same slots, so a test can keep one handle for
//! inspection while the store owns another.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Slots {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

/// Shared in-memory key-value storage with fault injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<Slots>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `get` calls fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.slots.fail_reads.set(fail);
    }

    /// Makes subsequent `set`/`remove` calls fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.slots.fail_writes.set(fail);
    }

    /// Number of successful `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.slots.writes.get()
    }

    /// Raw slot value, bypassing fault injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.values.borrow().get(key).cloned()
    }

    /// Writes a raw slot value, bypassing fault injection and write counting.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) {
        self.slots
            .values
            .borrow_mut()
            .insert(key.to_string(), value.into());
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.slots.fail_writes.get() {
            return Err(StorageError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.slots.fail_reads.get() {
            return Err(StorageError::Unavailable("read rejected".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.put_raw(key, value);
        self.slots.writes.set(self.slots.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.slots.values.borrow_mut().remove(key);
        self.slots.writes.set(self.slots.writes.get() + 1);
        Ok(())
    }
}
