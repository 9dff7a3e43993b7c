use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::engine::stats::StatsMap;
use crate::store::{StatsPort, StoreError};

#[derive(Default)]
struct Slot {
    entries: StatsMap,
    saves: usize,
}

/// In-memory storage port. Clones share the same slot, so a test can keep a
/// handle while the stats store owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Slot>>,
    failing: bool,
}

impl MemoryStore {
    pub fn with_entries(entries: StatsMap) -> Self {
        let store = Self::default();
        store.slot.borrow_mut().entries = entries;
        store
    }

    /// A port whose reads and writes always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> StatsMap {
        self.slot.borrow().entries.clone()
    }

    pub fn save_count(&self) -> usize {
        self.slot.borrow().saves
    }

    fn unavailable() -> StoreError {
        StoreError::Io(io::Error::other("storage unavailable"))
    }
}

impl StatsPort for MemoryStore {
    fn load(&self) -> Result<StatsMap, StoreError> {
        if self.failing {
            return Err(Self::unavailable());
        }
        Ok(self.slot.borrow().entries.clone())
    }

    fn save(&mut self, entries: &StatsMap) -> Result<(), StoreError> {
        if self.failing {
            return Err(Self::unavailable());
        }
        let mut slot = self.slot.borrow_mut();
        slot.entries = entries.clone();
        slot.saves += 1;
        Ok(())
    }
}
