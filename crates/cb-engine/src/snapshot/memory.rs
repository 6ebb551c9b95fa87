//! In-process slot storage.

use std::collections::HashMap;

use super::storage::{SlotStorage, StorageError};

/// Slot storage held in a map. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    payloads: HashMap<String, String>,
    read_only: bool,
}

impl MemorySlotStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every write.
    pub fn read_only() -> Self {
        Self {
            payloads: HashMap::new(),
            read_only: true,
        }
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.payloads.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("storage is read-only".to_string()));
        }
        self.payloads.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
