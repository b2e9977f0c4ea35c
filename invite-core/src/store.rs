//! Durable client-side slot for the block sequence.
//!
//! The canvas is persisted as a JSON array of blocks under a single
//! named key. The slot is written after every mutation and read once
//! at session start; an absent or unparsable value is treated as an
//! empty sequence and the corrupt value is discarded (fail-soft).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::block::Block;

/// The slot key holding the serialized block sequence.
pub const SLOT_KEY: &str = "wedding-invite-items";

/// Errors that can occur on the filesystem-backed slot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A durable key-value slot surviving process restarts.
///
/// Reads and writes are infallible from the caller's point of view:
/// implementations log failures and degrade to "value absent".
pub trait DurableSlot {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str);

    /// Discard the value stored under `key`.
    fn discard(&self, key: &str);
}

/// In-memory slot, used for tests and headless sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySlot {
    /// Create an empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableSlot for MemorySlot {
    fn read(&self, key: &str) -> Option<String> {
        let values = self
            .values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        values.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
    }

    fn discard(&self, key: &str) {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        values.remove(key);
    }
}

/// Filesystem-backed slot storing one JSON file per key under a data
/// directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    data_dir: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `data_dir`. The directory is created if
    /// it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(key)))
    }
}

impl DurableSlot for FileSlot {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read slot {key} from {}: {e}", path.display());
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("Failed to persist slot {key} to {}: {e}", path.display());
        }
    }

    fn discard(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to discard slot {key} at {}: {e}", path.display());
            }
        }
    }
}

/// Load the block sequence from a slot.
///
/// Absent or unparsable ⇒ empty sequence; a corrupt value is discarded
/// so the next session starts clean.
#[must_use]
pub fn load_blocks(slot: &dyn DurableSlot) -> Vec<Block> {
    let Some(raw) = slot.read(SLOT_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Block>>(&raw) {
        Ok(blocks) => blocks,
        Err(e) => {
            tracing::warn!("Discarding corrupt slot value under {SLOT_KEY}: {e}");
            slot.discard(SLOT_KEY);
            Vec::new()
        }
    }
}

/// Serialize the block sequence and write it to the slot.
///
/// A serialization failure is logged and the previous value is left in
/// place; persistence never interrupts the editing session.
pub fn save_blocks(slot: &dyn DurableSlot, blocks: &[Block]) {
    match serde_json::to_string(blocks) {
        Ok(json) => slot.write(SLOT_KEY, &json),
        Err(e) => tracing::warn!("Failed to serialize canvas for {SLOT_KEY}: {e}"),
    }
}

/// Sanitize a slot key for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockType};

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::new(BlockType::Text, "텍스트"),
            Block::new(BlockType::Date, "일정"),
        ]
    }

    #[test]
    fn test_memory_slot_round_trip() {
        let slot = MemorySlot::new();
        save_blocks(&slot, &sample_blocks());
        let restored = load_blocks(&slot);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].block_type(), BlockType::Text);
    }

    #[test]
    fn test_absent_slot_is_empty_sequence() {
        let slot = MemorySlot::new();
        assert!(load_blocks(&slot).is_empty());
    }

    #[test]
    fn test_corrupt_slot_discarded() {
        let slot = MemorySlot::new();
        slot.write(SLOT_KEY, "{not json!");
        assert!(load_blocks(&slot).is_empty());
        // The corrupt value is gone, not retried on the next load.
        assert!(slot.read(SLOT_KEY).is_none());
    }

    #[test]
    fn test_file_slot_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = FileSlot::new(dir.path()).expect("slot");
        save_blocks(&slot, &sample_blocks());

        let reopened = FileSlot::new(dir.path()).expect("slot");
        let restored = load_blocks(&reopened);
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_file_slot_discard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = FileSlot::new(dir.path()).expect("slot");
        save_blocks(&slot, &sample_blocks());
        assert!(slot.read(SLOT_KEY).is_some());

        slot.discard(SLOT_KEY);
        assert!(slot.read(SLOT_KEY).is_none());
    }

    #[test]
    fn test_file_slot_corrupt_value_discarded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = FileSlot::new(dir.path()).expect("slot");
        slot.write(SLOT_KEY, "[{\"id\":42}]");
        assert!(load_blocks(&slot).is_empty());
        assert!(slot.read(SLOT_KEY).is_none());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("wedding-invite-items"), "wedding-invite-items");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("a.b.c"), "a_b_c");
    }
}
