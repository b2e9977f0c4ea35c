//! Ordered canvas state for the invitation page.
//!
//! The canvas owns the ordered sequence of placed blocks. Sequence
//! order is the vertical render order and the only ordering signal.
//! All mutations go through `&mut self`, so writes are serialized by
//! construction (single-writer model).

use serde::{Deserialize, Serialize};

use crate::block::{reconcile_slots, Block, BlockId, BlockKind, BlockType};
use crate::error::{CanvasError, CanvasResult};

/// The ordered sequence of blocks plus the transient selection.
///
/// Selection is presentation state and is excluded from the
/// serialized form; only the block sequence persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Canvas {
    blocks: Vec<Block>,
    #[serde(skip)]
    selection: Option<usize>,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a canvas from a previously serialized sequence.
    #[must_use]
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            selection: None,
        }
    }

    /// Number of blocks on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the canvas holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Read-only view of the ordered sequence.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get a block by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Find a block by its stable id.
    #[must_use]
    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Position of a block by id.
    #[must_use]
    pub fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Insert a freshly created block at `at` (clamped to `[0, len]`).
    ///
    /// `at == len` appends. Returns the new sequence length and a
    /// reference to the new instance.
    pub fn insert(
        &mut self,
        block_type: BlockType,
        label: impl Into<String>,
        at: usize,
    ) -> (usize, &Block) {
        let at = at.min(self.blocks.len());
        let block = Block::new(block_type, label);
        tracing::debug!(block_type = %block_type, id = %block.id, at, "insert block");
        self.blocks.insert(at, block);
        // Keep an existing selection pointing at the same block.
        if let Some(sel) = self.selection {
            if sel >= at {
                self.selection = Some(sel + 1);
            }
        }
        (self.blocks.len(), &self.blocks[at])
    }

    /// Remove the block at `index`, preserving the relative order of
    /// the rest.
    ///
    /// Removing the selected index resets the selection; removing an
    /// earlier index shifts the selection down by one.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`] if `index` is not in
    /// `[0, len)`.
    pub fn remove_at(&mut self, index: usize) -> CanvasResult<Block> {
        if index >= self.blocks.len() {
            return Err(CanvasError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        let block = self.blocks.remove(index);
        tracing::debug!(id = %block.id, index, "remove block");
        self.selection = match self.selection {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Ok(block)
    }

    /// Update the block at `index` through a closure.
    ///
    /// The closure receives the block's payload; id and label are
    /// preserved, and an update that swaps the payload to a different
    /// kind is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`] if `index` does not
    /// resolve, or [`CanvasError::KindChanged`] if the closure changed
    /// the block's kind.
    pub fn update_at<F>(&mut self, index: usize, f: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut BlockKind),
    {
        let len = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(CanvasError::IndexOutOfRange { index, len })?;
        apply_update(block, f)
    }

    /// Update a block by its stable id.
    ///
    /// Async completions (image uploads) must address blocks this way,
    /// since positions may have shifted while the work was in flight.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotFound`] if the id does not resolve,
    /// or [`CanvasError::KindChanged`] if the closure changed the
    /// block's kind.
    pub fn update_by_id<F>(&mut self, id: &BlockId, f: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut BlockKind),
    {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))?;
        apply_update(block, f)
    }

    /// Reconcile a gallery block's slot vector to `target_len`.
    ///
    /// Pads with empty slots or truncates, preserving existing entries
    /// by position. Idempotent for a fixed target.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotFound`] if the id does not resolve or
    /// [`CanvasError::InvalidOperation`] if the block is not a gallery.
    pub fn set_gallery_slot_count(&mut self, id: &BlockId, target_len: usize) -> CanvasResult<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))?;
        match &mut block.kind {
            BlockKind::Gallery { gallery_images, .. } => {
                reconcile_slots(gallery_images, target_len);
                Ok(())
            }
            other => Err(CanvasError::InvalidOperation(format!(
                "cannot resize slots of a {} block",
                other.block_type()
            ))),
        }
    }

    /// Empty the sequence and reset the selection.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.selection = None;
    }

    /// Select the block at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`] if `index` does not
    /// resolve; the previous selection is kept in that case.
    pub fn select(&mut self, index: usize) -> CanvasResult<()> {
        if index >= self.blocks.len() {
            return Err(CanvasError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        self.selection = Some(index);
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Currently selected index, if any.
    ///
    /// Invariant: always either `None` or a valid index into the
    /// current sequence.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Currently selected block, if any.
    #[must_use]
    pub fn selected_block(&self) -> Option<&Block> {
        self.selection.and_then(|i| self.blocks.get(i))
    }
}

/// Run an update closure against a block's payload, enforcing that the
/// kind discriminant survives.
fn apply_update<F>(block: &mut Block, f: F) -> CanvasResult<()>
where
    F: FnOnce(&mut BlockKind),
{
    let was = block.kind.block_type();
    f(&mut block.kind);
    let now = block.kind.block_type();
    if was == now {
        Ok(())
    } else {
        Err(CanvasError::KindChanged { was, now })
    }
}
