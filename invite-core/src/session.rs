//! The editing session.
//!
//! Owns the canvas for its lifetime, seeds it at startup from the
//! durable slot or the entry URL, persists the full sequence after
//! every structural mutation, and applies asynchronous upload
//! completions. All mutations run to completion on a single logical
//! writer; there is no parallel mutation path.

use url::Url;

use crate::block::{Block, BlockId, BlockKind, BlockType};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::store::{load_blocks, save_blocks, DurableSlot};
use crate::transfer;
use crate::upload::{UploadChannel, UploadMessage, UploadSender};

/// One editing session over a canvas.
pub struct Session<S: DurableSlot> {
    canvas: Canvas,
    slot: S,
    uploads: UploadChannel,
}

impl<S: DurableSlot> Session<S> {
    /// Start a session, seeding the canvas.
    ///
    /// The durable slot takes priority; a `data` payload on the entry
    /// URL only seeds an otherwise-empty canvas, so a returning user's
    /// in-progress work is never clobbered by a stale link. A payload
    /// that fails to decode is logged and ignored.
    #[must_use]
    pub fn start(slot: S, entry_url: Option<&Url>) -> Self {
        let mut blocks = load_blocks(&slot);

        if blocks.is_empty() {
            if let Some(payload) = entry_url.and_then(transfer::payload_from_url) {
                match transfer::decode(&payload) {
                    Ok(transferred) => {
                        tracing::info!(blocks = transferred.len(), "seeded canvas from share link");
                        blocks = transferred;
                    }
                    Err(e) => {
                        tracing::warn!("ignoring undecodable transfer payload: {e}");
                    }
                }
            }
        } else if entry_url.and_then(transfer::payload_from_url).is_some() {
            tracing::info!("durable slot takes priority; ignoring transfer payload");
        }

        Self {
            canvas: Canvas::from_blocks(blocks),
            slot,
            uploads: UploadChannel::new(),
        }
    }

    /// The canvas, read-only.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// A sender for upload initiators to post completions on.
    #[must_use]
    pub fn upload_sender(&self) -> UploadSender {
        self.uploads.sender()
    }

    /// Insert a new block at `at` and persist. Returns the id of the
    /// new instance, resolvable before any related file read resolves.
    pub fn insert_at(&mut self, block_type: BlockType, label: impl Into<String>, at: usize) -> BlockId {
        let (_, block) = self.canvas.insert(block_type, label, at);
        let id = block.id.clone();
        self.persist();
        id
    }

    /// Remove the block at `index` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IndexOutOfRange`](crate::CanvasError::IndexOutOfRange)
    /// if `index` does not resolve; the canvas is unchanged in that case.
    pub fn remove_at(&mut self, index: usize) -> CanvasResult<Block> {
        let removed = self.canvas.remove_at(index)?;
        self.persist();
        Ok(removed)
    }

    /// Remove the currently selected block, if any, and persist.
    pub fn remove_selected(&mut self) -> Option<Block> {
        let index = self.canvas.selection()?;
        let removed = self.canvas.remove_at(index).ok()?;
        self.persist();
        Some(removed)
    }

    /// Update a block by id through a closure and persist.
    ///
    /// # Errors
    ///
    /// Propagates [`CanvasError::NotFound`](crate::CanvasError::NotFound) and
    /// [`CanvasError::KindChanged`](crate::CanvasError::KindChanged); the
    /// canvas is unchanged on error.
    pub fn update_by_id<F>(&mut self, id: &BlockId, f: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut BlockKind),
    {
        self.canvas.update_by_id(id, f)?;
        self.persist();
        Ok(())
    }

    /// Reconcile a gallery block's slot count and persist.
    ///
    /// # Errors
    ///
    /// Propagates the canvas errors; the canvas is unchanged on error.
    pub fn set_gallery_slot_count(&mut self, id: &BlockId, target_len: usize) -> CanvasResult<()> {
        self.canvas.set_gallery_slot_count(id, target_len)?;
        self.persist();
        Ok(())
    }

    /// Select the block at `index`.
    ///
    /// # Errors
    ///
    /// Propagates [`CanvasError::IndexOutOfRange`](crate::CanvasError::IndexOutOfRange).
    pub fn select(&mut self, index: usize) -> CanvasResult<()> {
        self.canvas.select(index)
    }

    /// Empty the canvas and persist.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.persist();
    }

    /// Apply all pending upload completions; returns how many actually
    /// wrote to their target block.
    ///
    /// A completion whose target block has been removed in the
    /// meantime is an expected benign race and is dropped silently, as
    /// is one whose gallery slot index is out of range or whose target
    /// is not of the addressed kind. Dropped completions are not
    /// counted and do not trigger a persist.
    pub fn drain_uploads(&mut self) -> usize {
        let mut applied = 0;
        for message in self.uploads.drain() {
            if self.apply_upload(&message) {
                applied += 1;
            }
        }
        if applied > 0 {
            self.persist();
        }
        applied
    }

    /// Build a shareable link carrying the current full sequence.
    ///
    /// # Errors
    ///
    /// Propagates [`CanvasError::Serialization`](crate::CanvasError::Serialization).
    pub fn share_url(&self, base: &Url) -> CanvasResult<Url> {
        transfer::share_url(base, self.canvas.blocks())
    }

    fn apply_upload(&mut self, message: &UploadMessage) -> bool {
        if self.canvas.find(&message.target).is_none() {
            tracing::debug!(target = %message.target, "upload target vanished; dropping completion");
            return false;
        }
        let data_uri = message.data_uri.clone();
        let slot = message.gallery_slot;
        let mut written = false;
        let result = self.canvas.update_by_id(&message.target, |kind| match kind {
            BlockKind::Image { image_url, .. } if slot.is_none() => {
                *image_url = Some(data_uri);
                written = true;
            }
            BlockKind::Gallery { gallery_images, .. } => {
                if let Some(target_slot) = slot.and_then(|s| gallery_images.get_mut(s)) {
                    target_slot.url = data_uri;
                    written = true;
                }
            }
            _ => {}
        });
        if !written {
            tracing::debug!(
                target = %message.target,
                slot = ?slot,
                "upload did not match its target; dropping completion"
            );
        }
        result.is_ok() && written
    }

    fn persist(&self) {
        save_blocks(&self.slot, self.canvas.blocks());
    }
}
