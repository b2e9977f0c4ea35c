//! Asynchronous image delivery into the canvas.
//!
//! Reading an uploaded file into a data URI finishes as a later,
//! independent event. The completion is carried as an explicit
//! message addressed by the target block's stable id - never by array
//! index or "most recently added block", since positions may have
//! shifted while the read was in flight. Both the single-image and
//! bulk upload paths use the same addressing.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::block::BlockId;

/// A completed file read addressed to one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMessage {
    /// Stable id of the owning block, resolvable before the read
    /// completion is applied.
    pub target: BlockId,
    /// The image as a data URI.
    pub data_uri: String,
    /// For gallery targets, the slot the image lands in.
    pub gallery_slot: Option<usize>,
}

impl UploadMessage {
    /// Completion for a single-image block.
    #[must_use]
    pub fn image(target: BlockId, data_uri: impl Into<String>) -> Self {
        Self {
            target,
            data_uri: data_uri.into(),
            gallery_slot: None,
        }
    }

    /// Completion for one slot of a gallery block.
    #[must_use]
    pub fn gallery(target: BlockId, slot: usize, data_uri: impl Into<String>) -> Self {
        Self {
            target,
            data_uri: data_uri.into(),
            gallery_slot: Some(slot),
        }
    }
}

/// Sending half handed to in-flight file readers.
#[derive(Debug, Clone)]
pub struct UploadSender {
    tx: Sender<UploadMessage>,
}

impl UploadSender {
    /// Post a completed read. A send after the session dropped its
    /// receiving half is a no-op; there is no cancellation for
    /// in-flight reads.
    pub fn send(&self, message: UploadMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("upload completion arrived after session end; dropped");
        }
    }
}

/// Session-scoped channel carrying upload completions.
///
/// The receiving half lives in the editing session and is drained
/// between events (run-to-completion); the sending half is cloned into
/// each file reader.
#[derive(Debug)]
pub struct UploadChannel {
    tx: Sender<UploadMessage>,
    rx: Receiver<UploadMessage>,
}

impl UploadChannel {
    /// Create a channel scoped to one editing session.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// A sender to hand to an upload initiator.
    #[must_use]
    pub fn sender(&self) -> UploadSender {
        UploadSender {
            tx: self.tx.clone(),
        }
    }

    /// Drain all completions that have arrived so far.
    #[must_use]
    pub fn drain(&self) -> Vec<UploadMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => messages.push(msg),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}

impl Default for UploadChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    #[test]
    fn test_drain_preserves_arrival_order() {
        let channel = UploadChannel::new();
        let sender = channel.sender();
        let a = BlockId::generate(BlockType::Image);
        let b = BlockId::generate(BlockType::Image);
        sender.send(UploadMessage::image(a.clone(), "data:image/png;base64,A"));
        sender.send(UploadMessage::image(b.clone(), "data:image/png;base64,B"));

        let drained = channel.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].target, a);
        assert_eq!(drained[1].target, b);
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_send_after_session_end_is_noop() {
        let channel = UploadChannel::new();
        let sender = channel.sender();
        drop(channel);
        // Must not panic.
        sender.send(UploadMessage::image(
            BlockId::generate(BlockType::Image),
            "data:image/png;base64,A",
        ));
    }
}
