//! # Invite Core
//!
//! Core block model for the invitation canvas: the typed block
//! catalog, the ordered canvas state, and the two persistence forms
//! (durable slot and URL transfer payload).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 invite-core                  │
//! ├──────────────────────────────────────────────┤
//! │  Block model      │  Canvas state            │
//! │  - Typed catalog  │  - Ordered sequence      │
//! │  - Stable ids     │  - Insert/remove/update  │
//! │  - Gallery slots  │  - Selection tracking    │
//! ├──────────────────────────────────────────────┤
//! │  Persistence      │  Session                 │
//! │  - Durable slot   │  - Startup precedence    │
//! │  - Share links    │  - Upload delivery       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The presentation layer (palette, drop targets, property editor)
//! consumes this crate through [`Session`] and [`catalog`]; it owns no
//! state of its own.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod canvas;
pub mod catalog;
pub mod dropzone;
pub mod error;
pub mod session;
pub mod store;
pub mod transfer;
pub mod upload;

pub use block::{
    reconcile_slots, AspectRatio, Block, BlockId, BlockKind, BlockType, CoupleInfo, GalleryCols,
    GallerySlot, ImageSize, ObjectPosition, ThumbSize, GALLERY_DEFAULT_SLOTS, GALLERY_SLOT_CHOICES,
};
pub use canvas::Canvas;
pub use dropzone::{DropGesture, DropZone};
pub use error::{CanvasError, CanvasResult};
pub use session::Session;
pub use store::{DurableSlot, FileSlot, MemorySlot, StoreError, SLOT_KEY};
pub use upload::{UploadChannel, UploadMessage, UploadSender};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
