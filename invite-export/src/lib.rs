//! # Invite Export
//!
//! Renders an invitation block sequence into a standalone HTML
//! document: complete doctype, head, and body, with no script
//! dependency. The output can be downloaded, mailed, or hosted as-is.
//!
//! ```
//! use invite_core::{catalog, Block, BlockType};
//! use invite_export::HtmlExporter;
//!
//! let blocks = vec![Block::new(BlockType::Date, catalog::label_for(BlockType::Date))];
//! let html = HtmlExporter::with_defaults().render(&blocks);
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod html;

pub use error::{ExportError, ExportResult};
pub use html::{ExportConfig, HtmlExporter, EXPORT_FILENAME};

/// Export crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
