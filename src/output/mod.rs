//! Output module
//!
//! Singer message output and catalog rendering.
//!
//! # Overview
//!
//! This module provides:
//! - `MessageSink` - Destination for engine messages
//! - `MessageWriter` - Singer JSON lines on any `Write`
//! - Catalog building and stream selection for `discover` / `read`

mod catalog;
mod writer;

pub use catalog::{build_catalog, catalog_entry, selected_streams};
pub use writer::{MessageSink, MessageWriter, OutputFormat};

#[cfg(test)]
mod tests;
