// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-whatconverts
//!
//! A Singer tap extracting accounts, profiles, leads and tracking
//! configuration from the WhatConverts REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_whatconverts::config::TapConfig;
//! use tap_whatconverts::engine::SyncEngine;
//! use tap_whatconverts::http::HttpClientConfig;
//! use tap_whatconverts::output::MessageWriter;
//! use tap_whatconverts::streams::all_streams;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> tap_whatconverts::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let mut engine = SyncEngine::from_config(config, HttpClientConfig::default())?;
//!
//!     let streams: Vec<_> = all_streams().iter().collect();
//!     let mut writer = MessageWriter::new(std::io::stdout());
//!     engine.sync(&streams, &mut writer).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI: spec · check · discover · streams · read               │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────────────────────────────────────────────────────┐
//! │  SyncEngine: accounts → profiles → leads → numbers → forms   │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬───────────┬──────┴───────┬───────────┬───────────┐
//! │ Streams  │   HTTP    │  Pagination  │  Decode   │  Output   │
//! ├──────────┼───────────┼──────────────┼───────────┼───────────┤
//! │ Params   │ Basic auth│ total_pages  │ JSONPath  │ SCHEMA    │
//! │ Schemas  │ Retry     │ Single page  │ profile_id│ RECORD    │
//! │ Fan-out  │ Rate Limit│              │ stamping  │ STATE     │
//! └──────────┴───────────┴──────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// Basic authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Record extraction from response bodies
pub mod decode;

/// Stream schemas
pub mod schema;

/// Stream definitions and request parameters
pub mod streams;

/// Main execution engine
pub mod engine;

/// Singer message output and catalog
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{StartDate, TapConfig};
pub use engine::{Message, SyncEngine, SyncStats};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
