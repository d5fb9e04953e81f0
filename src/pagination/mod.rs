//! Pagination module
//!
//! Drives the page cursor for a stream.
//!
//! # Overview
//!
//! A stream either fits on a single page, or (leads) reports a
//! `total_pages` count that the driver walks one page at a time. The
//! driver is a small state machine: [`PaginationState`] holds where the
//! walk is, and [`Paginator::advance`] computes the next state from the
//! response that just arrived.

mod types;

pub use types::{PaginationState, Paginator, TOTAL_PAGES_PATH};
