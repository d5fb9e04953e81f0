//! Pagination state machine
//!
//! ```text
//! AwaitingFirstPage ──response──▶ AwaitingNextPage(n) ──response──▶ ... ──▶ Done
//!         │                                                               ▲
//!         └──────────────── single page / empty page / last page ─────────┘
//! ```

use crate::decode::lookup_path;
use serde_json::Value;
use tracing::debug;

/// JSON path to the total page count in a leads response
pub const TOTAL_PAGES_PATH: &str = "$.total_pages";

/// Where a stream's page walk currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationState {
    /// Nothing requested yet; the cursor is unset and the server serves page 1
    #[default]
    AwaitingFirstPage,
    /// The next request asks for this page number
    AwaitingNextPage(u32),
    /// No further requests for this stream in this run
    Done,
}

impl PaginationState {
    /// Create the initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Page number to send with the next request, if any
    pub fn cursor(&self) -> Option<u32> {
        match self {
            Self::AwaitingNextPage(page) => Some(*page),
            _ => None,
        }
    }

    /// Page number the next request will receive, counting the first as 1
    pub fn current_page(&self) -> Option<u32> {
        match self {
            Self::AwaitingFirstPage => Some(1),
            Self::AwaitingNextPage(page) => Some(*page),
            Self::Done => None,
        }
    }

    /// Check if the walk is finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Pagination strategy of a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paginator {
    /// One request, then done
    SinglePage,
    /// Walk pages until the current page reaches the reported total
    TotalPages {
        /// JSON path to the total page count
        total_pages_path: String,
    },
}

impl Paginator {
    /// Total-pages walk reading `$.total_pages`
    pub fn total_pages() -> Self {
        Self::TotalPages {
            total_pages_path: TOTAL_PAGES_PATH.to_string(),
        }
    }

    /// Compute the state after a response arrived in `state`.
    ///
    /// `records_count` is the number of records extracted from `body`.
    pub fn advance(
        &self,
        state: PaginationState,
        body: &Value,
        records_count: usize,
    ) -> PaginationState {
        let Some(current_page) = state.current_page() else {
            return PaginationState::Done;
        };

        match self {
            Self::SinglePage => PaginationState::Done,
            Self::TotalPages { total_pages_path } => {
                let total_pages = read_total_pages(body, total_pages_path);

                // Guard against responses that keep reporting pages but
                // carry no records.
                if records_count == 0 {
                    if current_page < total_pages {
                        debug!(
                            "Page {current_page} of {total_pages} was empty, stopping early"
                        );
                    }
                    return PaginationState::Done;
                }

                if current_page < total_pages {
                    PaginationState::AwaitingNextPage(current_page + 1)
                } else {
                    PaginationState::Done
                }
            }
        }
    }
}

/// Read the total page count, defaulting to 0 when absent or malformed
fn read_total_pages(body: &Value, path: &str) -> u32 {
    match lookup_path(body, path) {
        Some(Value::Number(n)) => n
            .as_u64()
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
