//! Pagination types and traits
//!
//! Defines the lister seam the pager drives and the cursor termination
//! policy.

use crate::error::Result;
use crate::models::ListConfigsResponse;
use crate::service::ListConfigsOptions;
use async_trait::async_trait;

/// Something that can fetch one page of configs
///
/// Implemented by `ConfigurationAggregatorClient`; tests substitute
/// scripted fakes.
#[async_trait]
pub trait ListConfigs: Send + Sync {
    /// Fetch the page selected by `options.start`
    async fn list_configs(&self, options: &ListConfigsOptions) -> Result<ListConfigsResponse>;
}

/// Result of inspecting a page for its successor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page follows, fetched with this `start` cursor
    Continue {
        /// Cursor for the next request
        start: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Decide from a page whether traversal continues
    ///
    /// A missing `next`, a missing `next.start` and an empty `next.start` all
    /// end traversal. The number of items on the page does not matter.
    pub fn from_response(response: &ListConfigsResponse) -> Self {
        match response.next_start() {
            Some(start) if !start.is_empty() => Self::Continue {
                start: start.to_string(),
            },
            _ => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Counters kept while paginating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched successfully
    pub pages: u64,
    /// Items returned across those pages
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, items: usize) {
        self.pages += 1;
        self.total_fetched += items as u64;
    }
}
