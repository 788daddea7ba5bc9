//! Cursor pager over `list configs`

use super::types::{ListConfigs, NextPage, PaginationState};
use crate::error::{Error, Result};
use crate::models::Config;
use crate::service::ListConfigsOptions;
use crate::types::OptionStringExt;
use futures::Stream;
use tracing::debug;

/// Walks every page of a `list configs` query
///
/// The pager owns a copy of the options; the cursor lives in that copy's
/// `start`. `next_page` takes `&mut self`, so one pager never has two
/// requests in flight.
pub struct ConfigsPager<'a, L: ListConfigs + ?Sized> {
    lister: &'a L,
    options: ListConfigsOptions,
    has_next: bool,
    state: PaginationState,
}

impl<'a, L: ListConfigs + ?Sized> ConfigsPager<'a, L> {
    /// Create a pager starting at `options.start` (or the first page)
    ///
    /// The options are copied, so later changes to `options` do not affect
    /// the pager.
    pub fn new(lister: &'a L, options: &ListConfigsOptions) -> Result<Self> {
        options.validate()?;

        let mut options = options.clone();
        options.start = options.start.take().none_if_empty();

        Ok(Self {
            lister,
            options,
            has_next: true,
            state: PaginationState::new(),
        })
    }

    /// Whether another page may be fetched
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Cursor of the page the next call will fetch; `None` means the first
    /// page
    pub fn cursor(&self) -> Option<&str> {
        self.options.start.as_deref()
    }

    /// Counters for the pages fetched so far
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Fetch the next page and return its items
    ///
    /// Fails with [`Error::Exhausted`] once the last page has been returned.
    /// A failed fetch leaves the pager untouched, so calling again retries
    /// the same page.
    pub async fn next_page(&mut self) -> Result<Vec<Config>> {
        if !self.has_next {
            return Err(Error::Exhausted);
        }

        let response = self.lister.list_configs(&self.options).await?;

        match NextPage::from_response(&response) {
            NextPage::Continue { start } => self.options.start = Some(start),
            NextPage::Done => self.has_next = false,
        }
        self.state.add_page(response.configs.len());

        debug!(
            "Fetched page {} with {} configs (more: {})",
            self.state.pages,
            response.configs.len(),
            self.has_next
        );

        Ok(response.configs)
    }

    /// Fetch every remaining page and concatenate the items in page order
    ///
    /// Stops at the first error and returns it; items already fetched are
    /// dropped.
    pub async fn get_all(mut self) -> Result<Vec<Config>> {
        let mut all = Vec::new();
        while self.has_next {
            let page = self.next_page().await?;
            all.extend(page);
        }

        debug!(
            "Fetched {} configs across {} pages",
            self.state.total_fetched, self.state.pages
        );
        Ok(all)
    }

    /// Yield one item per page, ending after the last page or the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<Config>>> + 'a {
        futures::stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next {
                return Ok::<_, Error>(None);
            }
            let page = pager.next_page().await?;
            Ok(Some((page, pager)))
        })
    }
}

impl<L: ListConfigs + ?Sized> std::fmt::Debug for ConfigsPager<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigsPager")
            .field("options", &self.options)
            .field("has_next", &self.has_next)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
