//! Pagination module
//!
//! # Overview
//!
//! `GET /configs` is cursor paginated: each page carries `next.start`, which
//! is passed back as the `start` query parameter to fetch the following
//! page. [`ConfigsPager`] hides that loop and offers three ways to consume
//! it:
//!
//! - [`ConfigsPager::next_page`] one page at a time
//! - [`ConfigsPager::into_stream`] as a `futures::Stream` of pages
//! - [`ConfigsPager::get_all`] everything at once
//!
//! Traversal ends when a page has no `next.start` or an empty one.

mod pager;
mod types;

pub use pager::ConfigsPager;
pub use types::{ListConfigs, NextPage, PaginationState};
