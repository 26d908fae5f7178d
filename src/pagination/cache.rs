//! Page fetching and memoization

use super::paginator::Paginator;
use super::types::{Page, PageStrategy};
use crate::error::Result;
use crate::query::Transport;
use crate::types::StringMap;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Where pages of one query come from: endpoint, filters and strategy
#[derive(Clone)]
pub struct PageSource {
    transport: Arc<dyn Transport>,
    url: String,
    params: StringMap,
    strategy: Arc<dyn PageStrategy>,
}

impl PageSource {
    /// Create a page source for a collection URL
    pub fn new(
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
        strategy: Arc<dyn PageStrategy>,
    ) -> Self {
        Self {
            transport,
            url: url.into(),
            params: StringMap::new(),
            strategy,
        }
    }

    /// Collection URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters sent with every page
    pub fn params(&self) -> &StringMap {
        &self.params
    }

    /// A copy of this source with one more query parameter
    #[must_use]
    pub fn with_param(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut source = self.clone();
        source.params.insert(key.into(), value.into());
        source
    }

    /// Fetch one page through the transport
    pub async fn fetch(&self, page_index: usize) -> Result<Page> {
        let mut params = self.params.clone();
        params.extend(self.strategy.page_params(page_index));

        let body = self.transport.get(&self.url, &params).await?;
        self.strategy.parse(&body)
    }
}

impl std::fmt::Debug for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSource")
            .field("url", &self.url)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Fetched pages of one queryset, keyed by page index.
///
/// Pages are never evicted, and a page index is fetched at most once: a
/// failed fetch stores nothing, so a retry starts clean.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<usize, Page>,
    fetches: usize,
}

impl PageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return page `page_index`, fetching it on a miss.
    ///
    /// A fetched page reports the collection size to `paginator`: either the
    /// server total, or the end implied by a short page.
    pub async fn get_or_fetch(
        &mut self,
        page_index: usize,
        source: &PageSource,
        paginator: &mut Paginator,
    ) -> Result<&Page> {
        match self.pages.entry(page_index) {
            Entry::Occupied(entry) => {
                trace!(page = page_index, "Page cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(
                    url = %source.url(),
                    page = page_index,
                    page_size = paginator.page_size(),
                    "Fetching page"
                );
                let page = source.fetch(page_index).await?;
                self.fetches += 1;

                match page.total {
                    Some(total) => paginator.observe(total),
                    None if page.len() < paginator.page_size() => paginator.observe(
                        paginator
                            .first_index(page_index)
                            .saturating_add(page.len()),
                    ),
                    None => {}
                }

                Ok(entry.insert(page))
            }
        }
    }

    /// Cached page, if present
    pub fn get(&self, page_index: usize) -> Option<&Page> {
        self.pages.get(&page_index)
    }

    /// Check whether a page is cached
    pub fn contains(&self, page_index: usize) -> bool {
        self.pages.contains_key(&page_index)
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of successful fetches issued through this cache
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Indices of the cached pages, ascending
    pub fn page_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }
}
