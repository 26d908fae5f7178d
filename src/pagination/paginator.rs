//! Index arithmetic and bounds checking for a paginated collection

use super::types::{PageSlot, PaginationConfig};
use crate::error::{Error, Result};
use tracing::debug;

/// Maps item indices to pages and tracks the known collection size.
///
/// `max` starts unknown and is learned from the first page that reports a
/// total. Once known it only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    max: Option<usize>,
}

impl Paginator {
    /// Create a paginator with a fixed page size
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::config("Page size must be positive"));
        }
        Ok(Self {
            page_size,
            max: None,
        })
    }

    /// A paginator for endpoints that return everything on page 0
    pub fn unpaged() -> Self {
        Self {
            page_size: usize::MAX,
            max: None,
        }
    }

    /// Create the paginator matching a pagination config
    pub fn for_config(config: &PaginationConfig) -> Result<Self> {
        match config.page_size() {
            Some(size) => Self::new(size),
            None => Ok(Self::unpaged()),
        }
    }

    /// Same page size, size not yet known
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            page_size: self.page_size,
            max: None,
        }
    }

    /// Records per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The known collection size, if any page has reported it
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Check whether the collection size is known
    pub fn is_bounded(&self) -> bool {
        self.max.is_some()
    }

    /// Page holding item `index`
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }

    /// Index of the first item on `page`
    pub fn first_index(&self, page: usize) -> usize {
        page.saturating_mul(self.page_size)
    }

    /// Resolve one item index to its page and offset
    pub fn resolve(&self, index: usize) -> Result<PageSlot> {
        if let Some(max) = self.max {
            if index >= max {
                return Err(Error::out_of_range(index, max));
            }
        }
        Ok(slot(self.page_size, index))
    }

    /// Resolve every index of `[start, stop)` in ascending order.
    ///
    /// `stop` is clamped to `max` when the size is known; an inverted range
    /// is rejected rather than treated as empty. Slots are produced lazily,
    /// so an unknown size with a huge `stop` allocates nothing up front.
    pub fn resolve_range(
        &self,
        start: usize,
        stop: usize,
    ) -> Result<impl Iterator<Item = PageSlot>> {
        if start > stop {
            return Err(Error::InvalidSlice { start, stop });
        }
        let stop = self.clamp(stop);
        let page_size = self.page_size;
        Ok((start..stop).map(move |index| slot(page_size, index)))
    }

    /// Clamp a slice bound to the known size
    pub fn clamp(&self, bound: usize) -> usize {
        self.max.map_or(bound, |max| bound.min(max))
    }

    /// Record the server-reported total
    pub fn observe(&mut self, total: usize) {
        match self.max {
            Some(max) if total < max => {
                debug!(max, total, "Ignoring smaller total than already observed");
            }
            Some(max) if total == max => {}
            _ => {
                debug!(total, "Collection size observed");
                self.max = Some(total);
            }
        }
    }
}

fn slot(page_size: usize, index: usize) -> PageSlot {
    PageSlot {
        index,
        page: index / page_size,
        offset: index % page_size,
    }
}
