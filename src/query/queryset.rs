//! The lazy queryset

use super::transport::EntityFactory;
use crate::error::{Error, Result};
use crate::pagination::{PageCache, PageSource, Paginator};
use futures::stream::{self, Stream};
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

/// Maximum number of entities shown by `Queryset::preview`
pub const REPR_OUTPUT_SIZE: usize = 20;

/// A lazy view over a remote collection.
///
/// Nothing is fetched until an entity, a slice or the length is asked for.
/// Pages are then fetched one at a time, in ascending order, and cached for
/// the lifetime of the queryset, so a page index is requested at most once.
/// Filtering or ordering returns a new queryset with its own empty cache.
///
/// A queryset is not shared: every operation takes `&mut self`. Independent
/// consumers of the same query should each build their own.
pub struct Queryset<E> {
    name: String,
    source: PageSource,
    factory: Arc<dyn EntityFactory<E>>,
    paginator: Paginator,
    cache: PageCache,
    empty: bool,
}

impl<E> Queryset<E> {
    /// Create a queryset over `source`
    pub fn new(
        name: impl Into<String>,
        source: PageSource,
        paginator: Paginator,
        factory: Arc<dyn EntityFactory<E>>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            factory,
            paginator: paginator.fresh(),
            cache: PageCache::new(),
            empty: false,
        }
    }

    /// A queryset that explicitly matches nothing and never fetches
    #[must_use]
    pub fn none(&self) -> Self {
        Self {
            empty: true,
            ..self.derive(self.source.clone())
        }
    }

    /// Check whether this is the explicit empty queryset
    pub fn is_none(&self) -> bool {
        self.empty
    }

    /// A new queryset restricted by one more query parameter
    #[must_use]
    pub fn filter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.derive(self.source.with_param(key, value))
    }

    /// A new queryset ordered by `field` (`-field` for descending)
    #[must_use]
    pub fn order_by(&self, field: impl Into<String>) -> Self {
        self.derive(self.source.with_param("ordering", field))
    }

    fn derive(&self, source: PageSource) -> Self {
        Self {
            name: self.name.clone(),
            source,
            factory: self.factory.clone(),
            paginator: self.paginator.fresh(),
            cache: PageCache::new(),
            empty: self.empty,
        }
    }

    /// Name of the entity kind
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint and filters pages are fetched from
    pub fn source(&self) -> &PageSource {
        &self.source
    }

    /// Pagination state
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Pages fetched so far
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Number of entities in the collection.
    ///
    /// Fetches page 0 if the size is not known yet. Servers that report no
    /// count are paged through until a short page reveals the end.
    pub async fn len(&mut self) -> Result<usize> {
        if self.empty {
            return Ok(0);
        }

        let mut page = 0;
        while self.paginator.max().is_none() {
            while self.cache.contains(page) {
                page += 1;
            }
            match self
                .cache
                .get_or_fetch(page, &self.source, &mut self.paginator)
                .await
            {
                Ok(_) => {}
                // Past the last page of a server that reports no count
                Err(e) if e.is_not_found() && page > 0 => {
                    self.paginator.observe(self.paginator.first_index(page));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.paginator.max().unwrap_or_default())
    }

    /// Check whether the collection has no entities
    pub async fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Entity at `index`
    pub async fn get(&mut self, index: usize) -> Result<E> {
        if self.empty {
            return Err(Error::out_of_range(index, 0));
        }

        let slot = self.paginator.resolve(index)?;
        let page = match self
            .cache
            .get_or_fetch(slot.page, &self.source, &mut self.paginator)
            .await
        {
            Ok(page) => page,
            // Page past the end: learn the size to report the range
            Err(e) if e.is_not_found() && slot.page > 0 => {
                let max = self.len().await?;
                return Err(Error::out_of_range(index, max));
            }
            Err(e) => return Err(e),
        };

        // The fetch may have revealed the size
        self.paginator.resolve(index)?;
        let record = page.get(slot.offset).ok_or_else(|| {
            let end = self.paginator.first_index(slot.page) + page.len();
            Error::out_of_range(index, self.paginator.max().unwrap_or(end))
        })?;

        Ok(self.factory.materialize(record))
    }

    /// First entity, or `None` when the collection is empty
    pub async fn first(&mut self) -> Result<Option<E>> {
        match self.get(0).await {
            Ok(entity) => Ok(Some(entity)),
            Err(Error::IndexOutOfRange { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Entities in `[start, stop)`, in index order.
    ///
    /// `start > stop` is an error even before anything is fetched. `stop` is
    /// clamped to the collection size once that is known. Either the whole
    /// slice is returned or an error; pages fetched before a failure stay
    /// cached.
    pub async fn get_slice(&mut self, start: usize, stop: usize) -> Result<Vec<E>> {
        if start > stop {
            return Err(Error::InvalidSlice { start, stop });
        }
        if self.empty || start == stop {
            return Ok(Vec::new());
        }

        if !self.paginator.is_bounded() {
            let first = self.paginator.page_of(start);
            match self
                .cache
                .get_or_fetch(first, &self.source, &mut self.paginator)
                .await
            {
                Ok(_) => {}
                Err(e) if e.is_not_found() && first > 0 => {
                    self.len().await?;
                }
                Err(e) => return Err(e),
            }
        }

        // `max` may still be unknown here; the walk re-checks it after every
        // fetch and ends at a short page or a 404.
        let slots = self.paginator.resolve_range(start, stop)?;
        let mut entities = Vec::new();
        for slot in slots {
            if self.paginator.max().is_some_and(|max| slot.index >= max) {
                break;
            }
            let page = match self
                .cache
                .get_or_fetch(slot.page, &self.source, &mut self.paginator)
                .await
            {
                Ok(page) => page,
                // The previous page was the last one
                Err(e) if e.is_not_found() && slot.page > 0 => {
                    self.paginator.observe(self.paginator.first_index(slot.page));
                    break;
                }
                Err(e) => return Err(e),
            };
            match page.get(slot.offset) {
                Some(record) => entities.push(self.factory.materialize(record)),
                None => break,
            }
        }

        Ok(entities)
    }

    /// Entities in any range: `qs.slice(0..40)`, `qs.slice(35..=44)`, `qs.slice(10..)`
    pub async fn slice(&mut self, range: impl RangeBounds<usize>) -> Result<Vec<E>> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len().await?.max(start),
        };
        self.get_slice(start, stop).await
    }

    /// Every entity of the collection
    pub async fn to_vec(&mut self) -> Result<Vec<E>> {
        self.slice(..).await
    }

    /// Stream every entity in index order.
    ///
    /// Pages are fetched as the cursor reaches them. Iterating again reuses
    /// the cache, so already visited pages cost no requests. The stream ends
    /// after the first error.
    pub fn iter(&mut self) -> impl Stream<Item = Result<E>> + '_ {
        stream::try_unfold((self, 0usize), |(qs, index)| async move {
            if index >= qs.len().await? {
                return Ok(None);
            }
            let entity = qs.get(index).await?;
            Ok::<_, Error>(Some((entity, (qs, index + 1))))
        })
    }

    /// Short textual preview fetching at most page 0
    pub async fn preview(&mut self) -> Result<String>
    where
        E: fmt::Display,
    {
        if self.empty {
            return Ok("<Queryset []>".to_string());
        }

        let page = self
            .cache
            .get_or_fetch(0, &self.source, &mut self.paginator)
            .await?;
        let shown: Vec<String> = page
            .records
            .iter()
            .take(REPR_OUTPUT_SIZE)
            .map(|record| self.factory.materialize(record).to_string())
            .collect();

        let known = self.paginator.max().unwrap_or(page.len());
        let mut out = format!("<Queryset [{}", shown.join(", "));
        if known > shown.len() {
            out.push_str(", ...(remaining elements truncated)...");
        }
        out.push_str("]>");
        Ok(out)
    }
}

impl<E> fmt::Display for Queryset<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            return write!(f, "<Queryset {}: none>", self.name);
        }
        match self.paginator.max() {
            None if self.cache.is_empty() => write!(f, "<Queryset {}: unevaluated>", self.name),
            None => write!(
                f,
                "<Queryset {}: size unknown, {} pages cached>",
                self.name,
                self.cache.len()
            ),
            Some(max) => write!(
                f,
                "<Queryset {}: {} items, {} pages cached>",
                self.name,
                max,
                self.cache.len()
            ),
        }
    }
}

impl<E> fmt::Debug for Queryset<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queryset")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("paginator", &self.paginator)
            .field("cached_pages", &self.cache.len())
            .field("empty", &self.empty)
            .finish_non_exhaustive()
    }
}
