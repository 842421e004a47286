//! Paginated post collection driven by search criteria.

use postlist_logging::postlist_debug;

use crate::{FetchFailure, Page, PageRequest, PageToken, Post, SearchCriteria};

/// Marks one criteria/fetch cycle. Results carrying an older generation are
/// stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

/// A page fetch the host must perform and answer with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetch {
    pub generation: Generation,
    pub request: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListController {
    items: Vec<Post>,
    loading: bool,
    loading_more: bool,
    has_more: bool,
    error: Option<FetchFailure>,
    criteria: Option<SearchCriteria>,
    next_page_token: Option<PageToken>,
    generation: Generation,
    page_size: usize,
    disposed: bool,
}

impl ListController {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loading_more: false,
            has_more: true,
            error: None,
            criteria: None,
            next_page_token: None,
            generation: Generation::default(),
            page_size: page_size.max(1),
            disposed: false,
        }
    }

    /// A fresh, empty controller whose generations continue after this one's,
    /// so results addressed to the old controller stay stale.
    pub fn successor(&self) -> Self {
        let mut next = Self::new(self.page_size);
        next.generation = Generation(self.generation.0 + 1);
        next
    }

    pub fn items(&self) -> &[Post] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    pub fn criteria(&self) -> Option<&SearchCriteria> {
        self.criteria.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// True whenever a fetch-more request would be refused.
    pub fn load_more_blocked(&self) -> bool {
        self.loading || self.loading_more || !self.has_more || self.error.is_some()
    }

    /// Discards everything and starts over at page 1 for `criteria`.
    pub fn reset(&mut self, criteria: SearchCriteria) -> Option<PageFetch> {
        if self.disposed {
            return None;
        }
        self.generation = Generation(self.generation.0 + 1);
        self.items.clear();
        self.loading = true;
        self.loading_more = false;
        self.has_more = true;
        self.error = None;
        self.next_page_token = None;
        self.criteria = Some(criteria.clone());
        postlist_debug!(
            "list reset generation={} query={:?} sort={}",
            self.generation.0,
            criteria.query,
            criteria.sort
        );
        Some(PageFetch {
            generation: self.generation,
            request: PageRequest {
                criteria,
                page_token: None,
                offset: 0,
                page_size: self.page_size,
            },
        })
    }

    /// Requests the next page, unless a fetch is running, the end was
    /// reached, or the list is in an error state.
    pub fn fetch_more(&mut self) -> Option<PageFetch> {
        if self.disposed || self.load_more_blocked() {
            return None;
        }
        let criteria = self.criteria.clone()?;
        self.loading_more = true;
        Some(PageFetch {
            generation: self.generation,
            request: PageRequest {
                criteria,
                page_token: self.next_page_token.clone(),
                offset: self.items.len(),
                page_size: self.page_size,
            },
        })
    }

    pub fn apply_page(
        &mut self,
        generation: Generation,
        result: Result<Page, FetchFailure>,
    ) -> PageOutcome {
        if self.disposed || generation != self.generation {
            postlist_debug!(
                "dropping stale page generation={} current={}",
                generation.0,
                self.generation.0
            );
            return PageOutcome::Stale;
        }
        let first_page = match (self.loading, self.loading_more) {
            (true, _) => true,
            (false, true) => false,
            (false, false) => {
                postlist_debug!("dropping page with nothing in flight");
                return PageOutcome::Stale;
            }
        };
        self.loading = false;
        self.loading_more = false;

        match result {
            Ok(page) => {
                let received = page.items.len();
                self.has_more = received > 0
                    && received >= self.page_size
                    && page.next_page_token.is_some();
                self.next_page_token = page.next_page_token;
                if first_page {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                PageOutcome::Applied
            }
            Err(failure) => {
                postlist_debug!("page fetch failed: {:?}", failure);
                self.error = Some(failure);
                PageOutcome::Failed
            }
        }
    }

    /// Removes the first post with `id`. Pagination state is untouched.
    pub fn remove_by_id(&mut self, id: &crate::PostId) -> bool {
        match self.items.iter().position(|post| &post.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Tears the list down; every later result is discarded.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.generation = Generation(self.generation.0 + 1);
        self.loading = false;
        self.loading_more = false;
    }
}
