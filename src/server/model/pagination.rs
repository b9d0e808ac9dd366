use crate::server::{
    config::ApiConfig,
    error::{resource::ResourceError, validation::ValidationError},
};

/// A resolved, 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Resolve the `page` and `limit` query parameters against the configured page sizes.
    ///
    /// `limit` overrides the default page size and is capped at `max_page_size`.
    ///
    /// # Returns
    /// - `Ok(PageRequest)` - Valid page request
    /// - `Err(ValidationError::InvalidQuery)` - `page` or `limit` is 0, or the page offset does
    ///   not fit a database offset
    pub fn resolve(
        page: Option<u64>,
        limit: Option<u64>,
        config: &ApiConfig,
    ) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(ValidationError::InvalidQuery(
                "page must be at least 1".to_string(),
            ));
        }

        let page_size = match limit {
            Some(0) => {
                return Err(ValidationError::InvalidQuery(
                    "limit must be at least 1".to_string(),
                ))
            }
            Some(limit) => limit.min(config.max_page_size),
            None => config.page_size,
        };

        let offset = (page - 1).checked_mul(page_size);
        if !offset.is_some_and(|offset| offset <= i64::MAX as u64) {
            return Err(ValidationError::InvalidQuery(format!(
                "page {} is out of range",
                page
            )));
        }

        Ok(Self { page, page_size })
    }

    /// Zero-based page index as used by SeaORM paginators
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// One page of items along with the total number of items across all pages.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            request,
        }
    }

    pub fn has_next(&self) -> bool {
        self.request.page.saturating_mul(self.request.page_size) < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.request.page > 1
    }

    /// Reject pages past the last one, the first page always exists even when empty
    pub fn ensure_exists(self) -> Result<Self, ResourceError> {
        if self.request.page > 1 && self.items.is_empty() {
            return Err(ResourceError::PageNotFound(self.request.page));
        }

        Ok(self)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            request: self.request,
        }
    }
}
