/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Page accumulation over a resource model

use crate::application::model::Model;
use crate::constants::{COUNT_EXACT, PREFER_HEADER};
use crate::error::AppError;
use crate::model::headers::Headers;
use crate::model::request::CallOptions;
use serde_json::Value;
use tracing::debug;

/// Accumulates consecutive pages of a resource
///
/// Reads ask for an exact count so the total is known after the first page.
/// The page size is the model's.
#[derive(Debug, Clone)]
pub struct PaginationVm {
    model: Model,
    order: Option<String>,
    extra_headers: Headers,
    authenticate: bool,
    filters: Value,
    collection: Vec<Value>,
    page: u32,
    last_page_len: Option<usize>,
    total: Option<u64>,
}

impl PaginationVm {
    /// Creates a paginator for `model`, sorted by `order` (e.g. `created_at.desc`)
    ///
    /// `authenticate` selects token-authenticated reads.
    #[must_use]
    pub fn new(model: Model, order: Option<&str>, authenticate: bool) -> Self {
        Self {
            model,
            order: order.map(str::to_string),
            extra_headers: Headers::new().with(PREFER_HEADER, COUNT_EXACT),
            authenticate,
            filters: Value::Object(Default::default()),
            collection: Vec::new(),
            page: 1,
            last_page_len: None,
            total: None,
        }
    }

    /// Adds headers sent with every page read
    #[must_use]
    pub fn with_headers(mut self, headers: &Headers) -> Self {
        self.extra_headers.merge(headers);
        self
    }

    /// Rows loaded so far
    #[must_use]
    pub fn collection(&self) -> &[Value] {
        &self.collection
    }

    /// Number of the last page requested
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total rows reported by the server
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether the last page read came back short
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        match self.last_page_len {
            Some(len) => len < self.model.page_size() as usize,
            None => false,
        }
    }

    /// Resets the collection and reads the first page with `filters`
    pub async fn first_page(&mut self, filters: Value) -> Result<&[Value], AppError> {
        self.filters = filters;
        self.collection.clear();
        self.page = 1;
        self.last_page_len = None;
        self.total = None;
        self.fetch().await?;
        Ok(&self.collection)
    }

    /// Reads the page after the last one
    ///
    /// On failure the page counter is left where it was.
    pub async fn next_page(&mut self) -> Result<&[Value], AppError> {
        self.page += 1;
        match self.fetch().await {
            Ok(()) => Ok(&self.collection),
            Err(e) => {
                self.page -= 1;
                Err(e)
            }
        }
    }

    fn parameters(&self) -> Value {
        let mut params = self.filters.clone();
        if let (Some(order), Some(map)) = (&self.order, params.as_object_mut()) {
            map.entry("order")
                .or_insert_with(|| Value::String(order.clone()));
        }
        params
    }

    async fn fetch(&mut self) -> Result<(), AppError> {
        let options = CallOptions::new().in_background();
        let data = Some(self.parameters());
        let response = if self.authenticate {
            self.model
                .get_page_with_token(data, self.page, &options, &self.extra_headers)
                .await
        } else {
            self.model
                .get_page(data, self.page, &options, &self.extra_headers)
                .await
        }?;

        let rows = response.rows().to_vec();
        if let Some(total) = response.content_range().and_then(|range| range.total) {
            self.total = Some(total);
        }

        debug!(
            "Loaded page {} of {}: {} rows",
            self.page,
            self.model.name(),
            rows.len()
        );
        self.last_page_len = Some(rows.len());
        self.collection.extend(rows);
        Ok(())
    }
}
