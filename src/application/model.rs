/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Resource models
//!
//! A [`Model`] binds a resource name (`/<name>`) to a client. Each operation
//! comes in three forms: the `..._options` builder returning the descriptor
//! for inspection, the plain call, and the `..._with_token` call.

use crate::application::client::PostgrestClient;
use crate::error::AppError;
use crate::model::headers::Headers;
use crate::model::request::{self, CallOptions, RequestOptions};
use crate::model::response::ApiResponse;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// CRUD helpers for one resource
///
/// Clones share the page size.
#[derive(Debug, Clone)]
pub struct Model {
    client: PostgrestClient,
    name: String,
    page_size: Arc<AtomicU32>,
}

impl Model {
    /// Creates a model for `name` with an initial page size
    #[must_use]
    pub fn new(client: PostgrestClient, name: &str, page_size: u32) -> Self {
        Self {
            client,
            name: name.trim_start_matches('/').to_string(),
            page_size: Arc::new(AtomicU32::new(page_size)),
        }
    }

    /// Resource name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows per page used by [`Model::get_page`]
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.load(Ordering::Relaxed)
    }

    /// Changes the rows per page; `0` disables range pagination
    pub fn set_page_size(&self, page_size: u32) {
        self.page_size.store(page_size, Ordering::Relaxed);
    }

    /// Client this model sends through
    #[must_use]
    pub fn client(&self) -> &PostgrestClient {
        &self.client
    }

    // Builders

    /// Descriptor for page `page` (`0` reads as `1`) at the current page size
    #[must_use]
    pub fn get_page_options(
        &self,
        data: Option<Value>,
        page: u32,
        options: &CallOptions,
        headers: &Headers,
    ) -> RequestOptions {
        request::get_options(&self.name, data, page.max(1), self.page_size(), options, headers)
    }

    /// Descriptor for the first matching row (`Range: 0-0`)
    #[must_use]
    pub fn get_row_options(
        &self,
        data: Option<Value>,
        options: &CallOptions,
        headers: &Headers,
    ) -> RequestOptions {
        request::get_options(&self.name, data, 1, 1, options, headers)
    }

    /// Descriptor creating rows from `attributes`
    #[must_use]
    pub fn post_options(
        &self,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> RequestOptions {
        request::post_options(&self.name, attributes, options, headers)
    }

    /// Descriptor updating the rows matched by `filters`
    #[must_use]
    pub fn patch_options(
        &self,
        filters: &Value,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> RequestOptions {
        request::patch_options(&self.name, filters, attributes, options, headers)
    }

    /// Descriptor deleting the rows matched by `filters`
    #[must_use]
    pub fn delete_options(
        &self,
        filters: &Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> RequestOptions {
        request::delete_options(&self.name, filters, options, headers)
    }

    /// Descriptor for an `OPTIONS` request on the resource
    #[must_use]
    pub fn options_options(&self, options: &CallOptions) -> RequestOptions {
        request::options_options(&self.name, options)
    }

    // Plain requests

    /// Reads one page
    pub async fn get_page(
        &self,
        data: Option<Value>,
        page: u32,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request(self.get_page_options(data, page, options, headers))
            .await
    }

    /// Reads the first matching row
    pub async fn get_row(
        &self,
        data: Option<Value>,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request(self.get_row_options(data, options, headers))
            .await
    }

    /// Creates rows
    pub async fn post(
        &self,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request(self.post_options(attributes, options, headers))
            .await
    }

    /// Updates matching rows
    pub async fn patch(
        &self,
        filters: &Value,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request(self.patch_options(filters, attributes, options, headers))
            .await
    }

    /// Deletes matching rows
    pub async fn delete_request(
        &self,
        filters: &Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request(self.delete_options(filters, options, headers))
            .await
    }

    /// Sends `OPTIONS` to the resource
    pub async fn options(&self, options: &CallOptions) -> Result<ApiResponse, AppError> {
        self.client.request(self.options_options(options)).await
    }

    // Token-authenticated requests

    /// [`Model::get_page`] with the bearer token
    pub async fn get_page_with_token(
        &self,
        data: Option<Value>,
        page: u32,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.get_page_options(data, page, options, headers))
            .await
    }

    /// [`Model::get_row`] with the bearer token
    pub async fn get_row_with_token(
        &self,
        data: Option<Value>,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.get_row_options(data, options, headers))
            .await
    }

    /// [`Model::post`] with the bearer token
    pub async fn post_with_token(
        &self,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.post_options(attributes, options, headers))
            .await
    }

    /// [`Model::patch`] with the bearer token
    pub async fn patch_with_token(
        &self,
        filters: &Value,
        attributes: Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.patch_options(filters, attributes, options, headers))
            .await
    }

    /// [`Model::delete_request`] with the bearer token
    pub async fn delete_with_token(
        &self,
        filters: &Value,
        options: &CallOptions,
        headers: &Headers,
    ) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.delete_options(filters, options, headers))
            .await
    }

    /// [`Model::options`] with the bearer token
    pub async fn options_with_token(&self, options: &CallOptions) -> Result<ApiResponse, AppError> {
        self.client
            .request_with_token(self.options_options(options))
            .await
    }
}
