//! Domain service for querying and mutating catalog titles.
//!
//! Reads are open. Create, update and delete must present an allow-listed
//! API key before the store is touched.

use crate::models::title::{NewTitle, Title, TitlePatch};
use crate::services::auth::{ApiKey, AuthError};
use crate::services::filter::TitleFilter;
use crate::services::pagination::PageRequest;
use serde::Serialize;
use thiserror::Error;

/// One page of a filtered listing.
///
/// `total` counts every match, not just this page. It comes from a separate
/// query, so a concurrent write can make it disagree with `titles`.
#[derive(Debug, Clone, Serialize)]
pub struct TitlePage {
    pub total: u64,
    pub titles: Vec<Title>,
    pub total_pages: u64,
    pub page: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Errors specific to title operations.
#[derive(Debug, Error)]
pub enum TitleError {
    #[error("Title record not found for primary key: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Could not validate API key")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),
}

impl TitleError {
    pub fn database(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Database(format!("{context}. {err}"))
    }
}

impl From<AuthError> for TitleError {
    fn from(_: AuthError) -> Self {
        Self::Unauthorized
    }
}

/// Domain service trait for titles.
#[async_trait::async_trait]
pub trait TitleService: Send + Sync {
    /// Lists titles matching `filter`, one page at a time.
    async fn list(&self, page: PageRequest, filter: &TitleFilter)
    -> Result<TitlePage, TitleError>;

    /// Gets a single title by primary key.
    async fn get(&self, pk: i32) -> Result<Title, TitleError>;

    /// Creates a title and returns it with its assigned primary key.
    async fn create(
        &self,
        payload: NewTitle,
        credential: Option<&str>,
    ) -> Result<Title, TitleError>;

    /// Applies a merge-patch and returns the resulting record.
    async fn update(
        &self,
        pk: i32,
        patch: TitlePatch,
        credential: Option<&str>,
    ) -> Result<Title, TitleError>;

    /// Deletes a title. Deleting a missing key succeeds.
    async fn delete(&self, pk: i32, credential: Option<&str>) -> Result<(), TitleError>;

    /// Checks a credential without performing any operation.
    fn authorize(&self, credential: Option<&str>) -> Result<ApiKey, TitleError>;
}
