//! The store contract every handler is written against.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    BookId, BookInstance, BookInstanceId, BookSummary, BookTitle, Genre, GenreId,
    NewBookInstance, NewGenre, PopulatedBook, PopulatedBookInstance,
};

/// Failures raised by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document rejected: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store holding the catalog.
///
/// Lookups that find nothing return `Ok(None)` or an empty list; `Err` is
/// reserved for backend failures.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All genres ordered by name (byte-wise, case-sensitive).
    async fn list_genres(&self) -> StoreResult<Vec<Genre>>;

    async fn find_genre(&self, id: GenreId) -> StoreResult<Option<Genre>>;

    /// First genre whose name matches `name` ignoring case.
    async fn find_genre_by_name(&self, name: &str) -> StoreResult<Option<Genre>>;

    async fn insert_genre(&self, genre: NewGenre) -> StoreResult<Genre>;

    /// Returns `true` when a genre was removed.
    async fn delete_genre(&self, id: GenreId) -> StoreResult<bool>;

    /// Title projection of every book.
    async fn list_book_titles(&self) -> StoreResult<Vec<BookTitle>>;

    /// Books tagged with the given genre.
    async fn books_in_genre(&self, genre: GenreId) -> StoreResult<Vec<BookSummary>>;

    async fn find_book(&self, id: BookId) -> StoreResult<Option<PopulatedBook>>;

    async fn list_book_instances(&self) -> StoreResult<Vec<PopulatedBookInstance>>;

    async fn find_book_instance(
        &self,
        id: BookInstanceId,
    ) -> StoreResult<Option<PopulatedBookInstance>>;

    async fn insert_book_instance(&self, instance: NewBookInstance) -> StoreResult<BookInstance>;

    /// Replace the instance carrying `instance.id` in place.
    ///
    /// Returns `None` when no instance has that id; a new id is never
    /// allocated here.
    async fn update_book_instance(
        &self,
        instance: BookInstance,
    ) -> StoreResult<Option<BookInstance>>;

    /// Returns `true` when an instance was removed.
    async fn delete_book_instance(&self, id: BookInstanceId) -> StoreResult<bool>;
}
