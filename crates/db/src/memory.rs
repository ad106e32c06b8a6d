//! In-process store backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    Author, AuthorId, Book, BookId, BookInstance, BookInstanceId, BookSummary, BookTitle, Genre,
    GenreId, NewBookInstance, NewGenre, PopulatedBook, PopulatedBookInstance,
};
use crate::store::{CatalogStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Documents {
    authors: BTreeMap<AuthorId, Author>,
    books: BTreeMap<BookId, Book>,
    genres: BTreeMap<GenreId, Genre>,
    instances: BTreeMap<BookInstanceId, BookInstance>,
}

impl Documents {
    fn populate_book(&self, id: BookId) -> Option<PopulatedBook> {
        let book = self.books.get(&id)?.clone();
        let author = self.authors.get(&book.author).cloned();
        Some(PopulatedBook { book, author })
    }

    fn populate_instance(&self, instance: &BookInstance) -> PopulatedBookInstance {
        PopulatedBookInstance {
            instance: instance.clone(),
            book: self.populate_book(instance.book),
        }
    }
}

/// Catalog documents kept in memory behind a single async lock.
///
/// Ids are UUID v7, so map order follows insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an author. Authors are read-only for the catalog handlers, so
    /// this is only reached from seeding and tests.
    pub async fn insert_author(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> StoreResult<Author> {
        let author = Author {
            id: Uuid::now_v7(),
            first_name: first_name.to_string(),
            family_name: family_name.to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        self.docs
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    /// Store a book, rejecting dangling author or genre references.
    pub async fn insert_book(
        &self,
        title: &str,
        summary: &str,
        isbn: &str,
        author: AuthorId,
        genre: Vec<GenreId>,
    ) -> StoreResult<Book> {
        let mut docs = self.docs.write().await;
        if !docs.authors.contains_key(&author) {
            return Err(StoreError::Rejected(format!("author {author} does not exist")));
        }
        if let Some(missing) = genre.iter().find(|id| !docs.genres.contains_key(*id)) {
            return Err(StoreError::Rejected(format!("genre {missing} does not exist")));
        }

        let book = Book {
            id: Uuid::now_v7(),
            title: title.to_string(),
            summary: summary.to_string(),
            isbn: isbn.to_string(),
            author,
            genre,
        };
        docs.books.insert(book.id, book.clone());
        Ok(book)
    }

    pub async fn genre_count(&self) -> usize {
        self.docs.read().await.genres.len()
    }

    pub async fn book_instance_count(&self) -> usize {
        self.docs.read().await.instances.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        let mut genres: Vec<Genre> = self.docs.read().await.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_genre(&self, id: GenreId) -> StoreResult<Option<Genre>> {
        Ok(self.docs.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> StoreResult<Option<Genre>> {
        let needle = name.to_lowercase();
        Ok(self
            .docs
            .read()
            .await
            .genres
            .values()
            .find(|genre| genre.name.to_lowercase() == needle)
            .cloned())
    }

    async fn insert_genre(&self, genre: NewGenre) -> StoreResult<Genre> {
        let genre = Genre {
            id: Uuid::now_v7(),
            name: genre.name,
        };
        self.docs
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn delete_genre(&self, id: GenreId) -> StoreResult<bool> {
        Ok(self.docs.write().await.genres.remove(&id).is_some())
    }

    async fn list_book_titles(&self) -> StoreResult<Vec<BookTitle>> {
        Ok(self
            .docs
            .read()
            .await
            .books
            .values()
            .map(|book| BookTitle {
                id: book.id,
                title: book.title.clone(),
            })
            .collect())
    }

    async fn books_in_genre(&self, genre: GenreId) -> StoreResult<Vec<BookSummary>> {
        Ok(self
            .docs
            .read()
            .await
            .books
            .values()
            .filter(|book| book.genre.contains(&genre))
            .map(|book| BookSummary {
                id: book.id,
                title: book.title.clone(),
                summary: book.summary.clone(),
            })
            .collect())
    }

    async fn find_book(&self, id: BookId) -> StoreResult<Option<PopulatedBook>> {
        Ok(self.docs.read().await.populate_book(id))
    }

    async fn list_book_instances(&self) -> StoreResult<Vec<PopulatedBookInstance>> {
        let docs = self.docs.read().await;
        Ok(docs
            .instances
            .values()
            .map(|instance| docs.populate_instance(instance))
            .collect())
    }

    async fn find_book_instance(
        &self,
        id: BookInstanceId,
    ) -> StoreResult<Option<PopulatedBookInstance>> {
        let docs = self.docs.read().await;
        Ok(docs
            .instances
            .get(&id)
            .map(|instance| docs.populate_instance(instance)))
    }

    async fn insert_book_instance(&self, instance: NewBookInstance) -> StoreResult<BookInstance> {
        let instance = BookInstance::from_draft(Uuid::now_v7(), instance);
        self.docs
            .write()
            .await
            .instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update_book_instance(
        &self,
        instance: BookInstance,
    ) -> StoreResult<Option<BookInstance>> {
        let mut docs = self.docs.write().await;
        match docs.instances.get_mut(&instance.id) {
            Some(slot) => {
                *slot = instance.clone();
                Ok(Some(instance))
            }
            None => Ok(None),
        }
    }

    async fn delete_book_instance(&self, id: BookInstanceId) -> StoreResult<bool> {
        Ok(self.docs.write().await.instances.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookInstanceStatus;

    async fn store_with_book() -> (MemoryStore, Genre, Book) {
        let store = MemoryStore::new();
        let genre = store
            .insert_genre(NewGenre {
                name: "Fantasy".to_string(),
            })
            .await
            .unwrap();
        let author = store.insert_author("Patrick", "Rothfuss").await.unwrap();
        let book = store
            .insert_book(
                "The Name of the Wind",
                "Kvothe tells his story.",
                "9780756404741",
                author.id,
                vec![genre.id],
            )
            .await
            .unwrap();
        (store, genre, book)
    }

    #[tokio::test]
    async fn genres_are_listed_by_name_case_sensitively() {
        let store = MemoryStore::new();
        for name in ["fantasy", "Poetry", "Adventure"] {
            store
                .insert_genre(NewGenre {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_genres()
            .await
            .unwrap()
            .into_iter()
            .map(|genre| genre.name)
            .collect();
        assert_eq!(names, vec!["Adventure", "Poetry", "fantasy"]);
    }

    #[tokio::test]
    async fn genre_name_lookup_ignores_case() {
        let (store, genre, _) = store_with_book().await;

        let found = store.find_genre_by_name("fANTASY").await.unwrap();
        assert_eq!(found, Some(genre));
        assert!(store.find_genre_by_name("Fantasia").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn books_are_found_by_genre() {
        let (store, genre, book) = store_with_book().await;

        let books = store.books_in_genre(genre.id).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, book.id);
        assert!(store.books_in_genre(Uuid::now_v7()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_book_rejects_unknown_author() {
        let store = MemoryStore::new();
        let result = store
            .insert_book("Orphan", "", "", Uuid::now_v7(), vec![])
            .await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }

    #[tokio::test]
    async fn update_keeps_identity() {
        let (store, _, book) = store_with_book().await;
        let created = store
            .insert_book_instance(NewBookInstance {
                book: book.id,
                imprint: "DAW, 2007".to_string(),
                status: BookInstanceStatus::Maintenance,
                due_back: None,
            })
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.status = BookInstanceStatus::Available;
        let updated = store.update_book_instance(changed).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(store.book_instance_count().await, 1);
        let stored = store.find_book_instance(created.id).await.unwrap().unwrap();
        assert_eq!(stored.instance.status, BookInstanceStatus::Available);
        assert_eq!(
            stored.book.map(|populated| populated.book.title),
            Some("The Name of the Wind".to_string())
        );
    }

    #[tokio::test]
    async fn update_of_missing_instance_inserts_nothing() {
        let (store, _, book) = store_with_book().await;
        let ghost = BookInstance {
            id: Uuid::now_v7(),
            book: book.id,
            imprint: "Ghost".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: None,
        };

        assert!(store.update_book_instance(ghost).await.unwrap().is_none());
        assert_eq!(store.book_instance_count().await, 0);
    }

    #[tokio::test]
    async fn deletes_report_whether_anything_was_removed() {
        let (store, genre, _) = store_with_book().await;

        assert!(store.delete_genre(genre.id).await.unwrap());
        assert!(!store.delete_genre(genre.id).await.unwrap());
        assert!(!store.delete_book_instance(Uuid::now_v7()).await.unwrap());
    }
}
