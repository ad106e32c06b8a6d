//! Documents held by the catalog store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type AuthorId = Uuid;
pub type BookId = Uuid;
pub type GenreId = Uuid;
pub type BookInstanceId = Uuid;

/// A document addressable through a canonical catalog URL.
pub trait Resource: Serialize {
    /// Path of the document's detail view.
    fn url(&self) -> String;

    /// Serialized form of the document with its `url` attached.
    fn to_document(&self) -> Value {
        let mut doc = serde_json::to_value(self).unwrap_or_default();
        if let Value::Object(map) = &mut doc {
            map.insert("url".to_string(), Value::String(self.url()));
        }
        doc
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name in "family, first" form.
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }
}

impl Resource for Author {
    fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    fn to_document(&self) -> Value {
        let mut doc = serde_json::to_value(self).unwrap_or_default();
        if let Value::Object(map) = &mut doc {
            map.insert("url".to_string(), Value::String(self.url()));
            map.insert("name".to_string(), Value::String(self.name()));
        }
        doc
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Resource for Genre {
    fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Genre awaiting its first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: AuthorId,
    pub genre: Vec<GenreId>,
}

impl Resource for Book {
    fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// `title` projection of a book, used to fill selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTitle {
    pub id: BookId,
    pub title: String,
}

impl Resource for BookTitle {
    fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// `title summary` projection of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub summary: String,
}

impl Resource for BookSummary {
    fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Circulation state of a physical copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Maintenance,
        Self::Loaned,
        Self::Reserved,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::Loaned => "Loaned",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid book instance status")]
pub struct UnknownStatus(pub String);

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// A physical copy of a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: BookInstanceId,
    pub book: BookId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Attach the given id to a draft, producing the stored shape.
    pub fn from_draft(id: BookInstanceId, draft: NewBookInstance) -> Self {
        Self {
            id,
            book: draft.book,
            imprint: draft.imprint,
            status: draft.status,
            due_back: draft.due_back,
        }
    }
}

impl Resource for BookInstance {
    fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookInstance {
    pub book: BookId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// A book with its `author` reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedBook {
    pub book: Book,
    pub author: Option<Author>,
}

impl PopulatedBook {
    pub fn to_document(&self) -> Value {
        let mut doc = self.book.to_document();
        doc["author"] = self
            .author
            .as_ref()
            .map_or(Value::Null, |author| author.to_document());
        doc
    }
}

/// A book instance with its `book` reference resolved. `book` is `None`
/// when the referenced book no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedBookInstance {
    pub instance: BookInstance,
    pub book: Option<PopulatedBook>,
}

impl PopulatedBookInstance {
    pub fn to_document(&self) -> Value {
        let mut doc = self.instance.to_document();
        doc["book"] = self
            .book
            .as_ref()
            .map_or(Value::Null, |book| book.to_document());
        doc
    }
}
