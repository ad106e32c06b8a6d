//! Genre request handlers.

use axum::{
    extract::{Path, State},
    Form,
};
use catalog_db::models::{BookSummary, Genre, NewGenre, Resource};
use catalog_db::SharedStore;
use catalog_http::{AppError, Page, View};
use serde_json::{json, Value};

use super::forms::GENRE_FORM;
use crate::utils::{documents, parse_id};
use crate::validation::{validate, FormData};

/// List view every genre mutation falls back to.
pub const GENRE_LIST_URL: &str = "/catalog/genres";

pub async fn genre_list(State(store): State<SharedStore>) -> Result<View, AppError> {
    let genres = store.list_genres().await?;

    Ok(View::new("genre_list", "Genre List").with("genre_list", documents(&genres)))
}

pub async fn genre_detail(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<View, AppError> {
    let not_found = || AppError::not_found("Genre not found");
    let id = parse_id(&id).ok_or_else(not_found)?;

    let (genre, books) = tokio::try_join!(store.find_genre(id), store.books_in_genre(id))?;
    let genre = genre.ok_or_else(not_found)?;

    Ok(View::new("genre_detail", "Genre Detail")
        .with("genre", genre.to_document())
        .with("genre_books", documents(&books)))
}

pub async fn genre_create_get() -> View {
    View::new("genre_form", "Create Genre")
}

pub async fn genre_create_post(
    State(store): State<SharedStore>,
    Form(form): Form<FormData>,
) -> Result<Page, AppError> {
    let validated = validate(GENRE_FORM, &form);
    let name = validated.value("name").to_string();

    if !validated.is_valid() {
        tracing::debug!(errors = validated.errors().len(), "genre form rejected");
        return Ok(View::new("genre_form", "Create Genre")
            .with("genre", json!({ "name": name }))
            .with("errors", validated.errors_document())
            .into());
    }

    // Check-then-insert is not atomic; concurrent creates may both insert.
    if let Some(existing) = store.find_genre_by_name(&name).await? {
        tracing::info!(genre_id = %existing.id, %name, "genre already exists");
        return Ok(Page::redirect(existing.url()));
    }

    let genre = store.insert_genre(NewGenre { name }).await?;
    tracing::info!(genre_id = %genre.id, name = %genre.name, "genre created");
    Ok(Page::redirect(genre.url()))
}

pub async fn genre_delete_get(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Page, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Page::redirect(GENRE_LIST_URL));
    };

    let (genre, books) = tokio::try_join!(store.find_genre(id), store.books_in_genre(id))?;
    match genre {
        Some(genre) => Ok(delete_view(Some(&genre), &books).into()),
        None => Ok(Page::redirect(GENRE_LIST_URL)),
    }
}

pub async fn genre_delete_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Page, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Page::redirect(GENRE_LIST_URL));
    };

    let (genre, books) = tokio::try_join!(store.find_genre(id), store.books_in_genre(id))?;
    if !books.is_empty() {
        tracing::info!(genre_id = %id, books = books.len(), "genre delete blocked by dependent books");
        return Ok(delete_view(genre.as_ref(), &books).into());
    }

    let removed = store.delete_genre(id).await?;
    tracing::info!(genre_id = %id, removed, "genre deleted");
    Ok(Page::redirect(GENRE_LIST_URL))
}

pub async fn genre_update_get() -> AppError {
    AppError::not_implemented("NOT IMPLEMENTED: Genre update GET")
}

pub async fn genre_update_post() -> AppError {
    AppError::not_implemented("NOT IMPLEMENTED: Genre update POST")
}

/// Confirmation view, doubling as the blocked-delete response.
fn delete_view(genre: Option<&Genre>, books: &[BookSummary]) -> View {
    View::new("genre_delete", "Delete Genre")
        .with("genre", genre.map_or(Value::Null, |genre| genre.to_document()))
        .with("genre_books", documents(books))
}
