//! Book instance request handlers.

use axum::{
    extract::{Path, State},
    Form,
};
use catalog_db::models::{BookInstance, BookTitle, Resource};
use catalog_db::SharedStore;
use catalog_http::{AppError, Page, View};
use serde_json::Value;

use super::forms::{attempted_document, check_submission, Submission};
use crate::utils::{documents, parse_id};
use crate::validation::{FormData, Validated};

/// List view copy deletions fall back to.
pub const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

pub async fn bookinstance_list(State(store): State<SharedStore>) -> Result<View, AppError> {
    let instances = store.list_book_instances().await?;
    let list: Vec<Value> = instances.iter().map(|copy| copy.to_document()).collect();

    Ok(View::new("bookInstance_list", "Book Instance List").with("bookinstance_list", list))
}

pub async fn bookinstance_detail(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<View, AppError> {
    let not_found = || AppError::not_found("Book copy not found");
    let id = parse_id(&id).ok_or_else(not_found)?;
    let copy = store.find_book_instance(id).await?.ok_or_else(not_found)?;

    Ok(View::new("bookInstance_detail", "Book:").with("bookinstance", copy.to_document()))
}

pub async fn bookinstance_create_get(State(store): State<SharedStore>) -> Result<View, AppError> {
    let books = store.list_book_titles().await?;

    Ok(View::new("bookInstance_form", "Create BookInstance").with("book_list", documents(&books)))
}

pub async fn bookinstance_create_post(
    State(store): State<SharedStore>,
    Form(form): Form<FormData>,
) -> Result<Page, AppError> {
    let draft = match check_submission(store.as_ref(), &form).await? {
        Submission::Valid(draft) => draft,
        Submission::Invalid(validated) => {
            tracing::debug!(errors = validated.errors().len(), "book instance form rejected");
            let books = store.list_book_titles().await?;
            return Ok(form_view("Create Book Instance", &validated, None, &books).into());
        }
    };

    let copy = store.insert_book_instance(draft).await?;
    tracing::info!(instance_id = %copy.id, book_id = %copy.book, "book instance created");
    Ok(Page::redirect(copy.url()))
}

pub async fn bookinstance_delete_get(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Page, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Page::redirect(BOOK_INSTANCE_LIST_URL));
    };

    match store.find_book_instance(id).await? {
        Some(copy) => Ok(View::new("bookInstance_delete", "Delete Book Instance")
            .with("bookinstance", copy.to_document())
            .into()),
        None => Ok(Page::redirect(BOOK_INSTANCE_LIST_URL)),
    }
}

/// Copies have no dependents, so deletion is unconditional.
pub async fn bookinstance_delete_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Page, AppError> {
    if let Some(id) = parse_id(&id) {
        let removed = store.delete_book_instance(id).await?;
        tracing::info!(instance_id = %id, removed, "book instance deleted");
    }
    Ok(Page::redirect(BOOK_INSTANCE_LIST_URL))
}

pub async fn bookinstance_update_get(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<View, AppError> {
    let not_found = || AppError::not_found("Book instance not found");
    let id = parse_id(&id).ok_or_else(not_found)?;

    let (copy, books) = tokio::try_join!(store.find_book_instance(id), store.list_book_titles())?;
    let copy = copy.ok_or_else(not_found)?;

    Ok(View::new("bookInstance_form", "Update Book Instance")
        .with("selected_book", copy.instance.book.to_string())
        .with("bookinstance", copy.to_document())
        .with("book_list", documents(&books)))
}

pub async fn bookinstance_update_post(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Page, AppError> {
    let not_found = || AppError::not_found("Book instance not found");
    let id = parse_id(&id).ok_or_else(not_found)?;

    let draft = match check_submission(store.as_ref(), &form).await? {
        Submission::Valid(draft) => draft,
        Submission::Invalid(validated) => {
            tracing::debug!(instance_id = %id, errors = validated.errors().len(), "book instance form rejected");
            let books = store.list_book_titles().await?;
            return Ok(form_view("Update Book Instance", &validated, Some(id), &books).into());
        }
    };

    // The route id is carried over so the stored copy is replaced in place.
    let updated = store
        .update_book_instance(BookInstance::from_draft(id, draft))
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(instance_id = %updated.id, status = %updated.status, "book instance updated");
    Ok(Page::redirect(updated.url()))
}

/// Form re-rendered with the attempted values, keeping the selected book.
fn form_view(
    title: &str,
    validated: &Validated,
    id: Option<uuid::Uuid>,
    books: &[BookTitle],
) -> View {
    View::new("bookInstance_form", title)
        .with("book_list", documents(books))
        .with("selected_book", validated.value("book"))
        .with("errors", validated.errors_document())
        .with("bookinstance", attempted_document(validated, id))
}
