pub mod forms;
pub mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use catalog_db::models::BookInstanceStatus;
use catalog_db::SharedStore;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::{error_response, page_operation};
use handlers::*;

const TAG: &str = "Book instances";

/// Physical copies of books: listing, detail, create, update and delete
pub struct BookInstancesModule {
    store: SharedStore,
}

impl BookInstancesModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BookInstancesModule {
    fn name(&self) -> &'static str {
        "bookinstances"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let copies = ctx.store.list_book_instances().await?.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            copies,
            "book instances module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/bookinstances", get(bookinstance_list))
            .route(
                "/bookinstance/create",
                get(bookinstance_create_get).post(bookinstance_create_post),
            )
            .route("/bookinstance/{id}", get(bookinstance_detail))
            .route(
                "/bookinstance/{id}/delete",
                get(bookinstance_delete_get).post(bookinstance_delete_post),
            )
            .route(
                "/bookinstance/{id}/update",
                get(bookinstance_update_get).post(bookinstance_update_post),
            )
            .with_state(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut detail = page_operation("Book instance with its book", TAG, false);
        detail["responses"]["404"] = error_response("Book copy not found");

        let mut update_form = page_operation("Book instance update form", TAG, false);
        update_form["responses"]["404"] = error_response("Book instance not found");

        let mut create = page_operation("Create a book instance", TAG, true);
        create["responses"]["400"] = error_response("Unknown status");

        let mut update = page_operation("Update a book instance in place", TAG, true);
        update["responses"]["400"] = error_response("Unknown status");
        update["responses"]["404"] = error_response("Book instance not found");

        let statuses: Vec<&str> = BookInstanceStatus::ALL
            .iter()
            .map(|status| status.as_str())
            .collect();

        Some(json!({
            "paths": {
                "/bookinstances": {
                    "get": page_operation("List book instances with their books", TAG, false)
                },
                "/bookinstance/create": {
                    "get": page_operation("Book instance creation form", TAG, false),
                    "post": create
                },
                "/bookinstance/{id}": {
                    "get": detail
                },
                "/bookinstance/{id}/delete": {
                    "get": page_operation("Book instance delete confirmation", TAG, true),
                    "post": page_operation("Delete a book instance", TAG, true)
                },
                "/bookinstance/{id}/update": {
                    "get": update_form,
                    "post": update
                }
            },
            "components": {
                "schemas": {
                    "BookInstanceForm": {
                        "type": "object",
                        "properties": {
                            "book": {
                                "type": "string",
                                "description": "Id of an existing book"
                            },
                            "imprint": {
                                "type": "string",
                                "minLength": 1
                            },
                            "status": {
                                "type": "string",
                                "enum": statuses
                            },
                            "due_back": {
                                "type": "string",
                                "format": "date",
                                "description": "Optional ISO-8601 date"
                            }
                        },
                        "required": ["book", "imprint", "status"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book instances module stopped");
        Ok(())
    }
}

/// Create a new instance of the book instances module
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(BookInstancesModule::new(store))
}
