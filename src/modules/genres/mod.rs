pub mod forms;
pub mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use catalog_db::SharedStore;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::{error_response, page_operation};
use handlers::*;

const TAG: &str = "Genres";

/// Genre listing, detail, creation and guarded deletion
pub struct GenresModule {
    store: SharedStore,
}

impl GenresModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let genres = ctx.store.list_genres().await?.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            genres,
            "genres module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/genres", get(genre_list))
            .route(
                "/genre/create",
                get(genre_create_get).post(genre_create_post),
            )
            .route("/genre/{id}", get(genre_detail))
            .route(
                "/genre/{id}/delete",
                get(genre_delete_get).post(genre_delete_post),
            )
            .route(
                "/genre/{id}/update",
                get(genre_update_get).post(genre_update_post),
            )
            .with_state(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut detail = page_operation("Genre with its books", TAG, false);
        detail["responses"]["404"] = error_response("Genre not found");

        let not_implemented = |summary: &str| {
            json!({
                "summary": summary,
                "tags": [TAG],
                "responses": { "501": error_response("Not implemented") }
            })
        };

        Some(json!({
            "paths": {
                "/genres": {
                    "get": page_operation("List genres sorted by name", TAG, false)
                },
                "/genre/create": {
                    "get": page_operation("Genre creation form", TAG, false),
                    "post": page_operation("Create a genre, or redirect to an existing one with the same name", TAG, true)
                },
                "/genre/{id}": {
                    "get": detail
                },
                "/genre/{id}/delete": {
                    "get": page_operation("Genre delete confirmation", TAG, true),
                    "post": page_operation("Delete a genre unless books still reference it", TAG, true)
                },
                "/genre/{id}/update": {
                    "get": not_implemented("Genre update form"),
                    "post": not_implemented("Update a genre")
                }
            },
            "components": {
                "schemas": {
                    "GenreForm": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "minLength": 3,
                                "description": "Genre name, unique ignoring case"
                            }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "genres module stopped");
        Ok(())
    }
}

/// Create a new instance of the genres module
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(GenresModule::new(store))
}
