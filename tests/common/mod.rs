#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use catalog_db::models::{Book, BookInstance, BookInstanceStatus, Genre, NewBookInstance, NewGenre};
use catalog_db::{CatalogStore, MemoryStore, SharedStore};
use catalog_kernel::settings::Settings;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
    /// Tagged on `book`; cannot be deleted.
    pub fantasy: Genre,
    /// No books reference it.
    pub poetry: Genre,
    pub book: Book,
    pub copy: BookInstance,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// POST an already url-encoded form body.
    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn app() -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let fantasy = store
        .insert_genre(NewGenre {
            name: "Fantasy".to_string(),
        })
        .await
        .unwrap();
    let poetry = store
        .insert_genre(NewGenre {
            name: "Poetry".to_string(),
        })
        .await
        .unwrap();
    let author = store.insert_author("Ursula", "Le Guin").await.unwrap();
    let book = store
        .insert_book(
            "A Wizard of Earthsea",
            "Ged learns the true names of things.",
            "9780547773742",
            author.id,
            vec![fantasy.id],
        )
        .await
        .unwrap();
    let copy = store
        .insert_book_instance(NewBookInstance {
            book: book.id,
            imprint: "Parnassus, 1968".to_string(),
            status: BookInstanceStatus::Available,
            due_back: None,
        })
        .await
        .unwrap();

    let shared: SharedStore = store.clone();
    let registry = catalog_app::build_registry(&shared);
    let router = catalog_http::build_router(&registry, &Settings::default());

    TestApp {
        store,
        router,
        fantasy,
        poetry,
        book,
        copy,
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a rendered view and return its data payload.
pub async fn view(response: Response<Body>, template: &str) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["template"], template);
    body["data"].clone()
}

/// Assert a 302 and return its target.
pub fn location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::FOUND);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn genre_names(store: &MemoryStore) -> Vec<String> {
    store
        .list_genres()
        .await
        .unwrap()
        .into_iter()
        .map(|genre| genre.name)
        .collect()
}
