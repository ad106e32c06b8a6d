//! Handler outcomes: rendered views and redirects.
//!
//! Templates are owned by a separate view layer. A rendered view is sent as
//! JSON naming the template together with the data it is rendered with.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// A template name plus the payload it is rendered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: &'static str,
    pub data: Map<String, Value>,
}

impl View {
    /// Start a view with its `title` entry set.
    pub fn new(template: &'static str, title: &str) -> Self {
        let mut data = Map::new();
        data.insert("title".to_string(), Value::String(title.to_string()));
        Self { template, data }
    }

    /// Add a payload entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// What a handler produced on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Render(View),
    /// 302 to the given path.
    Redirect(String),
}

impl Page {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(location.into())
    }
}

impl From<View> for Page {
    fn from(view: View) -> Self {
        Self::Render(view)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => view.into_response(),
            Page::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn view_renders_template_and_data() {
        let response = View::new("genre_form", "Create Genre")
            .with("errors", json!([]))
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "template": "genre_form",
                "data": { "title": "Create Genre", "errors": [] }
            })
        );
    }

    #[test]
    fn redirect_is_found_with_location() {
        let response = Page::redirect("/catalog/genres").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/catalog/genres"
        );
    }
}
