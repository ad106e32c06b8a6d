//! Helpers shared by the catalog modules.

use catalog_db::models::Resource;
use serde_json::{json, Value};
use uuid::Uuid;

/// Route ids that do not parse are treated like ids of missing documents.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Serialize a list of documents for a view payload.
pub fn documents<T: Resource>(items: &[T]) -> Value {
    Value::Array(items.iter().map(T::to_document).collect())
}

/// OpenAPI operation answering with a rendered view or a redirect.
pub fn page_operation(summary: &str, tag: &str, redirects: bool) -> Value {
    let mut responses = json!({
        "200": {
            "description": "Rendered view",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/View" }
                }
            }
        },
        "500": error_response("Internal server error")
    });
    if redirects {
        responses["302"] = json!({ "description": "Redirect to the affected document or list" });
    }
    json!({
        "summary": summary,
        "tags": [tag],
        "responses": responses
    })
}

/// OpenAPI response referencing the shared error envelope.
pub fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_do_not_parse() {
        assert!(parse_id("not-an-id").is_none());
        assert!(parse_id(&Uuid::now_v7().to_string()).is_some());
    }

    #[test]
    fn redirecting_operations_document_302() {
        let operation = page_operation("Create genre", "Genres", true);
        assert!(operation["responses"]["302"].is_object());
        assert!(page_operation("List", "Genres", false)["responses"]["302"].is_null());
    }
}
