use catalog_db::models::{BookInstanceId, BookInstanceStatus, NewBookInstance};
use catalog_db::CatalogStore;
use catalog_http::AppError;
use serde_json::{json, Value};

use crate::utils::parse_id;
use crate::validation::{parse_iso_date, validate, FieldRules, FormData, Presence, Rule, Validated};

/// Rule table shared by the create and update forms.
pub const BOOK_INSTANCE_FORM: &[FieldRules] = &[
    FieldRules {
        field: "book",
        message: Some("Book must be specified"),
        presence: Presence::Required,
        rules: &[Rule::Trim, Rule::MinLength(1), Rule::Escape],
    },
    FieldRules {
        field: "imprint",
        message: Some("Imprint must be specified"),
        presence: Presence::Required,
        rules: &[Rule::Trim, Rule::MinLength(1), Rule::Escape],
    },
    FieldRules {
        field: "status",
        message: None,
        presence: Presence::Required,
        rules: &[Rule::Escape],
    },
    FieldRules {
        field: "due_back",
        message: Some("Invalid date"),
        presence: Presence::OptionalFalsy,
        rules: &[Rule::Iso8601],
    },
];

pub const UNKNOWN_BOOK: &str = "Book must reference an existing book";

/// Result of checking a submitted copy form.
#[derive(Debug)]
pub enum Submission {
    Valid(NewBookInstance),
    Invalid(Validated),
}

/// Validate `form` and resolve its book reference against the store.
///
/// An omitted status falls back to the default. A status outside the known
/// set is not a field error; it is refused as a bad request once everything
/// else checks out.
pub async fn check_submission(
    store: &dyn CatalogStore,
    form: &FormData,
) -> Result<Submission, AppError> {
    let mut validated = validate(BOOK_INSTANCE_FORM, form);

    let mut book = None;
    if !validated.has_error("book") {
        if let Some(id) = parse_id(validated.value("book")) {
            book = store.find_book(id).await?.map(|found| found.book.id);
        }
        if book.is_none() {
            validated.reject("book", UNKNOWN_BOOK);
        }
    }

    let book = match book {
        Some(book) if validated.is_valid() => book,
        _ => return Ok(Submission::Invalid(validated)),
    };

    let status = match form.get("status") {
        None => BookInstanceStatus::default(),
        Some(_) => validated
            .value("status")
            .parse::<BookInstanceStatus>()
            .map_err(|error| AppError::bad_request(error.to_string()))?,
    };

    Ok(Submission::Valid(NewBookInstance {
        book,
        imprint: validated.value("imprint").to_string(),
        status,
        due_back: parse_iso_date(validated.value("due_back")),
    }))
}

/// The attempted document, handed back so the form repopulates.
pub fn attempted_document(validated: &Validated, id: Option<BookInstanceId>) -> Value {
    let mut doc = json!({
        "book": validated.value("book"),
        "imprint": validated.value("imprint"),
        "status": validated.value("status"),
        "due_back": validated.value("due_back"),
    });
    if let Some(id) = id {
        doc["id"] = json!(id);
        doc["url"] = json!(format!("/catalog/bookinstance/{id}"));
    }
    doc
}
