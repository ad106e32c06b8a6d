mod common;

use axum::http::StatusCode;
use catalog_db::models::{BookInstanceStatus, Resource};
use catalog_db::CatalogStore;
use chrono::NaiveDate;
use common::{app, body_json, location, view};
use uuid::Uuid;

#[tokio::test]
async fn list_populates_books() {
    let app = app().await;

    let data = view(app.get("/catalog/bookinstances").await, "bookInstance_list").await;
    assert_eq!(data["title"], "Book Instance List");
    let copy = &data["bookinstance_list"][0];
    assert_eq!(copy["imprint"], "Parnassus, 1968");
    assert_eq!(copy["book"]["title"], "A Wizard of Earthsea");
    assert_eq!(copy["url"], app.copy.url());
}

#[tokio::test]
async fn detail_renders_populated_copy() {
    let app = app().await;

    let data = view(app.get(&app.copy.url()).await, "bookInstance_detail").await;
    assert_eq!(data["title"], "Book:");
    assert_eq!(data["bookinstance"]["status"], "Available");
    assert_eq!(data["bookinstance"]["book"]["url"], app.book.url());
}

#[tokio::test]
async fn detail_of_missing_copy_is_not_found() {
    let app = app().await;

    let response = app
        .get(&format!("/catalog/bookinstance/{}", Uuid::now_v7()))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Book copy not found");
}

#[tokio::test]
async fn create_form_offers_book_titles() {
    let app = app().await;

    let data = view(app.get("/catalog/bookinstance/create").await, "bookInstance_form").await;
    assert_eq!(data["title"], "Create BookInstance");
    assert_eq!(data["book_list"][0]["id"], app.book.id.to_string());
    assert_eq!(data["book_list"][0]["title"], "A Wizard of Earthsea");
}

#[tokio::test]
async fn create_without_imprint_rerenders_form() {
    let app = app().await;
    let body = format!("book={}&imprint=+++&status=Loaned", app.book.id);

    let data = view(
        app.post_form("/catalog/bookinstance/create", &body).await,
        "bookInstance_form",
    )
    .await;
    assert_eq!(data["title"], "Create Book Instance");
    assert_eq!(data["errors"].as_array().unwrap().len(), 1);
    assert_eq!(data["errors"][0]["path"], "imprint");
    assert_eq!(data["errors"][0]["msg"], "Imprint must be specified");
    assert_eq!(data["selected_book"], app.book.id.to_string());
    assert_eq!(data["bookinstance"]["status"], "Loaned");
    assert_eq!(data["book_list"].as_array().unwrap().len(), 1);

    assert_eq!(app.store.book_instance_count().await, 1);
}

#[tokio::test]
async fn create_with_malformed_due_date_is_rejected() {
    let app = app().await;
    let body = format!(
        "book={}&imprint=Puffin&status=Loaned&due_back=31%2F12%2F2024",
        app.book.id
    );

    let data = view(
        app.post_form("/catalog/bookinstance/create", &body).await,
        "bookInstance_form",
    )
    .await;
    assert_eq!(data["errors"][0]["path"], "due_back");
    assert_eq!(data["errors"][0]["msg"], "Invalid date");
    assert_eq!(app.store.book_instance_count().await, 1);
}

#[tokio::test]
async fn create_without_due_date_succeeds() {
    let app = app().await;
    let body = format!("book={}&imprint=Puffin%2C+1971&status=Maintenance&due_back=", app.book.id);

    let response = app.post_form("/catalog/bookinstance/create", &body).await;
    let target = location(&response);

    let copies = app.store.list_book_instances().await.unwrap();
    assert_eq!(copies.len(), 2);
    let created = copies
        .iter()
        .find(|copy| copy.instance.imprint == "Puffin, 1971")
        .unwrap();
    assert_eq!(target, created.instance.url());
    assert_eq!(created.instance.due_back, None);
}

#[tokio::test]
async fn create_parses_due_date_and_never_dedups() {
    let app = app().await;
    let body = format!(
        "book={}&imprint=Parnassus%2C+1968&status=Loaned&due_back=2030-06-01",
        app.book.id
    );

    let first = location(&app.post_form("/catalog/bookinstance/create", &body).await);
    let second = location(&app.post_form("/catalog/bookinstance/create", &body).await);
    assert_ne!(first, second);
    assert_eq!(app.store.book_instance_count().await, 3);

    let id = first.rsplit('/').next().unwrap().parse::<Uuid>().unwrap();
    let stored = app.store.find_book_instance(id).await.unwrap().unwrap();
    assert_eq!(stored.instance.due_back, NaiveDate::from_ymd_opt(2030, 6, 1));
    assert_eq!(stored.instance.status, BookInstanceStatus::Loaned);
}

#[tokio::test]
async fn create_requires_an_existing_book() {
    let app = app().await;

    for book in [Uuid::now_v7().to_string(), "nonsense".to_string()] {
        let body = format!("book={book}&imprint=Puffin&status=Available");
        let data = view(
            app.post_form("/catalog/bookinstance/create", &body).await,
            "bookInstance_form",
        )
        .await;
        assert_eq!(data["errors"][0]["path"], "book");
        assert_eq!(
            data["errors"][0]["msg"],
            "Book must reference an existing book"
        );
        assert_eq!(data["selected_book"], book);
    }

    let data = view(
        app.post_form("/catalog/bookinstance/create", "imprint=Puffin&status=Available")
            .await,
        "bookInstance_form",
    )
    .await;
    assert_eq!(data["errors"][0]["msg"], "Book must be specified");
    assert_eq!(app.store.book_instance_count().await, 1);
}

#[tokio::test]
async fn unknown_status_is_a_bad_request() {
    let app = app().await;
    let body = format!("book={}&imprint=Puffin&status=Lost", app.book.id);

    let response = app.post_form("/catalog/bookinstance/create", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.book_instance_count().await, 1);
}

#[tokio::test]
async fn omitted_status_defaults_to_maintenance() {
    let app = app().await;
    let body = format!("book={}&imprint=Puffin", app.book.id);

    let target = location(&app.post_form("/catalog/bookinstance/create", &body).await);
    let id = target.rsplit('/').next().unwrap().parse::<Uuid>().unwrap();
    let stored = app.store.find_book_instance(id).await.unwrap().unwrap();
    assert_eq!(stored.instance.status, BookInstanceStatus::Maintenance);
}

#[tokio::test]
async fn due_date_accepts_space_separated_datetime() {
    let app = app().await;
    let body = format!(
        "book={}&imprint=Puffin&status=Loaned&due_back=2024-03-01+09%3A30",
        app.book.id
    );

    let response = app.post_form("/catalog/bookinstance/create", &body).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let id = location(&response)
        .rsplit('/')
        .next()
        .unwrap()
        .parse::<Uuid>()
        .unwrap();
    let stored = app.store.find_book_instance(id).await.unwrap().unwrap();
    assert_eq!(stored.instance.due_back, NaiveDate::from_ymd_opt(2024, 3, 1));
}

#[tokio::test]
async fn update_form_preselects_current_book() {
    let app = app().await;

    let data = view(
        app.get(&format!("{}/update", app.copy.url())).await,
        "bookInstance_form",
    )
    .await;
    assert_eq!(data["title"], "Update Book Instance");
    assert_eq!(data["selected_book"], app.book.id.to_string());
    assert_eq!(data["bookinstance"]["imprint"], "Parnassus, 1968");
    assert_eq!(data["book_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_form_for_missing_copy_is_not_found() {
    let app = app().await;

    let response = app
        .get(&format!("/catalog/bookinstance/{}/update", Uuid::now_v7()))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Book instance not found"
    );
}

#[tokio::test]
async fn update_preserves_identity() {
    let app = app().await;
    let body = format!(
        "book={}&imprint=Parnassus+reprint&status=Reserved&due_back=2031-01-15",
        app.book.id
    );

    let response = app
        .post_form(&format!("{}/update", app.copy.url()), &body)
        .await;
    assert_eq!(location(&response), app.copy.url());

    assert_eq!(app.store.book_instance_count().await, 1);
    let stored = app
        .store
        .find_book_instance(app.copy.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.instance.id, app.copy.id);
    assert_eq!(stored.instance.imprint, "Parnassus reprint");
    assert_eq!(stored.instance.status, BookInstanceStatus::Reserved);
    assert_eq!(stored.instance.due_back, NaiveDate::from_ymd_opt(2031, 1, 15));
}

#[tokio::test]
async fn invalid_update_keeps_selection_and_identity() {
    let app = app().await;
    let body = format!("book={}&imprint=&status=Available", app.book.id);

    let data = view(
        app.post_form(&format!("{}/update", app.copy.url()), &body)
            .await,
        "bookInstance_form",
    )
    .await;
    assert_eq!(data["title"], "Update Book Instance");
    assert_eq!(data["selected_book"], app.book.id.to_string());
    assert_eq!(data["bookinstance"]["id"], app.copy.id.to_string());
    assert_eq!(data["errors"][0]["path"], "imprint");

    let stored = app
        .store
        .find_book_instance(app.copy.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.instance.imprint, "Parnassus, 1968");
}

#[tokio::test]
async fn update_of_missing_copy_is_not_found() {
    let app = app().await;
    let body = format!("book={}&imprint=Ghost&status=Available", app.book.id);

    let response = app
        .post_form(&format!("/catalog/bookinstance/{}/update", Uuid::now_v7()), &body)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.book_instance_count().await, 1);
}

#[tokio::test]
async fn delete_confirmation_populates_book_and_author() {
    let app = app().await;

    let data = view(
        app.get(&format!("{}/delete", app.copy.url())).await,
        "bookInstance_delete",
    )
    .await;
    assert_eq!(data["title"], "Delete Book Instance");
    assert_eq!(data["bookinstance"]["book"]["author"]["name"], "Le Guin, Ursula");
}

#[tokio::test]
async fn delete_confirmation_for_missing_copy_redirects_to_list() {
    let app = app().await;

    let response = app
        .get(&format!("/catalog/bookinstance/{}/delete", Uuid::now_v7()))
        .await;
    assert_eq!(location(&response), "/catalog/bookinstances");
}

#[tokio::test]
async fn delete_is_unconditional() {
    let app = app().await;

    let response = app
        .post_form(&format!("{}/delete", app.copy.url()), "")
        .await;
    assert_eq!(location(&response), "/catalog/bookinstances");
    assert_eq!(app.store.book_instance_count().await, 0);

    let response = app.get(&app.copy.url()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
