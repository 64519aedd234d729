mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use common::{router, send};

const ISBN: &str = "978-1-2345-6789-0";

#[tokio::test]
async fn put_then_get_returns_book() {
    let router = router();
    let (status, body) = send(
        &router,
        Method::PUT,
        "/books/978-1-2345-6789-1",
        Some(json!({"isbn": "978-1-2345-6789-1", "title": "The Shadow in the Attic"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isbn"], "978-1-2345-6789-1");

    let (status, body) = send(&router, Method::GET, "/books/978-1-2345-6789-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Shadow in the Attic");
    assert!(body.get("author").is_none());
}

#[tokio::test]
async fn later_upsert_wins() {
    let router = router();
    let uri = format!("/books/{ISBN}");
    for title in ["The Shadow in the Attic", "Beyond the Horizon"] {
        let (status, _) = send(
            &router,
            Method::PUT,
            &uri,
            Some(json!({"isbn": ISBN, "title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(body["title"], "Beyond the Horizon");

    let (_, list) = send(&router, Method::GET, "/books", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn path_isbn_wins_over_body() {
    let router = router();
    let (_, body) = send(
        &router,
        Method::PUT,
        "/books/111",
        Some(json!({"isbn": "222", "title": "Mismatched"})),
    )
    .await;
    assert_eq!(body["isbn"], "111");

    let (status, _) = send(&router, Method::GET, "/books/222", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_book_is_not_found() {
    let (status, body) = send(&router(), Method::GET, "/books/000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn patch_title_keeps_isbn() {
    let router = router();
    let uri = format!("/books/{ISBN}");
    send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"isbn": ISBN, "title": "The Shadow in the Attic"})),
    )
    .await;

    let (status, body) = send(
        &router,
        Method::PATCH,
        &uri,
        Some(json!({"isbn": ISBN, "title": "UPDATED"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isbn"], ISBN);
    assert_eq!(body["title"], "UPDATED");
}

#[tokio::test]
async fn patch_unknown_book_is_not_found() {
    let (status, _) = send(&router(), Method::PATCH, "/books/000", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let router = router();
    let uri = format!("/books/{ISBN}");
    send(&router, Method::PUT, &uri, Some(json!({"title": "Gone Soon"}))).await;

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn new_author_is_created_with_book() {
    let router = router();
    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/books/{ISBN}"),
        Some(json!({
            "isbn": ISBN,
            "title": "The Shadow in the Attic",
            "author": {"name": "Abigail Rose", "age": 80}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let author_id = body["author"]["id"].clone();
    assert!(author_id.is_i64());

    let (status, author) = send(&router, Method::GET, &format!("/authors/{author_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["name"], "Abigail Rose");
}

#[tokio::test]
async fn unknown_author_id_is_not_found() {
    let router = router();
    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/books/{ISBN}"),
        Some(json!({
            "title": "Orphan",
            "author": {"id": 100, "name": "Nobody", "age": 1}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, &format!("/books/{ISBN}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_author_detaches_it_from_books() {
    let router = router();
    let (_, author) = send(
        &router,
        Method::POST,
        "/authors",
        Some(json!({"name": "Abigail Rose", "age": 80})),
    )
    .await;
    let uri = format!("/books/{ISBN}");
    let (_, book) = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"title": "The Shadow in the Attic", "author": {"id": author["id"], "name": "", "age": 0}})),
    )
    .await;
    assert_eq!(book["author"]["name"], "Abigail Rose");

    send(&router, Method::DELETE, &format!("/authors/{}", author["id"]), None).await;

    let (status, book) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book.get("author").is_none());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = router()
        .oneshot(Request::get("/books").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn openapi_document_lists_resources() {
    let (status, doc) = send(&router(), Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/books/{isbn}"]["put"].is_object());
    assert!(doc["paths"]["/authors/{id}"]["patch"].is_object());
}

#[tokio::test]
async fn empty_isbn_gets_error_envelope() {
    let (status, body) = send(&router(), Method::PUT, "/books/", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn patch_with_null_author_detaches_it() {
    let router = router();
    let uri = format!("/books/{ISBN}");
    send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"title": "The Shadow in the Attic", "author": {"name": "Abigail Rose", "age": 80}})),
    )
    .await;

    let (status, body) = send(&router, Method::PATCH, &uri, Some(json!({"author": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("author").is_none());
    assert_eq!(body["title"], "The Shadow in the Attic");

    let (_, authors) = send(&router, Method::GET, "/authors", None).await;
    assert_eq!(authors.as_array().unwrap().len(), 1);
}
