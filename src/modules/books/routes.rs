use axum::{extract::State, http::StatusCode};
use bookshelf_http::{
    error::{AppError, ErrorResponse},
    extract::{Json, Path},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use super::models::{BookDto, BookPatch};
use super::service::BookService;

pub fn router(service: BookService) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_books))
        .routes(routes!(
            get_book,
            create_or_replace_book,
            partial_update_book,
            delete_book
        ))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses((status = 200, description = "All books", body = [BookDto]))
)]
async fn list_books(State(service): State<BookService>) -> Result<Json<Vec<BookDto>>, AppError> {
    Ok(Json(service.list().await?))
}

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "Books",
    params(("isbn" = String, Path, description = "Book isbn")),
    responses(
        (status = 200, description = "Book found", body = BookDto),
        (status = 404, description = "No such book", body = ErrorResponse)
    )
)]
async fn get_book(
    State(service): State<BookService>,
    Path(isbn): Path<String>,
) -> Result<Json<BookDto>, AppError> {
    Ok(Json(service.get(&isbn).await?))
}

#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "Books",
    params(("isbn" = String, Path, description = "Book isbn")),
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created or replaced", body = BookDto),
        (status = 404, description = "Referenced author does not exist", body = ErrorResponse),
        (status = 422, description = "Malformed book", body = ErrorResponse)
    )
)]
async fn create_or_replace_book(
    State(service): State<BookService>,
    Path(isbn): Path<String>,
    Json(book): Json<BookDto>,
) -> Result<(StatusCode, Json<BookDto>), AppError> {
    let stored = service.create_or_replace(&isbn, book).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    patch,
    path = "/books/{isbn}",
    tag = "Books",
    params(("isbn" = String, Path, description = "Book isbn")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book merged", body = BookDto),
        (status = 404, description = "No such book or author", body = ErrorResponse)
    )
)]
async fn partial_update_book(
    State(service): State<BookService>,
    Path(isbn): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<BookDto>, AppError> {
    Ok(Json(service.partial_update(&isbn, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "Books",
    params(("isbn" = String, Path, description = "Book isbn")),
    responses((status = 204, description = "Book removed or never existed"))
)]
async fn delete_book(
    State(service): State<BookService>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
