use axum::{extract::State, http::StatusCode};
use bookshelf_http::{
    error::{AppError, ErrorResponse},
    extract::{Json, Path},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use super::models::{AuthorDto, AuthorPatch};
use super::service::AuthorService;

pub fn router(service: AuthorService) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_authors, create_author))
        .routes(routes!(
            get_author,
            full_update_author,
            partial_update_author,
            delete_author
        ))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "Authors",
    request_body = AuthorDto,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 422, description = "Malformed author", body = ErrorResponse)
    )
)]
async fn create_author(
    State(service): State<AuthorService>,
    Json(author): Json<AuthorDto>,
) -> Result<(StatusCode, Json<AuthorDto>), AppError> {
    let created = service.create(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/authors",
    tag = "Authors",
    responses((status = 200, description = "All authors", body = [AuthorDto]))
)]
async fn list_authors(
    State(service): State<AuthorService>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    Ok(Json(service.list().await?))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "Authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found", body = AuthorDto),
        (status = 404, description = "No such author", body = ErrorResponse)
    )
)]
async fn get_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
) -> Result<Json<AuthorDto>, AppError> {
    Ok(Json(service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "Authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = AuthorDto,
    responses(
        (status = 200, description = "Author replaced", body = AuthorDto),
        (status = 404, description = "No such author", body = ErrorResponse)
    )
)]
async fn full_update_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
    Json(author): Json<AuthorDto>,
) -> Result<Json<AuthorDto>, AppError> {
    Ok(Json(service.full_update(id, author).await?))
}

#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "Authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = AuthorPatch,
    responses(
        (status = 200, description = "Author merged", body = AuthorDto),
        (status = 404, description = "No such author", body = ErrorResponse)
    )
)]
async fn partial_update_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
    Json(patch): Json<AuthorPatch>,
) -> Result<Json<AuthorDto>, AppError> {
    Ok(Json(service.partial_update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "Authors",
    params(("id" = i64, Path, description = "Author id")),
    responses((status = 204, description = "Author removed or never existed"))
)]
async fn delete_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
