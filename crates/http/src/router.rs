//! Router builder for the Bookshelf HTTP server

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody, ErrorResponse};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Authors and books"
    ),
    components(schemas(ErrorResponse, ErrorBody))
)]
struct BaseApi;

/// Builder for constructing the main HTTP router.
///
/// Middleware only wraps routes that are already present, so mount
/// routes first and add layers last.
pub struct RouterBuilder {
    router: Router,
    openapi: utoipa::openapi::OpenApi,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            openapi: BaseApi::openapi(),
        }
    }

    /// Add an undocumented route
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's routes at the root and collect its OpenAPI paths
    pub fn mount_module(mut self, module_name: &str, module_router: OpenApiRouter) -> Self {
        let (router, openapi) = module_router.split_for_parts();
        tracing::debug!(
            module = module_name,
            paths = openapi.paths.paths.len(),
            "merging module routes"
        );
        self.router = self.router.merge(router);
        self.openapi.merge(openapi);
        self
    }

    /// OpenAPI document collected so far
    pub fn openapi(&self) -> &utoipa::openapi::OpenApi {
        &self.openapi
    }

    /// Serve the collected OpenAPI document at `/docs/openapi.json`
    /// (and Swagger UI at `/swagger-ui` with the `swagger-ui` feature)
    pub fn with_openapi(mut self) -> Self {
        #[cfg(feature = "swagger-ui")]
        {
            self.router = self.router.merge(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                    .url("/api-docs/openapi.json", self.openapi.clone()),
            );
        }

        let spec = self.openapi.clone();
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || {
                let spec = spec.clone();
                async move { axum::Json(spec) }
            }),
        );
        self
    }

    /// Answer unmatched paths with the `not_found` error envelope
    pub fn with_fallback(mut self) -> Self {
        self.router = self
            .router
            .fallback(|| async { AppError::not_found("route not found") });
        self
    }

    /// Add tracing middleware; the span carries the request id
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(&REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Assign a UUID v7 request id when the client sent none and echo it back.
    /// Must be added after `with_tracing` so the span can see the id.
    pub fn with_request_id(mut self) -> Self {
        self.router = self.router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    REQUEST_ID_HEADER.clone(),
                    MakeRequestUuidV7,
                ))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone())),
        );
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(timeout_ms),
            ));
        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Time-ordered request ids
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}
