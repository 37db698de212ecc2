pub mod usuarios;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "Servidor Rust + MySQL funcionando correctamente.";
pub const HEALTH_MESSAGE: &str = "API activa y corriendo correctamente.";

/// Plain-text liveness message.
#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Liveness message", body = String)))]
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::up(HEALTH_MESSAGE))
}

/// Build the full application router: liveness, health, the `usuarios`
/// resource and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/api/health", get(health));

    let api = Router::new()
        .route(
            "/api/usuarios",
            get(usuarios::list_usuarios).post(usuarios::create_usuario),
        )
        .route(
            "/api/usuarios/:id",
            get(usuarios::get_usuario)
                .patch(usuarios::update_usuario)
                .delete(usuarios::delete_usuario),
        );

    public
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
