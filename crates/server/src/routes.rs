use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Json, Router,
};
use service::room::{repo::SeaOrmRoomRepository, RoomService};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::auth::{self, ServerAuthConfig};
use crate::observability;
use crate::openapi::ApiDoc;
use crate::rate_limit::{self, RateLimiter};

pub mod rooms;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub rooms: Arc<RoomService<SeaOrmRoomRepository>>,
    pub auth: ServerAuthConfig,
    pub limiter: RateLimiter,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public endpoints plus the guarded room API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Guarded room routes; the rate limit runs before the key check
    let api = Router::new()
        .route("/api/rooms", get(rooms::list).post(rooms::create))
        .route("/api/rooms/:id", get(rooms::get).put(rooms::update))
        .route("/api/rooms/:id/status", patch(rooms::set_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::enforce));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Outermost first: trace, cors, metrics
    let layers = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(cors)
        .layer(middleware::from_fn(observability::track_requests));

    public.merge(api).layer(layers).with_state(state)
}
