pub mod handlers;
pub mod middleware;
pub mod state;
pub mod uploads;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    // Multipart framing adds overhead on top of the file itself.
    let body_limit = settings.uploads.max_file_bytes.saturating_mul(2);
    let app_state = AppState::new(service_context, settings);

    Router::new()
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .nest("/api", api_routes(app_state.clone()))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/announcements", announcement_routes(state.clone()))
        .nest("/comments", comment_routes(state.clone()))
        .nest("/stories", story_routes(state.clone()))
        .nest("/events", event_routes(state))
}

fn protected(state: AppState, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(state, middleware::auth::require_auth))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(protected(state, Router::new()
            .route("/users", get(handlers::users::list))
            .route("/user/:id", get(handlers::users::get).delete(handlers::users::delete))
            .route("/update/:id", patch(handlers::users::update))
        ))
}

fn announcement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::announcements::list))
        .route("/:id", get(handlers::announcements::get))
        .route("/:id/like", post(handlers::announcements::like))
        .merge(protected(state, Router::new()
            .route("/", post(handlers::announcements::create))
            .route("/upload", post(handlers::announcements::upload))
            .route("/:id", put(handlers::announcements::update))
            .route("/:id", delete(handlers::announcements::delete))
        ))
}

fn comment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/announcement/:announcement_id", get(handlers::comments::list))
        .merge(protected(state, Router::new()
            .route("/announcement/:announcement_id", post(handlers::comments::create))
            .route("/:id", delete(handlers::comments::delete))
        ))
}

fn story_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::stories::list_active))
        .route("/author/:author_name", get(handlers::stories::list_by_author))
        .route("/expiring", get(handlers::stories::list_expiring))
        .route("/check-expired", post(handlers::stories::check_expired))
        .route("/:id/view", post(handlers::stories::view))
        .merge(protected(state, Router::new()
            .route("/", post(handlers::stories::create))
            .route("/upload", post(handlers::stories::upload))
            .route("/:id", delete(handlers::stories::delete))
        ))
}

fn event_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::events::list))
        .route("/approved", get(handlers::events::list_approved))
        .route("/category/:category", get(handlers::events::list_by_category))
        .route("/:id", get(handlers::events::get))
        .merge(protected(state.clone(), Router::new()
            .route("/", post(handlers::events::create))
            .route("/:id", put(handlers::events::update).delete(handlers::events::delete))
        ))
        .merge(Router::new()
            .route("/:id/approve", put(handlers::events::approve))
            .route_layer(from_fn_with_state(state, middleware::auth::require_admin))
        )
}
