use axum::{
    routing::{delete, get, patch},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::services::book_service::BookService;
use service::storage::StateStore;

pub mod books;
pub mod cake;
pub mod crochet;
pub mod mood;

/// Shared handler state: the connection pool plus the services built over it,
/// constructed once at startup and cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub books: BookService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let books = BookService::new(StateStore::new(db.clone()));
        Self { db, books }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true, "msg": "lilazul api online"}))
}

async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true, "msg": "pong"}))
}

/// Build the full application router over one shared state.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/current-book", get(books::get_current).post(books::set_current))
        .route("/finished-books", get(books::list_finished).post(books::add_finished))
        .route("/finished-books/:id", delete(books::delete_finished))
        .route("/crochet", get(crochet::list).post(crochet::create))
        .route("/crochet/:id/toggle", patch(crochet::toggle))
        .route("/crochet/:id", delete(crochet::remove))
        .route("/cake", get(cake::list).post(cake::record))
        .route("/cake/:month", delete(cake::remove))
        .route("/moods", get(mood::list).post(mood::set))
        .with_state(state)
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
