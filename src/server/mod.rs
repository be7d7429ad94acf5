use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::{ensure_db_dir, ServerConfig};
use crate::storage::SqliteStore;

pub mod error;
pub mod routes;

use error::ApiError;

/// Server state
///
/// The one connection is opened at startup and shared by every request;
/// the mutex serializes statement execution against it.
pub struct AppState {
    pub store: Mutex<SqliteStore>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

/// Build the bookmark API router
pub fn router(state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route(
            "/bookmarks",
            get(routes::list_bookmarks).post(routes::create_bookmark),
        )
        .route(
            "/bookmarks/{id}",
            get(routes::get_bookmark)
                .put(routes::update_bookmark)
                .delete(routes::delete_bookmark),
        )
        .fallback(routes::not_found)
        .with_state(state);

    with_middleware(app)
}

/// Catch-all fault handling, request tracing and CORS.
pub fn with_middleware(app: Router) -> Router {
    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    ensure_db_dir(&config.database)?;
    let store = SqliteStore::open(&config.database)?;
    tracing::info!(
        "Opened {:?} ({} bookmarks)",
        config.database,
        store.count()?
    );

    let app = router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
