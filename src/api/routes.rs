//! Route assembly and server startup.

use std::any::Any;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, put, MethodFilter};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::codec::{self, FieldExtractor};
use crate::config::Config;
use crate::store::TaskStore;

use super::error::ApiError;
use super::json_response;
use super::static_files;
use super::tasks;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub store: TaskStore,
    pub extractor: FieldExtractor,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: TaskStore::new(),
            extractor: FieldExtractor::new(),
        }
    }
}

/// Build the application router: the task CRUD routes, a JSON 404 for
/// strays under the API prefix, and the static front-end for everything
/// else.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // GET only, not `get()`: that would answer HEAD too, and anything
        // besides GET/POST here must reach the 405 fallback.
        .route(
            "/api/tasks",
            on(MethodFilter::GET, tasks::list)
                .post(tasks::create)
                .fallback(tasks::method_not_allowed),
        )
        // Catch-all segment: the whole remainder must parse as one id, so
        // `/api/tasks/3/sub` fails the id check rather than routing.
        .route(
            "/api/tasks/*id",
            put(tasks::update)
                .delete(tasks::remove)
                .fallback(tasks::method_not_allowed_for_id),
        )
        .fallback(fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Router fallback. Paths under the API prefix that matched no route are
/// still API traffic: anything after `/api/tasks/` goes through the id
/// check (so `/api/tasks/` reports a malformed id, not a missing route),
/// the rest of the prefix gets the JSON 404. Everything else goes to the
/// static file responder.
async fn fallback(state: State<Arc<AppState>>, uri: Uri) -> Response {
    if let Some(rest) = uri.path().strip_prefix("/api/tasks/") {
        return match tasks::parse_id(rest) {
            Ok(_) => ApiError::NotFound.into_response(),
            Err(err) => err.into_response(),
        };
    }
    if uri.path().starts_with("/api/tasks") {
        return ApiError::NotFound.into_response();
    }
    static_files::serve(state, uri).await
}

/// Last-resort boundary: a panic anywhere in handling becomes an opaque
/// 500 with the declared content type. No internals reach the client.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!("request handler panicked: {detail}");
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        codec::render_error("Server Error"),
    )
}
