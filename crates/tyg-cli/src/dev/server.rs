//! Development server with hot reload via Server-Sent Events.
//!
//! Serves project files straight from disk, registering every served
//! JavaScript/TypeScript module (and its relative imports) in the module
//! graph so invalidation knows who depends on whom.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response, Sse},
    routing::get,
    Router,
};
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

use crate::dev::{imports, overlay, DevEvent, SharedState};
use crate::error::{CliError, Result};
use crate::ui;

/// Development server.
pub struct DevServer {
    addr: std::net::SocketAddr,
    state: SharedState,
}

impl DevServer {
    /// Create a new development server bound to `addr`.
    pub fn new(addr: std::net::SocketAddr, state: SharedState) -> Self {
        Self { addr, state }
    }

    /// Bind and serve until the task is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when the address cannot be bound.
    pub async fn start(self) -> Result<()> {
        let addr = self.addr;
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("failed to bind to {addr}: {e}")))?;

        ui::success(&format!("Development server running at http://{addr}"));

        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("server error: {e}")))?;
        Ok(())
    }

    fn build_router(self) -> Router {
        Router::new()
            .route("/__tyg_sse__", get(handle_sse))
            .route("/__tyg_reload__.js", get(handle_reload_script))
            .route("/favicon.ico", get(handle_favicon))
            .fallback(handle_request)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self.state)
    }
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(state): State<SharedState>,
) -> Sse<impl tokio_stream::Stream<Item = std::result::Result<axum::response::sse::Event, std::convert::Infallible>>>
{
    use axum::response::sse::Event;

    let (id, rx) = state.register_client();
    tracing::debug!(client = id, "SSE client connected");

    state.broadcast(&DevEvent::Connected { id }).await;

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}

/// Serve the reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    const RELOAD_SCRIPT: &str = include_str!("../../assets/dev/reload-client.js");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/javascript")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(RELOAD_SCRIPT))
        .unwrap()
}

/// Handle favicon requests with 204 No Content.
async fn handle_favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Serve project files, registering modules in the graph as they go out.
async fn handle_request(State(state): State<SharedState>, uri: Uri) -> Response {
    let path = uri.path();

    if path == "/" {
        return serve_index(&state);
    }

    let rel = path.trim_start_matches('/');
    // Reject traversal out of the project root.
    if rel.split('/').any(|segment| segment == "..") {
        return plain_response(StatusCode::NOT_FOUND, format!("File not found: {path}"));
    }

    let file_path = state.project_root.join(rel);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = determine_content_type(path);

            if content_type == "application/javascript"
                || content_type == "application/typescript"
            {
                let source = String::from_utf8_lossy(&content);
                imports::register_module(&state.graph, &file_path, &source);
                if let Some(id) = state.graph.module_by_path(&file_path) {
                    state.graph.mark_fresh(&id);
                }
            }

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CACHE_CONTROL, "no-cache")
                .body(Body::from(content))
                .unwrap()
        }
        Err(_) => plain_response(StatusCode::NOT_FOUND, format!("File not found: {path}")),
    }
}

/// The server root: the diagnostic overlay while a schema is broken,
/// otherwise a minimal status page with the reload client.
fn serve_index(state: &SharedState) -> Response {
    if let Some(diagnostic) = state.diagnostic() {
        return html_response(overlay::render(&diagnostic));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>tyg dev</title></head>
<body>
<h1>tyg dev server</h1>
<p>{} modules served so far. Schema edits regenerate types and reload importers.</p>
<script src="/__tyg_reload__.js"></script>
</body>
</html>
"#,
        state.graph.len()
    );
    html_response(html)
}

fn html_response(html: String) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(html))
        .unwrap()
}

fn plain_response(status: StatusCode, message: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(message))
        .unwrap()
}

/// Determine content type from file extension.
fn determine_content_type(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "mjs" => "application/javascript",
        "ts" | "tsx" => "application/typescript",
        "json" => "application/json",
        "map" => "application/json",
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}
