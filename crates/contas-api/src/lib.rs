//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: the single dashboard page and its JSON summaries
//! - routes::balance: starting balance card
//! - routes::bills: add, inline edit and delete
//! - routes::export: PDF download

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use contas_config::Config;
use contas_core::Tracker;
use contas_report::Exporter;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<RwLock<Tracker>>,
    pub config: Config,
    pub exporter: Arc<Exporter>,
}

impl AppState {
    pub fn new(config: Config, tracker: Arc<RwLock<Tracker>>) -> Self {
        let exporter = Arc::new(Exporter::new(&config.report));
        Self {
            tracker,
            config,
            exporter,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::balance::{htmx_balance_cancel, htmx_balance_edit, htmx_balance_save};
    use routes::bills::{
        api_bills, htmx_bill_cancel, htmx_bill_delete, htmx_bill_edit, htmx_bill_store, htmx_bill_update,
        htmx_form_toggle,
    };
    use routes::dashboard::{api_chart, api_summary, api_tips, page_dashboard};
    use routes::export::download_report;

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/bills", get(api_bills))
        .route("/api/tips", get(api_tips))
        .route("/api/chart", get(api_chart))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/export", get(download_report))
        // HTMX partial routes
        .route("/balance", post(htmx_balance_save))
        .route("/balance/edit", post(htmx_balance_edit))
        .route("/balance/cancel", post(htmx_balance_cancel))
        .route("/bills/form/toggle", post(htmx_form_toggle))
        .route("/bills", post(htmx_bill_store))
        .route("/bills/:id/edit", post(htmx_bill_edit))
        .route("/bills/:id", post(htmx_bill_update))
        .route("/bills/:id/cancel", post(htmx_bill_cancel))
        .route("/bills/:id/delete", post(htmx_bill_delete))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Contas</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="min-h-screen bg-slate-900 text-slate-100">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='max-w-7xl mx-auto px-4 py-8'>
    <header class='text-center mb-8'>
        <h1 class='text-3xl font-bold text-white mb-2'>Gerenciador Financeiro Pessoal</h1>
        <p class='text-slate-400'>Controle suas finanças de forma inteligente</p>
    </header>
    {}
</div>"#,
                inner_content
            ),
        )
    }
}

/// Parse an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if !key.is_empty() {
            params.insert(key, decode_component(value));
        }
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves until the process is stopped.
pub async fn start_server(config: Config, tracker: Arc<RwLock<Tracker>>) -> Result<(), ApiError> {
    let addr = config.bind_address();
    let state = AppState::new(config, tracker);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "contas::api", "Starting Contas server on http://{}", addr);
    log::info!(target: "contas::api", "Available routes:");
    log::info!(target: "contas::api", "  - / (Dashboard)");
    log::info!(target: "contas::api", "  - /export (PDF report)");
    log::info!(target: "contas::api", "  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!(target: "contas::api", "Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!(target: "contas::api", "Could not listen for Ctrl-C: {}", e);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use contas_core::TrackerSettings;
    use contas_store::Store;
    use tower::ServiceExt;

    pub fn state() -> AppState {
        let tracker = Tracker::open(Store::in_memory(), TrackerSettings::default());
        AppState::new(Config::default(), Arc::new(RwLock::new(tracker)))
    }

    pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
        create_router(state.clone()).oneshot(request).await.unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn htmx_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("hx-request", "true")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_string(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
