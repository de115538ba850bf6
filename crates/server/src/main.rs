use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use clap::Parser;
use shared::{
    domain::PageName,
    error::{ErrorCode, SiteError},
};
use site_pages::{
    render_not_found_page, render_page, render_wizard_step, SiteContext, SiteTemplates,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "site.toml")]
    config: PathBuf,
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    if let Some(bind) = cli.bind {
        settings.server_bind = bind;
    }

    let templates = SiteTemplates::from_dir(&settings.templates_dir).with_context(|| {
        format!(
            "failed to load templates from '{}'",
            settings.templates_dir.display()
        )
    })?;

    let state = AppState {
        site: SiteContext::new(templates),
        static_dir: settings.static_dir.clone(),
        debug: settings.debug,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(
        %addr,
        debug = settings.debug,
        static_dir = %settings.static_dir.display(),
        "site listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/new-projects/:step/", get(wizard_step))
        .route("/new-projects/:step", get(append_slash))
        .route("/:page_name/", get(page))
        .route("/:page_name", get(append_slash))
        .nest_service("/static", static_files)
        .fallback(unmatched)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let result = render_page(&state.site, &PageName::index());
    html_response(&state, &uri, result)
}

async fn page(
    State(state): State<Arc<AppState>>,
    Path(page_name): Path<String>,
    uri: Uri,
) -> Response {
    let result = render_page(&state.site, &PageName::new(page_name));
    html_response(&state, &uri, result)
}

async fn wizard_step(
    State(state): State<Arc<AppState>>,
    Path(step): Path<String>,
    uri: Uri,
) -> Response {
    let result = match parse_step(&step) {
        Some(step) => render_wizard_step(&state.site, step),
        None => Err(SiteError::not_found(format!("Step {step} not found"))),
    };
    html_response(&state, &uri, result)
}

async fn append_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{query}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

async fn unmatched(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let err = SiteError::not_found(format!("No page matches {}", uri.path()));
    error_response(&state, &uri, &err)
}

// Only plain digit runs name a step, so `+3` or `-1` never reach the table.
fn parse_step(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn html_response(state: &AppState, uri: &Uri, result: Result<String, SiteError>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_response(state, uri, &err),
    }
}

fn error_response(state: &AppState, uri: &Uri, err: &SiteError) -> Response {
    match err.code() {
        ErrorCode::NotFound => {
            debug!(path = %uri.path(), %err, "page not found");
            let message = if state.debug {
                err.to_string()
            } else {
                "Not Found".to_string()
            };
            match render_not_found_page(&state.site, &message, uri.path()) {
                Some(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                None => (StatusCode::NOT_FOUND, message).into_response(),
            }
        }
        ErrorCode::Internal => {
            error!(path = %uri.path(), %err, "failed to render page");
            let message = if state.debug {
                err.to_string()
            } else {
                "Internal Server Error".to_string()
            };
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
