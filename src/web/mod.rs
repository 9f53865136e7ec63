// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web server for the gallery page

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use minijinja::{context, Environment, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::gallery::{vote_count, Week, WeekScanner};
use crate::Result;

/// Name of the page template
pub const INDEX_TEMPLATE: &str = "index.html";

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Everything a request needs, built once at startup
pub struct GalleryState {
    pub scanner: WeekScanner,
    pub templates: Environment<'static>,
    pub static_dir: PathBuf,
}

impl GalleryState {
    pub fn new(scanner: WeekScanner, templates: Environment<'static>, static_dir: PathBuf) -> Self {
        Self { scanner, templates, static_dir }
    }

    /// Build state from configuration, compiling the page template
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let scanner = WeekScanner::new(
            config.gallery.root_dir.clone(),
            config.gallery.path_prefix.clone(),
        );
        let templates = build_templates(config.gallery.template.as_deref())?;
        Ok(Self::new(scanner, templates, config.web.static_dir.clone()))
    }

    /// Render the gallery page for the given weeks
    pub fn render(&self, weeks: &[Week]) -> Result<String> {
        let template = self.templates.get_template(INDEX_TEMPLATE)?;
        Ok(template.render(context! { weeks => weeks })?)
    }
}

/// Compile the page template, from `path` if given
pub fn build_templates(path: Option<&Path>) -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_function("numvotes", numvotes);

    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)?;
            env.add_template_owned(INDEX_TEMPLATE, source)?;
            info!("Loaded page template from {:?}", path);
        }
        None => env.add_template(INDEX_TEMPLATE, DEFAULT_TEMPLATE)?,
    }

    Ok(env)
}

/// Template function: vote slot indices for a list of entries
fn numvotes(entries: Value) -> Vec<usize> {
    (0..vote_count(entries.len().unwrap_or(0))).collect()
}

/// Create the web application router
pub fn create_router(state: Arc<GalleryState>) -> Router {
    let favicon = ServeFile::new(state.static_dir.join("favicon.ico"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(index_page))
        .route_service("/favicon.ico", favicon)
        .nest_service("/static", assets)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_page(State(state): State<Arc<GalleryState>>) -> Result<Html<String>> {
    let scanner = state.scanner.clone();
    let weeks = tokio::task::spawn_blocking(move || scanner.scan()).await??;
    Ok(Html(state.render(&weeks)?))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 - not found")
}

/// Start the web server with the given config
pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = Arc::new(GalleryState::from_config(&config)?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gallery available at http://{}", addr);
    info!("Serving weeks from {:?}", state.scanner.root());

    let router = create_router(state);
    axum::serve(listener, router).await?;

    Ok(())
}
