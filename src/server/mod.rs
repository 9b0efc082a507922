//! HTTP server for post pages

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::pages::{PageOutcome, PostPages};
use crate::render::CommentPanel;
use crate::Site;

/// Server state
pub struct ServerState {
    site: Site,
    pages: Arc<PostPages>,
}

#[derive(Debug, Deserialize)]
struct PostQuery {
    comments: Option<String>,
}

/// Build the router serving `/<post_dir>/{slug}` and static assets
pub fn router(site: Site, pages: Arc<PostPages>) -> Router {
    let post_route = format!("/{}/:slug", site.config.post_dir.trim_matches('/'));
    let static_dir = site.static_dir.clone();
    let state = Arc::new(ServerState { site, pages });

    Router::new()
        .route(&post_route, get(post_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server, optionally loading every known post first
pub async fn start(site: &Site, ip: &str, port: u16, prerender: bool, open: bool) -> Result<()> {
    let pages = Arc::new(site.pages());
    if prerender {
        let paths = pages.prerender().await?;
        tracing::info!("{} posts ready", paths.paths.len());
    }

    let app = router(site.clone(), pages);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!(
        "Pages revalidate every {}s. Press Ctrl+C to stop.",
        site.config.revalidate
    );

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    Query(query): Query<PostQuery>,
) -> Response {
    match state.pages.get(&slug).await {
        Ok(PageOutcome::Rendered(post)) => {
            let panel = CommentPanel::from_query(query.comments.as_deref());
            let html = state.site.render_post(&post, panel);
            let cache_control = format!(
                "s-maxage={}, stale-while-revalidate",
                state.pages.revalidate().as_secs()
            );
            ([(header::CACHE_CONTROL, cache_control)], Html(html)).into_response()
        }
        Ok(PageOutcome::NotFound) => not_found(&state),
        Err(e) => {
            tracing::error!("Failed to load post {}: {}", slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    not_found(&state)
}

fn not_found(state: &ServerState) -> Response {
    (StatusCode::NOT_FOUND, Html(state.site.render_not_found())).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
