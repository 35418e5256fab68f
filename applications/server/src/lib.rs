//! Keepsake Server Library
//!
//! Serves the slideshow page, the slide payload built from a folder tree
//! of photos, and the static media behind it.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

/// Build the application router
///
/// - `/api/*` JSON routes
/// - `/static/*` media from `media.static_dir`
/// - everything else from `media.web_dir`, with `index.html` for unknown paths
pub fn create_router(app_state: AppState) -> Router {
    let media = app_state.media();
    let static_files = ServeDir::new(&media.static_dir);
    let web_files = ServeDir::new(&media.web_dir)
        .fallback(ServeFile::new(media.web_dir.join("index.html")));

    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/slides", get(api::slides::list_slides))
        .route("/audio", get(api::slides::audio_track));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/static", static_files)
        .fallback_service(web_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
