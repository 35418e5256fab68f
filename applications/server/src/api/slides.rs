/// Slide payload and background audio routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use keepsake_core::{resolve_audio_track, Slide};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub track: Option<String>,
}

/// GET /api/slides - Slide payload, rebuilt from the images folder on every request
pub async fn list_slides(State(state): State<AppState>) -> Result<Json<Vec<Slide>>> {
    let builder = state.manifest_builder();

    let slides = tokio::task::spawn_blocking(move || builder.build_or_placeholder())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    tracing::debug!("Serving {} slides", slides.len());
    Ok(Json(slides))
}

/// GET /api/audio - Background track, if any
pub async fn audio_track(State(state): State<AppState>) -> Result<Json<AudioResponse>> {
    let media = state.media();
    let audio_dir = media.audio_dir();
    let prefix = media.audio_subdir.clone();

    let track = tokio::task::spawn_blocking(move || resolve_audio_track(&audio_dir, &prefix))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(Json(AudioResponse { track }))
}
