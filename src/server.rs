use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::store::{NewTranscript, TranscriptStore};
use crate::youtube::VideoSource;
use crate::{extract_video_id, is_watch_url, join_transcript};

const ERR_MISSING_URL: &str = "videoUrl is missing in the request body.";
const ERR_INVALID_URL: &str = "Please enter a valid YouTube video URL.";
const MSG_SAVED: &str = "Video saved successfully.";
const MSG_UNAVAILABLE: &str = "Transcript is not available for this video.";
const MSG_CACHED: &str = "Transcript served from cache.";

#[derive(Clone)]
pub struct AppState {
    pub store: TranscriptStore,
    pub source: Arc<dyn VideoSource>,
    pub lang: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/", get(welcome))
        .route("/api/transcript", post(create_transcript))
        .with_state(state)
}

/// Unexpected failure from a fetcher or the store, reported as a 500 with
/// the error text in the body.
struct ApiError(eyre::Report);

impl From<eyre::Report> for ApiError {
    fn from(report: eyre::Report) -> Self {
        Self(report)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": self.0.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct CreateTranscriptRequest {
    #[serde(rename = "videoUrl")]
    video_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranscriptResponse {
    message: String,
    #[serde(rename = "videoUrl")]
    video_url: String,
    title: String,
    transcript: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(error: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

async fn welcome() -> &'static str {
    "Welcome to the YouTube transcript API!"
}

async fn create_transcript(
    State(state): State<AppState>,
    body: Option<Json<CreateTranscriptRequest>>,
) -> Result<Response, ApiError> {
    let Some(video_url) = body.and_then(|Json(req)| req.video_url) else {
        return Ok(bad_request(ERR_MISSING_URL));
    };

    if !is_watch_url(&video_url) {
        return Ok(bad_request(ERR_INVALID_URL));
    }

    let video_id = extract_video_id(&video_url)
        .ok_or_else(|| eyre::eyre!("could not extract a video ID from {video_url}"))?;

    if let Some(record) = state.store.find_by_video_id(&video_id).await? {
        debug!("Cache hit for video {video_id}");
        return Ok((
            StatusCode::OK,
            Json(TranscriptResponse {
                message: MSG_CACHED.to_string(),
                video_url: record.video_url,
                title: record.title,
                transcript: record.transcript,
            }),
        )
            .into_response());
    }

    let title = state.source.fetch_video_title(&video_url).await?;

    // A video without captions is a degraded success, not an error: the
    // record is stored either way.
    let transcript = match state.source.fetch_captions(&video_id, &state.lang).await {
        Ok(segments) => join_transcript(&segments),
        Err(e) => {
            warn!("Caption fetch failed for video {video_id}: {e:#}");
            None
        }
    };

    let record = state
        .store
        .insert(NewTranscript {
            video_url,
            video_id: video_id.clone(),
            title,
            transcript,
        })
        .await?;

    info!("Stored transcript for video {video_id}");

    let message = if record.transcript.is_some() {
        MSG_SAVED
    } else {
        MSG_UNAVAILABLE
    };

    Ok((
        StatusCode::CREATED,
        Json(TranscriptResponse {
            message: message.to_string(),
            video_url: record.video_url,
            title: record.title,
            transcript: record.transcript,
        }),
    )
        .into_response())
}
