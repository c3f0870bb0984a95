use crate::aggregator::{CycleOutcome, DisplayRecord, MediaReference};
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/video-titles", get(get_titles).post(run_titles))
        .route("/api/videos/{id}/overlay", get(get_overlay))
        .route("/api/videos/{id}/thumbnail", get(get_thumbnail))
}

#[derive(Deserialize)]
struct TitlesRequest {
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    videos: Vec<MediaReference>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoOverlay {
    media_id: String,
    thumbnail_url: String,
    alt: String,
}

#[derive(Deserialize)]
struct ThumbnailQuery {
    width: Option<u32>,
}

async fn get_titles(State(state): State<AppState>) -> Json<Vec<DisplayRecord>> {
    Json(state.aggregator.current().to_vec())
}

async fn run_titles(
    State(state): State<AppState>,
    Json(body): Json<TitlesRequest>,
) -> Result<Json<Vec<DisplayRecord>>, AppError> {
    match state.aggregator.run_cycle(&body.type_tag, &body.videos).await? {
        CycleOutcome::Published(records) => Ok(Json(records.to_vec())),
        CycleOutcome::Skipped => Ok(Json(state.aggregator.current().to_vec())),
        CycleOutcome::Superseded => Err(AppError::Conflict(
            "A newer request replaced this one".to_string(),
        )),
    }
}

async fn get_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoOverlay>, AppError> {
    let id = id.trim();
    let metadata = state.metadata.fetch_metadata(id).await?;
    Ok(Json(VideoOverlay {
        media_id: id.to_string(),
        thumbnail_url: state.kaltura.thumbnail_url(id, state.config.thumbnail_width),
        alt: metadata.name,
    }))
}

async fn get_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ThumbnailQuery>,
) -> Json<Value> {
    let width = query.width.unwrap_or(state.config.thumbnail_width);
    Json(json!({ "url": state.kaltura.thumbnail_url(&id, width) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::ScriptedSource;
    use crate::aggregator::MediaKey;
    use crate::kaltura::KalturaError;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::test(Arc::new(
            ScriptedSource::default()
                .with("v1", "First", 65_000)
                .with("v2", "Second", 3_000)
                .failing("down", KalturaError::Network("timeout".into())),
        ))
    }

    fn request(type_tag: &str, ids: &[&str]) -> TitlesRequest {
        TitlesRequest {
            type_tag: type_tag.to_string(),
            videos: ids
                .iter()
                .enumerate()
                .map(|(i, id)| MediaReference {
                    id: id.to_string(),
                    key: MediaKey::Number(i as i64),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_titles_default_placeholder() {
        let Json(records) = get_titles(State(state())).await;
        assert_eq!(records, vec![DisplayRecord::default()]);
    }

    #[tokio::test]
    async fn test_run_titles_publishes() {
        let state = state();
        let Json(records) = run_titles(State(state.clone()), Json(request("video", &["v1", "v2"])))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration, "1:05");
        assert_eq!(records[1].title, "Second");

        let Json(current) = get_titles(State(state)).await;
        assert_eq!(current, records);
    }

    #[tokio::test]
    async fn test_run_titles_skipped_returns_current() {
        let Json(records) = run_titles(State(state()), Json(request("local", &["v1"])))
            .await
            .unwrap();
        assert_eq!(records, vec![DisplayRecord::default()]);
    }

    #[tokio::test]
    async fn test_run_titles_failure_is_bad_gateway() {
        let err = run_titles(State(state()), Json(request("video", &["v1", "down"])))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_request_body_parses_src_and_type() {
        let body: TitlesRequest = serde_json::from_str(
            r#"{"type": "video", "videos": [{"src": "0_a", "key": 0}]}"#,
        )
        .unwrap();
        assert_eq!(body.type_tag, "video");
        assert_eq!(body.videos[0].id, "0_a");
    }

    #[tokio::test]
    async fn test_overlay() {
        let Json(overlay) = get_overlay(State(state()), Path("v1".to_string()))
            .await
            .unwrap();
        assert_eq!(
            overlay,
            VideoOverlay {
                media_id: "v1".to_string(),
                thumbnail_url:
                    "https://cdnsecakmi.kaltura.com/p/1773841/thumbnail/entry_id/v1/width/655"
                        .to_string(),
                alt: "First".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_overlay_uses_trimmed_id_everywhere() {
        let Json(overlay) = get_overlay(State(state()), Path(" v1 ".to_string()))
            .await
            .unwrap();
        assert_eq!(overlay.media_id, "v1");
        assert_eq!(overlay.alt, "First");
        assert!(overlay.thumbnail_url.ends_with("/entry_id/v1/width/655"));
    }

    #[tokio::test]
    async fn test_overlay_missing_media_is_404() {
        let err = get_overlay(State(state()), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_thumbnail_width() {
        let Json(body) = get_thumbnail(
            State(state()),
            Path("abc123".to_string()),
            Query(ThumbnailQuery { width: Some(320) }),
        )
        .await;
        assert_eq!(
            body["url"],
            "https://cdnsecakmi.kaltura.com/p/1773841/thumbnail/entry_id/abc123/width/320"
        );
    }

    #[tokio::test]
    async fn test_thumbnail_zero_width_still_builds_url() {
        let Json(body) = get_thumbnail(
            State(state()),
            Path("abc123".to_string()),
            Query(ThumbnailQuery { width: Some(0) }),
        )
        .await;
        assert_eq!(
            body["url"],
            "https://cdnsecakmi.kaltura.com/p/1773841/thumbnail/entry_id/abc123/width/0"
        );
    }

    #[tokio::test]
    async fn test_thumbnail_default_width() {
        let Json(body) = get_thumbnail(
            State(state()),
            Path("abc123".to_string()),
            Query(ThumbnailQuery { width: None }),
        )
        .await;
        assert!(body["url"].as_str().unwrap().ends_with("/width/655"));
    }
}
