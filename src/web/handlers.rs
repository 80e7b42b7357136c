use crate::core::{GeneratedStory, Style, StoryRequest, TextGenerator};
use crate::domain::regions::{fact_for, REGIONS};
use crate::utils::error::{Result, StoryError};
use crate::web::render::{self, Notice};
use crate::web::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScrollForm {
    pub name: String,
    pub region: String,
    pub style: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiScrollRequest {
    pub name: String,
    pub region: String,
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DownloadForm {
    pub name: String,
    pub text: String,
}

fn status_of(err: &StoryError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_failure(err: &StoryError) {
    match err {
        StoryError::ValidationError { .. } => {
            tracing::debug!("Rejected submission: {}", err);
        }
        _ => {
            tracing::error!(
                "❌ Scroll generation failed: {} (Category: {:?}, Severity: {:?})",
                err,
                err.category(),
                err.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
        }
    }
}

fn notice_for(err: &StoryError) -> Notice {
    match err {
        StoryError::ValidationError { .. } => Notice::Warning(err.user_friendly_message()),
        _ => Notice::Error(err.user_friendly_message()),
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn index() -> Html<String> {
    Html(render::render_home(None, "", REGIONS[0], Style::default()))
}

pub async fn scroll<G: TextGenerator + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Form(form): Form<ScrollForm>,
) -> Response {
    let style = match form.style.parse::<Style>() {
        Ok(style) => style,
        Err(err) => {
            log_failure(&err);
            let html = render::render_home(
                Some(&notice_for(&err)),
                &form.name,
                &form.region,
                Style::default(),
            );
            return (status_of(&err), Html(html)).into_response();
        }
    };

    let request = StoryRequest::new(form.name, form.region).with_style(style);

    match state.engine.weave(&request).await {
        Ok(story) => {
            let seed = Utc::now().timestamp_millis().unsigned_abs();
            let html =
                render::render_scroll(&request, &story, fact_for(seed), state.app_url.as_deref());
            Html(html).into_response()
        }
        Err(err) => {
            log_failure(&err);
            let html = render::render_home(
                Some(&notice_for(&err)),
                &request.name,
                &request.region,
                request.style,
            );
            (status_of(&err), Html(html)).into_response()
        }
    }
}

async fn weave_json<G: TextGenerator>(
    state: &AppState<G>,
    payload: ApiScrollRequest,
) -> Result<GeneratedStory> {
    let style = payload.style.as_deref().unwrap_or_default().parse::<Style>()?;
    let request = StoryRequest::new(payload.name, payload.region).with_style(style);
    state.engine.weave(&request).await
}

pub async fn api_scroll<G: TextGenerator + 'static>(
    State(state): State<Arc<AppState<G>>>,
    payload: std::result::Result<Json<ApiScrollRequest>, JsonRejection>,
) -> Response {
    // 格式錯誤的 JSON 也以 {"error"} 回應
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected JSON body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(json!({"error": rejection.body_text()})),
            )
                .into_response();
        }
    };

    match weave_json(&state, payload).await {
        Ok(story) => Json(story).into_response(),
        Err(err) => {
            log_failure(&err);
            (
                status_of(&err),
                Json(json!({"error": err.user_friendly_message()})),
            )
                .into_response()
        }
    }
}

pub async fn download(Form(form): Form<DownloadForm>) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        render::download_filename(&form.name)
    );
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        // 表單送出會把換行轉成 CRLF
        form.text.replace("\r\n", "\n"),
    )
        .into_response()
}
