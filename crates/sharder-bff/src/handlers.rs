use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::controller::{build_page, PageEvent, PodAction};
use crate::session::{session_cookie, session_token};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn healthz() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn index(State(st): State<AppState>, headers: HeaderMap) -> Response {
    page(&st, &headers, PageEvent::View, String::new()).await
}

pub async fn refresh(State(st): State<AppState>, headers: HeaderMap) -> Response {
    page(&st, &headers, PageEvent::Refresh, String::new()).await
}

pub async fn start_pod(State(st): State<AppState>, headers: HeaderMap) -> Response {
    page(&st, &headers, PageEvent::Action(PodAction::Start), String::new()).await
}

pub async fn stop_pod(State(st): State<AppState>, headers: HeaderMap) -> Response {
    page(&st, &headers, PageEvent::Action(PodAction::Stop), String::new()).await
}

pub async fn login(
    State(st): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let current = session_token(&headers);
    match st.sessions.login(
        &st.config.credentials,
        current.as_deref(),
        &form.username,
        &form.password,
    ) {
        Some(token) => {
            tracing::info!(username=%form.username, sessions = st.sessions.len(), "operator logged in");
            (
                [(header::SET_COOKIE, session_cookie(&token))],
                Redirect::to("/"),
            )
                .into_response()
        }
        None => {
            tracing::warn!(username=%form.username, "rejected login attempt");
            page(&st, &headers, PageEvent::View, form.username).await
        }
    }
}

pub async fn logo(State(st): State<AppState>) -> Response {
    match tokio::fs::read(&st.config.logo_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/webp")], bytes).into_response(),
        Err(e) => {
            tracing::debug!(path=%st.config.logo_path.display(), error=%e, "logo not available");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn page(st: &AppState, headers: &HeaderMap, event: PageEvent, username: String) -> Response {
    let state = st.sessions.state(session_token(headers).as_deref());
    let page = build_page(st.pods.as_ref(), &st.config, state, event, username).await;

    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error=%e, "failed to render dashboard");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}
