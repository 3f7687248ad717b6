use axum::{
    extract::Form,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::session::Session;
use crate::theme::Theme;
use crate::views::pages;

#[derive(Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub theme: String,
}

pub async fn home(session: Session) -> impl IntoResponse {
    let theme = session.lock().await.theme;
    Html(pages::home(theme))
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn set_theme(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ThemeForm>,
) -> impl IntoResponse {
    let Some(theme) = Theme::parse(&form.theme) else {
        tracing::warn!("Ignoring unknown theme: {}", form.theme);
        return (StatusCode::BAD_REQUEST, "Unknown theme").into_response();
    };
    session.lock().await.theme = theme;
    Redirect::to(&redirect_target(&headers)).into_response()
}

pub async fn not_found(session: Session, uri: Uri) -> impl IntoResponse {
    let theme = session.lock().await.theme;
    (StatusCode::NOT_FOUND, Html(pages::not_found(theme, uri.path())))
}

/// Sends the browser back where the toggle was pressed, but only for
/// same-origin referers.
fn redirect_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return "/".to_string();
    };
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let Ok(uri) = referer.parse::<Uri>() else {
        return "/".to_string();
    };

    let same_origin = match (uri.authority(), host) {
        (None, _) => true,
        (Some(authority), Some(host)) => authority.as_str().eq_ignore_ascii_case(host),
        (Some(_), None) => false,
    };
    if !same_origin {
        return "/".to_string();
    }

    uri.path_and_query()
        .map(|p| p.as_str().to_string())
        .filter(|p| p.starts_with('/') && !p.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}
