use axum::{
    extract::{rejection::JsonRejection, Form, Json},
    http::StatusCode,
    response::{Html, IntoResponse, Json as AxumJson},
};

use crate::error::AppError;
use crate::ledger::models::RequestSubmission;
use crate::session::Session;
use crate::views::{pages, Flash};

pub async fn request_page(session: Session) -> impl IntoResponse {
    let theme = session.lock().await.theme;
    Html(pages::request(theme, &RequestSubmission::default(), None))
}

pub async fn submit_request(
    session: Session,
    Form(submission): Form<RequestSubmission>,
) -> impl IntoResponse {
    let theme = session.lock().await.theme;
    match submission.confirm() {
        Ok(message) => {
            tracing::info!("Session {} sent a recipient request", session.id);
            let flash = Flash::Success(message);
            Html(pages::request(theme, &RequestSubmission::default(), Some(&flash))).into_response()
        }
        Err(e) => {
            tracing::warn!("Session {} request rejected: {:?}", session.id, e.fields());
            let flash = Flash::Error("Please complete all fields.".to_string());
            (StatusCode::UNPROCESSABLE_ENTITY, Html(pages::request(theme, &submission, Some(&flash)))).into_response()
        }
    }
}

pub async fn create_request(
    session: Session,
    payload: Result<Json<RequestSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(submission) = payload?;
    let message = submission.confirm()?;
    tracing::info!("Session {} sent a recipient request via API", session.id);
    Ok(AxumJson(serde_json::json!({ "message": message })))
}
