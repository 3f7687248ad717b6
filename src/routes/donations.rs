use axum::{
    extract::{rejection::JsonRejection, Form, Json},
    http::StatusCode,
    response::{Html, IntoResponse, Json as AxumJson},
};

use crate::error::AppError;
use crate::ledger::models::DonationForm;
use crate::session::Session;
use crate::views::{pages, Flash};

const THANK_YOU: &str = "Thank you for your generous donation! Your food has been added to the list.";

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn donate_page(session: Session) -> impl IntoResponse {
    let ctx = session.lock().await;
    Html(pages::donate(ctx.theme, &pages::blank_donation_form(today()), None))
}

pub async fn submit_donation(
    session: Session,
    Form(form): Form<DonationForm>,
) -> impl IntoResponse {
    let mut ctx = session.lock().await;
    let theme = ctx.theme;
    match ctx.ledger.submit(&form) {
        Ok(index) => {
            tracing::info!("Session {} recorded donation #{}", session.id, index + 1);
            let flash = Flash::Success(THANK_YOU.to_string());
            Html(pages::donate(theme, &pages::blank_donation_form(today()), Some(&flash))).into_response()
        }
        Err(e) => {
            tracing::warn!("Session {} donation rejected: {} {:?}", session.id, e, e.fields());
            let flash = Flash::Error(e.to_string());
            (StatusCode::UNPROCESSABLE_ENTITY, Html(pages::donate(theme, &form, Some(&flash)))).into_response()
        }
    }
}

pub async fn donations_page(session: Session) -> impl IntoResponse {
    let ctx = session.lock().await;
    Html(pages::donations(ctx.theme, ctx.ledger.list()))
}

pub async fn list_donations(session: Session) -> impl IntoResponse {
    let ctx = session.lock().await;
    AxumJson(serde_json::json!({ "donations": ctx.ledger.list() }))
}

pub async fn create_donation(
    session: Session,
    payload: Result<Json<DonationForm>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(form) = payload?;
    let index = session.lock().await.ledger.submit(&form)?;
    tracing::info!("Session {} recorded donation #{} via API", session.id, index + 1);
    Ok((
        StatusCode::CREATED,
        AxumJson(serde_json::json!({ "status": "created", "index": index })),
    ))
}
