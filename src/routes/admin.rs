use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Json as AxumJson, Response},
};

use crate::ledger::models::{DonationRecord, EXPIRY_FORMAT};
use crate::session::Session;
use crate::views::pages;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        let escaped = s.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        s.to_string()
    }
}

pub(crate) fn ledger_csv(records: &[DonationRecord]) -> String {
    let mut w = String::new();
    w.push_str("index,donor,food_type,quantity,location,contact,expiry\n");
    for (i, d) in records.iter().enumerate() {
        let expiry = d.expiry.format(EXPIRY_FORMAT).to_string();
        w.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            i + 1,
            csv_escape(&d.donor_name),
            csv_escape(d.food_type.label()),
            csv_escape(&d.quantity),
            csv_escape(&d.location),
            csv_escape(&d.contact),
            csv_escape(&expiry),
        ));
    }
    w
}

pub async fn dashboard(session: Session) -> impl IntoResponse {
    let ctx = session.lock().await;
    Html(pages::admin(ctx.theme, ctx.ledger.list()))
}

pub async fn summary(session: Session) -> impl IntoResponse {
    let total = session.lock().await.ledger.count();
    AxumJson(serde_json::json!({ "total_donations": total }))
}

pub async fn export_csv(session: Session) -> impl IntoResponse {
    let body = ledger_csv(session.lock().await.ledger.list());

    let mut resp = Response::new(Body::from(body));
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"donations.csv\""),
    );
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::models::FoodType;
    use chrono::NaiveDate;

    #[test]
    fn csv_quotes_fields_with_commas() {
        let records = vec![DonationRecord {
            donor_name: "Rao, Sons & Co".to_string(),
            food_type: FoodType::NonVegetarian,
            quantity: "10 \"family\" packs".to_string(),
            location: "Dock 4".to_string(),
            contact: "555-0111".to_string(),
            expiry: NaiveDate::from_ymd_opt(2026, 11, 1).expect("date"),
        }];
        let csv = ledger_csv(&records);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("index,donor,food_type,quantity,location,contact,expiry"));
        assert_eq!(
            lines.next(),
            Some("1,\"Rao, Sons & Co\",Non-Vegetarian,\"10 \"\"family\"\" packs\",Dock 4,555-0111,2026-11-01")
        );
    }
}
