use chrono::NaiveDate;

use super::{escape, layout, Flash, Page};
use crate::ledger::models::{DonationForm, DonationRecord, FoodType, RequestSubmission, EXPIRY_FORMAT};
use crate::theme::Theme;

const CLOSING_QUOTE: &str = "Together, we can end hunger one meal at a time.";

fn quote(text: &str) -> String {
    format!("<p class=\"quote\">\"{}\"</p>\n", escape(text))
}

fn flash_html(flash: Option<&Flash>) -> String {
    flash.map(Flash::render).unwrap_or_default()
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label><br>\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\"></p>\n",
        name = name,
        label = escape(label),
        value = escape(value),
    )
}

pub fn home(theme: Theme) -> String {
    let body = format!(
        "<h2>Welcome to Food Redistribution Platform</h2>\n\
         <p>This platform helps connect <strong>donors</strong> who have extra food with \
         <strong>recipients</strong> who need it. Together, we can reduce food wastage and fight hunger.</p>\n\
         {}",
        quote("Sharing food is sharing love."),
    );
    layout(Page::Home.title(), theme, Some(Page::Home), &body)
}

/// Blank donation form with the expiry date preset to `today`.
pub fn blank_donation_form(today: NaiveDate) -> DonationForm {
    DonationForm {
        food_type: FoodType::Vegetarian.label().to_string(),
        expiry: today.format(EXPIRY_FORMAT).to_string(),
        ..DonationForm::default()
    }
}

pub fn donate(theme: Theme, form: &DonationForm, flash: Option<&Flash>) -> String {
    let mut body = String::from("<h2>Donate Surplus Food</h2>\n");
    body.push_str(&flash_html(flash));
    body.push_str("<form method=\"post\" action=\"/donate\">\n");
    body.push_str(&text_input("donor_name", "Your Name / Organization", &form.donor_name));

    body.push_str("<p><label for=\"food_type\">Food Type</label><br><select id=\"food_type\" name=\"food_type\">\n");
    for option in FoodType::ALL {
        let selected = if form.food_type.trim() == option.label() { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{label}\"{selected}>{label}</option>\n",
            label = option.label(),
            selected = selected
        ));
    }
    body.push_str("</select></p>\n");

    body.push_str(&text_input("quantity", "Food Quantity (e.g., 10 plates, 5kg rice)", &form.quantity));
    body.push_str(&text_input("location", "Pickup Location", &form.location));
    body.push_str(&text_input("contact", "Contact Number", &form.contact));
    body.push_str(&format!(
        "<p><label for=\"expiry\">Food Expiry / Safe Until Date</label><br>\
         <input type=\"date\" id=\"expiry\" name=\"expiry\" value=\"{}\"></p>\n",
        escape(&form.expiry)
    ));
    body.push_str("<button type=\"submit\">Submit Donation</button>\n</form>\n");
    layout(Page::Donate.title(), theme, Some(Page::Donate), &body)
}

pub fn donations(theme: Theme, records: &[DonationRecord]) -> String {
    let mut body = String::from("<h2>Available Food Donations</h2>\n");
    if records.is_empty() {
        body.push_str(&Flash::Info("No donations available yet. Please check back later.".to_string()).render());
    }
    for (i, d) in records.iter().enumerate() {
        body.push_str(&format!(
            "<details>\n<summary>Donation #{} - {}</summary>\n<ul>\n\
             <li><strong>Type:</strong> {}</li>\n\
             <li><strong>Quantity:</strong> {}</li>\n\
             <li><strong>Location:</strong> {}</li>\n\
             <li><strong>Contact:</strong> {}</li>\n\
             <li><strong>Expiry:</strong> {}</li>\n</ul>\n</details>\n",
            i + 1,
            escape(&d.donor_name),
            d.food_type,
            escape(&d.quantity),
            escape(&d.location),
            escape(&d.contact),
            d.expiry.format(EXPIRY_FORMAT),
        ));
    }
    layout(Page::Donations.title(), theme, Some(Page::Donations), &body)
}

pub fn request(theme: Theme, submission: &RequestSubmission, flash: Option<&Flash>) -> String {
    let mut body = String::from("<h2>Recipient Food Request</h2>\n");
    body.push_str(&flash_html(flash));
    body.push_str("<form method=\"post\" action=\"/request\">\n");
    body.push_str(&text_input("recipient_name", "Recipient Name / Organization", &submission.recipient_name));
    body.push_str(&format!(
        "<p><label for=\"need\">Describe your food requirement</label><br>\
         <textarea id=\"need\" name=\"need\" rows=\"4\">{}</textarea></p>\n",
        escape(&submission.need)
    ));
    body.push_str(&text_input("phone", "Contact Number", &submission.phone));
    body.push_str("<button type=\"submit\">Send Request</button>\n</form>\n");
    layout(Page::Request.title(), theme, Some(Page::Request), &body)
}

pub fn admin(theme: Theme, records: &[DonationRecord]) -> String {
    let mut body = format!(
        "<h2>Admin Dashboard</h2>\n<p>Monitor all food donations and requests in one place.</p>\n\
         <div class=\"metric-block\"><div>Total Donations</div><div class=\"metric\" id=\"total-donations\">{}</div></div>\n",
        records.len()
    );
    if !records.is_empty() {
        body.push_str("<h3>Donation Records:</h3>\n<ol>\n");
        for d in records {
            body.push_str(&format!(
                "<li><strong>{}</strong> donated {} ({}) from {}, {}</li>\n",
                escape(&d.donor_name),
                escape(&d.quantity),
                d.food_type,
                escape(&d.location),
                escape(&d.contact),
            ));
        }
        body.push_str("</ol>\n<p><a href=\"/admin/export.csv\">Download CSV</a></p>\n");
    }
    body.push_str(&quote(CLOSING_QUOTE));
    layout(Page::Admin.title(), theme, Some(Page::Admin), &body)
}

pub fn not_found(theme: Theme, path: &str) -> String {
    let body = format!(
        "<h2>Page not found</h2>\n<p>Nothing lives at <code>{}</code>. Pick a page from the navigation.</p>\n",
        escape(path)
    );
    layout("Not Found", theme, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(donor: &str) -> DonationRecord {
        DonationRecord {
            donor_name: donor.to_string(),
            food_type: FoodType::Both,
            quantity: "20 meals".to_string(),
            location: "Depot <B>".to_string(),
            contact: "555-0100".to_string(),
            expiry: NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
        }
    }

    #[test]
    fn empty_donation_list_shows_info_banner() {
        let html = donations(Theme::Light, &[]);
        assert!(html.contains("No donations available yet. Please check back later."));
    }

    #[test]
    fn donation_list_is_numbered_from_one_and_escaped() {
        let html = donations(Theme::Light, &[record("Ana"), record("Bo")]);
        assert!(html.contains("Donation #1 - Ana"));
        assert!(html.contains("Donation #2 - Bo"));
        assert!(html.contains("Depot &lt;B&gt;"));
    }

    #[test]
    fn admin_metric_counts_records() {
        let html = admin(Theme::Dark, &[record("Ana")]);
        assert!(html.contains("<div class=\"metric\" id=\"total-donations\">1</div>"));
        assert!(html.contains("<strong>Ana</strong> donated 20 meals (Both) from Depot &lt;B&gt;, 555-0100"));
    }

    #[test]
    fn blank_form_defaults_expiry_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        let html = donate(Theme::Light, &blank_donation_form(today), None);
        assert!(html.contains("value=\"2026-10-16\""));
        assert!(html.contains("<option value=\"Vegetarian\" selected>"));
    }
}
