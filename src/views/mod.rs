//! Server-rendered HTML. Pages are plain strings dropped into the layout
//! shell; every user-supplied value goes through [`escape`] first.

pub mod pages;

use crate::theme::Theme;

const LAYOUT: &str = include_str!("../../static/layout.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Donate,
    Donations,
    Request,
    Admin,
}

impl Page {
    pub const NAV: [Page; 5] = [Page::Home, Page::Donate, Page::Donations, Page::Request, Page::Admin];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Donate => "/donate",
            Page::Donations => "/donations",
            Page::Request => "/request",
            Page::Admin => "/admin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Donate => "Donate Food",
            Page::Donations => "View Donations",
            Page::Request => "Recipient Request",
            Page::Admin => "Admin Dashboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
    Info(String),
}

impl Flash {
    pub fn render(&self) -> String {
        let (class, text) = match self {
            Flash::Success(t) => ("success", t),
            Flash::Error(t) => ("error", t),
            Flash::Info(t) => ("info", t),
        };
        format!("<div class=\"{}\" role=\"status\">{}</div>\n", class, escape(text))
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn sidebar(theme: Theme, active: Option<Page>) -> String {
    let mut html = String::new();
    html.push_str("<h2>Theme Settings</h2>\n<form method=\"post\" action=\"/theme\">\n");
    for option in [Theme::Light, Theme::Dark] {
        let checked = if option == theme { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"theme\" value=\"{}\"{}> {}</label><br>\n",
            option.as_str(),
            checked,
            option.label()
        ));
    }
    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n<h2>Navigation</h2>\n<nav><ul>\n");
    for page in Page::NAV {
        let current = if Some(page) == active { " aria-current=\"page\"" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}\"{}>{}</a></li>\n",
            page.path(),
            current,
            page.title()
        ));
    }
    html.push_str("</ul></nav>\n");
    html
}

/// Wraps `body` in the layout shell for the given theme.
pub fn layout(title: &str, theme: Theme, active: Option<Page>, body: &str) -> String {
    LAYOUT
        .replace("{{theme_css}}", &theme.stylesheet())
        .replace("{{theme}}", theme.as_str())
        .replace("{{sidebar}}", &sidebar(theme, active))
        .replace("{{title}}", &escape(title))
        .replace("{{body}}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
    }

    #[test]
    fn layout_marks_active_page_and_theme() {
        let html = layout("Admin Dashboard", Theme::Dark, Some(Page::Admin), "<p>body</p>");
        assert!(html.contains("<a href=\"/admin\" aria-current=\"page\">Admin Dashboard</a>"));
        assert!(html.contains("value=\"dark\" checked"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("{{"));
    }
}
