use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub button: &'static str,
    pub button_hover: &'static str,
    pub quote: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#f8fff9",
    text: "#0b6e4f",
    button: "#0b6e4f",
    button_hover: "#10a56d",
    quote: "#2e8b57",
};

const DARK: Palette = Palette {
    background: "#1a1a1a",
    text: "#c9ffd7",
    button: "#10a56d",
    button_hover: "#0b6e4f",
    quote: "#91ffb3",
};

impl Theme {
    pub fn parse(input: &str) -> Option<Theme> {
        match input.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light Theme",
            Theme::Dark => "Dark Theme",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn stylesheet(&self) -> String {
        let p = self.palette();
        format!(
            "body {{ background-color: {bg}; color: {text}; font-family: sans-serif; margin: 0; display: flex; }}\n\
             .sidebar {{ width: 240px; padding: 20px; border-right: 1px solid {button}; }}\n\
             .content {{ flex: 1; padding: 20px 40px; }}\n\
             .main-title {{ color: {text}; text-align: center; font-size: 42px; font-weight: bold; margin-top: 20px; }}\n\
             .subtext {{ color: {text}; text-align: center; font-size: 18px; margin-bottom: 30px; }}\n\
             button {{ background-color: {button}; color: white; font-weight: 600; border-radius: 10px; padding: 10px 25px; border: none; }}\n\
             button:hover {{ background-color: {hover}; color: white; }}\n\
             .caption {{ text-align: center; font-size: 14px; opacity: 0.8; }}\n\
             .quote {{ font-style: italic; text-align: center; color: {quote}; margin-top: 20px; }}\n\
             .success {{ border-left: 4px solid {button}; padding: 8px 12px; }}\n\
             .error {{ border-left: 4px solid #c0392b; padding: 8px 12px; }}\n\
             .info {{ border-left: 4px solid {quote}; padding: 8px 12px; }}\n\
             .metric {{ font-size: 36px; font-weight: bold; }}",
            bg = p.background,
            text = p.text,
            button = p.button,
            hover = p.button_hover,
            quote = p.quote,
        )
    }
}
