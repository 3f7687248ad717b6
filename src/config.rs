use axum::http::HeaderValue;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Longest idle window a session may be configured with: one week.
pub const MAX_SESSION_IDLE_MINUTES: i64 = 7 * 24 * 60;
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub production: bool,
    pub allowed_origins: Vec<HeaderValue>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub session_idle_minutes: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let env_mode = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let production = env_mode == "production";

        let host = match env::var("HOST") {
            Ok(raw) => IpAddr::from_str(raw.trim())
                .map_err(|e| anyhow::anyhow!("Invalid HOST '{}': {}", raw, e))?,
            Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port: u16 = parse_or("PORT", 8080);

        let allowed_origins = parse_origins(env::var("ALLOWED_ORIGINS").ok().as_deref());
        let allowed_origins = if allowed_origins.is_empty() {
            if production {
                anyhow::bail!("ALLOWED_ORIGINS must contain at least one valid origin in production");
            }
            vec![
                HeaderValue::from_static("http://localhost:8080"),
                HeaderValue::from_static("http://127.0.0.1:8080"),
            ]
        } else {
            allowed_origins
        };

        Ok(Config {
            bind_addr: SocketAddr::new(host, port),
            production,
            allowed_origins,
            rate_limit_per_second: parse_or("RATE_LIMIT_PER_SECOND", 1200),
            rate_limit_burst: parse_or("RATE_LIMIT_BURST", 2400),
            session_idle_minutes: bounded_idle_minutes(parse_or(
                "SESSION_IDLE_MINUTES",
                DEFAULT_SESSION_IDLE_MINUTES,
            )),
        })
    }

    /// Time for the limiter to refill one request slot, so that a steady
    /// `rate_limit_per_second` requests per second are let through.
    pub fn rate_limit_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.rate_limit_per_second.max(1))
    }
}

fn bounded_idle_minutes(minutes: i64) -> i64 {
    if (1..=MAX_SESSION_IDLE_MINUTES).contains(&minutes) {
        minutes
    } else {
        tracing::warn!(
            "Ignoring SESSION_IDLE_MINUTES={} (allowed 1..={}), using {}",
            minutes,
            MAX_SESSION_IDLE_MINUTES,
            DEFAULT_SESSION_IDLE_MINUTES
        );
        DEFAULT_SESSION_IDLE_MINUTES
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            production: false,
            allowed_origins: Vec::new(),
            rate_limit_per_second: 1200,
            rate_limit_burst: 2400,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring invalid {} value: {}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid ALLOWED_ORIGINS entry: {}", trimmed);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_skip_blank_entries() {
        let origins = parse_origins(Some("https://food.example, ,http://localhost:3000"));
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://food.example");
    }

    #[test]
    fn out_of_range_idle_minutes_fall_back_to_default() {
        assert_eq!(bounded_idle_minutes(30), 30);
        assert_eq!(bounded_idle_minutes(0), DEFAULT_SESSION_IDLE_MINUTES);
        assert_eq!(bounded_idle_minutes(-5), DEFAULT_SESSION_IDLE_MINUTES);
        assert_eq!(bounded_idle_minutes(i64::MAX / 2), DEFAULT_SESSION_IDLE_MINUTES);
    }

    #[test]
    fn rate_limit_period_refills_at_requested_rate() {
        let config = Config { rate_limit_per_second: 1200, ..Config::default() };
        assert_eq!(config.rate_limit_period(), Duration::from_nanos(833_333));
        let slow = Config { rate_limit_per_second: 0, ..Config::default() };
        assert_eq!(slow.rate_limit_period(), Duration::from_secs(1));
    }

    #[test]
    fn missing_origins_yield_empty_list() {
        assert!(parse_origins(None).is_empty());
    }
}
