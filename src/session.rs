use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::AppError;
use crate::ledger::SessionLedger;
use crate::theme::Theme;
use crate::AppState;

pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Everything one browser session owns. Handlers receive it through the
/// [`Session`] extractor instead of reaching for shared globals.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub ledger: SessionLedger,
    pub theme: Theme,
}

struct Entry {
    context: Arc<Mutex<SessionContext>>,
    last_seen: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    context: Arc<Mutex<SessionContext>>,
}

impl Session {
    pub async fn lock(&self) -> MutexGuard<'_, SessionContext> {
        self.context.lock().await
    }
}

#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_minutes: i64) -> Self {
        SessionStore {
            entries: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout: Duration::try_minutes(idle_minutes.max(1)).unwrap_or(Duration::MAX),
        }
    }

    /// Returns the live session for `id`, or a fresh one. The flag is true
    /// when a new session was created and the client needs a cookie.
    pub async fn resolve(&self, id: Option<Uuid>) -> (Session, bool) {
        self.resolve_at(id, Utc::now()).await
    }

    async fn resolve_at(&self, id: Option<Uuid>, now: DateTime<Utc>) -> (Session, bool) {
        let mut entries = self.entries.lock().await;

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(&id) {
                if now - entry.last_seen <= self.idle_timeout {
                    entry.last_seen = now;
                    return (Session { id, context: entry.context.clone() }, false);
                }
            }
        }

        let before = entries.len();
        let idle_timeout = self.idle_timeout;
        entries.retain(|_, entry| now - entry.last_seen <= idle_timeout);
        let pruned = before - entries.len();
        if pruned > 0 {
            tracing::info!("Dropped {} idle session(s)", pruned);
        }

        let id = Uuid::new_v4();
        let context = Arc::new(Mutex::new(SessionContext::default()));
        entries.insert(id, Entry { context: context.clone(), last_seen: now });
        tracing::debug!("Started session {}", id);
        (Session { id, context }, true)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync + 'static,
{
    type Rejection = AppError;

    fn from_request_parts(parts: &mut Parts, _state: &S) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = parts.extensions.get::<Session>().cloned();
        async move { session.ok_or(AppError::SessionUnavailable) }
    }
}

/// Resolves the caller's session before any handler runs and issues a
/// cookie when a new one had to be created.
pub async fn attach_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let cookie_id = session_id_from_headers(req.headers());
    let (session, created) = state.sessions.resolve(cookie_id).await;
    let id = session.id;
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;
    if created {
        match HeaderValue::from_str(&build_session_cookie(id, state.production)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to encode session cookie: {}", e),
        }
    }
    response
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookie_header = headers.get(header::COOKIE).and_then(|h| h.to_str().ok())?;
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some((k, v)) = cookie.split_once('=') {
            if k == SESSION_COOKIE_NAME {
                return Uuid::parse_str(v.trim()).ok();
            }
        }
    }
    None
}

fn build_session_cookie(id: Uuid, secure: bool) -> String {
    let mut cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE_NAME, id);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_cookie_creates_new_session() {
        let store = SessionStore::new(60);
        let (session, created) = store.resolve(Some(Uuid::new_v4())).await;
        assert!(created);
        let (again, created_again) = store.resolve(Some(session.id)).await;
        assert!(!created_again);
        assert_eq!(again.id, session.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_do_not_share_ledgers() {
        let store = SessionStore::new(60);
        let (a, _) = store.resolve(None).await;
        let (b, _) = store.resolve(None).await;
        a.lock().await.theme = Theme::Dark;
        assert_eq!(b.lock().await.theme, Theme::Light);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn idle_sessions_expire_and_are_pruned() {
        let store = SessionStore::new(5);
        let start = Utc::now();
        let (old, _) = store.resolve_at(None, start).await;
        let later = start + Duration::minutes(6);
        let (fresh, created) = store.resolve_at(Some(old.id), later).await;
        assert!(created);
        assert_ne!(fresh.id, old.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn oversized_idle_timeout_does_not_panic() {
        let store = SessionStore::new(i64::MAX / 2);
        let (session, created) = store.resolve(None).await;
        assert!(created);
        let (_, created_again) = store.resolve(Some(session.id)).await;
        assert!(!created_again);
    }

    #[test]
    fn cookie_parsing_finds_session_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        let raw = format!("theme=dark; {}={}; other=1", SESSION_COOKIE_NAME, id);
        headers.insert(header::COOKIE, HeaderValue::from_str(&raw).expect("header"));
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn production_cookie_is_secure() {
        let id = Uuid::new_v4();
        assert!(build_session_cookie(id, true).ends_with("; Secure"));
        assert!(!build_session_cookie(id, false).contains("Secure"));
    }
}
