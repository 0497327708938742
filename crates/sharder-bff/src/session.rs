use std::sync::Arc;

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use uuid::Uuid;

use sharder_common::CredentialStore;

pub const SESSION_COOKIE: &str = "sharder_session";

/// Upper bound on remembered sessions. Only successful logins add entries.
pub const MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, Default)]
struct Session {
    is_logged: bool,
}

/// Per-browser login state, keyed by the session cookie.
///
/// Sessions live for the lifetime of the process. There is no logout, so a
/// session only ever moves from logged out to logged in. Once `limit`
/// sessions are held, a new login evicts an arbitrary existing one.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    limit: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limit(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            limit: limit.max(1),
        }
    }

    pub fn state(&self, token: Option<&str>) -> SessionState {
        let logged = token
            .and_then(|t| self.sessions.get(t))
            .is_some_and(|s| s.is_logged);
        if logged {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    /// Checks the submitted pair and, on a match, marks the session logged in.
    ///
    /// Returns the token the browser should carry from now on: the current
    /// one when the server already knows it, a fresh one otherwise. Tokens
    /// are never adopted from the client. A mismatch leaves every session
    /// untouched.
    pub fn login(
        &self,
        credentials: &CredentialStore,
        token: Option<&str>,
        username: &str,
        password: &str,
    ) -> Option<String> {
        if !credentials.contains(username, password) {
            return None;
        }

        if let Some(token) = token {
            if let Some(mut session) = self.sessions.get_mut(token) {
                session.is_logged = true;
                return Some(token.to_string());
            }
        }

        self.evict_to_fit();
        let token = Uuid::new_v4().to_string();
        self.sessions
            .insert(token.clone(), Session { is_logged: true });
        Some(token)
    }

    fn evict_to_fit(&self) {
        while self.sessions.len() >= self.limit {
            // The iterator guard must drop before `remove` locks the shard.
            let victim = self.sessions.iter().next().map(|e| e.key().clone());
            let Some(victim) = victim else { break };
            self.sessions.remove(&victim);
            tracing::debug!(limit = self.limit, "session limit reached, evicted one session");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Reads the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn creds() -> CredentialStore {
        CredentialStore::parse("alice:s3cret,bob:hunter2").unwrap()
    }

    #[test]
    fn test_unknown_credentials_stay_logged_out() {
        let store = SessionStore::new();
        assert_eq!(store.state(None), SessionState::LoggedOut);

        assert!(store.login(&creds(), None, "alice", "wrong").is_none());
        assert!(store.login(&creds(), None, "mallory", "s3cret").is_none());
        assert_eq!(store.len(), 0);
        assert_eq!(store.state(None), SessionState::LoggedOut);
    }

    #[test]
    fn test_login_is_sticky() {
        let store = SessionStore::new();
        let token = store.login(&creds(), None, "alice", "s3cret").unwrap();
        assert_eq!(store.state(Some(&token)), SessionState::LoggedIn);

        // later passes with the same context
        assert_eq!(store.state(Some(&token)), SessionState::LoggedIn);

        // a bad submission does not log the session out
        assert!(store.login(&creds(), Some(&token), "alice", "nope").is_none());
        assert_eq!(store.state(Some(&token)), SessionState::LoggedIn);
    }

    #[test]
    fn test_relogin_keeps_known_token() {
        let store = SessionStore::new();
        let token = store.login(&creds(), None, "alice", "s3cret").unwrap();
        let again = store.login(&creds(), Some(&token), "bob", "hunter2").unwrap();
        assert_eq!(token, again);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_client_chosen_token_is_replaced() {
        let store = SessionStore::new();
        let token = store
            .login(&creds(), Some("attacker-chosen"), "alice", "s3cret")
            .unwrap();
        assert_ne!(token, "attacker-chosen");
        assert_eq!(store.state(Some("attacker-chosen")), SessionState::LoggedOut);
        assert_eq!(store.state(Some(&token)), SessionState::LoggedIn);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let token = store.login(&creds(), None, "alice", "s3cret").unwrap();
        assert_eq!(store.state(Some(&token)), SessionState::LoggedIn);
        assert_eq!(store.state(Some("other-tab")), SessionState::LoggedOut);
    }

    #[test]
    fn test_session_count_is_capped() {
        let store = SessionStore::with_limit(2);
        let tokens: Vec<String> = (0..5)
            .map(|_| store.login(&creds(), None, "alice", "s3cret").unwrap())
            .collect();
        assert_eq!(store.len(), 2);

        // the newest login always survives
        assert_eq!(store.state(Some(&tokens[4])), SessionState::LoggedIn);
        let live = tokens
            .iter()
            .filter(|t| store.state(Some(t.as_str())) == SessionState::LoggedIn)
            .count();
        assert_eq!(live, 2);
    }

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sharder_session=abc-123; other=1"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sharder_session="));
        assert_eq!(session_token(&headers), None);

        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("sharder_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }
}
