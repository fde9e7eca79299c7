#![cfg(feature = "web")]

use crate::app::AppState;
use axum::{
    Form,
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};
use thiserror::Error;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "session";

/// Upper bound on a session lifetime (ten years)
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Credential data for login and registration
///
/// Used to receive login and registration form data from the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserCredentials {
    /// Username for login/registration
    pub username: String,

    /// Password in plaintext
    pub password: String,
}

/// Flash text carried through redirects as query parameters
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// User session data
///
/// Represents an authenticated user session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Username of the authenticated user
    pub user_id: String,

    /// Time when the session expires
    pub expires_at: SystemTime,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password cannot be empty")]
    EmptyCredentials,

    #[error("Username already exists")]
    UsernameTaken,
}

/// In-memory accounts and sessions
///
/// Nothing here survives a restart; accounts are seeded from the
/// configuration at startup and extended through registration.
#[derive(Debug)]
pub struct Accounts {
    users: RwLock<HashMap<String, String>>,
    sessions: RwLock<HashMap<String, Session>>,
    session_ttl: Duration,
}

impl Accounts {
    /// Lifetimes above `MAX_SESSION_TTL` are clamped.
    pub fn new(session_ttl: Duration) -> Self {
        Accounts {
            users: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            session_ttl: session_ttl.min(MAX_SESSION_TTL),
        }
    }

    /// Register a new user
    ///
    /// # Errors
    /// * `AuthError::EmptyCredentials` if either field is empty
    /// * `AuthError::UsernameTaken` if the username is already registered
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(username.to_string(), password.to_string());

        Ok(())
    }

    /// Checks whether the username exists and the password matches.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(username).is_some_and(|stored| stored == password)
    }

    /// Create a new user session
    ///
    /// Expired sessions are swept out while the map is locked.
    ///
    /// # Returns
    /// * `String` - A unique session ID
    pub fn create_session(&self, username: &str) -> String {
        let now = SystemTime::now();
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            user_id: username.to_string(),
            expires_at: now.checked_add(self.session_ttl).unwrap_or(now),
        };

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session_id.clone(), session);

        session_id
    }

    /// Validate a session
    ///
    /// # Returns
    /// * `Option<String>` - The username for the session if valid, None otherwise
    pub fn validate_session(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);

        sessions
            .get(session_id)
            .filter(|session| session.expires_at > SystemTime::now())
            .map(|session| session.user_id.clone())
    }

    /// Drop a session; unknown ids are ignored.
    pub fn end_session(&self, session_id: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(session_id);
    }

    /// Number of sessions currently held, expired ones included.
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn session_user(&self, jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| self.validate_session(cookie.value()))
    }
}

fn redirect_with(path: &str, key: &str, text: &str) -> Redirect {
    Redirect::to(&format!("{}?{}={}", path, key, urlencoding::encode(text)))
}

/// Serve the login page, or skip straight to the dashboard for a live session
pub async fn serve_login_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(flash): Query<Flash>,
) -> Response {
    if state.accounts.session_user(&jar).is_some() {
        return Redirect::to("/dashboard/").into_response();
    }
    state.render_page("login", &flash).into_response()
}

/// Serve the registration page
pub async fn serve_register_page(
    State(state): State<Arc<AppState>>,
    Query(flash): Query<Flash>,
) -> Response {
    state.render_page("register", &flash).into_response()
}

/// Handle user login requests
///
/// Valid credentials open a session and redirect to the dashboard;
/// anything else returns to the login page with an error.
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(credentials): Form<UserCredentials>,
) -> Response {
    if !state
        .accounts
        .verify(&credentials.username, &credentials.password)
    {
        warn!("Failed login for '{}'", credentials.username);
        return redirect_with("/", "error", "Invalid credentials").into_response();
    }

    info!("User '{}' logged in", credentials.username);
    let session_id = state.accounts.create_session(&credentials.username);
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true);

    (jar.add(cookie), Redirect::to("/dashboard/")).into_response()
}

/// Handle user registration
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<UserCredentials>,
) -> Redirect {
    match state
        .accounts
        .register(&credentials.username, &credentials.password)
    {
        Ok(()) => {
            info!("Registered user '{}'", credentials.username);
            redirect_with("/", "message", "Registration successful. Please log in.")
        }
        Err(e) => redirect_with("/register", "error", &e.to_string()),
    }
}

/// Handle user logout
///
/// Ends the session, clears the cookie and redirects to the login page.
pub async fn handle_logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.accounts.end_session(cookie.value());
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/"),
    )
}

/// Authentication middleware
///
/// Lets requests with a valid session through, tagging them with the
/// username; everything else is redirected to the login page.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match state.accounts.session_user(&jar) {
        Some(username) => {
            request.extensions_mut().insert(username);
            next.run(request).await
        }
        None => Redirect::to("/").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_verify() {
        let accounts = Accounts::new(Duration::from_secs(60));
        accounts.register("aasritha", "1234").unwrap();

        assert!(accounts.verify("aasritha", "1234"));
        assert!(!accounts.verify("aasritha", "4321"));
        assert!(!accounts.verify("nobody", "1234"));
        assert_eq!(accounts.register("aasritha", "other"), Err(AuthError::UsernameTaken));
        assert_eq!(accounts.register("", "pw"), Err(AuthError::EmptyCredentials));
    }

    #[test]
    fn sessions_expire_and_end() {
        let accounts = Accounts::new(Duration::from_secs(60));
        let id = accounts.create_session("aasritha");
        assert_eq!(accounts.validate_session(&id).as_deref(), Some("aasritha"));

        accounts.end_session(&id);
        assert_eq!(accounts.validate_session(&id), None);

        let stale = Accounts::new(Duration::ZERO);
        let id = stale.create_session("aasritha");
        assert_eq!(stale.validate_session(&id), None);
    }

    #[test]
    fn expired_sessions_are_swept_on_login() {
        let stale = Accounts::new(Duration::ZERO);
        for _ in 0..5 {
            stale.create_session("aasritha");
        }
        assert_eq!(stale.session_count(), 1);

        let live = Accounts::new(Duration::from_secs(60));
        live.create_session("aasritha");
        live.create_session("guest");
        assert_eq!(live.session_count(), 2);
    }

    #[test]
    fn huge_lifetime_is_clamped() {
        let accounts = Accounts::new(Duration::MAX);
        let id = accounts.create_session("aasritha");
        assert_eq!(accounts.validate_session(&id).as_deref(), Some("aasritha"));
    }
}
