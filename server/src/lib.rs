mod auth_routes;
mod config;
mod directory;
mod sessions;

use std::sync::OnceLock;

use axum::Router;
use axum::http::HeaderMap;
use dioxus::fullstack::FullstackContext;
use jiff::SignedDuration;
use tracing_subscriber::EnvFilter;
use types::{Result, SESSION_COOKIE_NAME, UserSession, err};

use crate::auth_routes::auth_router;
pub use crate::config::Config;
pub use crate::directory::Directory;
pub use crate::sessions::SessionStore;

pub struct AppState {
    pub config: Config,
    pub directory: Directory,
    pub sessions: SessionStore,
}

impl AppState {
    /// The session behind `token`, provided its user may still sign in.
    ///
    /// A blocked or suspended user loses every session at once.
    pub async fn session(&self, token: &str) -> Result<UserSession> {
        let session = self.sessions.find(token).await?;
        if self.directory.is_disabled(&session.user_id).await {
            self.sessions.revoke_user(&session.user_id).await;
            return Err(err!("account '{}' is disabled", session.email));
        }
        Ok(session)
    }
}

static STATE: OnceLock<AppState> = OnceLock::new();

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // The dev server may already have installed a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration, build the directory and return the auth routes.
pub async fn init() -> Result<Router> {
    let config = Config::load()?;
    let directory = Directory::from_config(&config).await?;
    let sessions = SessionStore::new(
        config.session_secret.clone(),
        SignedDuration::from_hours(i64::from(config.session_ttl_hours)),
    );

    let state = STATE.get_or_init(|| AppState {
        config,
        directory,
        sessions,
    });
    tracing::info!("server state initialised");

    Ok(auth_router(state))
}

pub fn state() -> Result<&'static AppState> {
    STATE.get().ok_or_else(|| err!("server state is not initialised"))
}

/// The session token from the request's cookie header, if any.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    let prefix = format!("{}=", SESSION_COOKIE_NAME);

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(&prefix))
        .filter(|token| !token.is_empty())
        .map(String::from)
}

/// Extract the user session from the request cookie.
pub async fn get_session_from_cookie() -> Result<UserSession> {
    let headers: HeaderMap = FullstackContext::extract()
        .await
        .map_err(|e| err!("failed to read request headers: {}", e))?;

    let token = session_token(&headers).ok_or_else(|| err!("session cookie not found"))?;
    state()?.session(&token).await
}

/// Require an authenticated admin session, returning the session if valid.
pub async fn require_admin_session() -> Result<UserSession> {
    let session = get_session_from_cookie().await?;

    if !session.is_admin() {
        return Err(err!(
            "access denied: '{}' is not an administrator",
            session.email
        ));
    }

    Ok(session)
}
