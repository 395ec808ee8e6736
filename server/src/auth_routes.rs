use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use cookie::{Cookie, SameSite};
use types::{
    SESSION_COOKIE_NAME,
    auth::{LoginError, LoginForm},
};

use crate::{AppState, session_token};

pub fn auth_router(state: &'static AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .with_state(state)
}

fn login_redirect(error: LoginError) -> Response {
    Redirect::to(&format!("/login?error={}", error.code())).into_response()
}

fn with_cookie(mut response: Response, cookie: Cookie<'_>) -> Response {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Err(error) => tracing::error!(?error, "session cookie is not a valid header value"),
    }
    response
}

async fn login(State(state): State<&'static AppState>, Form(form): Form<LoginForm>) -> Response {
    if form.validate().is_err() {
        return login_redirect(LoginError::InvalidInput);
    }

    let email = form.normalized_email();
    let session = match state.directory.authenticate(&email, &form.password).await {
        Ok(session) => session,
        Err(error) => {
            tracing::info!(%email, %error, "sign-in refused");
            return login_redirect(error);
        }
    };

    let home = session.role.home_path();
    let user_id = session.user_id.clone();
    let token = match state.sessions.create(session).await {
        Ok(token) => token,
        Err(error) => {
            tracing::error!(?error, "failed to create session");
            return login_redirect(LoginError::InvalidCredentials);
        }
    };
    tracing::info!(user = %user_id, "signed in");

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax)
        .build();

    with_cookie(Redirect::to(home).into_response(), cookie)
}

async fn logout(State(state): State<&'static AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.delete(&token).await;
    }

    // Clear the session cookie
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    with_cookie(Redirect::to("/login").into_response(), cookie)
}
