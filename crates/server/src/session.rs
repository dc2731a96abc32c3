//! Session cookie resolution and the manager guard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use engine::Caller;

use crate::{ServerError, server::ServerState};

pub const SESSION_COOKIE: &str = "hotels_session";

pub(crate) fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Resolve the session cookie into a [`Caller`] extension for every request.
pub(crate) async fn resolve_caller(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = session_token(&jar);
    let caller = state.engine.caller(token.as_deref()).await?;
    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Let authenticated managers with a city through, carrying their
/// [`engine::ManagerContext`]. Everyone else is sent to `/`.
pub(crate) async fn require_manager(mut request: Request, next: Next) -> Response {
    let context = request
        .extensions()
        .get::<Caller>()
        .and_then(Caller::manager_context);
    let Some(context) = context else {
        return Redirect::to("/").into_response();
    };
    request.extensions_mut().insert(context);
    next.run(request).await
}
