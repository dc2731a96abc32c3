//! Signup, login and logout.

use api_types::user::{LoginForm, SignupForm};
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use engine::{Caller, Role, SignupCmd};

use crate::{
    ServerError,
    server::ServerState,
    session::{removal_cookie, session_cookie, session_token},
};

pub async fn signup(
    State(state): State<ServerState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, ServerError> {
    let cmd = SignupCmd::new(form.username, form.password1, form.city)
        .email(form.email)
        .confirmation(form.password2);
    state.engine.signup(cmd).await?;
    Ok(Redirect::to("/login"))
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServerError> {
    let (user, session) = state.engine.login(&form.username, &form.password).await?;
    let target = match Caller::Authenticated(user).role() {
        Role::Superuser => "/admin/",
        Role::Manager | Role::Anonymous => "/manager/hotels",
    };
    let jar = jar.add(session_cookie(session.token));
    Ok((jar, Redirect::to(target)).into_response())
}

pub async fn logout(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<Response, ServerError> {
    if let Some(token) = session_token(&jar) {
        state.engine.logout(&token).await?;
    }
    let jar = jar.remove(removal_cookie());
    Ok((jar, Redirect::to("/")).into_response())
}
