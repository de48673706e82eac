use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use super::render_page;
use crate::middleware::session::SessionJar;
use crate::router::AppState;
use crate::views::Notice;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login -> check credentials and land on the default view.
pub async fn login(
    State(state): State<AppState>,
    jar: SessionJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut session = jar.session.clone();
    let notice = match state
        .credentials
        .login(&mut session, &form.username, &form.password)
    {
        Ok(()) => {
            state.records.lock().await.ensure_user(&form.username);
            Notice::Success("Login successful!".to_string())
        }
        Err(err) => Notice::Error(err.user_message()),
    };

    let page = render_page(&state, &session, Some(notice)).await;
    (jar.commit(&session), page).into_response()
}

/// POST /logout -> back to the login view from wherever the session was.
pub async fn logout(jar: SessionJar) -> Response {
    let mut session = jar.session.clone();
    if let Some(user) = session.current_username() {
        info!(username = %user, "logged out");
    }
    session.log_out();
    (jar.commit(&session), Redirect::to("/")).into_response()
}
