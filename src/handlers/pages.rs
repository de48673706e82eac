use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use super::render_page;
use crate::middleware::session::SessionJar;
use crate::router::AppState;
use crate::types::session::View;

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub view: String,
}

/// GET / -> login when logged out, otherwise the selected view.
pub async fn index(State(state): State<AppState>, jar: SessionJar) -> Response {
    let session = jar.session.clone();
    let page = render_page(&state, &session, None).await;
    (jar.commit(&session), page).into_response()
}

/// POST /navigate -> switch the sidebar view, then show it. `logout` ends
/// the session instead of selecting a view.
pub async fn navigate(jar: SessionJar, Form(form): Form<NavigateForm>) -> Response {
    let mut session = jar.session.clone();
    match (form.view.as_str(), View::from_slug(&form.view)) {
        ("logout", _) => {
            if let Some(user) = session.current_username() {
                info!(username = %user, "logged out");
            }
            session.log_out();
        }
        (_, Some(view)) => {
            if session.select(view) {
                debug!(view = view.slug(), "view selected");
            }
        }
        (other, None) => debug!(view = %other, "ignoring unknown view"),
    }
    (jar.commit(&session), Redirect::to("/")).into_response()
}
