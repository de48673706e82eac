pub mod analysis;
pub mod auth;
pub mod pages;
pub mod records;

use axum::response::Html;

use crate::db::PatientRecord;
use crate::router::AppState;
use crate::types::session::{Session, View};
use crate::views::{self, Notice, PageContext};

/// Render the page the session currently points at.
pub(crate) async fn render_page(
    state: &AppState,
    session: &Session,
    notice: Option<Notice>,
) -> Html<String> {
    let store = state.records.lock().await;
    let records: &[PatientRecord] = match (session.current_username(), session.view()) {
        (Some(user), Some(View::Records)) => store.records_for(user),
        _ => &[],
    };
    let ctx = PageContext {
        records,
        notice,
        about_image_url: state.about_image_url.as_deref(),
    };
    Html(views::render(session, &ctx))
}
