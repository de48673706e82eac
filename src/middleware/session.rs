use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::debug;

use crate::router::AppState;
use crate::types::session::Session;

pub const SESSION_COOKIE: &str = "cervihope_session";
const SESSION_TTL_HOURS: i64 = 12;

/// The caller's session, decrypted from the private cookie.
///
/// A missing, undecryptable or unparsable cookie is treated as logged out.
pub struct SessionJar {
    pub session: Session,
    jar: PrivateCookieJar,
    secure: bool,
}

impl FromRequestParts<AppState> for SessionJar {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_request_parts(parts, state).await?;
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|c| {
                serde_json::from_str::<Session>(c.value())
                    .inspect_err(|e| debug!(error = %e, "discarding unreadable session cookie"))
                    .ok()
            })
            .unwrap_or_default();
        Ok(Self {
            session,
            jar,
            secure: state.cookie_secure,
        })
    }
}

impl SessionJar {
    /// Persist `session` back into the cookie jar. Logged out drops the cookie.
    pub fn commit(self, session: &Session) -> PrivateCookieJar {
        match session {
            Session::LoggedOut => self.jar.remove(clear_cookie(self.secure)),
            Session::LoggedIn { .. } => match serde_json::to_string(session) {
                Ok(value) => self.jar.add(build_cookie(value, self.secure)),
                Err(_) => self.jar.remove(clear_cookie(self.secure)),
            },
        }
    }
}

fn build_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(SESSION_TTL_HOURS))
        .build()
}

fn clear_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}
