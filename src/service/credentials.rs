use std::collections::HashMap;

use subtle::ConstantTimeEq;
use tracing::{info, warn};
use url::Url;

use crate::error::CerviError;
use crate::types::session::Session;

/// Username -> password map plus the prediction endpoint, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: HashMap<String, String>,
    endpoint_url: Url,
}

impl CredentialStore {
    pub fn new(users: HashMap<String, String>, endpoint_url: Url) -> Self {
        Self {
            users,
            endpoint_url,
        }
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| bool::from(stored.as_bytes().ct_eq(password.as_bytes())))
    }

    /// Log `session` in as `username`. On failure the session is left untouched.
    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), CerviError> {
        if !self.verify(username, password) {
            warn!(username = %username, "login rejected");
            return Err(CerviError::InvalidCredentials);
        }
        session.log_in(username);
        info!(username = %username, "login succeeded");
        Ok(())
    }
}
