use serde::{Deserialize, Serialize};

/// Sidebar entries available once logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    About,
    #[serde(rename = "analysis")]
    ImageAnalysis,
    Records,
}

impl View {
    pub const ALL: [View; 3] = [View::About, View::ImageAnalysis, View::Records];

    pub fn slug(self) -> &'static str {
        match self {
            View::About => "about",
            View::ImageAnalysis => "analysis",
            View::Records => "records",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::About => "About",
            View::ImageAnalysis => "Image Analysis",
            View::Records => "Patient Records",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }
}

/// Per-browser interactive state.
///
/// A username only exists inside `LoggedIn`, so "logged in" and
/// "has a current user" can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { username: String, view: View },
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn current_username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username, .. } => Some(username),
            Session::LoggedOut => None,
        }
    }

    pub fn view(&self) -> Option<View> {
        match self {
            Session::LoggedIn { view, .. } => Some(*view),
            Session::LoggedOut => None,
        }
    }

    /// LoggedOut/LoggedIn -> LoggedIn{default view}.
    pub fn log_in(&mut self, username: impl Into<String>) {
        *self = Session::LoggedIn {
            username: username.into(),
            view: View::default(),
        };
    }

    /// Returns false (and changes nothing) when logged out.
    pub fn select(&mut self, selected: View) -> bool {
        match self {
            Session::LoggedIn { view, .. } => {
                *view = selected;
                true
            }
            Session::LoggedOut => false,
        }
    }

    pub fn log_out(&mut self) {
        *self = Session::LoggedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_lands_on_about() {
        let mut s = Session::default();
        assert!(!s.is_logged_in());
        s.log_in("dr_ada");
        assert_eq!(s.current_username(), Some("dr_ada"));
        assert_eq!(s.view(), Some(View::About));
    }

    #[test]
    fn select_requires_login() {
        let mut s = Session::default();
        assert!(!s.select(View::Records));
        assert_eq!(s, Session::LoggedOut);

        s.log_in("dr_ada");
        assert!(s.select(View::Records));
        assert_eq!(s.view(), Some(View::Records));
    }

    #[test]
    fn logout_clears_username_from_any_view() {
        for view in View::ALL {
            let mut s = Session::default();
            s.log_in("dr_ada");
            s.select(view);
            s.log_out();
            assert_eq!(s.current_username(), None);
            assert_eq!(s.view(), None);
        }
    }

    #[test]
    fn slugs_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_slug(view.slug()), Some(view));
        }
        assert_eq!(View::from_slug("admin"), None);
        assert_eq!(View::from_slug("logout"), None);
    }

    #[test]
    fn serialized_form_is_tagged() {
        let mut s = Session::default();
        s.log_in("u");
        s.select(View::ImageAnalysis);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"state":"logged_in","username":"u","view":"analysis"}"#);
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
