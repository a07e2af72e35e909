//! Session state for the dashboard.
//!
//! The current insight is the only mutable state in the program. It lives in
//! a [`Session`] whose transitions form a small explicit set:
//! `Idle → Loading → { Ready, NotFound, Failed }`, with `reset` returning to
//! `Idle`. The loading state doubles as the serialization guard: a new fetch
//! is refused while one is outstanding.

use crate::client::{self, FetchError};
use crate::insight::normalize::normalize_insight;
use crate::insight::UserInsight;

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready(Box<UserInsight>),
    NotFound {
        user_id: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn insight(&self) -> Option<&UserInsight> {
        match &self.state {
            SessionState::Ready(insight) => Some(insight),
            _ => None,
        }
    }

    /// Enters `Loading`. Returns `false` (and leaves the state untouched)
    /// while a fetch is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = SessionState::Loading;
        true
    }

    /// Settles the outstanding fetch, replacing the held insight wholesale.
    pub fn resolve(&mut self, outcome: Result<UserInsight, FetchError>) {
        self.state = match outcome {
            Ok(insight) => SessionState::Ready(Box::new(insight)),
            Err(FetchError::NotFound { user_id }) => SessionState::NotFound { user_id },
            Err(err) => SessionState::Failed {
                message: err.to_string(),
            },
        };
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// The user-visible banner for non-success outcomes.
    pub fn banner(&self) -> Option<String> {
        match &self.state {
            SessionState::NotFound { user_id } => Some(
                FetchError::NotFound {
                    user_id: user_id.clone(),
                }
                .to_string(),
            ),
            SessionState::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }

    /// Runs one fetch-and-normalize round trip. Returns `false` when refused
    /// because a fetch is already in flight.
    pub async fn analyze(&mut self, base_url: &str, user_id: &str) -> bool {
        if !self.begin() {
            return false;
        }
        let outcome = client::fetch_user_insight(base_url, user_id)
            .await
            .map(normalize_insight);
        self.resolve(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::client::FetchError;
    use crate::insight::UserInsight;

    use super::{Session, SessionState};

    #[test]
    fn success_replaces_the_insight_wholesale() {
        let mut session = Session::new();
        assert!(matches!(session.state(), SessionState::Idle));

        assert!(session.begin());
        assert!(session.is_loading());
        session.resolve(Ok(UserInsight::sample("16")));
        assert_eq!(session.insight().map(|i| i.user_id.as_str()), Some("16"));

        assert!(session.begin());
        session.resolve(Ok(UserInsight::sample("17")));
        assert_eq!(session.insight().map(|i| i.user_id.as_str()), Some("17"));
    }

    #[test]
    fn a_second_fetch_is_refused_while_loading() {
        let mut session = Session::new();
        assert!(session.begin());
        assert!(!session.begin());
        assert!(session.is_loading());
    }

    #[test]
    fn not_found_is_a_distinct_outcome_with_a_friendly_banner() {
        let mut session = Session::new();
        session.begin();
        session.resolve(Err(FetchError::NotFound {
            user_id: "999".to_string(),
        }));
        assert!(matches!(session.state(), SessionState::NotFound { .. }));
        let banner = session.banner().expect("missing banner");
        assert!(banner.contains("999"));
        assert!(banner.contains("check the User ID"));
    }

    #[test]
    fn failures_surface_the_error_message() {
        let mut session = Session::new();
        session.begin();
        session.resolve(Err(FetchError::Unknown {
            message: "boom".to_string(),
        }));
        assert_eq!(session.banner().as_deref(), Some("boom"));
    }

    #[test]
    fn reset_clears_the_session() {
        let mut session = Session::new();
        session.begin();
        session.resolve(Ok(UserInsight::sample("16")));
        session.reset();
        assert!(matches!(session.state(), SessionState::Idle));
        assert!(session.insight().is_none());
        assert!(session.banner().is_none());
    }
}
