use secrecy::ExposeSecret;

use crate::{
    auth::{access::require_access, jwt::decode_claims},
    clock::Clock,
    errors::AppError,
    navigation::{NavigateMode, Navigator, Route},
    session::SessionContext,
};

pub const CHECKING_PLACEHOLDER: &str = "Checking authentication...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDenial {
    TokenMissing,
    TokenMalformed,
    TokenExpired,
    RoleMismatch,
}

impl GuardDenial {
    /// Expired and undecodable tokens are purged; a role mismatch keeps the session.
    pub fn purges_token(&self) -> bool {
        matches!(self, GuardDenial::TokenMalformed | GuardDenial::TokenExpired)
    }
}

impl From<&AppError> for GuardDenial {
    /// Anything that is not an access failure, such as an unreadable store,
    /// counts as having no session.
    fn from(err: &AppError) -> Self {
        match err {
            AppError::TokenMalformed(_) => GuardDenial::TokenMalformed,
            AppError::TokenExpired => GuardDenial::TokenExpired,
            AppError::RoleMismatch { .. } => GuardDenial::RoleMismatch,
            _ => GuardDenial::TokenMissing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    Checking,
    Allowed,
    Denied(GuardDenial),
}

impl GuardState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuardState::Allowed | GuardState::Denied(_))
    }
}

/// What the host should draw for a guarded subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<T> {
    Checking(&'static str),
    Content(T),
    Nothing,
}

/// One guard per mount of a protected route. It evaluates the session exactly once.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    required_role: Option<String>,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(required_role: Option<&str>) -> Self {
        Self {
            required_role: required_role.map(str::to_string),
            state: GuardState::Unchecked,
        }
    }

    pub fn for_route(route: Route) -> Self {
        Self::new(route.required_role())
    }

    pub fn required_role(&self) -> Option<&str> {
        self.required_role.as_deref()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// `Unchecked -> Checking`. Rendering now shows the placeholder.
    pub fn begin_check(&mut self) -> bool {
        if self.state != GuardState::Unchecked {
            log::warn!("Route guard already evaluated ({:?}); ignoring", self.state);
            return false;
        }
        self.state = GuardState::Checking;
        true
    }

    /// Resolves a check started with `begin_check`. Denials purge the token when
    /// required and navigate to the entry route once.
    pub fn complete_check(
        &mut self,
        session: &SessionContext,
        navigator: &dyn Navigator,
        clock: &dyn Clock,
    ) -> GuardState {
        if self.state != GuardState::Checking {
            return self.state;
        }

        self.state = match self.evaluate(session, clock) {
            Ok(()) => {
                log::debug!("Route guard allowed (required role {:?})", self.required_role);
                GuardState::Allowed
            }
            Err(denial) => {
                log::info!("Route guard denied: {:?}", denial);
                if denial.purges_token() {
                    if let Err(e) = session.clear() {
                        log::error!("Failed to purge session token: {}", e);
                    }
                }
                navigator.navigate(Route::Entry, NavigateMode::Replace);
                GuardState::Denied(denial)
            }
        };
        self.state
    }

    pub fn mount(
        &mut self,
        session: &SessionContext,
        navigator: &dyn Navigator,
        clock: &dyn Clock,
    ) -> GuardState {
        if self.begin_check() {
            self.complete_check(session, navigator, clock)
        } else {
            self.state
        }
    }

    fn evaluate(&self, session: &SessionContext, clock: &dyn Clock) -> Result<(), GuardDenial> {
        self.check(session, clock).map_err(|e| {
            log::warn!("Access check failed: {}", e);
            GuardDenial::from(&e)
        })
    }

    fn check(&self, session: &SessionContext, clock: &dyn Clock) -> Result<(), AppError> {
        let token = session.token()?.ok_or(AppError::TokenMissing)?;
        let claims = decode_claims(token.expose_secret())?;
        require_access(&claims, self.required_role(), clock.now_millis())
    }

    /// Children are only built once the guard has allowed.
    pub fn render<T>(&self, children: impl FnOnce() -> T) -> View<T> {
        match self.state {
            GuardState::Unchecked | GuardState::Checking => View::Checking(CHECKING_PLACEHOLDER),
            GuardState::Allowed => View::Content(children()),
            GuardState::Denied(_) => View::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::FixedClock, navigation::History, test_utils::fixtures::mint_token};
    use serde_json::json;

    const NOW_S: i64 = 1_700_000_000;

    fn clock() -> FixedClock {
        FixedClock::at_seconds(NOW_S)
    }

    fn session_with(payload: serde_json::Value) -> SessionContext {
        let session = SessionContext::in_memory();
        session.store_token(&mint_token(payload)).unwrap();
        session
    }

    #[test]
    fn test_no_token_denies_and_redirects() {
        let session = SessionContext::in_memory();
        let history = History::starting_at(Route::AdminEvents);
        let mut guard = RouteGuard::for_route(Route::AdminEvents);

        let state = guard.mount(&session, &history, &clock());

        assert_eq!(state, GuardState::Denied(GuardDenial::TokenMissing));
        assert_eq!(history.current(), Some(Route::Entry));
        assert_eq!(history.count_to(Route::Entry), 1);
    }

    #[test]
    fn test_malformed_token_purged() {
        let session = SessionContext::in_memory();
        session.store_token("garbage").unwrap();
        let history = History::default();
        let mut guard = RouteGuard::new(None);

        assert_eq!(
            guard.mount(&session, &history, &clock()),
            GuardState::Denied(GuardDenial::TokenMalformed)
        );
        assert!(!session.has_token());
        assert_eq!(history.count_to(Route::Entry), 1);
    }

    #[test]
    fn test_expired_token_purged() {
        let session = session_with(json!({ "role": "admin", "exp": NOW_S - 10 }));
        let history = History::default();
        let mut guard = RouteGuard::new(Some("admin"));

        assert_eq!(
            guard.mount(&session, &history, &clock()),
            GuardState::Denied(GuardDenial::TokenExpired)
        );
        assert!(!session.has_token());
    }

    #[test]
    fn test_role_mismatch_keeps_token() {
        let session = session_with(json!({ "role": "user", "exp": NOW_S + 3600 }));
        let history = History::default();
        let mut guard = RouteGuard::new(Some("admin"));

        assert_eq!(
            guard.mount(&session, &history, &clock()),
            GuardState::Denied(GuardDenial::RoleMismatch)
        );
        assert!(session.has_token());
        assert_eq!(history.count_to(Route::Entry), 1);
    }

    #[test]
    fn test_allowed_renders_children() {
        let session = session_with(json!({ "role": "Admin", "exp": NOW_S + 3600 }));
        let history = History::starting_at(Route::AdminDashboard);
        let mut guard = RouteGuard::for_route(Route::AdminDashboard);

        assert_eq!(guard.mount(&session, &history, &clock()), GuardState::Allowed);
        assert_eq!(guard.render(|| "dashboard"), View::Content("dashboard"));
        assert!(history.events().is_empty());
    }

    #[test]
    fn test_checking_renders_placeholder_only() {
        let session = session_with(json!({ "role": "admin", "exp": NOW_S + 3600 }));
        let history = History::default();
        let mut guard = RouteGuard::new(Some("admin"));

        assert_eq!(
            guard.render(|| -> &'static str { panic!("children built before check") }),
            View::Checking(CHECKING_PLACEHOLDER)
        );

        assert!(guard.begin_check());
        assert_eq!(guard.state(), GuardState::Checking);
        assert_eq!(
            guard.render(|| -> &'static str { panic!("children built while checking") }),
            View::Checking(CHECKING_PLACEHOLDER)
        );

        guard.complete_check(&session, &history, &clock());
        assert_eq!(guard.render(|| "ok"), View::Content("ok"));
    }

    #[test]
    fn test_denied_renders_nothing() {
        let session = SessionContext::in_memory();
        let history = History::default();
        let mut guard = RouteGuard::new(None);
        guard.mount(&session, &history, &clock());

        assert_eq!(guard.render(|| "secret"), View::Nothing);
    }

    #[test]
    fn test_guard_evaluates_only_once() {
        let session = SessionContext::in_memory();
        let history = History::default();
        let mut guard = RouteGuard::new(None);

        guard.mount(&session, &history, &clock());
        session
            .store_token(&mint_token(json!({ "role": "user" })))
            .unwrap();
        let state = guard.mount(&session, &history, &clock());

        assert_eq!(state, GuardState::Denied(GuardDenial::TokenMissing));
        assert_eq!(history.count_to(Route::Entry), 1);
    }

    #[test]
    fn test_user_guard_accepts_any_role() {
        let session = session_with(json!({ "role": "moderator", "exp": NOW_S + 60 }));
        let history = History::default();
        let mut guard = RouteGuard::for_route(Route::UserDashboard);

        assert_eq!(guard.mount(&session, &history, &clock()), GuardState::Allowed);
    }

    #[test]
    fn test_denial_from_error() {
        assert_eq!(
            GuardDenial::from(&AppError::TokenMalformed("x".into())),
            GuardDenial::TokenMalformed
        );
        assert_eq!(GuardDenial::from(&AppError::TokenExpired), GuardDenial::TokenExpired);
        assert_eq!(
            GuardDenial::from(&AppError::RoleMismatch {
                required: "admin".into(),
                actual: Some("user".into())
            }),
            GuardDenial::RoleMismatch
        );
        assert_eq!(
            GuardDenial::from(&AppError::StorageError("locked".into())),
            GuardDenial::TokenMissing
        );
    }
}
