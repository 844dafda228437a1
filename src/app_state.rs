use std::sync::Arc;

use crate::{
    api::{ApiClient, HttpTransport, ReqwestTransport},
    auth::RouteGuard,
    clock::{Clock, SystemClock},
    config::Config,
    errors::{AppError, AppResult},
    logging,
    models::domain::{Announcement, Event},
    navigation::{Navigator, Route},
    screens::{
        access, announcements, events, posts, test_records, AccessScreen, AnnouncementsScreen,
        CurrentUser, EventsScreen, PostsScreen, TestRecordsScreen,
    },
    services::{AuthService, Endpoint, Notifications, RemoteList, Resource},
    session::{FileStorage, SessionContext, SessionStorage},
};

/// Everything a screen needs, built once and handed down explicitly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionContext,
    pub client: ApiClient,
    pub navigator: Arc<dyn Navigator>,
    pub clock: Arc<dyn Clock>,
    pub notifications: Notifications,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn SessionStorage>,
        transport: Arc<dyn HttpTransport>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let session = SessionContext::new(storage);
        let client = ApiClient::new(transport, session.clone(), &config.api_base_url);
        let auth = Arc::new(
            AuthService::new(client.clone(), navigator.clone())
                .with_google_client_id(config.google_client_id.clone()),
        );

        Self {
            config: Arc::new(config),
            session,
            client,
            navigator,
            clock,
            notifications: Notifications::new(),
            auth,
        }
    }

    /// Loads `.env`, installs the logger and wires the file-backed token store
    /// and the reqwest transport.
    pub fn from_env(navigator: Arc<dyn Navigator>) -> AppResult<Self> {
        dotenvy::dotenv().ok();
        logging::init();

        let config = Config::from_env();
        config.validate()?;
        log::info!(
            "Using API at {} with token store {}",
            config.api_base_url,
            config.token_store_path.display()
        );

        let storage = Arc::new(FileStorage::open(&config.token_store_path)?);
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::new(config, storage, transport, navigator, Arc::new(SystemClock)))
    }

    /// Mounts a fresh guard for `route` and runs its single evaluation.
    pub fn mount_guard(&self, route: Route) -> RouteGuard {
        let mut guard = RouteGuard::for_route(route);
        guard.mount(&self.session, self.navigator.as_ref(), self.clock.as_ref());
        guard
    }

    /// What the shell does when `route` is entered. Protected routes get an
    /// evaluated guard; the entry page sends signed-in users to their dashboard.
    pub fn visit(&self, route: Route) -> Option<RouteGuard> {
        if route.is_protected() {
            return Some(self.mount_guard(route));
        }
        if route == Route::Entry {
            self.auth.redirect_signed_in();
        }
        None
    }

    pub fn announcements_screen(&self) -> AnnouncementsScreen {
        AnnouncementsScreen::new(self.list(announcements::admin_endpoint(
            &self.config.announcement_api_url,
        )))
    }

    pub fn announcement_feed(&self) -> RemoteList<Announcement> {
        self.list(announcements::feed_endpoint())
    }

    pub fn events_screen(&self) -> EventsScreen {
        EventsScreen::new(self.list(events::admin_endpoint()))
    }

    pub fn event_feed(&self) -> RemoteList<Event> {
        self.list(events::feed_endpoint())
    }

    pub fn test_records_screen(&self) -> TestRecordsScreen {
        TestRecordsScreen::new(self.list(test_records::endpoint()))
    }

    pub fn access_screen(&self) -> AccessScreen {
        AccessScreen::new(self.list(access::endpoint()))
    }

    /// The acting user is the token's subject, falling back to its email.
    pub fn posts_screen(&self) -> AppResult<PostsScreen> {
        let claims = self.session.claims()?.ok_or(AppError::TokenMissing)?;
        let user_id = claims
            .subject()
            .map(str::to_string)
            .or_else(|| claims.email.clone())
            .ok_or_else(|| AppError::TokenMalformed("token carries no user id".to_string()))?;

        Ok(PostsScreen::new(
            self.list(posts::endpoint()),
            CurrentUser::new(user_id),
            self.clock.clone(),
        ))
    }

    /// Public URL of an event's uploaded image.
    pub fn event_image_url(&self, event: &Event) -> Option<String> {
        event.image_path().map(|path| self.config.api_url(path))
    }

    fn list<R: Resource>(&self, endpoint: Endpoint) -> RemoteList<R> {
        RemoteList::new(self.client.clone(), endpoint, self.notifications.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        auth::{GuardDenial, GuardState},
        clock::FixedClock,
        navigation::History,
        session::MemoryStorage,
        test_utils::{fixtures::mint_token, test_helpers::StubTransport},
    };

    const NOW_S: i64 = 1_700_000_000;

    fn state() -> (AppState, Arc<StubTransport>, Arc<History>) {
        let stub = Arc::new(StubTransport::new());
        let history = Arc::new(History::default());
        let state = AppState::new(
            Config::test_config(),
            Arc::new(MemoryStorage::new()),
            stub.clone(),
            history.clone(),
            Arc::new(FixedClock::at_seconds(NOW_S)),
        );
        (state, stub, history)
    }

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_visit_public_route_has_no_guard() {
        let (state, _, history) = state();
        assert!(state.visit(Route::Signup).is_none());
        assert!(state.visit(Route::ForgotPassword).is_none());
        assert!(history.events().is_empty());
    }

    #[test]
    fn test_visit_admin_route_without_token() {
        let (state, _, history) = state();

        let guard = state.visit(Route::AdminEvents).unwrap();

        assert_eq!(guard.state(), GuardState::Denied(GuardDenial::TokenMissing));
        assert_eq!(history.current(), Some(Route::Entry));
    }

    #[test]
    fn test_visit_entry_redirects_signed_in_admin() {
        let (state, _, history) = state();
        state
            .session
            .store_token(&mint_token(json!({ "role": "admin", "exp": NOW_S + 60 })))
            .unwrap();

        assert!(state.visit(Route::Entry).is_none());
        assert_eq!(history.current(), Some(Route::AdminDashboard));
        assert_eq!(
            state.visit(Route::AdminAnnouncements).unwrap().state(),
            GuardState::Allowed
        );
    }

    #[test]
    fn test_posts_screen_requires_user_id() {
        let (state, _, _) = state();
        assert!(matches!(state.posts_screen(), Err(AppError::TokenMissing)));

        state
            .session
            .store_token(&mint_token(json!({ "role": "user" })))
            .unwrap();
        assert!(matches!(state.posts_screen(), Err(AppError::TokenMalformed(_))));

        state
            .session
            .store_token(&mint_token(json!({ "role": "user", "sub": "u-42" })))
            .unwrap();
        assert_eq!(state.posts_screen().unwrap().user().id, "u-42");
    }

    #[tokio::test]
    async fn test_screens_share_notifications() {
        let (state, stub, _) = state();
        stub.respond(500, "");
        let screen = state.events_screen();

        screen.delete(3).await.unwrap_err();

        assert_eq!(
            state.notifications.last().unwrap().message,
            "Failed to delete event"
        );
        assert_eq!(stub.last_request().url, "http://api.test/api/Events/3");
    }

    #[test]
    fn test_event_image_url() {
        let (state, _, _) = state();
        let event = crate::test_utils::fixtures::test_event(1, "Meetup");
        assert_eq!(
            state.event_image_url(&event).as_deref(),
            Some("http://api.test/uploads/1.png")
        );
    }
}
