use std::sync::Mutex;

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Signup,
    ForgotPassword,
    Test,
    AdminDashboard,
    AdminAnnouncements,
    AdminEvents,
    AdminAccess,
    UserDashboard,
    UserEvents,
    UserAnnouncements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    Public,
    Admin,
    User,
}

impl Route {
    pub const ALL: [Route; 11] = [
        Route::Entry,
        Route::Signup,
        Route::ForgotPassword,
        Route::Test,
        Route::AdminDashboard,
        Route::AdminAnnouncements,
        Route::AdminEvents,
        Route::AdminAccess,
        Route::UserDashboard,
        Route::UserEvents,
        Route::UserAnnouncements,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Signup => "/signup",
            Route::ForgotPassword => "/forgetpassword",
            Route::Test => "/test",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminAnnouncements => "/admin/announcement",
            Route::AdminEvents => "/admin/events",
            Route::AdminAccess => "/admin/access",
            Route::UserDashboard => "/user/dashboard",
            Route::UserEvents => "/user/events",
            Route::UserAnnouncements => "/user/announcement",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }

    pub fn scope(&self) -> RouteScope {
        match self {
            Route::Entry | Route::Signup | Route::ForgotPassword | Route::Test => RouteScope::Public,
            Route::AdminDashboard
            | Route::AdminAnnouncements
            | Route::AdminEvents
            | Route::AdminAccess => RouteScope::Admin,
            Route::UserDashboard | Route::UserEvents | Route::UserAnnouncements => RouteScope::User,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.scope() != RouteScope::Public
    }

    /// Role the guard of this route requires. The user tree only requires a valid session.
    pub fn required_role(&self) -> Option<&'static str> {
        match self.scope() {
            RouteScope::Admin => Some(ADMIN_ROLE),
            RouteScope::User | RouteScope::Public => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateMode {
    Push,
    Replace,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, mode: NavigateMode);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub route: Route,
    pub mode: NavigateMode,
}

/// In-process navigation history: a location stack plus the log of every request.
#[derive(Debug)]
pub struct History {
    inner: Mutex<HistoryState>,
}

#[derive(Debug)]
struct HistoryState {
    stack: Vec<Route>,
    events: Vec<NavigationEvent>,
}

impl History {
    pub fn starting_at(route: Route) -> Self {
        Self {
            inner: Mutex::new(HistoryState {
                stack: vec![route],
                events: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.with_state(|state| state.stack.last().copied())
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.with_state(|state| state.events.clone())
    }

    pub fn count_to(&self, route: Route) -> usize {
        self.with_state(|state| state.events.iter().filter(|e| e.route == route).count())
    }

    pub fn depth(&self) -> usize {
        self.with_state(|state| state.stack.len())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut HistoryState) -> T) -> T {
        let mut state = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }
}

impl Default for History {
    fn default() -> Self {
        History::starting_at(Route::Entry)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route, mode: NavigateMode) {
        log::info!("Navigating to {} ({:?})", route.path(), mode);
        self.with_state(|state| {
            if mode == NavigateMode::Replace {
                state.stack.pop();
            }
            state.stack.push(route);
            state.events.push(NavigationEvent { route, mode });
        });
    }
}
