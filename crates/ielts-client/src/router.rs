use std::sync::{Mutex, PoisonError};

use ielts_core::Role;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    TeacherDashboard,
    Tests,
    MyTests,
    Results,
    Test(Uuid),
    TeacherChecking,
    Speaking,
    Payment,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::TeacherDashboard => "/teacher/dashboard".to_string(),
            Self::Tests => "/tests".to_string(),
            Self::MyTests => "/my-tests".to_string(),
            Self::Results => "/results".to_string(),
            Self::Test(id) => format!("/test/{id}"),
            Self::TeacherChecking => "/teacher/checking".to_string(),
            Self::Speaking => "/speaking".to_string(),
            Self::Payment => "/payment".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let route = match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/teacher/dashboard" => Self::TeacherDashboard,
            "/tests" => Self::Tests,
            "/my-tests" => Self::MyTests,
            "/results" => Self::Results,
            "/teacher/checking" => Self::TeacherChecking,
            "/speaking" => Self::Speaking,
            "/payment" => Self::Payment,
            other => {
                let id = other.strip_prefix("/test/")?;
                Self::Test(id.parse().ok()?)
            }
        };
        Some(route)
    }

    /// Routes reachable without a session.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::Register)
    }

    #[must_use]
    pub const fn required_role(&self) -> Option<Role> {
        match self {
            Self::TeacherDashboard | Self::TeacherChecking => Some(Role::Teacher),
            _ => None,
        }
    }

    /// Where a freshly signed-in user lands.
    #[must_use]
    pub const fn landing(role: Role) -> Self {
        match role {
            Role::Teacher => Self::TeacherDashboard,
            Role::Student => Self::Dashboard,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current location plus navigation history.
pub struct Router {
    current: watch::Sender<Route>,
    history: Mutex<Vec<Route>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        let (current, _receiver) = watch::channel(initial.clone());
        Self {
            current,
            history: Mutex::new(vec![initial]),
        }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    pub fn push(&self, route: Route) {
        info!(from = %self.current(), to = %route, "navigate");
        self.history_mut().push(route.clone());
        self.current.send_replace(route);
    }

    /// Navigates without leaving the current location in history.
    pub fn replace(&self, route: Route) {
        info!(from = %self.current(), to = %route, "redirect");
        {
            let mut history = self.history_mut();
            history.pop();
            history.push(route.clone());
        }
        self.current.send_replace(route);
    }

    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history_mut().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    fn history_mut(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
