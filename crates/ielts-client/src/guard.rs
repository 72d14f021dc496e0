use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::router::Route;
use crate::session::{Session, SessionGate};

/// Where `route` must send the user instead, if anywhere.
///
/// Never redirects while the session is still loading.
#[must_use]
pub fn guard_redirect(session: &Session, route: &Route) -> Option<Route> {
    if session.is_loading || route.is_public() {
        return None;
    }
    if !session.is_authenticated() {
        return Some(Route::Login);
    }
    match route.required_role() {
        Some(required) if session.role != Some(required) => {
            Some(session.role.map_or(Route::Login, Route::landing))
        }
        _ => None,
    }
}

/// Checks the router's current route once, redirecting if needed.
/// Returns `true` when the route may be shown.
pub fn enforce(gate: &SessionGate) -> bool {
    let router = gate.router();
    let route = router.current();
    match guard_redirect(&gate.snapshot(), &route) {
        Some(target) => {
            debug!(route = %route, target = %target, "route guard redirect");
            router.replace(target);
            false
        }
        None => true,
    }
}

/// Re-runs the guard whenever the session or the current route changes.
pub fn spawn_route_guard(gate: Arc<SessionGate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let router = Arc::clone(gate.router());
        let mut sessions = gate.subscribe();
        let mut routes = router.subscribe();
        loop {
            let session = sessions.borrow_and_update().clone();
            let route = routes.borrow_and_update().clone();
            if let Some(target) = guard_redirect(&session, &route) {
                debug!(route = %route, target = %target, "route guard redirect");
                router.replace(target);
            }
            tokio::select! {
                changed = sessions.changed() => if changed.is_err() { break },
                changed = routes.changed() => if changed.is_err() { break },
            }
        }
    })
}
