use ielts_client::{enforce, ApiError, CancelToken, Route};
use tracing::debug;

use crate::modules::system::CommandContext;
use crate::NOT_LOGGED_IN;

/// A command bound to one route, like a page of the web app.
pub(crate) struct View<'a> {
    ctx: &'a CommandContext,
    route: Route,
}

/// Waits for hydration, navigates to `route` and runs the route guard.
pub(crate) async fn open_view(ctx: &CommandContext, route: Route) -> anyhow::Result<View<'_>> {
    ctx.gate.ready().await;
    ctx.gate.router().push(route.clone());
    if !enforce(&ctx.gate) {
        if ctx.gate.snapshot().is_authenticated() {
            anyhow::bail!("{route} is only available to teachers");
        }
        anyhow::bail!(NOT_LOGGED_IN);
    }
    Ok(View { ctx, route })
}

impl View<'_> {
    pub(crate) fn cancel(&self) -> &CancelToken {
        &self.ctx.cancel
    }

    /// `Ok(None)` when the request was canceled; the view then renders
    /// nothing.
    pub(crate) fn settle<T>(&self, result: Result<T, ApiError>) -> anyhow::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::Canceled) => {
                debug!(route = %self.route, "request canceled");
                Ok(None)
            }
            Err(err) if !self.route.is_public() && !self.ctx.gate.snapshot().is_authenticated() => {
                debug!(route = %self.route, error = %err, "session ended during request");
                Err(anyhow::anyhow!(NOT_LOGGED_IN))
            }
            Err(err) => Err(anyhow::anyhow!(err.user_message())),
        }
    }
}
