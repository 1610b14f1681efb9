//! Navigation over the static route table.
//!
//! DESIGN
//! ======
//! Each navigation runs `Idle -> Fetching -> Resolved | Failed`:
//! match the path, ask the guard (redirecting to the fallback on deny), await
//! the resolver, build the page, and only then commit location and history.
//! Any failure leaves the previous location and page in place.
//!
//! Navigations are serialized by `&mut self`. An in-flight resolver is never
//! cancelled; a second navigation simply cannot start until it finishes.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::error::NavigationError;
use crate::pages::Page;
use crate::state::session::SessionStore;

use super::guards::fallback_path;
use super::routes::{Route, RouteSnapshot, match_pattern, normalize_path};

/// Upper bound on guard redirects within one navigation.
pub const MAX_REDIRECTS: usize = 4;

/// Outcome of the most recent navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Fetching { path: String },
    Resolved { path: String },
    Failed { path: String, reason: String },
}

pub struct Router {
    routes: Vec<Route>,
    session: SessionStore,
    location: Option<String>,
    page: Option<Page>,
    history: Vec<String>,
    state: NavigationState,
}

impl Router {
    #[must_use]
    pub fn new(routes: Vec<Route>, session: SessionStore) -> Self {
        Self { routes, session, location: None, page: None, history: Vec::new(), state: NavigationState::Idle }
    }

    /// Current path, `None` before the first successful navigation.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Every committed location, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Navigate to `url` (hash or plain form).
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotFound`] if no route matches.
    /// - [`NavigationError::RedirectLoop`] if guards keep redirecting.
    /// - [`NavigationError::Resolve`] if the route's resolver fails.
    /// - [`NavigationError::MissingData`] if the resolved data does not fit the page.
    pub async fn navigate(&mut self, url: &str) -> Result<&Page, NavigationError> {
        let requested = normalize_path(url);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let Some((route, params)) = self.match_route(&target) else {
                tracing::warn!(path = %target, "no route matches");
                return Err(NavigationError::NotFound(target));
            };

            if let Some(guard) = &route.guard
                && !guard.can_activate(&self.session)
            {
                let fallback = fallback_path(&self.session);
                tracing::info!(path = %target, guard = guard.name(), redirect = fallback, "navigation denied");
                target = fallback.to_owned();
                continue;
            }

            let resolved = match &route.resolver {
                Some(resolver) => {
                    self.state = NavigationState::Fetching { path: target.clone() };
                    let snapshot = RouteSnapshot { path: target.clone(), pattern: route.pattern, params };
                    match resolver.resolve(&snapshot).await {
                        Ok(data) => Some(data),
                        Err(e) => {
                            tracing::warn!(path = %target, error = %e, code = e.error_code(), "navigation aborted");
                            self.state = NavigationState::Failed { path: target, reason: e.to_string() };
                            return Err(NavigationError::Resolve(e));
                        }
                    }
                }
                None => None,
            };

            let Some(page) = Page::build(route.page, resolved, &self.session) else {
                self.state = NavigationState::Failed { path: target, reason: "resolved data mismatch".to_owned() };
                return Err(NavigationError::MissingData(route.page));
            };

            tracing::info!(path = %target, page = ?route.page, "navigation resolved");
            self.state = NavigationState::Resolved { path: target.clone() };
            self.location = Some(target.clone());
            self.history.push(target);
            return Ok(&*self.page.insert(page));
        }

        tracing::warn!(path = %requested, "guard redirect limit reached");
        Err(NavigationError::RedirectLoop(requested))
    }

    fn match_route(&self, path: &str) -> Option<(Route, std::collections::HashMap<String, String>)> {
        self.routes
            .iter()
            .find_map(|route| match_pattern(route.pattern, path).map(|params| (route.clone(), params)))
    }
}
