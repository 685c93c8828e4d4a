//! Extra routes for extending a surface's router.

use aide::axum::ApiRouter;

use crate::service::ServiceState;

/// Routes merged into a surface's router next to its built-in ones.
#[must_use]
#[derive(Default, Clone)]
pub struct CustomRoutes(Option<ApiRouter<ServiceState>>);

impl CustomRoutes {
    /// Creates an empty set of extra routes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds routes, merging them with any added earlier.
    pub fn with_routes(self, routes: ApiRouter<ServiceState>) -> Self {
        Self(Some(match self.0 {
            Some(existing) => existing.merge(routes),
            None => routes,
        }))
    }

    /// Merges the extra routes into `router`.
    pub(crate) fn merge_into(self, router: ApiRouter<ServiceState>) -> ApiRouter<ServiceState> {
        match self.0 {
            Some(extra) => router.merge(extra),
            None => router,
        }
    }
}
