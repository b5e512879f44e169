//! Route table and the authorization gate in front of admin views.

use serde::Serialize;
use std::fmt;

use crate::models::Identity;
use crate::session::Session;

/// Every page the console exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Landing,
    Login,
    Register,
    Admin,
    Categories,
    SubCategories,
    Blogs,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Admin,
        Route::Categories,
        Route::SubCategories,
        Route::Blogs,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Admin => "/admin",
            Route::Categories => "/categories",
            Route::SubCategories => "/subcategories",
            Route::Blogs => "/blogs",
        }
    }

    /// Admin pages need an active session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Admin | Route::Categories | Route::SubCategories | Route::Blogs
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of passing a view through the gate
#[derive(Debug, PartialEq)]
pub enum Guarded<T> {
    Render(T),
    Redirect(Route),
}

impl<T> Guarded<T> {
    pub fn into_result(self) -> Result<T, Route> {
        match self {
            Guarded::Render(value) => Ok(value),
            Guarded::Redirect(route) => Err(route),
        }
    }
}

/// Render `view` with the signed-in identity, or redirect to login.
///
/// There are no roles: any session is enough.
pub fn guard<T, F>(session: &Session, view: F) -> Guarded<T>
where
    F: FnOnce(&Identity) -> T,
{
    match session.current_user() {
        Some(identity) => Guarded::Render(view(identity)),
        None => {
            tracing::debug!("No session, redirecting to {}", Route::Login);
            Guarded::Redirect(Route::Login)
        }
    }
}

/// Gate check for a route; public routes always render
pub fn authorize(session: &Session, route: Route) -> Guarded<Route> {
    if !route.requires_session() {
        return Guarded::Render(route);
    }
    guard(session, |_| route)
}
