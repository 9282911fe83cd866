use strum_macros::{EnumString, IntoStaticStr};

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum Route {
    #[strum(serialize = "/")]
    Home,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/profile")]
    Profile,
    #[strum(serialize = "/404")]
    NotFound,
}

impl Route {
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Unknown paths resolve to `NotFound`.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        path.parse().unwrap_or(Route::NotFound)
    }

    pub fn guard(self) -> Option<Guard> {
        match self {
            Route::Login => Some(Guard::RequireUnauthenticated),
            Route::Profile => Some(Guard::RequireAuthenticated),
            Route::Home | Route::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    RequireAuthenticated,
    RequireUnauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Permit,
    /// `from` is the route originally requested.
    Redirect { to: Route, from: Option<Route> },
}

impl Guard {
    /// Only the presence of a token is checked, never its validity.
    pub fn check(self, session: &Session, requested: Route) -> Navigation {
        match (self, session.logged()) {
            (Guard::RequireAuthenticated, false) => Navigation::Redirect {
                to: Route::Login,
                from: Some(requested),
            },
            (Guard::RequireUnauthenticated, true) => Navigation::Redirect {
                to: Route::Profile,
                from: Some(requested),
            },
            _ => Navigation::Permit,
        }
    }
}

pub fn navigate(session: &Session, requested: Route) -> Navigation {
    match requested.guard() {
        Some(guard) => guard.check(session, requested),
        None => Navigation::Permit,
    }
}

/// Where to go once signed in: back to the protected route that caused the
/// redirect, or the profile page.
pub fn post_login_destination(from: Option<Route>) -> Route {
    match from {
        Some(route) if route.guard() == Some(Guard::RequireAuthenticated) => route,
        _ => Route::Profile,
    }
}
