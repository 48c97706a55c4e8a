//! Path → view table

use std::fmt;

/// Top-level views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Analytics,
    Landing { slug: String },
}

impl Route {
    /// Resolve a path. Empty and unknown paths land on login.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["analytics"] => Route::Analytics,
            ["campaigns", slug] => match urlencoding::decode(slug) {
                Ok(slug) => Route::Landing {
                    slug: slug.into_owned(),
                },
                Err(_) => Route::Login,
            },
            _ => Route::Login,
        }
    }

    /// Admin-only views sit behind the session guard.
    pub fn is_admin(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Analytics)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Analytics => "/analytics".to_string(),
            Route::Landing { slug } => format!("/campaigns/{}", urlencoding::encode(slug)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Controller outcome after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Route),
}

impl Navigation {
    pub fn to_login() -> Self {
        Navigation::Redirect(Route::Login)
    }

    pub fn is_redirect_to(&self, route: &Route) -> bool {
        matches!(self, Navigation::Redirect(r) if r == route)
    }
}
