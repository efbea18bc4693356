use std::fmt;

pub const LOGIN_PAGE: &str = "/login.html";
pub const USER_CENTER_PAGE: &str = "/user_center_info.html";

/// A page the host should navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn login() -> Self {
        Self(LOGIN_PAGE.into())
    }

    /// `next` is inserted as-is, page paths are already url-safe.
    pub fn login_returning_to(path: &str) -> Self {
        Self(format!("{LOGIN_PAGE}?next={path}"))
    }

    pub fn project(id: &str) -> Self {
        Self(format!("/projects/{id}.html"))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.0)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> String {
        location.0
    }
}
