use std::fmt;

/// A complete session: both the user id and the JWT are known.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    token: String,
}

impl Credentials {
    pub fn new(user_id: String, token: String) -> Self {
        Self { user_id, token }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Value for the `Authorization` header. The token itself is opaque.
    pub fn authorization(&self) -> String {
        format!("JWT {}", self.token)
    }
}

// keep tokens out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
