use log::{debug, error};

use crate::auth::Credentials;
use crate::storage::{Scope, StorageError};

const USER_ID: &str = "user_id";
const TOKEN: &str = "token";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: Some(token.into()),
        }
    }

    /// Only a session with both halves can authenticate a request.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.user_id, &self.token) {
            (Some(user_id), Some(token)) => Some(Credentials::new(user_id.clone(), token.clone())),
            _ => None,
        }
    }
}

pub trait SessionStore {
    fn read(&self) -> Session;
    /// Empties both scopes entirely.
    fn clear(&self) -> Result<(), StorageError>;
    fn save(&self, session: &Session, persist: bool) -> Result<(), StorageError>;
}

/// Session storage split across a short-lived and a persistent scope,
/// with the short-lived one taking precedence key by key.
pub struct ScopedSessionStore<S, L> {
    short_lived: S,
    persistent: L,
}

impl<S: Scope, L: Scope> ScopedSessionStore<S, L> {
    pub fn new(short_lived: S, persistent: L) -> Self {
        Self {
            short_lived,
            persistent,
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let non_empty = |v: &String| !v.is_empty();

        self.short_lived
            .get(key)
            .filter(non_empty)
            .or_else(|| self.persistent.get(key).filter(non_empty))
    }
}

impl<S: Scope, L: Scope> SessionStore for ScopedSessionStore<S, L> {
    fn read(&self) -> Session {
        Session {
            user_id: self.lookup(USER_ID),
            token: self.lookup(TOKEN),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let short_lived = self.short_lived.clear().map_err(|e| {
            error!("couldn't clear short-lived scope: {e}");
            e
        });
        let persistent = self.persistent.clear().map_err(|e| {
            error!("couldn't clear persistent scope: {e}");
            e
        });

        short_lived.and(persistent)
    }

    fn save(&self, session: &Session, persist: bool) -> Result<(), StorageError> {
        let scope: &dyn Scope = if persist {
            &self.persistent
        } else {
            &self.short_lived
        };

        let pairs = [(USER_ID, &session.user_id), (TOKEN, &session.token)];

        // all or nothing
        for (key, value) in pairs {
            if value.as_deref().is_some_and(|v| v.contains(['\n', '\r'])) {
                error!("refusing to save {key} with a line break");
                return Err(StorageError::Unstorable(key.into()));
            }
        }

        for (key, value) in pairs {
            if let Some(value) = value {
                scope.set(key, value)?;
            }
        }

        debug!(
            "saved session for {} ({})",
            session.user_id.as_deref().unwrap_or("<none>"),
            if persist { "persistent" } else { "short-lived" },
        );
        Ok(())
    }
}
