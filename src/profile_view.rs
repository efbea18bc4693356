use log::{debug, error, info, trace, warn};
use thiserror::Error;

use crate::api::{Api, ApiError};
use crate::auth::Credentials;
use crate::email::{validate_email, EmailForm};
use crate::location::{Location, USER_CENTER_PAGE};
use crate::project::Project;
use crate::session::SessionStore;
use crate::storage::StorageError;
use crate::user::UserProfile;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no session stored")]
    MissingSession,
    #[error("session rejected: {0}")]
    Rejected(ApiError),
    #[error("couldn't load profile: {0}")]
    Profile(ApiError),
    #[error("couldn't load projects: {0}")]
    Projects(ApiError),
}

impl MountError {
    /// Where the host should go instead of showing the page, if anywhere.
    pub fn redirect(&self) -> Option<Location> {
        match self {
            Self::MissingSession | Self::Rejected(_) => {
                Some(Location::login_returning_to(USER_CENTER_PAGE))
            }
            Self::Profile(_) | Self::Projects(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid email address")]
    Invalid,
    #[error("no session to send with")]
    NoSession,
    #[error("couldn't request verification: {0}")]
    Api(ApiError),
}

/// The user center page: profile, project list and the email form.
pub struct ProfileView<A, S> {
    api: A,
    store: S,
    credentials: Option<Credentials>,
    pub profile: UserProfile,
    pub projects: Vec<Project>,
    pub email_form: EmailForm,
}

impl<A: Api, S: SessionStore> ProfileView<A, S> {
    /// Reads the session once; it does not change for the life of the view.
    pub fn new(api: A, store: S) -> Self {
        let credentials = store.read().credentials();

        Self {
            api,
            store,
            credentials,
            profile: UserProfile::default(),
            projects: vec![],
            email_form: EmailForm::default(),
        }
    }

    /// Loads the profile, then the projects. The second request is only
    /// issued once the first one has succeeded.
    pub async fn mount(&mut self) -> Result<(), MountError> {
        let Some(creds) = &self.credentials else {
            info!("no session, sending to login");
            return Err(MountError::MissingSession);
        };
        let user_id = creds.user_id();

        trace!("{user_id} loading profile");
        let record = self.api.user(creds).await.map_err(|e| {
            if e.is_auth_rejected() {
                info!("{user_id} session rejected ({e}), sending to login");
                MountError::Rejected(e)
            } else {
                error!("{user_id} couldn't load profile: {e}");
                MountError::Profile(e)
            }
        })?;
        self.profile.load(record);

        trace!("{user_id} loading projects");
        let mut projects = self.api.projects(creds).await.map_err(|e| {
            error!("{user_id} couldn't load projects: {e}");
            MountError::Projects(e)
        })?;

        for project in &mut projects {
            project.url = Location::project(&project.id).into();
        }

        info!("{user_id} loaded, {} projects", projects.len());
        self.projects = projects;
        Ok(())
    }

    /// Forgets the session in both scopes. Where to go next is always the
    /// plain login page.
    pub fn logout(&mut self) -> Result<Location, StorageError> {
        match &self.credentials {
            Some(creds) => info!("{} logout", creds.user_id()),
            None => debug!("logout without a session"),
        }

        self.credentials = None;
        self.store.clear()?;

        Ok(Location::login())
    }

    /// Validates locally, then asks the backend to send a verification mail.
    /// Failures leave the form as it was apart from `email_error`.
    pub async fn save_email(&mut self, email: &str) -> Result<(), EmailError> {
        self.email_form.email = email.to_string();

        if !validate_email(email) {
            debug!("rejecting email {email:?}");
            self.email_form.email_error = true;
            return Err(EmailError::Invalid);
        }
        self.email_form.email_error = false;

        let Some(creds) = &self.credentials else {
            warn!("can't send verification email without a session");
            return Err(EmailError::NoSession);
        };
        let user_id = creds.user_id();

        self.api.update_email(creds, email).await.map_err(|e| {
            error!("{user_id} couldn't update email: {e}");
            EmailError::Api(e)
        })?;

        info!("{user_id} verification email requested");
        self.email_form.mark_sent();
        Ok(())
    }
}
