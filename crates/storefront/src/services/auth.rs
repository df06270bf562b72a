//! Session gate.
//!
//! Authentication for the catalog management surface is a plain comparison
//! against one configured username and password. The resulting state is
//! persisted under the `session` key so a signed-in user stays signed in
//! across restarts until they log out.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::db::{KeyValueStore, clear_snapshot, load_raw, parse_snapshot, save_snapshot};
use crate::models::{CurrentUser, SessionRecord, keys};

/// Default administrator username when none is configured.
pub const DEFAULT_USERNAME: &str = "admin";

/// Default administrator password when none is configured.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// Authentication boundary consumed by the presentation layer.
pub trait SessionGate {
    /// Check credentials and open a session on success.
    fn authenticate(&mut self, username: &str, password: &str) -> bool;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<&CurrentUser>;

    /// Close the session.
    fn logout(&mut self);

    /// Whether a user is signed in.
    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// The single accepted username and password.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    fn accepts(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, SecretString::from(DEFAULT_PASSWORD))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Session gate backed by configured credentials.
pub struct CredentialGate<S> {
    store: S,
    credentials: Credentials,
    record: SessionRecord,
}

impl<S> std::fmt::Debug for CredentialGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("credentials", &self.credentials)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> CredentialGate<S> {
    /// Create a signed-out gate. Call [`initialize`](Self::initialize) to
    /// restore a persisted session.
    #[must_use]
    pub fn new(store: S, credentials: Credentials) -> Self {
        Self {
            store,
            credentials,
            record: SessionRecord::default(),
        }
    }

    /// Restore the persisted session.
    ///
    /// A record that is corrupt, or that claims to be authenticated without
    /// a user, is discarded and its key removed.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) {
        let Some(raw) = load_raw(&self.store, keys::SESSION) else {
            self.record = SessionRecord::default();
            return;
        };

        match parse_snapshot::<SessionRecord>(keys::SESSION, &raw) {
            Some(record) if record.active_user().is_some() => {
                tracing::info!("Session restored");
                self.record = record;
            }
            _ => {
                tracing::warn!("Discarding unusable session record");
                clear_snapshot(&self.store, keys::SESSION);
                self.record = SessionRecord::default();
            }
        }
    }
}

impl<S: KeyValueStore> SessionGate for CredentialGate<S> {
    #[instrument(skip(self, password))]
    fn authenticate(&mut self, username: &str, password: &str) -> bool {
        if !self.credentials.accepts(username, password) {
            tracing::info!("Rejected sign-in attempt");
            return false;
        }

        self.record = SessionRecord::signed_in(username);
        save_snapshot(&self.store, keys::SESSION, &self.record);
        tracing::info!("Signed in");
        true
    }

    fn current_user(&self) -> Option<&CurrentUser> {
        self.record.active_user()
    }

    #[instrument(skip(self))]
    fn logout(&mut self) {
        self.record = SessionRecord::default();
        clear_snapshot(&self.store, keys::SESSION);
        tracing::info!("Signed out");
    }
}
