//! Persisted session state.
//!
//! The token and user are one value: they are set together on login and
//! cleared together on logout, so a half-authenticated state is
//! unrepresentable.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use storekeep_core::UserProfile;

use super::{StoreError, keys, load_snapshot, save_snapshot};

/// An authenticated session.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token from the auth endpoint.
    #[serde(
        serialize_with = "serialize_token",
        deserialize_with = "deserialize_token"
    )]
    pub token: SecretString,
    pub user: UserProfile,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

// `SecretString` has no serde support on purpose; the snapshot file is the
// one place the token legitimately leaves memory.
fn serialize_token<S: Serializer>(token: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(token.expose_secret())
}

fn deserialize_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Session state with an explicit persistence boundary: loaded once at open,
/// saved after every mutation.
#[derive(Debug)]
pub struct SessionStore {
    state_dir: PathBuf,
    session: Option<Session>,
}

impl SessionStore {
    /// Open the store, loading any persisted session.
    ///
    /// A corrupt snapshot is discarded with a warning so one bad file cannot
    /// wedge every later command; the caller simply starts logged out.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read.
    pub fn open(state_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let state_dir = state_dir.into();
        // The snapshot holds `Option<Session>`: logout writes `null` rather
        // than deleting the file, so the key survives like its localStorage
        // counterpart did.
        let session = match load_snapshot::<Option<Session>>(&state_dir, keys::AUTH) {
            Ok(session) => session.flatten(),
            Err(StoreError::Corrupt { key, source }) => {
                tracing::warn!("discarding corrupt snapshot {key}: {source}");
                None
            }
            Err(err) => return Err(err),
        };
        Ok(Self { state_dir, session })
    }

    /// Replace token and user together and persist.
    ///
    /// No validation happens here; the login flow guarantees a non-empty
    /// token.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn set_auth(&mut self, token: SecretString, user: UserProfile) -> Result<(), StoreError> {
        self.session = Some(Session { token, user });
        self.save()
    }

    /// Clear the session and persist. Observable immediately by readers.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.session = None;
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        save_snapshot(&self.state_dir, keys::AUTH, &self.session)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.as_ref().map(|session| &session.user)
    }

    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        self.session.as_ref().map(|session| &session.token)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
