//! Session commands: sign in, sign out, current user.
//!
//! # Usage
//!
//! ```bash
//! # Sign in with DummyJSON demo credentials
//! storekeep login -u emilys -p emilyspass
//!
//! # Inspect the stored session
//! storekeep whoami
//!
//! # Drop the session
//! storekeep logout
//! ```
//!
//! # Environment Variables
//!
//! - `STOREKEEP_STATE_DIR` - where the session snapshot is written
//!   (defaults to `$XDG_STATE_HOME/storekeep`)

use secrecy::SecretString;
use storekeep_client::gateway::LoginInput;

use super::{App, CommandError};

/// Authenticate against the demo API and persist the session.
pub async fn login(username: &str, password: &str) -> Result<(), CommandError> {
    let mut app = App::from_env()?;

    let input = LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    };
    let response = app.gateway.login(&app.context(), input).await?;

    let user = response.user.clone();
    app.sessions
        .set_auth(SecretString::from(response.access_token), response.user)?;

    tracing::info!("Signed in as {} ({})", user.username, user.full_name());
    Ok(())
}

/// Drop the stored session.
///
/// Mirrors the dashboard's sign-out: the snapshot file is kept and its
/// value set to null, so a later sign-in reuses the same file.
pub fn logout() -> Result<(), CommandError> {
    let mut app = App::from_env()?;

    if !app.sessions.is_authenticated() {
        tracing::info!("Not signed in");
        return Ok(());
    }

    app.sessions.logout()?;
    tracing::info!("Signed out");
    Ok(())
}

/// Show the signed-in user, if any.
pub fn whoami() -> Result<(), CommandError> {
    let app = App::from_env()?;

    match app.sessions.user() {
        Some(user) => {
            tracing::info!("{} ({}) <{}>", user.username, user.full_name(), user.email);
        }
        None => tracing::info!("Not signed in"),
    }
    Ok(())
}
