//! Command implementations.
//!
//! Every command follows the same shape: load configuration from the
//! environment, open the persisted stores, and dispatch through the typed
//! [`Gateway`]. Commands that correspond to protected dashboard pages refuse
//! to run without a stored session.

pub mod auth;
pub mod cart;
pub mod products;

use storekeep_client::config::{Config, ConfigError};
use storekeep_client::dummyjson::DummyJsonClient;
use storekeep_client::gateway::{Context, Gateway, GatewayError};
use storekeep_client::store::{SessionStore, StoreError};
use thiserror::Error;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A persisted store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The gateway rejected or failed the call.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A command that needs a session ran without one.
    #[error("not signed in. Run `storekeep login -u <username> -p <password>` first")]
    LoginRequired,

    /// `cart add` was asked to add nothing.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Checkout needs at least one cart line.
    #[error("the cart is empty; there is nothing to check out")]
    EmptyCart,
}

/// Shared wiring for gateway-backed commands.
pub struct App {
    pub config: Config,
    pub sessions: SessionStore,
    pub gateway: Gateway,
}

impl App {
    /// Load configuration, open the session store, and build the gateway.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = Config::from_env()?;
        let sessions = SessionStore::open(config.state_dir.clone())?;
        let gateway = Gateway::new(DummyJsonClient::new(&config));
        Ok(Self {
            config,
            sessions,
            gateway,
        })
    }

    /// Request context carrying the stored session, if any.
    pub fn context(&self) -> Context {
        Context::from_session(self.sessions.session())
    }

    /// The gate the dashboard's route middleware applied: every page other
    /// than the login screen needs a stored session.
    pub fn require_session(&self) -> Result<(), CommandError> {
        if self.sessions.is_authenticated() {
            Ok(())
        } else {
            Err(CommandError::LoginRequired)
        }
    }
}

/// Check that the gateway answers.
pub fn health() -> Result<(), CommandError> {
    let app = App::from_env()?;

    let status = app.gateway.health(&app.context())?;
    tracing::info!("Gateway is up: {status}");
    Ok(())
}
