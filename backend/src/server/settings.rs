//! Process settings loaded via OrthoConfig.
//!
//! Every value can be supplied as a `DISPATCH_*` environment variable. Scalar
//! values also accept the matching command-line flag.

use std::net::SocketAddr;

use dispatch_board::domain::AllowList;
use dispatch_board::inbound::http::session_config::BuildMode;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("DISPATCH_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr { value: String },
    #[error("invalid userinfo URL '{value}'")]
    InvalidUserInfoUrl { value: String },
    #[error("DISPATCH_USERINFO_URL must be set in release builds")]
    MissingUserInfoUrl,
}

/// Allow-list entries given either as one comma-separated string or as a list.
///
/// OrthoConfig turns a comma-separated environment value into a list but
/// leaves a single address as a plain string; both shapes load here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EmailListRepr")]
pub struct EmailList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum EmailListRepr {
    Joined(String),
    Entries(Vec<String>),
}

impl From<EmailListRepr> for EmailList {
    fn from(repr: EmailListRepr) -> Self {
        let raw = match repr {
            EmailListRepr::Joined(joined) => vec![joined],
            EmailListRepr::Entries(entries) => entries,
        };
        Self(
            raw.iter()
                .flat_map(|entry| entry.split(','))
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DISPATCH")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// E-mail addresses allowed to sign in, comma-separated.
    #[ortho_config(skip_cli)]
    pub allowed_emails: Option<EmailList>,
    /// Identity provider userinfo endpoint. Debug builds accept fixture
    /// tokens when unset.
    pub userinfo_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    #[ortho_config(skip_cli)]
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Return the configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the listener address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Build the sign-in allow-list. An unset list admits nobody.
    pub fn allow_list(&self) -> AllowList {
        self.allowed_emails
            .iter()
            .flat_map(|list| list.0.iter().cloned())
            .collect()
    }

    /// Parse the userinfo endpoint, if configured.
    pub fn userinfo_url(&self) -> Result<Option<Url>, SettingsError> {
        self.userinfo_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|_| SettingsError::InvalidUserInfoUrl {
                    value: raw.to_owned(),
                })
            })
            .transpose()
    }

    /// Resolve the endpoint sign-in tokens are verified against.
    ///
    /// `None` selects fixture tokens, which only debug builds permit.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingUserInfoUrl`] for a release build
    /// without an endpoint, or the parse error of a malformed one.
    pub fn identity_endpoint(&self, mode: BuildMode) -> Result<Option<Url>, SettingsError> {
        match (self.userinfo_url()?, mode) {
            (None, BuildMode::Release) => Err(SettingsError::MissingUserInfoUrl),
            (endpoint, _) => Ok(endpoint),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
