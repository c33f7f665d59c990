//! Connection configuration consumed by native tool invocations.
//!
//! The configuration is read-only from the point of view of an invocation:
//! host and port become `--host`/`--port` flags, the credentials are the
//! fallback identity when the tool settings carry no user of their own.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::NativeToolError;
use crate::security::Credentials;

/// Connection details for the database a native tool talks to.
///
/// # Security
/// Credentials are skipped during serialization and omitted from `Display`.
///
/// # Example
/// ```rust
/// use dbnative_core::{ConnectionConfiguration, security::Credentials};
///
/// let config = ConnectionConfiguration::new("db1")
///     .with_port("3307")
///     .with_credentials(Credentials::new("root".to_string(), Some("pw".to_string())));
///
/// assert_eq!(config.host_name(), Some("db1"));
/// assert_eq!(config.host_port(), Some("3307"));
/// assert_eq!(config.to_string(), "ConnectionConfiguration(db1:3307)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfiguration {
    /// Database host address
    pub host: String,
    /// Port as configured; blank means "let the tool pick its default"
    #[serde(default)]
    pub port: Option<String>,
    /// Default database, if any
    #[serde(default)]
    pub database: Option<String>,
    #[serde(skip, default = "Credentials::anonymous")]
    credentials: Credentials,
}

impl Default for ConnectionConfiguration {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            database: None,
            credentials: Credentials::anonymous(),
        }
    }
}

impl std::fmt::Display for ConnectionConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConnectionConfiguration({}{}{})",
            self.host,
            self.host_port()
                .map_or_else(String::new, |p| format!(":{}", p)),
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{}", db))
        )
        // Intentionally omit username and never include credentials
    }
}

impl ConnectionConfiguration {
    /// Creates a configuration for the given host with no credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Sets the default database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the connection credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Host name, or `None` when blank.
    pub fn host_name(&self) -> Option<&str> {
        let host = self.host.trim();
        (!host.is_empty()).then_some(host)
    }

    /// Port, or `None` when unset or blank.
    pub fn host_port(&self) -> Option<&str> {
        self.port
            .as_deref()
            .map(str::trim)
            .filter(|port| !port.is_empty())
    }

    /// Credentials the connection itself authenticates with.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if the host is blank or the port is not a valid TCP port
    pub fn validate(&self) -> crate::Result<()> {
        if self.host_name().is_none() {
            return Err(NativeToolError::configuration("Host cannot be empty"));
        }

        if let Some(port) = self.host_port() {
            match port.parse::<u16>() {
                Ok(0) | Err(_) => {
                    return Err(NativeToolError::configuration(format!(
                        "Invalid port '{}'",
                        port
                    )));
                }
                Ok(_) => {}
            }
        }

        Ok(())
    }

    /// Parses a database URL, moving any embedded credentials into a
    /// zeroizing container.
    ///
    /// # Errors
    /// Returns error if the URL is malformed or has no host
    ///
    /// # Example
    /// ```rust
    /// use dbnative_core::ConnectionConfiguration;
    ///
    /// let config = ConnectionConfiguration::from_url("mysql://root:pw@db1:3307/shop")?;
    /// assert_eq!(config.host_name(), Some("db1"));
    /// assert_eq!(config.host_port(), Some("3307"));
    /// assert_eq!(config.database.as_deref(), Some("shop"));
    /// assert_eq!(config.credentials().username(), "root");
    /// # Ok::<(), dbnative_core::NativeToolError>(())
    /// ```
    pub fn from_url(connection_string: &str) -> crate::Result<Self> {
        let url = url::Url::parse(connection_string).map_err(|e| {
            NativeToolError::configuration(format!("Invalid connection string format: {}", e))
        })?;

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| NativeToolError::configuration("Missing host in connection string"))?
            .to_string();

        let database = url
            .path()
            .strip_prefix('/')
            .filter(|db| !db.is_empty())
            .map(str::to_string);

        let username = decode_userinfo(url.username(), "username")?;
        let password = url
            .password()
            .map(|password| decode_userinfo(password, "password"))
            .transpose()?;
        let credentials = Credentials::new(
            username.as_str().to_string(),
            password.map(|p| p.as_str().to_string()),
        );

        Ok(Self {
            host,
            port: url.port().map(|port| port.to_string()),
            database,
            credentials,
        })
    }
}

/// URL user info arrives percent-encoded; tools need the literal value.
fn decode_userinfo(component: &str, what: &str) -> crate::Result<Zeroizing<String>> {
    percent_decode_str(component)
        .decode_utf8()
        .map(|decoded| Zeroizing::new(decoded.into_owned()))
        .map_err(|_| {
            NativeToolError::configuration(format!(
                "Connection string {} is not valid UTF-8 once decoded",
                what
            ))
        })
}
