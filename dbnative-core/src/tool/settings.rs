//! Per-invocation tool settings and the effective-credentials rule.

use std::sync::Arc;

use crate::connection::ConnectionConfiguration;
use crate::security::Credentials;

/// Settings a single native tool invocation runs with.
///
/// The tool may carry its own user and password; when its user name is
/// empty both user and password come from the connection configuration.
/// A tool password is never paired with the connection's user name.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use dbnative_core::{ConnectionConfiguration, ToolInvocationSettings, security::Credentials};
///
/// let connection = Arc::new(
///     ConnectionConfiguration::new("db1")
///         .with_credentials(Credentials::new("root".to_string(), Some("s3cr3t".to_string()))),
/// );
/// let settings = ToolInvocationSettings::new(connection)
///     .with_tool_user("", Some("stale".to_string()));
///
/// let effective = settings.effective_credentials();
/// assert_eq!(effective.username(), "root");
/// assert_eq!(effective.password_or_empty(), "s3cr3t");
/// ```
#[derive(Debug, Clone)]
pub struct ToolInvocationSettings {
    connection: Arc<ConnectionConfiguration>,
    tool_user: Credentials,
    override_credentials: bool,
}

impl ToolInvocationSettings {
    /// Settings that authenticate with the connection's own credentials.
    pub fn new(connection: Arc<ConnectionConfiguration>) -> Self {
        Self {
            connection,
            tool_user: Credentials::anonymous(),
            override_credentials: false,
        }
    }

    /// Sets a tool-specific user and password.
    #[must_use]
    pub fn with_tool_user(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.tool_user = Credentials::new(username.into(), password);
        self
    }

    /// Selects credential-file mode (`true`) or flag + environment mode (`false`).
    #[must_use]
    pub const fn with_override_credentials(mut self, override_credentials: bool) -> Self {
        self.override_credentials = override_credentials;
        self
    }

    /// Tool-specific user name; empty when unset.
    pub fn tool_user_name(&self) -> &str {
        self.tool_user.username()
    }

    /// Whether credentials travel through a credential file.
    pub const fn is_override_credentials(&self) -> bool {
        self.override_credentials
    }

    /// Connection the tool runs against.
    pub fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    /// Resolves the user/password pair the tool actually authenticates with.
    ///
    /// Both values are replaced together; the override mode has no influence.
    pub fn effective_credentials(&self) -> Credentials {
        if self.tool_user.username().is_empty() {
            self.connection.credentials().clone()
        } else {
            self.tool_user.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Arc<ConnectionConfiguration> {
        Arc::new(
            ConnectionConfiguration::new("db1").with_credentials(Credentials::new(
                "root".to_string(),
                Some("s3cr3t".to_string()),
            )),
        )
    }

    #[test]
    fn test_fallback_replaces_both_values() {
        let settings = ToolInvocationSettings::new(connection())
            .with_tool_user("", Some("tool-password".to_string()));

        let effective = settings.effective_credentials();
        assert_eq!(effective.username(), "root");
        assert_eq!(effective.password_or_empty(), "s3cr3t");
    }

    #[test]
    fn test_fallback_ignores_override_mode() {
        for override_credentials in [true, false] {
            let settings = ToolInvocationSettings::new(connection())
                .with_override_credentials(override_credentials);
            assert_eq!(settings.effective_credentials().username(), "root");
        }
    }

    #[test]
    fn test_tool_user_keeps_its_own_password() {
        let settings =
            ToolInvocationSettings::new(connection()).with_tool_user("admin", Some(String::new()));

        let effective = settings.effective_credentials();
        assert_eq!(effective.username(), "admin");
        assert_eq!(effective.password_or_empty(), "");
    }

    #[test]
    fn test_tool_user_without_password_does_not_borrow_connection_password() {
        let settings = ToolInvocationSettings::new(connection()).with_tool_user("admin", None);

        let effective = settings.effective_credentials();
        assert_eq!(effective.username(), "admin");
        assert!(!effective.has_password());
    }

    #[test]
    fn test_debug_hides_passwords() {
        let settings = ToolInvocationSettings::new(connection())
            .with_tool_user("admin", Some("hunter2".to_string()));
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cr3t"));
    }
}
