//! Secure credential container with automatic memory zeroing.
//!
//! # Security
//! - Credentials are stored in `Zeroizing<T>` containers
//! - Memory is automatically cleared when credentials go out of scope
//! - Passwords are never exposed in debug output or logs

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

/// Secure credential container that automatically zeros memory on drop.
///
/// An absent password and an empty password are distinct here, but both are
/// handed to native tools as an empty value (see [`Credentials::password_or_empty`]).
///
/// # Example
///
/// ```rust
/// use dbnative_core::security::Credentials;
///
/// let creds = Credentials::new("admin".to_string(), Some("secret".to_string()));
/// assert_eq!(creds.username(), "admin");
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(username: String, password: Option<String>) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    /// Credentials with neither username nor password.
    pub fn anonymous() -> Self {
        Self::new(String::new(), None)
    }

    /// Gets the username (still protected by Zeroizing).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks if password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Returns the password, or `""` when none was provided.
    ///
    /// Native tools treat a missing password field as "prompt for it", which
    /// hangs a non-interactive run; an empty value is always explicit.
    pub fn password_or_empty(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field(
                "password",
                &if self.has_password() { "****" } else { "<none>" },
            )
            .finish()
    }
}
