//! Credential protection primitives.
//!
//! - `credentials`: username/password container with automatic memory zeroing
//!
//! # Security Guarantees
//! - Credentials are stored in `Zeroizing` containers for automatic memory clearing
//! - Debug output never renders a password

mod credentials;

pub use credentials::Credentials;
