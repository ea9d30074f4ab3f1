//! Credentials types for Stargate authentication.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

/// Username/password credentials exchanged for an auth token.
///
/// The password is zeroed on drop and never printed by `Debug`.
///
/// ## Example
///
/// ```rust
/// use stargate::PasswordCredentials;
///
/// let creds = PasswordCredentials::new("cassandra", "cassandra");
/// assert_eq!(creds.username(), "cassandra");
/// assert!(!format!("{:?}", creds).contains("cassandra\""));
/// ```
#[derive(Clone)]
pub struct PasswordCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl PasswordCredentials {
    /// Creates a new username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A pre-issued token used as-is.
///
/// Bearer tokens are never renewed by the SDK; they are served from the cache
/// and re-read from this value when the TTL elapses.
#[derive(Clone)]
pub struct BearerToken {
    token: Arc<str>,
}

impl BearerToken {
    /// Creates a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Returns the token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        BearerToken::new(token)
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        BearerToken::new(token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Authentication credentials for a session.
///
/// - `Password`: exchanged against `POST /v1/auth/` for a short-lived token
/// - `Bearer`: an application token sent verbatim
#[derive(Clone, Debug)]
pub enum Credentials {
    /// Username/password exchanged for an auth token.
    Password(PasswordCredentials),

    /// Pre-issued token.
    Bearer(BearerToken),
}

impl Credentials {
    /// Creates username/password credentials.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Password(PasswordCredentials::new(username, password))
    }

    /// Creates bearer credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(BearerToken::new(token))
    }

    /// Returns `true` if these credentials require a token exchange.
    pub fn requires_exchange(&self) -> bool {
        matches!(self, Credentials::Password(_))
    }
}

impl From<PasswordCredentials> for Credentials {
    fn from(creds: PasswordCredentials) -> Self {
        Credentials::Password(creds)
    }
}

impl From<BearerToken> for Credentials {
    fn from(token: BearerToken) -> Self {
        Credentials::Bearer(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_debug_redacted() {
        let creds = PasswordCredentials::new("alice", "s3cr3t");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_bearer_debug_redacted() {
        let token = BearerToken::new("AstraCS:abc");
        assert!(!format!("{:?}", token).contains("AstraCS"));
        assert_eq!(token.token(), "AstraCS:abc");
    }

    #[test]
    fn test_credentials_requires_exchange() {
        assert!(Credentials::password("u", "p").requires_exchange());
        assert!(!Credentials::bearer("t").requires_exchange());
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let debug = format!("{:?}", Credentials::password("bob", "hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Password"));
    }
}
