//! Account credentials used for HTTP basic authentication.

use secrecy::{ExposeSecret, SecretString};

/// Account SID and auth token pair.
///
/// The SID doubles as the basic-auth username and as the account path
/// segment; the token is the basic-auth password and never appears in
/// `Debug` output.
#[derive(Debug)]
pub struct Credentials {
    account_sid: String,
    auth_token: SecretString,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::from(auth_token.into()),
        }
    }

    /// Account SID (basic-auth username).
    #[must_use]
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    /// Auth token (basic-auth password).
    #[must_use]
    pub fn auth_token(&self) -> &str {
        self.auth_token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_accessors() {
        let creds = Credentials::new("AC123", "tok");
        assert_eq!(creds.account_sid(), "AC123");
        assert_eq!(creds.auth_token(), "tok");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("AC123", "super-secret-token");
        let debug = format!("{creds:?}");
        assert!(debug.contains("AC123"));
        assert!(!debug.contains("super-secret-token"));
    }
}
