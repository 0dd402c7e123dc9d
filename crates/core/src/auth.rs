//! Session credential holder.
//!
//! The intranet sits behind an OAuth2 proxy; access is granted by a single
//! pre-obtained session cookie read once at process start. The credential is
//! immutable for the process lifetime and is never logged or persisted.

use std::fmt;

/// Cookie name expected by the OAuth2 proxy in front of the intranet.
pub const SESSION_COOKIE_NAME: &str = "_oauth2_proxy";

/// An optional opaque session token.
///
/// Absence is a valid, expected state (public-only mode). No structure of the
/// token value is interpreted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    cookie: Option<String>,
}

impl Credential {
    /// Wrap an optional cookie value. Empty strings count as absent.
    pub fn new(cookie: Option<String>) -> Self {
        Self { cookie: cookie.filter(|c| !c.is_empty()) }
    }

    /// An absent credential (public-only mode).
    pub fn absent() -> Self {
        Self { cookie: None }
    }

    /// True iff a non-empty session cookie is configured.
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// The `Cookie` header value for authenticated requests, if any.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookie
            .as_deref()
            .map(|value| format!("{}={}", SESSION_COOKIE_NAME, value))
    }
}

/// Redacts the token value; only presence is ever printed.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cookie.is_some() {
            f.write_str("Credential(present)")
        } else {
            f.write_str("Credential(absent)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_credential() {
        let cred = Credential::absent();
        assert!(!cred.is_authenticated());
        assert_eq!(cred.cookie_header(), None);
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let cred = Credential::new(Some(String::new()));
        assert!(!cred.is_authenticated());
        assert_eq!(cred.cookie_header(), None);
    }

    #[test]
    fn test_present_credential() {
        let cred = Credential::new(Some("abc123".into()));
        assert!(cred.is_authenticated());
        assert_eq!(cred.cookie_header(), Some("_oauth2_proxy=abc123".into()));
    }

    #[test]
    fn test_debug_redacts_value() {
        let cred = Credential::new(Some("secret-token".into()));
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("secret-token"));
        assert_eq!(printed, "Credential(present)");
        assert_eq!(format!("{:?}", Credential::absent()), "Credential(absent)");
    }
}
