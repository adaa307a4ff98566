//! Session context
//!
//! Authentication belongs to an external identity provider. The core only
//! sees its result: whether someone is signed in and which email to show.
//! A `Session` is created once at startup and passed by reference to
//! whatever needs it.

/// Read-only view of the identity provider's current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    email: Option<String>,
}

impl Session {
    /// No authenticated user
    pub fn anonymous() -> Self {
        Self { email: None }
    }

    /// Build a session from the identity provider's signal
    ///
    /// A blank email is treated as signed out.
    pub fn from_identity(email: Option<String>) -> Self {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self { email }
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Label for headers and status bars
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("guest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_email(), "guest");
    }

    #[test]
    fn test_from_identity() {
        let session = Session::from_identity(Some(" user@example.com ".into()));
        assert!(session.is_authenticated());
        assert_eq!(session.email(), Some("user@example.com"));

        assert!(!Session::from_identity(Some("  ".into())).is_authenticated());
        assert!(!Session::from_identity(None).is_authenticated());
    }
}
