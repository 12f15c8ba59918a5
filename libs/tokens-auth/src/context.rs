use crate::claims::Claims;

/// Authenticated caller identity, handed to handlers and passed on explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    subject: String,
}

impl AuthContext {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Id of the authenticated user.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub)
    }
}
