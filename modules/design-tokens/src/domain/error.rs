//! Domain error types for the design tokens module.

use thiserror::Error;
use tokens_auth::AuthError;
use tokens_store::StoreError;

use crate::domain::validation::FieldViolation;

/// Addressable resource kinds, used to word per-resource messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Palette,
    Fonts,
    Spacings,
    DesignSystem,
}

impl Resource {
    /// Lower-case name used inside messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Palette => "palette",
            Self::Fonts => "fonts",
            Self::Spacings => "spacings",
            Self::DesignSystem => "design system",
        }
    }

    /// Capitalized name used at the start of messages.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Palette => "Palette",
            Self::Fonts => "Fonts",
            Self::Spacings => "Spacings",
            Self::DesignSystem => "Design system",
        }
    }

    #[must_use]
    pub fn not_found_message(self, id: &str) -> String {
        match self {
            Self::User | Self::DesignSystem => format!("{} not found", self.title()),
            Self::Palette | Self::Fonts | Self::Spacings => {
                format!("No {} with id: {id}", self.label())
            }
        }
    }
}

/// A rejected design system field, e.g. `userId: Invalid ID(s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIssue {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ReferenceIssue {
    pub const INVALID_ID: &'static str = "Invalid ID(s)";
    pub const NAME_REQUIRED: &'static str = "name is required";

    #[must_use]
    pub const fn invalid_id(field: &'static str) -> Self {
        Self {
            field,
            reason: Self::INVALID_ID,
        }
    }
}

impl std::fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn first_violation(violations: &[FieldViolation]) -> String {
    violations
        .first()
        .map_or_else(|| "Invalid request body".to_owned(), ToString::to_string)
}

fn join_issues(issues: &[ReferenceIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Please add all fields")]
    MissingFields,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Body fields with the wrong JSON type.
    #[error("{}", first_violation(.0))]
    InvalidShape(Vec<FieldViolation>),

    /// Malformed id in the request path.
    #[error("Invalid {} id syntax", .0.label())]
    InvalidId(Resource),

    #[error("{}", .resource.not_found_message(.id))]
    NotFound { resource: Resource, id: String },

    /// Design system references that are malformed or dangling.
    #[error("DesignSystem validation failed: {}", join_issues(.0))]
    InvalidReferences(Vec<ReferenceIssue>),

    /// Design system delete that removed nothing.
    #[error("Invalid design system id syntax or design system not found")]
    DesignSystemNotDeleted { malformed: bool },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Whether this is a server-side failure rather than a problem with the request.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Hashing(_) | Self::Auth(_) | Self::Store(_))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn per_resource_messages() {
        assert_eq!(
            DomainError::InvalidId(Resource::Palette).to_string(),
            "Invalid palette id syntax"
        );
        assert_eq!(
            DomainError::InvalidId(Resource::DesignSystem).to_string(),
            "Invalid design system id syntax"
        );
        assert_eq!(
            DomainError::not_found(Resource::Fonts, "000000000000000000000000").to_string(),
            "No fonts with id: 000000000000000000000000"
        );
        assert_eq!(
            DomainError::not_found(Resource::DesignSystem, "abc").to_string(),
            "Design system not found"
        );
        assert_eq!(
            DomainError::not_found(Resource::User, "abc").to_string(),
            "User not found"
        );
    }

    #[test]
    fn reference_issues_are_joined_in_order() {
        let err = DomainError::InvalidReferences(vec![
            ReferenceIssue {
                field: "name",
                reason: ReferenceIssue::NAME_REQUIRED,
            },
            ReferenceIssue::invalid_id("userId"),
            ReferenceIssue::invalid_id("fontsId"),
        ]);
        assert_eq!(
            err.to_string(),
            "DesignSystem validation failed: name: name is required, userId: Invalid ID(s), fontsId: Invalid ID(s)"
        );
    }

    #[test]
    fn shape_message_uses_first_violation() {
        let err = DomainError::InvalidShape(vec![
            FieldViolation::new("primaryColors", "string", "object"),
            FieldViolation::new("textColors", "number", "object"),
        ]);
        assert_eq!(
            err.to_string(),
            "primaryColors is of type string but should be object"
        );
    }

    #[test]
    fn internal_classification() {
        assert!(DomainError::Store(StoreError::Disconnected).is_internal());
        assert!(!DomainError::UserAlreadyExists.is_internal());
    }
}
