//! Accounts: signup, login and identity lookup.

use std::sync::Arc;

use serde_json::Value;
use tokens_auth::{AuthContext, IssuedToken, TokenIssuer};
use tokens_store::{Collection, DocumentStore, ObjectId, StoreError, UniqueKey};

use crate::domain::error::{DomainError, Resource};
use crate::domain::models::{EMAIL_INDEX, User};
use crate::domain::password::CredentialHasher;

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: User,
    pub token: IssuedToken,
}

/// Non-empty string field of a JSON object body.
fn required_text(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub struct UserService {
    users: Arc<dyn Collection<User>>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    /// # Errors
    /// [`StoreError`] if the users collection cannot be opened.
    pub fn new(
        store: &DocumentStore,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            users: store.collection()?,
            hasher,
            tokens,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .find_by_unique_key(&UniqueKey::new(EMAIL_INDEX, email))
            .await?)
    }

    /// Runs on the blocking pool.
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::Hashing(e.to_string()))?
    }

    fn sign_in(&self, user: User) -> Result<SignedInUser, DomainError> {
        let token = self.tokens.issue(&user.id.to_hex())?;
        Ok(SignedInUser { user, token })
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    /// [`DomainError::MissingFields`] unless `name`, `email` and `password` are
    /// non-empty strings; [`DomainError::UserAlreadyExists`] for a taken email.
    pub async fn signup(&self, body: &Value) -> Result<SignedInUser, DomainError> {
        let (Some(name), Some(email), Some(password)) = (
            required_text(body, "name"),
            required_text(body, "email"),
            required_text(body, "password"),
        ) else {
            return Err(DomainError::MissingFields);
        };
        let email = User::normalize_email(&email);
        if email.is_empty() {
            return Err(DomainError::MissingFields);
        }
        tracing::debug!(email = %email, "signing up");

        if self.find_by_email(&email).await?.is_some() {
            return Err(DomainError::UserAlreadyExists);
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .users
            .insert_one(User {
                id: ObjectId::new(),
                name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateKey { .. } => DomainError::UserAlreadyExists,
                other => other.into(),
            })?;

        tracing::info!(user = %user.id, "user registered");
        self.sign_in(user)
    }

    /// # Errors
    /// [`DomainError::MissingFields`] without email and password,
    /// [`DomainError::InvalidCredentials`] for an unknown email or a wrong password.
    pub async fn login(&self, body: &Value) -> Result<SignedInUser, DomainError> {
        let (Some(email), Some(password)) =
            (required_text(body, "email"), required_text(body, "password"))
        else {
            return Err(DomainError::MissingFields);
        };
        let email = User::normalize_email(&email);

        let Some(user) = self.find_by_email(&email).await? else {
            tracing::debug!(email = %email, "login for unknown email");
            return Err(DomainError::InvalidCredentials);
        };
        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user = %user.id, "login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        tracing::info!(user = %user.id, "user logged in");
        self.sign_in(user)
    }

    /// The account behind an authenticated request.
    ///
    /// # Errors
    /// [`DomainError::NotFound`] if the account no longer exists.
    pub async fn me(&self, ctx: &AuthContext) -> Result<User, DomainError> {
        let not_found = || DomainError::not_found(Resource::User, ctx.subject());
        let id = ObjectId::parse(ctx.subject()).map_err(|_| not_found())?;
        self.users.find_by_id(id).await?.ok_or_else(not_found)
    }
}
