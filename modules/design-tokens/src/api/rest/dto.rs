//! REST response shapes.

use serde::Serialize;
use tokens_store::{DeleteResult, ObjectId};

use crate::domain::models::User;
use crate::domain::service::SignedInUser;

/// Public view of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Account plus bearer token, returned by signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct SignedInUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub token: String,
}

impl From<SignedInUser> for SignedInUserDto {
    fn from(signed: SignedInUser) -> Self {
        Self {
            user: signed.user.into(),
            token: signed.token.token,
        }
    }
}

/// `{message, data}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct MessageData<T> {
    pub message: String,
    pub data: T,
}

impl<T> MessageData<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// `{data}` envelope used for listings.
#[derive(Debug, Clone, Serialize)]
pub struct DataList<T> {
    pub data: Vec<T>,
}

/// Confirmation of an asset removal.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedDto {
    pub message: String,
    pub id: ObjectId,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCountDto {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeletedCountDto {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}
