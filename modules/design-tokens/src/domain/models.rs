//! Stored documents.
//!
//! Every document serializes with its id under `_id` and camelCase fields,
//! which is also the shape returned to clients. [`User`] is the exception:
//! it is never serialized, clients see it through a DTO without the hash.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tokens_store::{Document, ObjectId, UniqueKey};

/// Index enforcing one account per email address.
pub const EMAIL_INDEX: &str = "email_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    /// Trimmed and lower-cased.
    pub email: String,
    /// PHC string produced by the credential hasher.
    pub password_hash: String,
}

impl User {
    /// Canonical form used for storage and lookups.
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(EMAIL_INDEX, self.email.clone())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub hex_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub primary_colors: Vec<Color>,
    pub secondary_colors: Vec<Color>,
    pub text_colors: Vec<Color>,
    pub background_colors: Vec<Color>,
    pub extra_colors: Vec<Color>,
}

impl Document for Palette {
    const COLLECTION: &'static str = "palettes";

    fn id(&self) -> ObjectId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fonts {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub heading_font_name: String,
    /// Field name is part of the public wire format.
    pub parragraph_font_name: String,
    pub base_size: Number,
    pub scale_factor: String,
}

impl Document for Fonts {
    const COLLECTION: &'static str = "fonts";

    fn id(&self) -> ObjectId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacings {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub base_size: Number,
    pub scale_factor: String,
}

impl Document for Spacings {
    const COLLECTION: &'static str = "spacings";

    fn id(&self) -> ObjectId {
        self.id
    }
}

/// A named combination of one palette, one font set and one spacing scale,
/// owned by a user. References are stored as raw ids and never expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub user_id: ObjectId,
    pub palette_id: ObjectId,
    pub fonts_id: ObjectId,
    pub spacings_id: ObjectId,
}

impl Document for DesignSystem {
    const COLLECTION: &'static str = "designsystems";

    fn id(&self) -> ObjectId {
        self.id
    }
}
