//! Design systems and their referential checks.

use std::sync::Arc;

use serde_json::Value;
use tokens_auth::AuthContext;
use tokens_store::{Collection, DeleteResult, Document, DocumentStore, ObjectId, StoreError};

use crate::domain::error::{DomainError, ReferenceIssue, Resource};
use crate::domain::models::{DesignSystem, Fonts, Palette, Spacings, User};
use crate::domain::service::parse_id;
use crate::domain::validation::{Presence, ShapeValidator};

/// Raw body fields after the type check.
#[derive(Debug)]
struct DesignSystemFields {
    name: Option<String>,
    user_id: Option<String>,
    palette_id: Option<String>,
    fonts_id: Option<String>,
    spacings_id: Option<String>,
}

impl DesignSystemFields {
    fn read(body: &Value, presence: Presence) -> Result<Self, DomainError> {
        let obj = ShapeValidator::object(body).map_err(DomainError::InvalidShape)?;
        let mut v = ShapeValidator::new();
        let fields = Self {
            name: v.string(obj, "name", presence),
            user_id: v.string(obj, "userId", presence),
            palette_id: v.string(obj, "paletteId", presence),
            fonts_id: v.string(obj, "fontsId", presence),
            spacings_id: v.string(obj, "spacingsId", presence),
        };
        v.finish().map_err(DomainError::InvalidShape)?;
        Ok(fields)
    }
}

/// Parsed references; `None` where the body left the field out.
#[derive(Debug, Default, Clone, Copy)]
struct References {
    user_id: Option<ObjectId>,
    palette_id: Option<ObjectId>,
    fonts_id: Option<ObjectId>,
    spacings_id: Option<ObjectId>,
}

/// Parse `raw` and look it up in `docs`; a failure is recorded under `field`.
async fn resolve<T: Document>(
    field: &'static str,
    raw: Option<String>,
    docs: &dyn Collection<T>,
    issues: &mut Vec<ReferenceIssue>,
) -> Result<Option<ObjectId>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(id) = ObjectId::parse(&raw)
        && docs.exists(id).await?
    {
        return Ok(Some(id));
    }
    issues.push(ReferenceIssue::invalid_id(field));
    Ok(None)
}

pub struct DesignSystemService {
    systems: Arc<dyn Collection<DesignSystem>>,
    users: Arc<dyn Collection<User>>,
    palettes: Arc<dyn Collection<Palette>>,
    fonts: Arc<dyn Collection<Fonts>>,
    spacings: Arc<dyn Collection<Spacings>>,
}

impl DesignSystemService {
    /// # Errors
    /// [`StoreError`] if a collection cannot be opened.
    pub fn new(store: &DocumentStore) -> Result<Self, StoreError> {
        Ok(Self {
            systems: store.collection()?,
            users: store.collection()?,
            palettes: store.collection()?,
            fonts: store.collection()?,
            spacings: store.collection()?,
        })
    }

    /// Name and references of a body, all checked in one pass.
    ///
    /// Issues are reported together in field order: an empty name, then each
    /// reference that is malformed or points at a missing document.
    async fn check_fields(
        &self,
        fields: DesignSystemFields,
    ) -> Result<(Option<String>, References), DomainError> {
        let mut issues = Vec::new();
        if fields.name.as_deref().is_some_and(str::is_empty) {
            issues.push(ReferenceIssue {
                field: "name",
                reason: ReferenceIssue::NAME_REQUIRED,
            });
        }

        let refs = References {
            user_id: resolve("userId", fields.user_id, &*self.users, &mut issues).await?,
            palette_id: resolve("paletteId", fields.palette_id, &*self.palettes, &mut issues)
                .await?,
            fonts_id: resolve("fontsId", fields.fonts_id, &*self.fonts, &mut issues).await?,
            spacings_id: resolve("spacingsId", fields.spacings_id, &*self.spacings, &mut issues)
                .await?,
        };

        if issues.is_empty() {
            Ok((fields.name, refs))
        } else {
            Err(DomainError::InvalidReferences(issues))
        }
    }

    /// # Errors
    /// [`DomainError::InvalidShape`] for non-string fields,
    /// [`DomainError::InvalidReferences`] for an empty name or a malformed or dangling reference.
    pub async fn create(&self, ctx: &AuthContext, body: &Value) -> Result<DesignSystem, DomainError> {
        tracing::debug!(user = ctx.subject(), "creating design system");

        let fields = DesignSystemFields::read(body, Presence::Required)?;
        let (name, refs) = self.check_fields(fields).await?;

        let (Some(name), Some(user_id), Some(palette_id), Some(fonts_id), Some(spacings_id)) =
            (name, refs.user_id, refs.palette_id, refs.fonts_id, refs.spacings_id)
        else {
            return Err(DomainError::MissingFields);
        };
        let ds = self
            .systems
            .insert_one(DesignSystem {
                id: ObjectId::new(),
                name,
                user_id,
                palette_id,
                fonts_id,
                spacings_id,
            })
            .await?;

        tracing::info!(id = %ds.id, owner = %ds.user_id, "design system created");
        Ok(ds)
    }

    /// # Errors
    /// [`DomainError::InvalidId`] or [`DomainError::NotFound`].
    pub async fn get(&self, ctx: &AuthContext, id: &str) -> Result<DesignSystem, DomainError> {
        tracing::debug!(user = ctx.subject(), id, "fetching design system");

        let oid = parse_id(id, Resource::DesignSystem)?;
        self.systems
            .find_by_id(oid)
            .await?
            .ok_or_else(|| DomainError::not_found(Resource::DesignSystem, id))
    }

    /// Design systems owned by `user_id`, in creation order.
    ///
    /// # Errors
    /// [`DomainError::InvalidId`] for a malformed user id.
    pub async fn list_by_user(
        &self,
        ctx: &AuthContext,
        user_id: &str,
    ) -> Result<Vec<DesignSystem>, DomainError> {
        tracing::debug!(user = ctx.subject(), owner = user_id, "listing design systems");

        let owner = parse_id(user_id, Resource::User)?;
        Ok(self
            .systems
            .find_many(&|ds: &DesignSystem| ds.user_id == owner)
            .await?)
    }

    /// Replace the fields present in `body`. Changed references are checked
    /// like on create.
    ///
    /// # Errors
    /// [`DomainError::InvalidId`], [`DomainError::InvalidShape`],
    /// [`DomainError::NotFound`] or [`DomainError::InvalidReferences`].
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: &str,
        body: &Value,
    ) -> Result<DesignSystem, DomainError> {
        tracing::debug!(user = ctx.subject(), id, "updating design system");

        let oid = parse_id(id, Resource::DesignSystem)?;
        let fields = DesignSystemFields::read(body, Presence::Optional)?;
        if !self.systems.exists(oid).await? {
            return Err(DomainError::not_found(Resource::DesignSystem, id));
        }
        let (name, refs) = self.check_fields(fields).await?;

        let updated = self
            .systems
            .find_one_and_update(
                oid,
                Box::new(move |ds: &mut DesignSystem| {
                    if let Some(name) = name {
                        ds.name = name;
                    }
                    ds.user_id = refs.user_id.unwrap_or(ds.user_id);
                    ds.palette_id = refs.palette_id.unwrap_or(ds.palette_id);
                    ds.fonts_id = refs.fonts_id.unwrap_or(ds.fonts_id);
                    ds.spacings_id = refs.spacings_id.unwrap_or(ds.spacings_id);
                }),
            )
            .await?
            .ok_or_else(|| DomainError::not_found(Resource::DesignSystem, id))?;

        tracing::info!(id, "design system updated");
        Ok(updated)
    }

    /// # Errors
    /// [`DomainError::DesignSystemNotDeleted`] when the id is malformed or unknown.
    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> Result<DeleteResult, DomainError> {
        tracing::debug!(user = ctx.subject(), id, "deleting design system");

        let Ok(oid) = ObjectId::parse(id) else {
            return Err(DomainError::DesignSystemNotDeleted { malformed: true });
        };
        let outcome = self.systems.delete_by_id(oid).await?;
        if outcome.deleted_count == 0 {
            return Err(DomainError::DesignSystemNotDeleted { malformed: false });
        }

        tracing::info!(id, "design system deleted");
        Ok(outcome)
    }
}
