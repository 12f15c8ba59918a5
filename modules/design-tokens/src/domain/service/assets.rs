//! Palettes, font sets and spacing scales.
//!
//! The three asset kinds share one service; what differs is captured by the
//! [`Asset`] impl of each document type.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tokens_auth::AuthContext;
use tokens_store::{Collection, Document, DocumentStore, ObjectId, StoreError, UpdateResult};

use crate::domain::error::{DomainError, Resource};
use crate::domain::models::{Color, Fonts, Palette, Spacings};
use crate::domain::service::parse_id;
use crate::domain::validation::{FieldViolation, Presence, ShapeValidator};

/// A document managed through [`AssetService`].
pub trait Asset: Document + Serialize {
    const RESOURCE: Resource;

    /// Partial update; `None` fields keep their stored value.
    type Patch: Send + 'static;

    /// Build a new document from a create body.
    ///
    /// # Errors
    /// Every field that is missing or has the wrong type.
    fn from_body(id: ObjectId, body: &Map<String, Value>) -> Result<Self, Vec<FieldViolation>>;

    /// # Errors
    /// Every present field that has the wrong type.
    fn patch_from_body(body: &Map<String, Value>) -> Result<Self::Patch, Vec<FieldViolation>>;

    fn apply(&mut self, patch: Self::Patch);
}

const PALETTE_GROUPS: [&str; 5] = [
    "primaryColors",
    "secondaryColors",
    "textColors",
    "backgroundColors",
    "extraColors",
];

#[derive(Debug, Default)]
pub struct PalettePatch {
    groups: [Option<Vec<Color>>; 5],
}

impl PalettePatch {
    fn read(body: &Map<String, Value>) -> Result<Self, Vec<FieldViolation>> {
        let mut v = ShapeValidator::new();
        let groups = PALETTE_GROUPS.map(|field| v.colors(body, field, Presence::Optional));
        v.finish()?;
        Ok(Self { groups })
    }
}

impl Asset for Palette {
    const RESOURCE: Resource = Resource::Palette;
    type Patch = PalettePatch;

    fn from_body(id: ObjectId, body: &Map<String, Value>) -> Result<Self, Vec<FieldViolation>> {
        let mut palette = Self {
            id,
            ..Self::default()
        };
        palette.apply(PalettePatch::read(body)?);
        Ok(palette)
    }

    fn patch_from_body(body: &Map<String, Value>) -> Result<Self::Patch, Vec<FieldViolation>> {
        PalettePatch::read(body)
    }

    fn apply(&mut self, patch: Self::Patch) {
        let [primary, secondary, text, background, extra] = patch.groups;
        let targets = [
            (&mut self.primary_colors, primary),
            (&mut self.secondary_colors, secondary),
            (&mut self.text_colors, text),
            (&mut self.background_colors, background),
            (&mut self.extra_colors, extra),
        ];
        for (target, group) in targets {
            if let Some(colors) = group {
                *target = colors;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FontsPatch {
    heading_font_name: Option<String>,
    parragraph_font_name: Option<String>,
    base_size: Option<Number>,
    scale_factor: Option<String>,
}

impl FontsPatch {
    fn read(body: &Map<String, Value>, presence: Presence) -> Result<Self, Vec<FieldViolation>> {
        let mut v = ShapeValidator::new();
        let patch = Self {
            heading_font_name: v.string(body, "headingFontName", presence),
            parragraph_font_name: v.string(body, "parragraphFontName", presence),
            base_size: v.number(body, "baseSize", presence),
            scale_factor: v.string(body, "scaleFactor", presence),
        };
        v.finish()?;
        Ok(patch)
    }
}

impl Asset for Fonts {
    const RESOURCE: Resource = Resource::Fonts;
    type Patch = FontsPatch;

    fn from_body(id: ObjectId, body: &Map<String, Value>) -> Result<Self, Vec<FieldViolation>> {
        let FontsPatch {
            heading_font_name: Some(heading_font_name),
            parragraph_font_name: Some(parragraph_font_name),
            base_size: Some(base_size),
            scale_factor: Some(scale_factor),
        } = FontsPatch::read(body, Presence::Required)?
        else {
            return Err(Vec::new());
        };
        Ok(Self {
            id,
            heading_font_name,
            parragraph_font_name,
            base_size,
            scale_factor,
        })
    }

    fn patch_from_body(body: &Map<String, Value>) -> Result<Self::Patch, Vec<FieldViolation>> {
        FontsPatch::read(body, Presence::Optional)
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(v) = patch.heading_font_name {
            self.heading_font_name = v;
        }
        if let Some(v) = patch.parragraph_font_name {
            self.parragraph_font_name = v;
        }
        if let Some(v) = patch.base_size {
            self.base_size = v;
        }
        if let Some(v) = patch.scale_factor {
            self.scale_factor = v;
        }
    }
}

#[derive(Debug, Default)]
pub struct SpacingsPatch {
    base_size: Option<Number>,
    scale_factor: Option<String>,
}

impl SpacingsPatch {
    fn read(body: &Map<String, Value>, presence: Presence) -> Result<Self, Vec<FieldViolation>> {
        let mut v = ShapeValidator::new();
        let patch = Self {
            base_size: v.number(body, "baseSize", presence),
            scale_factor: v.string(body, "scaleFactor", presence),
        };
        v.finish()?;
        Ok(patch)
    }
}

impl Asset for Spacings {
    const RESOURCE: Resource = Resource::Spacings;
    type Patch = SpacingsPatch;

    fn from_body(id: ObjectId, body: &Map<String, Value>) -> Result<Self, Vec<FieldViolation>> {
        let SpacingsPatch {
            base_size: Some(base_size),
            scale_factor: Some(scale_factor),
        } = SpacingsPatch::read(body, Presence::Required)?
        else {
            return Err(Vec::new());
        };
        Ok(Self {
            id,
            base_size,
            scale_factor,
        })
    }

    fn patch_from_body(body: &Map<String, Value>) -> Result<Self::Patch, Vec<FieldViolation>> {
        SpacingsPatch::read(body, Presence::Optional)
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(v) = patch.base_size {
            self.base_size = v;
        }
        if let Some(v) = patch.scale_factor {
            self.scale_factor = v;
        }
    }
}

/// CRUD over one asset collection.
pub struct AssetService<T: Asset> {
    docs: Arc<dyn Collection<T>>,
}

impl<T: Asset> AssetService<T> {
    /// # Errors
    /// [`StoreError`] if the collection cannot be opened.
    pub fn new(store: &DocumentStore) -> Result<Self, StoreError> {
        Ok(Self {
            docs: store.collection::<T>()?,
        })
    }

    /// # Errors
    /// [`DomainError::InvalidShape`] for a malformed body.
    pub async fn create(&self, ctx: &AuthContext, body: &Value) -> Result<T, DomainError> {
        tracing::debug!(user = ctx.subject(), resource = T::RESOURCE.label(), "creating asset");

        let fields = ShapeValidator::object(body).map_err(DomainError::InvalidShape)?;
        let doc = T::from_body(ObjectId::new(), fields).map_err(DomainError::InvalidShape)?;
        let doc = self.docs.insert_one(doc).await?;

        tracing::info!(id = %doc.id(), resource = T::RESOURCE.label(), "asset created");
        Ok(doc)
    }

    /// # Errors
    /// [`DomainError::InvalidId`] or [`DomainError::NotFound`].
    pub async fn get(&self, ctx: &AuthContext, id: &str) -> Result<T, DomainError> {
        tracing::debug!(user = ctx.subject(), resource = T::RESOURCE.label(), id, "fetching asset");

        let oid = parse_id(id, T::RESOURCE)?;
        self.docs
            .find_by_id(oid)
            .await?
            .ok_or_else(|| DomainError::not_found(T::RESOURCE, id))
    }

    /// Replace the fields present in `body` and report the raw update outcome.
    ///
    /// # Errors
    /// [`DomainError::InvalidId`], [`DomainError::InvalidShape`] or [`DomainError::NotFound`].
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: &str,
        body: &Value,
    ) -> Result<UpdateResult, DomainError> {
        tracing::debug!(user = ctx.subject(), resource = T::RESOURCE.label(), id, "updating asset");

        let oid = parse_id(id, T::RESOURCE)?;
        let fields = ShapeValidator::object(body).map_err(DomainError::InvalidShape)?;
        let patch = T::patch_from_body(fields).map_err(DomainError::InvalidShape)?;

        let outcome = self
            .docs
            .update_by_id(oid, Box::new(move |doc: &mut T| doc.apply(patch)))
            .await?;
        if !outcome.is_matched() {
            return Err(DomainError::not_found(T::RESOURCE, id));
        }

        tracing::info!(id, resource = T::RESOURCE.label(), modified = outcome.modified_count, "asset updated");
        Ok(outcome)
    }

    /// Remove the document and return its id.
    ///
    /// # Errors
    /// [`DomainError::InvalidId`] or [`DomainError::NotFound`].
    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> Result<ObjectId, DomainError> {
        tracing::debug!(user = ctx.subject(), resource = T::RESOURCE.label(), id, "deleting asset");

        let oid = parse_id(id, T::RESOURCE)?;
        if self.docs.delete_by_id(oid).await?.deleted_count == 0 {
            return Err(DomainError::not_found(T::RESOURCE, id));
        }

        tracing::info!(id, resource = T::RESOURCE.label(), "asset deleted");
        Ok(oid)
    }
}
