//! Design Tokens Module
//!
//! Users, color palettes, font sets, spacing scales and the design systems
//! that tie one of each to an owner. Every resource lives in a
//! [`DocumentStore`](tokens_store::DocumentStore) collection and is served
//! over REST behind bearer-token auth.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod module;
pub use module::DesignTokensModule;

pub use domain::password::{Argon2Hasher, CredentialHasher};

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
