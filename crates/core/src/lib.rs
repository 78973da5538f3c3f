//! `stockhub-core`: validation building blocks shared by every entity service.
//!
//! This crate contains **no IO**. Services compose these pieces around the
//! repository traits their own crates declare.

pub mod duplicate;
pub mod entity;
pub mod error;
pub mod lookup;
pub mod patch;
pub mod validate;

pub use duplicate::{ensure_unique, find_conflict, reject_duplicate};
pub use entity::Entity;
pub use error::{DeleteFailure, ServiceError, ServiceResult, StoreError, StoreResult};
pub use lookup::Lookup;
pub use patch::{Merge, Patch};
pub use validate::{
    ensure, ensure_exists, ensure_temperature, presence, require_found, RequiredFields, Zeroable,
    ABSOLUTE_ZERO_CELSIUS,
};
