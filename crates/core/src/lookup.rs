//! Cross-entity existence probe.

use crate::error::StoreResult;

/// Narrow read-only view of a repository, used to validate foreign keys.
///
/// Implementations return `StoreError::NotFound` for missing rows. Some
/// return a blank `T` instead; callers go through
/// [`crate::validate::presence`] so both shapes read the same.
pub trait Lookup<T>: Send + Sync {
    fn get_by_id(&self, id: i64) -> StoreResult<T>;
}
