//! Uniqueness checks performed before a write.
//!
//! These are best-effort: two concurrent requests can both pass. The store's
//! unique constraints settle the race and [`ServiceError::from_write`] turns
//! the resulting signal into `Conflict`.

use crate::entity::Entity;
use crate::error::{ServiceError, ServiceResult, StoreResult};
use crate::validate::presence;

/// First candidate whose extracted attribute equals `value`.
///
/// `except` names the entity being updated; it never conflicts with itself.
pub fn find_conflict<'a, T, V, I, F>(
    candidates: I,
    value: &V,
    extract: F,
    except: Option<i64>,
) -> Option<&'a T>
where
    T: Entity + 'a,
    V: PartialEq + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &V,
{
    candidates
        .into_iter()
        .filter(|candidate| except != Some(candidate.id()))
        .find(|candidate| extract(*candidate) == value)
}

/// Collection scan variant: `Conflict(T::NAME, attr)` on the first match.
pub fn reject_duplicate<'a, T, V, I, F>(
    candidates: I,
    value: &V,
    extract: F,
    except: Option<i64>,
    attr: impl FnOnce() -> String,
) -> ServiceResult<()>
where
    T: Entity + 'a,
    V: PartialEq + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &V,
{
    match find_conflict(candidates, value, extract, except) {
        Some(_) => Err(ServiceError::conflict(T::NAME, attr())),
        None => Ok(()),
    }
}

/// Repository probe variant.
///
/// `probe` is the result of a unique-attribute lookup (`get_by_cid`,
/// `find_by_order_number`, …). A hit on any entity other than `except` is a
/// conflict; absence passes; other failures are `Internal`.
pub fn ensure_unique<T: Entity>(
    probe: StoreResult<T>,
    except: Option<i64>,
    attr: impl FnOnce() -> String,
) -> ServiceResult<()> {
    match presence(probe).map_err(ServiceError::from_store)? {
        Some(existing) if except != Some(existing.id()) => {
            Err(ServiceError::conflict(T::NAME, attr()))
        }
        _ => Ok(()),
    }
}
