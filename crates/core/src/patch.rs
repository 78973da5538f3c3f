//! Partial updates.
//!
//! A patch field is either [`Patch::Unset`] (keep the stored value) or
//! [`Patch::Set`] (replace it). Zero is a perfectly good `Set` value, so a
//! temperature of `0.0` can be written without being mistaken for "absent".

use serde::{Deserialize, Deserializer};

/// One optional field of an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset => None,
        }
    }

    /// Merged value: the patch value if set, otherwise `current`.
    pub fn apply(self, current: T) -> T {
        match self {
            Self::Set(v) => v,
            Self::Unset => current,
        }
    }

    /// Set value that differs from `current`, if any.
    ///
    /// Foreign-key and uniqueness checks only run for changed fields.
    pub fn changed_from(&self, current: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.as_set().filter(|v| *v != current)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Unset,
        }
    }
}

/// Missing fields (with `#[serde(default)]`) and explicit `null` are `Unset`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// An update request that can be folded into the stored entity.
pub trait Merge<T> {
    /// True when no field is set.
    fn is_empty(&self) -> bool;

    /// Produce the updated entity. The identity always comes from `current`.
    fn merge(self, current: T) -> T;
}
