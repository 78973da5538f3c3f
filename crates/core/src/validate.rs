//! Required-field, domain-rule and existence checks.
//!
//! Services call these in a fixed order: required fields first, then domain
//! rules, then foreign-key existence, then uniqueness. The first failure wins.

use crate::entity::Entity;
use crate::error::{ServiceError, ServiceResult, StoreError, StoreResult};
use crate::lookup::Lookup;
use crate::patch::Patch;

/// Lowest physically meaningful temperature, in °C.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Values that have an "empty" state counting as not supplied.
pub trait Zeroable {
    fn is_zero(&self) -> bool;
}

impl Zeroable for i64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Zeroable for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Zeroable for str {
    fn is_zero(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Zeroable for String {
    fn is_zero(&self) -> bool {
        self.as_str().is_zero()
    }
}

/// Presence-required: only `None` is empty, so `Some(0.0)` passes.
impl<T> Zeroable for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// Required-field checker; reports the first empty field in call order.
#[derive(Debug, Default)]
#[must_use = "call `check()` to get the validation result"]
pub struct RequiredFields {
    missing: Option<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<V>(mut self, name: &'static str, value: &V) -> Self
    where
        V: Zeroable + ?Sized,
    {
        if self.missing.is_none() && value.is_zero() {
            self.missing = Some(name);
        }
        self
    }

    /// Patch field: unset passes, set-to-empty fails.
    pub fn patched<V>(self, name: &'static str, value: &Patch<V>) -> Self
    where
        V: Zeroable,
    {
        match value.as_set() {
            Some(v) => self.field(name, v),
            None => self,
        }
    }

    pub fn check(self) -> ServiceResult<()> {
        match self.missing {
            Some(name) => Err(ServiceError::ZeroValue(name)),
            None => Ok(()),
        }
    }
}

/// Domain rule: `condition` must hold, otherwise `BadRequest(message)`.
pub fn ensure(condition: bool, message: impl Into<String>) -> ServiceResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ServiceError::bad_request(message))
    }
}

pub fn ensure_temperature(attr: &str, value: f64) -> ServiceResult<()> {
    ensure(
        value >= ABSOLUTE_ZERO_CELSIUS,
        format!("{attr} cannot be lower than {ABSOLUTE_ZERO_CELSIUS}"),
    )
}

/// Normalize a lookup into `Option`.
///
/// Both `Err(NotFound)` and a blank entity mean "absent"; every other error
/// is passed through.
pub fn presence<T: Entity>(result: StoreResult<T>) -> StoreResult<Option<T>> {
    match result {
        Ok(found) if found.is_blank() => Ok(None),
        Ok(found) => Ok(Some(found)),
        Err(StoreError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Foreign-key check: absent → `DependencyNotFound`, failure → `Internal`.
pub fn ensure_exists<T, L>(lookup: &L, id: i64) -> ServiceResult<T>
where
    T: Entity,
    L: Lookup<T> + ?Sized,
{
    presence(lookup.get_by_id(id))
        .map_err(ServiceError::from_store)?
        .ok_or_else(|| ServiceError::dependency_not_found(T::NAME, format!("id: {id}")))
}

/// Primary-entity check: absent → `NotFound`, failure → `Internal`.
pub fn require_found<T, L>(lookup: &L, id: i64) -> ServiceResult<T>
where
    T: Entity,
    L: Lookup<T> + ?Sized,
{
    presence(lookup.get_by_id(id))
        .map_err(ServiceError::from_store)?
        .ok_or_else(|| ServiceError::not_found(T::NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Widget {
        id: i64,
        label: String,
    }

    impl Entity for Widget {
        const NAME: &'static str = "widget";

        fn id(&self) -> i64 {
            self.id
        }
    }

    /// Collaborator that signals absence with an error.
    struct Strict(Vec<Widget>);

    impl Lookup<Widget> for Strict {
        fn get_by_id(&self, id: i64) -> StoreResult<Widget> {
            self.0.iter().find(|w| w.id == id).cloned().ok_or(StoreError::NotFound)
        }
    }

    /// Collaborator that signals absence with a blank value.
    struct Lenient(Vec<Widget>);

    impl Lookup<Widget> for Lenient {
        fn get_by_id(&self, id: i64) -> StoreResult<Widget> {
            Ok(self.0.iter().find(|w| w.id == id).cloned().unwrap_or_default())
        }
    }

    struct Broken;

    impl Lookup<Widget> for Broken {
        fn get_by_id(&self, _id: i64) -> StoreResult<Widget> {
            Err(StoreError::backend("connection reset"))
        }
    }

    fn widget(id: i64) -> Widget {
        Widget { id, label: format!("w{id}") }
    }

    #[test]
    fn first_missing_field_is_reported() {
        let err = RequiredFields::new()
            .field("name", "ok")
            .field("id", &0_i64)
            .field("code", "")
            .check()
            .unwrap_err();
        assert_eq!(err, ServiceError::ZeroValue("id"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let err = RequiredFields::new().field("name", "   ").check().unwrap_err();
        assert_eq!(err, ServiceError::ZeroValue("name"));
    }

    #[test]
    fn presence_fields_accept_zero() {
        RequiredFields::new()
            .field("current_temperature", &Some(0.0_f64))
            .check()
            .unwrap();
        let err = RequiredFields::new()
            .field("current_temperature", &None::<f64>)
            .check()
            .unwrap_err();
        assert_eq!(err, ServiceError::ZeroValue("current_temperature"));
    }

    #[test]
    fn patched_fields_only_checked_when_set() {
        RequiredFields::new()
            .patched("first_name", &Patch::<String>::Unset)
            .check()
            .unwrap();
        let err = RequiredFields::new()
            .patched("first_name", &Patch::Set(String::new()))
            .check()
            .unwrap_err();
        assert_eq!(err, ServiceError::ZeroValue("first_name"));
    }

    #[test]
    fn temperature_floor() {
        ensure_temperature("minimum_temperature", ABSOLUTE_ZERO_CELSIUS).unwrap();
        let err = ensure_temperature("minimum_temperature", -300.0).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn both_absence_signals_read_as_dependency_not_found() {
        let expected = ServiceError::dependency_not_found("widget", "id: 9");
        assert_eq!(ensure_exists::<Widget, _>(&Strict(vec![widget(1)]), 9).unwrap_err(), expected);
        assert_eq!(ensure_exists::<Widget, _>(&Lenient(vec![widget(1)]), 9).unwrap_err(), expected);
        assert_eq!(ensure_exists::<Widget, _>(&Lenient(vec![widget(1)]), 1).unwrap(), widget(1));
    }

    #[test]
    fn infrastructure_failure_is_internal() {
        let err = ensure_exists::<Widget, _>(&Broken, 1).unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn primary_entity_absence_is_not_found() {
        let err = require_found::<Widget, _>(&Strict(vec![]), 3).unwrap_err();
        assert_eq!(err, ServiceError::not_found("widget"));
    }
}
