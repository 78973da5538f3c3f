//! Entity trait: identity + a well-known name for error reporting.

/// A stored row with an integer identity.
///
/// `Default` doubles as the "blank" value some collaborators hand back
/// instead of a not-found error; see [`crate::validate::presence`].
pub trait Entity: Default + PartialEq {
    /// Lower-case name used in error messages (`"section"`, `"warehouse"`).
    const NAME: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> i64;

    /// True when this value is indistinguishable from `Default`.
    fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
