//! Service error taxonomy.
//!
//! Every validation, resolution and write path in the service layer reports
//! exactly one [`ServiceError`] kind. The HTTP layer turns the kind into a
//! status code with [`ServiceError::status_code`] and uses the `Display`
//! output (`"<kind>: <detail>"`) as the response message.

use thiserror::Error;

/// Result type used across the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type returned by repository collaborators.
pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic failure reported by a service operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed request body or path/query parameter.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A domain rule rejected otherwise well-formed input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required attribute was empty, zero or absent.
    #[error("zero value: {0} is required")]
    ZeroValue(&'static str),

    /// The request carried no usable fields.
    #[error("empty arguments: no fields provided")]
    EmptyArguments,

    /// The store rejected a write after validation passed (422 policy).
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Uniqueness violation on `attr` of `entity`.
    #[error("conflict: {entity} with {attr} already exists")]
    Conflict { entity: &'static str, attr: String },

    /// A referenced foreign entity does not exist.
    #[error("dependency not found: {entity} with {reference}")]
    DependencyNotFound {
        entity: &'static str,
        reference: String,
    },

    /// The entity the operation targets does not exist.
    #[error("not found: {entity}")]
    NotFound { entity: &'static str },

    /// Unclassified collaborator failure.
    #[error("internal: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(entity: &'static str, attr: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            attr: attr.into(),
        }
    }

    pub fn dependency_not_found(entity: &'static str, reference: impl Into<String>) -> Self {
        Self::DependencyNotFound {
            entity,
            reference: reference.into(),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Numeric HTTP status for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidFormat(_) | Self::BadRequest(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::ZeroValue(_)
            | Self::EmptyArguments
            | Self::InvalidArguments(_)
            | Self::DependencyNotFound { .. } => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Translate a collaborator error that carries no recognized meaning.
    pub fn from_store(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }

    /// Translate a failed create/update for `entity`.
    ///
    /// A unique-constraint signal from the store becomes `Conflict` on `attr`,
    /// so a request that lost a check-then-insert race still reports 409.
    pub fn from_write(entity: &'static str, attr: impl Into<String>, err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::conflict(entity, attr),
            StoreError::NotFound => Self::not_found(entity),
            StoreError::Backend(msg) => Self::Internal(msg),
        }
    }
}

/// Failure reported by a repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Anything else (connection loss, malformed row, …).
    #[error("storage failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn conflict(constraint: impl Into<String>) -> Self {
        Self::Conflict(constraint.into())
    }
}

/// How an entity reports a delete that fails after its existence check.
///
/// The mapping differs per entity and is kept as-is: employees and buyers
/// answer 422, everyone else 500.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeleteFailure {
    InvalidArguments,
    Internal,
}

impl DeleteFailure {
    pub fn translate(self, entity: &'static str, err: StoreError) -> ServiceError {
        match (self, err) {
            (_, StoreError::NotFound) => ServiceError::not_found(entity),
            (Self::InvalidArguments, err) => {
                ServiceError::InvalidArguments(format!("{entity} could not be deleted: {err}"))
            }
            (Self::Internal, err) => ServiceError::Internal(err.to_string()),
        }
    }
}
