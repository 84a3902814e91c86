//! Domain and request error model.

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised by the checked constructors in [`crate::order`]. The request
/// validator maps each variant onto the field it concerns.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Price below zero.
    #[error("price must be greater than or equal to 0")]
    NegativePrice(f64),

    /// Price is NaN or infinite.
    #[error("price must be a finite number")]
    NonFinitePrice,

    /// The selected orders sum past the range of `f64`.
    #[error("total of the selected orders is not a finite number")]
    NonFiniteTotal,

    /// Item label is an empty string.
    #[error("item must not be empty")]
    EmptyItem,

    /// A string did not name a member of a closed enumeration.
    #[error("value is not a valid enumeration member; permitted: {permitted}")]
    UnknownSymbol {
        value: String,
        permitted: &'static str,
    },
}

/// Machine-readable classification of a rejected request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Body is not well-formed JSON.
    ParseError,
    /// A required field is absent.
    Missing,
    /// A field has the wrong JSON type.
    TypeMismatch,
    /// A field has the right type but an out-of-range value.
    ValueError,
    /// A string is not a member of the expected enumeration.
    EnumError,
}

/// One step of a field path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path to the offending value, rooted at `body`
/// (e.g. `["body", "orders", 1, "price"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Location(Vec<PathSegment>);

impl Location {
    pub fn body() -> Self {
        Self(vec![PathSegment::Key("body".to_string())])
    }

    pub fn key(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Key(key.to_string()));
        next
    }

    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Index(index));
        next
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match seg {
                PathSegment::Key(k) => f.write_str(k)?,
                PathSegment::Index(n) => write!(f, "{n}")?,
            }
        }
        Ok(())
    }
}

/// A single rejected field.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
#[error("{location}: {message}")]
pub struct FieldError {
    pub location: Location,
    pub message: String,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn new(location: Location, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            kind,
        }
    }

    pub fn missing(location: Location) -> Self {
        Self::new(location, ErrorKind::Missing, "field required")
    }

    pub fn type_mismatch(location: Location, expected: &str) -> Self {
        Self::new(
            location,
            ErrorKind::TypeMismatch,
            format!("value is not a valid {expected}"),
        )
    }

    /// Map a domain invariant failure onto the field it concerns.
    pub fn from_domain(location: Location, err: &DomainError) -> Self {
        let kind = match err {
            DomainError::UnknownSymbol { .. } => ErrorKind::EnumError,
            DomainError::NegativePrice(_)
            | DomainError::NonFinitePrice
            | DomainError::NonFiniteTotal
            | DomainError::EmptyItem => ErrorKind::ValueError,
        };
        Self::new(location, kind, err.to_string())
    }

    /// Build a parse failure located at the byte offset the JSON parser stopped at.
    pub fn parse(input: &[u8], err: &serde_json::Error) -> Self {
        let offset = byte_offset(input, err.line(), err.column());
        Self::new(
            Location::body().index(offset),
            ErrorKind::ParseError,
            err.to_string(),
        )
    }
}

// serde_json reports 1-based line/column; column 0 means "before the first byte".
fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = input
        .split_inclusive(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(<[u8]>::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(input.len())
}

/// Why a request body was rejected.
///
/// A parse failure short-circuits all field validation; validation failures
/// carry every violation found, first-found first.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("malformed request body: {0}")]
    Parse(FieldError),

    #[error("request failed validation ({} error(s))", .0.len())]
    Invalid(Vec<FieldError>),
}

impl RequestError {
    pub fn details(&self) -> &[FieldError] {
        match self {
            RequestError::Parse(e) => core::slice::from_ref(e),
            RequestError::Invalid(errs) => errs,
        }
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.details().first()
    }
}
