//! `ordersum-core` — order totals domain.
//!
//! This crate contains **pure domain** logic (no infrastructure concerns):
//! the order model, request validation, and the filter/aggregate engine.

pub mod engine;
pub mod error;
pub mod order;
pub mod request;

pub use engine::compute;
pub use error::{DomainError, DomainResult, ErrorKind, FieldError, Location, PathSegment, RequestError};
pub use order::{Criterion, Order, OrderStatus};
pub use request::ProcessRequest;
