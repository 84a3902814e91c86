use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Lifecycle state of a single order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
    Canceled,
}

impl OrderStatus {
    pub const PERMITTED: &'static str = "'completed', 'pending', 'canceled'";

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Pending => "pending",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(OrderStatus::Completed),
            "pending" => Ok(OrderStatus::Pending),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(DomainError::UnknownSymbol {
                value: other.to_string(),
                permitted: Self::PERMITTED,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter selector for a request.
///
/// Deliberately a separate type from [`OrderStatus`]: `All` is a wildcard and
/// must never be accepted as an order's own status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Completed,
    Pending,
    Canceled,
    All,
}

impl Criterion {
    pub const PERMITTED: &'static str = "'completed', 'pending', 'canceled', 'all'";

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Completed => "completed",
            Criterion::Pending => "pending",
            Criterion::Canceled => "canceled",
            Criterion::All => "all",
        }
    }

    /// Whether an order with `status` is selected by this criterion.
    pub fn matches(&self, status: OrderStatus) -> bool {
        matches!(
            (self, status),
            (Criterion::All, _)
                | (Criterion::Completed, OrderStatus::Completed)
                | (Criterion::Pending, OrderStatus::Pending)
                | (Criterion::Canceled, OrderStatus::Canceled)
        )
    }
}

impl FromStr for Criterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Criterion::Completed),
            "pending" => Ok(Criterion::Pending),
            "canceled" => Ok(Criterion::Canceled),
            "all" => Ok(Criterion::All),
            other => Err(DomainError::UnknownSymbol {
                value: other.to_string(),
                permitted: Self::PERMITTED,
            }),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order line as submitted by the client.
///
/// Immutable once built. Field order here is the serialization order used for
/// cache keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: i64,
    item: String,
    quantity: i64,
    price: f64,
    status: OrderStatus,
}

impl Order {
    /// Checked constructor.
    ///
    /// `quantity` is taken as-is (negative values included); `id` uniqueness
    /// is not checked.
    pub fn new(
        id: i64,
        item: impl Into<String>,
        quantity: i64,
        price: f64,
        status: OrderStatus,
    ) -> DomainResult<Self> {
        let item = item.into();
        if item.is_empty() {
            return Err(DomainError::EmptyItem);
        }
        Self::check_price(price)?;

        Ok(Self {
            id,
            item,
            quantity,
            price,
            status,
        })
    }

    pub fn check_price(price: f64) -> DomainResult<()> {
        if !price.is_finite() {
            return Err(DomainError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(DomainError::NegativePrice(price));
        }
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// `price * quantity` in floating point.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
