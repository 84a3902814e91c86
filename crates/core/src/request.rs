//! Request envelope and its validators.
//!
//! Validation runs over a parsed `serde_json::Value` rather than a derived
//! `Deserialize` so that every violation can be reported with its full path
//! and kind, in field declaration order.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine;
use crate::error::{DomainError, FieldError, Location, RequestError};
use crate::order::{Criterion, Order, OrderStatus};

/// Validated request: the orders to total and the filter to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRequest {
    orders: Vec<Order>,
    criterion: Criterion,
}

impl ProcessRequest {
    pub fn new(orders: Vec<Order>, criterion: Criterion) -> Self {
        Self { orders, criterion }
    }

    /// Parse and validate a raw request body.
    ///
    /// Syntax errors are reported alone, before any field is looked at.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RequestError::Parse(FieldError::parse(body, &e)))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed envelope.
    ///
    /// A request whose selected orders overflow `f64` is rejected at
    /// `body.orders`, so an accepted request always has a finite total.
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let root = Location::body();
        let Some(obj) = value.as_object() else {
            return Err(RequestError::Invalid(vec![FieldError::type_mismatch(root, "dict")]));
        };

        let mut errors = Vec::new();
        let orders = validate_orders(obj, &root, &mut errors);
        let criterion = validate_criterion(obj, &root, &mut errors);

        match (orders, criterion) {
            (Some(orders), Some(criterion)) if errors.is_empty() => {
                let request = Self { orders, criterion };
                if !request.total().is_finite() {
                    return Err(RequestError::Invalid(vec![FieldError::from_domain(
                        root.key("orders"),
                        &DomainError::NonFiniteTotal,
                    )]));
                }
                Ok(request)
            }
            _ => Err(RequestError::Invalid(errors)),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Total value of the orders selected by the criterion.
    pub fn total(&self) -> f64 {
        engine::compute(&self.orders, self.criterion)
    }
}

fn validate_orders(
    obj: &Map<String, Value>,
    root: &Location,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<Order>> {
    let loc = root.key("orders");
    let items = match obj.get("orders") {
        None => {
            errors.push(FieldError::missing(loc));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FieldError::type_mismatch(loc, "list"));
            return None;
        }
    };

    let before = errors.len();
    let orders: Vec<Order> = items
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| validate_order(raw, &loc.index(i), errors))
        .collect();

    (errors.len() == before).then_some(orders)
}

fn validate_criterion(
    obj: &Map<String, Value>,
    root: &Location,
    errors: &mut Vec<FieldError>,
) -> Option<Criterion> {
    let raw = required_str(obj, "criterion", root, errors)?;
    match raw.parse::<Criterion>() {
        Ok(c) => Some(c),
        Err(e) => {
            errors.push(FieldError::from_domain(root.key("criterion"), &e));
            None
        }
    }
}

/// Validate one order. Every field is checked so that all violations surface,
/// in declaration order: `id`, `item`, `quantity`, `price`, `status`.
fn validate_order(raw: &Value, loc: &Location, errors: &mut Vec<FieldError>) -> Option<Order> {
    let Some(obj) = raw.as_object() else {
        errors.push(FieldError::type_mismatch(loc.clone(), "dict"));
        return None;
    };

    let before = errors.len();

    let id = required_int(obj, "id", loc, errors);

    let item = required_str(obj, "item", loc, errors);
    if item == Some("") {
        errors.push(FieldError::from_domain(
            loc.key("item"),
            &DomainError::EmptyItem,
        ));
    }

    let quantity = required_int(obj, "quantity", loc, errors);

    let price = required_float(obj, "price", loc, errors);
    if let Some(p) = price {
        if let Err(e) = Order::check_price(p) {
            errors.push(FieldError::from_domain(loc.key("price"), &e));
        }
    }

    let status = required_str(obj, "status", loc, errors).and_then(|s| {
        s.parse::<OrderStatus>()
            .map_err(|e| errors.push(FieldError::from_domain(loc.key("status"), &e)))
            .ok()
    });

    if errors.len() != before {
        return None;
    }

    let (Some(id), Some(item), Some(quantity), Some(price), Some(status)) =
        (id, item, quantity, price, status)
    else {
        return None;
    };

    match Order::new(id, item, quantity, price, status) {
        Ok(order) => Some(order),
        Err(e) => {
            errors.push(FieldError::from_domain(loc.clone(), &e));
            None
        }
    }
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    parent: &Location,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let loc = parent.key(field);
    match obj.get(field) {
        None => {
            errors.push(FieldError::missing(loc));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(FieldError::type_mismatch(loc, "string"));
            None
        }
    }
}

fn required_int(
    obj: &Map<String, Value>,
    field: &str,
    parent: &Location,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let loc = parent.key(field);
    match obj.get(field) {
        None => {
            errors.push(FieldError::missing(loc));
            None
        }
        Some(v) => match v.as_i64() {
            Some(n) => Some(n),
            None => {
                errors.push(FieldError::type_mismatch(loc, "integer"));
                None
            }
        },
    }
}

fn required_float(
    obj: &Map<String, Value>,
    field: &str,
    parent: &Location,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let loc = parent.key(field);
    match obj.get(field) {
        None => {
            errors.push(FieldError::missing(loc));
            None
        }
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.push(FieldError::type_mismatch(loc, "float"));
                None
            }
        },
    }
}
