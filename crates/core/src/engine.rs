//! Filter/aggregate engine.

use crate::order::{Criterion, Order};

/// Sum of `price * quantity` over the orders selected by `criterion`.
///
/// Pure and deterministic; an empty selection sums to `0.0`.
pub fn compute(orders: &[Order], criterion: Criterion) -> f64 {
    orders
        .iter()
        .filter(|o| criterion.matches(o.status()))
        .fold(0.0, |acc, o| acc + o.line_total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-6;

    fn order(id: i64, item: &str, quantity: i64, price: f64, status: OrderStatus) -> Order {
        Order::new(id, item, quantity, price, status).unwrap()
    }

    fn base_orders() -> Vec<Order> {
        vec![
            order(1, "Laptop", 1, 999.99, OrderStatus::Completed),
            order(2, "Smartphone", 2, 499.95, OrderStatus::Pending),
            order(3, "Headphones", 3, 99.90, OrderStatus::Completed),
            order(4, "Mouse", 4, 24.99, OrderStatus::Canceled),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn completed_orders_total() {
        assert_close(compute(&base_orders(), Criterion::Completed), 1299.69);
    }

    #[test]
    fn pending_orders_total_with_extra_lines() {
        let mut orders = base_orders();
        orders.push(order(13, "Cucumber", 10, 1.20, OrderStatus::Pending));
        orders.push(order(21, "Gold Ingot", 3, 125.80, OrderStatus::Canceled));

        assert_close(compute(&orders, Criterion::Pending), 1011.90);
    }

    #[test]
    fn wildcard_sums_every_order() {
        let orders = vec![
            order(4, "Mouse", 4, 24.99, OrderStatus::Canceled),
            order(21, "Gold Ingot", 3, 125.80, OrderStatus::Canceled),
        ];
        assert_close(compute(&orders, Criterion::All), 477.36);
    }

    #[test]
    fn empty_and_unmatched_sum_to_zero() {
        for c in [Criterion::Completed, Criterion::Pending, Criterion::Canceled, Criterion::All] {
            assert_eq!(compute(&[], c).to_bits(), 0.0f64.to_bits());
        }

        let orders = vec![
            order(1, "Laptop", 1, 999.99, OrderStatus::Completed),
            order(2, "Smartphone", 2, 499.95, OrderStatus::Completed),
        ];
        assert_eq!(compute(&orders, Criterion::Pending), 0.0);
    }

    #[test]
    fn negative_quantity_reduces_total() {
        let orders = vec![
            order(1, "Laptop", 2, 10.0, OrderStatus::Completed),
            order(2, "Return", -1, 10.0, OrderStatus::Completed),
        ];
        assert_close(compute(&orders, Criterion::Completed), 10.0);
    }

    #[test]
    fn compute_is_deterministic() {
        let orders = base_orders();
        let a = compute(&orders, Criterion::All);
        let b = compute(&orders, Criterion::All);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    fn status_strategy() -> impl Strategy<Value = OrderStatus> {
        prop_oneof![
            Just(OrderStatus::Completed),
            Just(OrderStatus::Pending),
            Just(OrderStatus::Canceled),
        ]
    }

    fn orders_strategy() -> impl Strategy<Value = Vec<Order>> {
        prop::collection::vec(
            (0i64..1_000, 0.0f64..10_000.0, status_strategy()),
            0..32,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (qty, price, status))| order(i as i64, "item", qty, price, status))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// The wildcard total equals the plain sum over every order.
        #[test]
        fn wildcard_equals_unfiltered_sum(orders in orders_strategy()) {
            let expected: f64 = orders.iter().map(|o| o.price() * o.quantity() as f64).sum();
            let actual = compute(&orders, Criterion::All);
            prop_assert!((actual - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }

        /// The three status subsets are disjoint and cover the wildcard total.
        #[test]
        fn status_subsets_partition_the_total(orders in orders_strategy()) {
            let parts = compute(&orders, Criterion::Completed)
                + compute(&orders, Criterion::Pending)
                + compute(&orders, Criterion::Canceled);
            let all = compute(&orders, Criterion::All);
            prop_assert!((parts - all).abs() <= 1e-6 * all.abs().max(1.0));
        }

        /// A named criterion only ever counts orders with that status.
        #[test]
        fn named_criterion_counts_only_its_status(orders in orders_strategy()) {
            let expected = orders
                .iter()
                .filter(|o| o.status() == OrderStatus::Pending)
                .fold(0.0, |acc, o| acc + o.line_total());
            prop_assert_eq!(compute(&orders, Criterion::Pending).to_bits(), expected.to_bits());
        }
    }
}
