//! Line and order totals.
//!
//! Totals are derived on read and never stored. Each order item carries its
//! own price snapshot, so a later change to `products.price` never alters the
//! total of an existing order.

use rust_decimal::Decimal;

/// Total for one order item: `unit_price × quantity`.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of line totals over `(unit_price, quantity)` pairs. Zero for no items.
#[must_use]
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(unit_price, quantity)| line_total(unit_price, quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(1999, 2), 3), Decimal::new(5997, 2));
    }

    #[test]
    fn test_order_total_sums_lines() {
        let lines = [
            (Decimal::new(1050, 2), 2),
            (Decimal::new(399, 2), 1),
            (Decimal::new(100, 2), 5),
        ];
        // 21.00 + 3.99 + 5.00
        assert_eq!(order_total(lines), Decimal::new(2999, 2));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(std::iter::empty()), Decimal::ZERO);
    }
}
