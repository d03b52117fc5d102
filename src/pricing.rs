//! Work-order totals.
//!
//! Rounding is half-up at the cents boundary and happens once per aggregate
//! (subtotal, then tax), never per line; per-line rounding drifts by pennies
//! and the financial reports would stop reconciling with stored totals.

/// One priced line: a part or labor snapshot with its quantity.
/// Labor quantity may be fractional (quarter-hour steps), parts are integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItemInput {
    pub unit_cost_cents: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

/// Compute subtotal, tax and total in integer cents.
///
/// Lines with a non-positive quantity contribute nothing; callers drop
/// incomplete rows (no part/labor selected) before they reach this point.
pub fn compute_totals(items: &[LineItemInput], tax_rate: f64) -> Totals {
    let raw_subtotal: f64 = items
        .iter()
        .filter(|item| item.quantity > 0.0)
        .map(|item| item.unit_cost_cents as f64 * item.quantity)
        .sum();

    let subtotal_cents = round_half_up(raw_subtotal);
    let tax_cents = round_half_up(subtotal_cents as f64 * tax_rate);

    Totals {
        subtotal_cents,
        tax_cents,
        total_cents: subtotal_cents + tax_cents,
    }
}

/// Half-up rounding at the cents boundary. Amounts are non-negative here,
/// so `floor(x + 0.5)` is exactly half-up. Reports use the same policy so
/// their aggregates reconcile with stored totals.
pub fn round_half_up(amount: f64) -> i64 {
    (amount + 0.5).floor() as i64
}

/// A part quantity must be a whole number.
pub fn is_valid_part_quantity(quantity: f64) -> bool {
    quantity > 0.0 && quantity.fract() == 0.0
}

/// Labor is booked in quarter-hour increments.
pub fn is_valid_labor_quantity(quantity: f64) -> bool {
    quantity > 0.0 && (quantity * 4.0).fract() == 0.0
}

/// Tax rate is a fraction, e.g. 0.0825.
pub fn is_valid_tax_rate(tax_rate: f64) -> bool {
    tax_rate.is_finite() && (0.0..1.0).contains(&tax_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_cost_cents: i64, quantity: f64) -> LineItemInput {
        LineItemInput {
            unit_cost_cents,
            quantity,
        }
    }

    #[test]
    fn worked_example_from_the_receipt() {
        // Part $10.00 x 2, labor $50.00 x 1.5h, 8.25% tax.
        let totals = compute_totals(&[line(1000, 2.0), line(5000, 1.5)], 0.0825);
        assert_eq!(totals.subtotal_cents, 9500);
        assert_eq!(totals.tax_cents, 784);
        assert_eq!(totals.total_cents, 10284);
    }

    #[test]
    fn total_is_subtotal_plus_tax() {
        let cases = [
            (vec![], 0.0),
            (vec![line(1, 1.0)], 0.0825),
            (vec![line(333, 3.0), line(4999, 0.25)], 0.07),
            (vec![line(123456, 7.0), line(50, 1.75)], 0.10),
        ];
        for (items, rate) in cases {
            let totals = compute_totals(&items, rate);
            assert_eq!(totals.total_cents, totals.subtotal_cents + totals.tax_cents);
        }
    }

    #[test]
    fn subtotal_is_order_independent() {
        let forward = [line(199, 4.0), line(2500, 1.25), line(899, 2.0)];
        let mut reversed = forward;
        reversed.reverse();
        assert_eq!(
            compute_totals(&forward, 0.0825),
            compute_totals(&reversed, 0.0825)
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let items = [line(1099, 3.0), line(7500, 0.5)];
        assert_eq!(compute_totals(&items, 0.06), compute_totals(&items, 0.06));
    }

    #[test]
    fn rounds_half_up_once_per_aggregate() {
        // Per-line rounding would give 33 + 33 = 66; a single pass gives 67.
        let totals = compute_totals(&[line(133, 0.25), line(133, 0.25)], 0.0);
        assert_eq!(totals.subtotal_cents, 67);

        // 100 * 0.005 = 0.5 tax cents rounds up, not to even.
        let totals = compute_totals(&[line(100, 1.0)], 0.005);
        assert_eq!(totals.tax_cents, 1);
    }

    #[test]
    fn non_positive_quantities_contribute_zero() {
        let totals = compute_totals(&[line(1000, 0.0), line(1000, -2.0), line(500, 1.0)], 0.0);
        assert_eq!(totals.subtotal_cents, 500);
    }

    #[test]
    fn empty_order_totals_zero() {
        let totals = compute_totals(&[], 0.0825);
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn quantity_validators() {
        assert!(is_valid_part_quantity(3.0));
        assert!(!is_valid_part_quantity(1.5));
        assert!(!is_valid_part_quantity(0.0));
        assert!(is_valid_labor_quantity(1.75));
        assert!(!is_valid_labor_quantity(1.1));
        assert!(is_valid_tax_rate(0.0825));
        assert!(!is_valid_tax_rate(1.0));
        assert!(!is_valid_tax_rate(-0.01));
    }
}
