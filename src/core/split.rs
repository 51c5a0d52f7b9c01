//! Cent-exact equal splitting of a single amount.
//!
//! Dividing 100 000 among three people gives 33 333.333...; rounding each
//! share to cents would lose a cent overall. Shares here are floored to
//! cents and the leftover cents go to the first selected person, so the
//! shares always add back up to the total.

use crate::core::amount::{round_cents, serialize_number, CENT_PLACES};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Split `total` into `count` shares that sum exactly to `total` (in cents).
///
/// Returns an empty vector for zero people and all zeros for a zero total.
///
/// # Examples
///
/// ```
/// use split_engine::core::split::split_equal;
/// use rust_decimal_macros::dec;
///
/// let shares = split_equal(dec!(100_000), 3);
/// assert_eq!(shares, vec![dec!(33_333.34), dec!(33_333.33), dec!(33_333.33)]);
/// ```
pub fn split_equal(total: Decimal, count: usize) -> Vec<Decimal> {
    split_selected(total, &vec![true; count])
}

/// Split `total` among the people whose flag in `selected` is set.
///
/// The result has one share per flag. Unselected people owe nothing; the
/// first selected person absorbs the rounding remainder. With nobody
/// selected, or a zero total, every share is zero.
///
/// ```
/// use split_engine::core::split::split_selected;
/// use rust_decimal_macros::dec;
///
/// let shares = split_selected(dec!(100), &[false, true, true, true]);
/// assert_eq!(shares, vec![dec!(0), dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
pub fn split_selected(total: Decimal, selected: &[bool]) -> Vec<Decimal> {
    let count = selected.iter().filter(|s| **s).count();
    if count == 0 || total.is_zero() {
        return vec![Decimal::ZERO; selected.len()];
    }

    let people = Decimal::from(count);
    let base = (total / people).round_dp_with_strategy(CENT_PLACES, RoundingStrategy::ToNegativeInfinity);
    let remainder = round_cents(total - base * people);

    let mut first = true;
    selected
        .iter()
        .map(|is_selected| match (*is_selected, first) {
            (false, _) => Decimal::ZERO,
            (true, true) => {
                first = false;
                round_cents(base + remainder)
            }
            (true, false) => base,
        })
        .collect()
}

/// Outcome of [`validate_split_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitCheck {
    pub is_valid: bool,
    #[serde(serialize_with = "serialize_number")]
    pub actual_total: Decimal,
    /// `expected - actual`; positive means money is missing.
    #[serde(serialize_with = "serialize_number")]
    pub difference: Decimal,
    /// Human readable verdict.
    pub message: String,
}

/// Check that a set of shares adds up to the expected total, in cents.
pub fn validate_split_total(shares: &[Decimal], expected: Decimal) -> SplitCheck {
    let actual_total = round_cents(shares.iter().sum());
    let difference = round_cents(expected - actual_total);
    let message = if difference.is_zero() {
        "Split calculation is accurate".to_string()
    } else {
        let kind = if difference > Decimal::ZERO { "missing" } else { "extra" };
        format!("Split has {} {}", kind, difference.abs())
    };
    SplitCheck {
        is_valid: difference.is_zero(),
        actual_total,
        difference,
        message,
    }
}
