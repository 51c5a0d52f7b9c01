//! Monetary helpers shared by every pass.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Debts at or below this amount are treated as settled.
pub const EPSILON: Decimal = dec!(0.01);

/// Number of decimal places kept in reported amounts.
pub const CENT_PLACES: u32 = 2;

/// Largest item total the engine accepts. Items above it, or whose total
/// cannot be represented at all, are treated as void.
///
/// At this size sums over any realistic number of items stay far below
/// `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000_000);

/// Round to cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether `amount` is large enough to count as a real debt.
pub fn is_significant(amount: Decimal) -> bool {
    amount > EPSILON
}

/// Serialize a decimal as a JSON number instead of a string.
pub(crate) fn serialize_number<S: serde::Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    rust_decimal::serde::float::serialize(value, serializer)
}

/// Borrowed decimal that serializes as a JSON number, for map values.
pub(crate) struct AsNumber<'a>(pub &'a Decimal);

impl serde::Serialize for AsNumber<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}
