use crate::core::person::PersonName;
use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected by [`validate_activities`](crate::core::activity::validate_activities).
///
/// The engine itself never fails: it clamps odd values instead. Validation
/// is an opt-in step for callers that would rather refuse bad records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("activity '{activity}' has no payer")]
    MissingPayer { activity: String },
    #[error("item '{item}' in activity '{activity}' has negative price {price}")]
    NegativePrice {
        activity: String,
        item: String,
        price: Decimal,
    },
    #[error("item '{item}' in activity '{activity}' has negative quantity {quantity}")]
    NegativeQuantity {
        activity: String,
        item: String,
        quantity: Decimal,
    },
    #[error("item '{item}' in activity '{activity}' has negative tax percentage {tax}")]
    NegativeTax {
        activity: String,
        item: String,
        tax: Decimal,
    },
    #[error("item '{item}' in activity '{activity}' has negative discount {discount}")]
    NegativeDiscount {
        activity: String,
        item: String,
        discount: Decimal,
    },
    #[error("item '{item}' in activity '{activity}' has a total out of range")]
    AmountOverflow { activity: String, item: String },
    #[error("item '{item}' in activity '{activity}' lists {member} more than once")]
    DuplicateMember {
        activity: String,
        item: String,
        member: PersonName,
    },
}

/// A settlement mode name that is neither `optimized` nor `greedy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown settlement mode '{0}': expected 'optimized' or 'greedy'")]
pub struct UnknownModeError(pub String);
