use crate::core::amount::{serialize_number, MAX_AMOUNT};
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchased line within an activity.
///
/// `price` is the unit price; tax is a percentage applied to the
/// pre-tax subtotal and the discount is an absolute amount taken off after
/// tax. The resulting total is shared equally by `member_names`.
///
/// An item nobody consumed (`member_names` empty) carries no obligation
/// at all: it contributes nothing to settlements, consumption or totals.
/// The same holds for an item whose total overflows or exceeds
/// [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use split_engine::core::item::Item;
/// use rust_decimal_macros::dec;
///
/// let item = Item::new("Nasi Goreng", dec!(100_000), dec!(1), ["Alice", "Bob"])
///     .with_tax(dec!(10));
///
/// assert_eq!(item.total(), dec!(110_000));
/// assert_eq!(item.share_per_consumer(), dec!(55_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display only.
    #[serde(default)]
    pub item_name: String,
    #[serde(serialize_with = "serialize_number")]
    pub price: Decimal,
    #[serde(serialize_with = "serialize_number")]
    pub quantity: Decimal,
    #[serde(default, serialize_with = "serialize_number")]
    pub tax_percentage: Decimal,
    #[serde(default, serialize_with = "serialize_number")]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub member_names: Vec<PersonName>,
}

impl Item {
    pub fn new<I, N>(item_name: impl Into<String>, price: Decimal, quantity: Decimal, members: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<PersonName>,
    {
        Self {
            item_name: item_name.into(),
            price,
            quantity,
            tax_percentage: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            member_names: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the tax percentage (10 means 10%).
    pub fn with_tax(mut self, tax_percentage: Decimal) -> Self {
        self.tax_percentage = tax_percentage;
        self
    }

    /// Set the absolute discount, applied after tax.
    pub fn with_discount(mut self, discount_amount: Decimal) -> Self {
        self.discount_amount = discount_amount;
        self
    }

    /// True when the item carries no obligation: nobody consumed it, or
    /// its total is out of range.
    pub fn is_void(&self) -> bool {
        self.resolved_total().is_none()
    }

    /// Total cost after tax and discount, never negative.
    ///
    /// Void items total zero.
    pub fn total(&self) -> Decimal {
        self.resolved_total().unwrap_or(Decimal::ZERO)
    }

    /// The amount each consumer owes for this item, unrounded.
    pub fn share_per_consumer(&self) -> Decimal {
        match self.resolved_total() {
            Some(total) => total / Decimal::from(self.member_names.len()),
            None => Decimal::ZERO,
        }
    }

    /// Total after tax and discount, clamped at zero, regardless of who
    /// consumed it. `None` when an intermediate step overflows or the
    /// result exceeds [`MAX_AMOUNT`].
    pub fn checked_total(&self) -> Option<Decimal> {
        let item_total = self.price.checked_mul(self.quantity)?;
        let rate = Decimal::ONE.checked_add(self.tax_percentage.checked_div(Decimal::ONE_HUNDRED)?)?;
        let after_tax = item_total.checked_mul(rate)?;
        let total = after_tax.checked_sub(self.discount_amount)?.max(Decimal::ZERO);
        (total <= MAX_AMOUNT).then_some(total)
    }

    fn resolved_total(&self) -> Option<Decimal> {
        if self.member_names.is_empty() {
            return None;
        }
        self.checked_total()
    }
}
