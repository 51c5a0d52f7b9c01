use crate::core::amount::{round_cents, AsNumber, EPSILON};
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net position of each person.
///
/// A positive balance means the person is owed money (net creditor),
/// a negative balance means they owe (net debtor). Whatever route the
/// settlements take, every person must end up moving exactly this much.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(with = "positions_serde")]
    positions: BTreeMap<PersonName, Decimal>,
}

/// Positions as a `{"name": amount}` object with numeric amounts.
mod positions_serde {
    use super::*;
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        positions: &BTreeMap<PersonName, Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(positions.len()))?;
        for (person, amount) in positions {
            map.serialize_entry(person, &AsNumber(amount))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<PersonName, Decimal>, D::Error> {
        BTreeMap::<PersonName, Decimal>::deserialize(deserializer)
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `debtor` owes `creditor` the given amount.
    pub fn apply_debt(&mut self, debtor: &PersonName, creditor: &PersonName, amount: Decimal) {
        self.debit(debtor, amount);
        self.credit(creditor, amount);
    }

    /// Increase a person's position (they paid, or are owed).
    pub fn credit(&mut self, person: &PersonName, amount: Decimal) {
        *self.positions.entry(person.clone()).or_insert(Decimal::ZERO) += amount;
    }

    /// Decrease a person's position (they consumed, or owe).
    pub fn debit(&mut self, person: &PersonName, amount: Decimal) {
        *self.positions.entry(person.clone()).or_insert(Decimal::ZERO) -= amount;
    }

    /// Make sure a person appears even with a zero position.
    pub fn touch(&mut self, person: &PersonName) {
        self.positions.entry(person.clone()).or_insert(Decimal::ZERO);
    }

    pub fn position(&self, person: &PersonName) -> Decimal {
        self.positions.get(person).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn positions(&self) -> &BTreeMap<PersonName, Decimal> {
        &self.positions
    }

    /// Whether the positions sum to zero within `tolerance`.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        let sum: Decimal = self.positions.values().sum();
        sum.abs() <= tolerance
    }

    /// Total amount that has to change hands: the sum of the positive
    /// positions, which equals the sum of the absolute negative ones.
    pub fn total_net_settlement(&self) -> Decimal {
        self.positions
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }

    /// True when every position of `other` is within `tolerance` of ours.
    pub fn matches(&self, other: &Ledger, tolerance: Decimal) -> bool {
        self.positions
            .keys()
            .chain(other.positions.keys())
            .all(|person| (self.position(person) - other.position(person)).abs() <= tolerance)
    }

    /// People whose balance is effectively zero.
    pub fn settled(&self) -> Vec<&PersonName> {
        self.positions
            .iter()
            .filter(|(_, amount)| round_cents(**amount).abs() <= EPSILON)
            .map(|(person, _)| person)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn name(s: &str) -> PersonName {
        PersonName::new(s)
    }

    #[test]
    fn test_ledger_basic() {
        let mut ledger = Ledger::new();
        ledger.apply_debt(&name("A"), &name("B"), dec!(100));

        assert_eq!(ledger.position(&name("A")), dec!(-100));
        assert_eq!(ledger.position(&name("B")), dec!(100));
        assert_eq!(ledger.position(&name("C")), Decimal::ZERO);
    }

    #[test]
    fn test_ledger_balanced() {
        let mut ledger = Ledger::new();
        ledger.apply_debt(&name("A"), &name("B"), dec!(100));
        ledger.apply_debt(&name("B"), &name("A"), dec!(60));
        assert!(ledger.is_balanced(Decimal::ZERO));
        assert_eq!(ledger.total_net_settlement(), dec!(40));
    }

    #[test]
    fn test_ledger_circular_cancels() {
        let mut ledger = Ledger::new();
        ledger.apply_debt(&name("A"), &name("B"), dec!(30));
        ledger.apply_debt(&name("B"), &name("C"), dec!(30));
        ledger.apply_debt(&name("C"), &name("A"), dec!(30));

        assert_eq!(ledger.position(&name("A")), Decimal::ZERO);
        assert_eq!(ledger.total_net_settlement(), Decimal::ZERO);
        assert_eq!(ledger.settled().len(), 3);
    }

    #[test]
    fn test_ledger_json_uses_numbers() {
        let mut ledger = Ledger::new();
        ledger.apply_debt(&name("Bob"), &name("Alice"), dec!(55_000.5));

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["positions"]["Alice"], serde_json::json!(55_000.5));
        assert_eq!(json["positions"]["Bob"], serde_json::json!(-55_000.5));

        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_ledger_matches_with_tolerance() {
        let mut a = Ledger::new();
        a.apply_debt(&name("A"), &name("B"), dec!(50));
        let mut b = Ledger::new();
        b.apply_debt(&name("A"), &name("B"), dec!(50.004));
        b.touch(&name("C"));

        assert!(a.matches(&b, dec!(0.01)));
        assert!(!a.matches(&b, dec!(0.001)));
    }
}
