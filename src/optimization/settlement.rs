use crate::core::amount::{is_significant, round_cents, serialize_number};
use crate::core::person::PersonName;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for settlement ids.
const SETTLEMENT_NAMESPACE: Uuid = Uuid::from_u128(0x5e77_1e00_b111_4a5c_9d3e_5b1f_0c2a_7d41);

/// "`from_name` must pay `to_name` `amount`."
///
/// Amounts are rounded to cents. The id is derived from the two names, so
/// the same pair always gets the same id regardless of input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTransaction {
    pub id: Uuid,
    pub from_name: PersonName,
    pub to_name: PersonName,
    #[serde(serialize_with = "serialize_number")]
    pub amount: Decimal,
}

impl SettlementTransaction {
    pub fn new(from_name: PersonName, to_name: PersonName, amount: Decimal) -> Self {
        Self {
            id: settlement_id(&from_name, &to_name),
            from_name,
            to_name,
            amount: round_cents(amount),
        }
    }
}

impl fmt::Display for SettlementTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from_name, self.to_name, self.amount)
    }
}

/// Stable id for a payment from `from` to `to`.
pub fn settlement_id(from: &PersonName, to: &PersonName) -> Uuid {
    let mut key = Vec::with_capacity(from.as_str().len() + to.as_str().len() + 1);
    key.extend_from_slice(from.as_str().as_bytes());
    key.push(0);
    key.extend_from_slice(to.as_str().as_bytes());
    Uuid::new_v5(&SETTLEMENT_NAMESPACE, &key)
}

/// Turn the remaining edges into settlements, largest first.
///
/// Edges at or below EPSILON are dropped. Ties keep name order.
pub fn flatten(graph: &DebtGraph) -> Vec<SettlementTransaction> {
    let mut settlements: Vec<SettlementTransaction> = graph
        .edges()
        .filter(|(_, _, amount)| is_significant(*amount))
        .map(|(from, to, amount)| SettlementTransaction::new(from.clone(), to.clone(), amount))
        .collect();

    sort_largest_first(&mut settlements);
    settlements
}

pub(crate) fn sort_largest_first(settlements: &mut [SettlementTransaction]) {
    settlements.sort_by(|a, b| b.amount.cmp(&a.amount));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flatten_sorts_and_rounds() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(10.005)),
            ("C", "B", dec!(33.3333)),
            ("D", "A", dec!(0.009)),
        ]);
        let settlements = flatten(&graph);

        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].from_name.as_str(), "C");
        assert_eq!(settlements[0].amount, dec!(33.33));
        assert_eq!(settlements[1].amount, dec!(10.01));
    }

    #[test]
    fn test_ids_are_stable_and_directional() {
        let a = PersonName::new("Alice");
        let b = PersonName::new("Bob");
        assert_eq!(settlement_id(&a, &b), settlement_id(&a, &b));
        assert_ne!(settlement_id(&a, &b), settlement_id(&b, &a));
    }

    #[test]
    fn test_ids_do_not_collide_on_concatenation() {
        let left = settlement_id(&PersonName::new("ab"), &PersonName::new("c"));
        let right = settlement_id(&PersonName::new("a"), &PersonName::new("bc"));
        assert_ne!(left, right);
    }

    #[test]
    fn test_serializes_wire_shape() {
        let tx = SettlementTransaction::new(PersonName::new("A"), PersonName::new("B"), dec!(20));
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["fromName"], "A");
        assert_eq!(value["toName"], "B");
        assert_eq!(value["amount"], 20.0);
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_display() {
        let tx = SettlementTransaction::new(PersonName::new("A"), PersonName::new("B"), dec!(20));
        assert_eq!(tx.to_string(), "A pays B 20");
    }
}
