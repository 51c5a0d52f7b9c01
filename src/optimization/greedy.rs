use crate::core::amount::{is_significant, EPSILON};
use crate::core::ledger::Ledger;
use crate::core::person::PersonName;
use crate::optimization::settlement::SettlementTransaction;
use rust_decimal::Decimal;

/// Settle balances by matching the largest debtor with the largest creditor.
///
/// This is the simpler settlement mode: it looks only at each person's net
/// balance, never at who owed whom. Each step pays
/// `min(|debtor|, creditor)` and moves on from whichever side is then
/// settled, so it emits at most `debtors + creditors - 1` payments.
pub fn settle_greedy(balances: &Ledger) -> Vec<SettlementTransaction> {
    let mut debtors: Vec<(PersonName, Decimal)> = balances
        .positions()
        .iter()
        .filter(|(_, amount)| **amount < -EPSILON)
        .map(|(name, amount)| (name.clone(), amount.abs()))
        .collect();
    let mut creditors: Vec<(PersonName, Decimal)> = balances
        .positions()
        .iter()
        .filter(|(_, amount)| **amount > EPSILON)
        .map(|(name, amount)| (name.clone(), *amount))
        .collect();

    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);
        if is_significant(amount) {
            settlements.push(SettlementTransaction::new(
                debtors[i].0.clone(),
                creditors[j].0.clone(),
                amount,
            ));
        }

        debtors[i].1 -= amount;
        creditors[j].1 -= amount;

        if debtors[i].1 <= EPSILON {
            i += 1;
        }
        if creditors[j].1 <= EPSILON {
            j += 1;
        }
    }

    log::debug!(
        "greedy settlement: {} debtors, {} creditors, {} payments",
        debtors.len(),
        creditors.len(),
        settlements.len()
    );
    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ledger(entries: &[(&str, Decimal)]) -> Ledger {
        let mut ledger = Ledger::new();
        for (name, amount) in entries {
            ledger.credit(&PersonName::new(*name), *amount);
        }
        ledger
    }

    #[test]
    fn test_single_debtor_single_creditor() {
        let settlements = settle_greedy(&ledger(&[("Alice", dec!(50_000)), ("Bob", dec!(-50_000))]));
        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].from_name.as_str(), "Bob");
        assert_eq!(settlements[0].to_name.as_str(), "Alice");
        assert_eq!(settlements[0].amount, dec!(50_000));
    }

    #[test]
    fn test_largest_matched_first() {
        let settlements = settle_greedy(&ledger(&[
            ("A", dec!(70)),
            ("B", dec!(30)),
            ("C", dec!(-60)),
            ("D", dec!(-40)),
        ]));

        let pairs: Vec<(&str, &str, Decimal)> = settlements
            .iter()
            .map(|s| (s.from_name.as_str(), s.to_name.as_str(), s.amount))
            .collect();
        assert_eq!(
            pairs,
            vec![("C", "A", dec!(60)), ("D", "A", dec!(10)), ("D", "B", dec!(30))]
        );
    }

    #[test]
    fn test_settled_people_skipped() {
        let settlements = settle_greedy(&ledger(&[("A", dec!(0.004)), ("B", dec!(-0.004))]));
        assert!(settlements.is_empty());
    }

    #[test]
    fn test_moves_total_net_volume() {
        let balances = ledger(&[
            ("A", dec!(33.34)),
            ("B", dec!(-16.67)),
            ("C", dec!(-16.67)),
        ]);
        let moved: Decimal = settle_greedy(&balances).iter().map(|s| s.amount).sum();
        assert_eq!(moved, balances.total_net_settlement());
    }
}
