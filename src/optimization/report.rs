use crate::core::activity::Activity;
use crate::core::amount::serialize_number;
use crate::core::ledger::Ledger;
use crate::graph::debt_graph::DebtGraph;
use crate::optimization::engine::SplitEngine;
use crate::optimization::settlement::SettlementTransaction;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much the optimizer saved compared to paying every raw debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    /// Consumer -> payer debts before any simplification.
    pub raw_debt_count: usize,
    /// Sum of those raw debts.
    #[serde(serialize_with = "serialize_number")]
    pub raw_volume: Decimal,
    /// Payments left after optimization.
    pub transaction_count: usize,
    /// Sum of the remaining payments.
    #[serde(serialize_with = "serialize_number")]
    pub settled_volume: Decimal,
    /// What each person is owed (positive) or owes (negative).
    pub net_positions: Ledger,
}

impl SettlementReport {
    /// Run the optimizer on `activities` and compare before and after.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let raw = DebtGraph::from_activities(activities);
        let settlements = SplitEngine::settle_graph(&raw);
        Self::compare(&raw, &settlements)
    }

    /// Compare a raw debt graph with the settlements derived from it.
    pub fn compare(raw: &DebtGraph, settlements: &[SettlementTransaction]) -> Self {
        SettlementReport {
            raw_debt_count: raw.edge_count(),
            raw_volume: raw.total_weight(),
            transaction_count: settlements.len(),
            settled_volume: settlements.iter().map(|s| s.amount).sum(),
            net_positions: raw.net_positions(),
        }
    }

    /// Number of payments avoided.
    pub fn payments_saved(&self) -> usize {
        self.raw_debt_count.saturating_sub(self.transaction_count)
    }

    /// Share of the raw volume that no longer needs to move, in `0.0..=1.0`.
    pub fn volume_reduction(&self) -> f64 {
        if self.raw_volume.is_zero() {
            return 0.0;
        }
        let ratio = (self.raw_volume - self.settled_volume) / self.raw_volume;
        ratio.to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Report ===")?;
        writeln!(f, "Raw debts:        {}", self.raw_debt_count)?;
        writeln!(f, "Raw volume:       {}", self.raw_volume.round_dp(2))?;
        writeln!(f, "Payments:         {}", self.transaction_count)?;
        writeln!(f, "Settled volume:   {}", self.settled_volume)?;
        writeln!(f, "Payments saved:   {}", self.payments_saved())?;
        writeln!(f, "Volume reduction: {:.1}%", self.volume_reduction() * 100.0)?;

        writeln!(f, "\nNet Positions:")?;
        for (person, amount) in self.net_positions.positions() {
            writeln!(f, "  {:<15} {:>15}", person, amount.round_dp(2))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::Item;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_mutual_debts() {
        let activities = vec![
            Activity::new("a1", "Lunch", "A")
                .with_item(Item::new("Rice", dec!(120), dec!(1), ["A", "B"])),
            Activity::new("a2", "Dinner", "B")
                .with_item(Item::new("Noodles", dec!(80), dec!(1), ["A", "B"])),
        ];
        let report = SettlementReport::from_activities(&activities);

        assert_eq!(report.raw_debt_count, 2);
        assert_eq!(report.raw_volume, dec!(100));
        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.settled_volume, dec!(20));
        assert_eq!(report.payments_saved(), 1);
        assert_relative_eq!(report.volume_reduction(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_report_json_amounts_are_numbers() {
        let activities = vec![Activity::new("a1", "Lunch", "A")
            .with_item(Item::new("Rice", dec!(120), dec!(1), ["A", "B"]))];
        let json = serde_json::to_value(SettlementReport::from_activities(&activities)).unwrap();

        assert_eq!(json["rawVolume"], serde_json::json!(60.0));
        assert_eq!(json["settledVolume"], serde_json::json!(60.0));
        assert!(json["netPositions"]["positions"]["A"].is_number());
    }

    #[test]
    fn test_report_empty() {
        let report = SettlementReport::from_activities(&[]);
        assert_eq!(report.transaction_count, 0);
        assert_relative_eq!(report.volume_reduction(), 0.0);
        assert!(report.to_string().contains("Payments saved:   0"));
    }
}
