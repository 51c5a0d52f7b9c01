use crate::core::activity::{Activity, Event};
use crate::core::error::UnknownModeError;
use crate::graph::debt_graph::DebtGraph;
use crate::optimization::consumption::{calculate_consumption_details, ConsumptionDetail};
use crate::optimization::cycles::eliminate_cycles;
use crate::optimization::greedy::settle_greedy;
use crate::optimization::netting::simplify_bilateral;
use crate::optimization::settlement::{flatten, SettlementTransaction};
use crate::optimization::summary::{calculate_summary, Summary};
use crate::optimization::triangle::optimize_triangles;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settlements and consumption details computed from the same activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub settlements: Vec<SettlementTransaction>,
    pub consumption_details: Vec<ConsumptionDetail>,
}

/// Which algorithm turns debts into payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementMode {
    /// Bilateral netting, cycle elimination and triangle rerouting over the
    /// full debt graph.
    #[default]
    Optimized,
    /// Largest debtor pays largest creditor, from net balances only.
    Greedy,
}

impl FromStr for SettlementMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimized" => Ok(SettlementMode::Optimized),
            "greedy" => Ok(SettlementMode::Greedy),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

impl fmt::Display for SettlementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementMode::Optimized => write!(f, "optimized"),
            SettlementMode::Greedy => write!(f, "greedy"),
        }
    }
}

/// The bill-splitting engine.
///
/// Every method is a pure function of its input: nothing is cached
/// between calls and the caller's data is never modified.
pub struct SplitEngine;

impl SplitEngine {
    /// Run the three simplification passes in order.
    pub fn optimize(graph: &DebtGraph) -> DebtGraph {
        let graph = simplify_bilateral(graph);
        let graph = eliminate_cycles(&graph);
        optimize_triangles(&graph)
    }

    /// Optimize a raw debt graph and flatten it into payments.
    pub fn settle_graph(graph: &DebtGraph) -> Vec<SettlementTransaction> {
        flatten(&Self::optimize(graph))
    }

    /// Minimized list of payments that settles every activity.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_engine::prelude::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let activities = vec![
    ///     Activity::new("1", "Lunch", "A").with_item(Item::new("Rice", dec!(120), dec!(1), ["A", "B"])),
    ///     Activity::new("2", "Dinner", "B").with_item(Item::new("Soup", dec!(80), dec!(1), ["A", "B"])),
    /// ];
    ///
    /// let settlements = SplitEngine::smart_split_bill(&activities);
    /// assert_eq!(settlements.len(), 1);
    /// assert_eq!(settlements[0].from_name.as_str(), "B");
    /// assert_eq!(settlements[0].amount, dec!(20));
    /// ```
    pub fn smart_split_bill(activities: &[Activity]) -> Vec<SettlementTransaction> {
        Self::settle_graph(&DebtGraph::from_activities(activities))
    }

    /// Payments under the chosen mode.
    ///
    /// Greedy mode here uses every person found in the activities; only
    /// [`SplitEngine::summarize`] restricts it to listed participants.
    pub fn settle(activities: &[Activity], mode: SettlementMode) -> Vec<SettlementTransaction> {
        match mode {
            SettlementMode::Optimized => Self::smart_split_bill(activities),
            SettlementMode::Greedy => {
                settle_greedy(&DebtGraph::from_activities(activities).net_positions())
            }
        }
    }

    pub fn consumption_details(activities: &[Activity]) -> Vec<ConsumptionDetail> {
        calculate_consumption_details(activities)
    }

    /// Settlements and consumption details together.
    pub fn run(activities: &[Activity]) -> SplitResult {
        SplitResult {
            settlements: Self::smart_split_bill(activities),
            consumption_details: Self::consumption_details(activities),
        }
    }

    /// Event summary using the greedy mode.
    pub fn summarize(event: &Event) -> Summary {
        calculate_summary(event)
    }
}

/// See [`SplitEngine::smart_split_bill`].
pub fn smart_split_bill(activities: &[Activity]) -> Vec<SettlementTransaction> {
    SplitEngine::smart_split_bill(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::Item;
    use rust_decimal_macros::dec;

    fn activity(id: &str, payer: &str, price: rust_decimal::Decimal, members: &[&str]) -> Activity {
        Activity::new(id, id, payer).with_item(Item::new("Item", price, dec!(1), members.iter().copied()))
    }

    #[test]
    fn test_bilateral_cancellation() {
        let activities = vec![
            activity("a1", "A", dec!(120), &["A", "B"]),
            activity("a2", "B", dec!(80), &["A", "B"]),
        ];
        let settlements = SplitEngine::smart_split_bill(&activities);

        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].from_name.as_str(), "B");
        assert_eq!(settlements[0].to_name.as_str(), "A");
        assert_eq!(settlements[0].amount, dec!(20));
    }

    #[test]
    fn test_balanced_books_need_no_payments() {
        let activities = vec![
            activity("a1", "A", dec!(50), &["A"]),
            activity("a2", "B", dec!(70), &["B"]),
        ];
        assert!(SplitEngine::smart_split_bill(&activities).is_empty());
    }

    #[test]
    fn test_three_way_cycle_cancels() {
        // B owes A 30, C owes B 30, A owes C 30.
        let activities = vec![
            activity("a1", "A", dec!(30), &["B"]),
            activity("a2", "B", dec!(30), &["C"]),
            activity("a3", "C", dec!(30), &["A"]),
        ];
        assert!(SplitEngine::smart_split_bill(&activities).is_empty());
    }

    #[test]
    fn test_greedy_mode_moves_same_volume() {
        let activities = vec![
            activity("a1", "A", dec!(90), &["A", "B", "C"]),
            activity("a2", "B", dec!(60), &["A", "C"]),
            activity("a3", "C", dec!(25), &["A"]),
        ];
        let optimized: rust_decimal::Decimal = SplitEngine::settle(&activities, SettlementMode::Optimized)
            .iter()
            .map(|s| s.amount)
            .sum();
        let greedy: rust_decimal::Decimal = SplitEngine::settle(&activities, SettlementMode::Greedy)
            .iter()
            .map(|s| s.amount)
            .sum();
        assert!((optimized - greedy).abs() <= dec!(0.02));
    }

    #[test]
    fn test_run_returns_both_outputs() {
        let activities = vec![activity("a1", "A", dec!(100), &["A", "B"])];
        let result = SplitEngine::run(&activities);
        assert_eq!(result.settlements.len(), 1);
        assert_eq!(result.consumption_details.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let result = SplitEngine::run(&[]);
        assert!(result.settlements.is_empty());
        assert!(result.consumption_details.is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("greedy".parse::<SettlementMode>(), Ok(SettlementMode::Greedy));
        assert_eq!("optimized".parse::<SettlementMode>(), Ok(SettlementMode::Optimized));
        let err = "fastest".parse::<SettlementMode>().unwrap_err();
        assert_eq!(err, UnknownModeError("fastest".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown settlement mode 'fastest': expected 'optimized' or 'greedy'"
        );
        assert_eq!(SettlementMode::default().to_string(), "optimized");
    }
}
