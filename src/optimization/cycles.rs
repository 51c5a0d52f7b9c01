use crate::core::amount::EPSILON;
use crate::graph::cycle_detection::find_cycle;
use crate::graph::debt_graph::DebtGraph;

/// Cancel closed loops of debt until none remain.
///
/// Each round finds one cycle, subtracts its bottleneck from every edge on
/// it and prunes the edges that are now settled. A loop where everyone
/// owes the next person the same amount nets to nothing, so removing it
/// leaves every balance unchanged and saves payments.
///
/// Every round removes at least one edge, so the loop is bounded by the
/// initial edge count. A bottleneck at or below EPSILON also stops it.
pub fn eliminate_cycles(graph: &DebtGraph) -> DebtGraph {
    let mut result = graph.clone();
    let max_rounds = graph.edge_count() + 1;
    let mut rounds = 0;

    while let Some(cycle) = find_cycle(&result) {
        if cycle.bottleneck <= EPSILON {
            log::warn!(
                "cycle elimination stopped on a degenerate cycle of {} people",
                cycle.len()
            );
            break;
        }
        if rounds >= max_rounds {
            log::warn!("cycle elimination hit its bound of {} rounds", max_rounds);
            break;
        }

        for (from, to) in cycle.edges() {
            result.reduce_debt(from, to, cycle.bottleneck);
        }
        rounds += 1;
    }

    log::debug!(
        "cycle elimination: {} cycles cancelled, {} -> {} edges",
        rounds,
        graph.edge_count(),
        result.edge_count()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::person::PersonName;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn name(s: &str) -> PersonName {
        PersonName::new(s)
    }

    #[test]
    fn test_perfect_cycle_vanishes() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(30)),
            ("B", "C", dec!(30)),
            ("C", "A", dec!(30)),
        ]);
        assert!(eliminate_cycles(&graph).is_empty());
    }

    #[test]
    fn test_partial_cycle_keeps_remainder() {
        // A owes B 100, B owes C 60, C owes A 30
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(100)),
            ("B", "C", dec!(60)),
            ("C", "A", dec!(30)),
        ]);
        let result = eliminate_cycles(&graph);

        assert_eq!(result.edge_count(), 2);
        assert_eq!(result.amount(&name("A"), &name("B")), dec!(70));
        assert_eq!(result.amount(&name("B"), &name("C")), dec!(30));
        assert_eq!(result.amount(&name("C"), &name("A")), Decimal::ZERO);
        assert!(graph.net_positions().matches(&result.net_positions(), Decimal::ZERO));
    }

    #[test]
    fn test_overlapping_cycles() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(50)),
            ("B", "C", dec!(20)),
            ("C", "A", dec!(20)),
            ("B", "D", dec!(30)),
            ("D", "A", dec!(30)),
        ]);
        let result = eliminate_cycles(&graph);

        assert!(result.is_empty());
        assert!(find_cycle(&result).is_none());
    }

    #[test]
    fn test_acyclic_graph_untouched() {
        let graph = DebtGraph::from_debts([("A", "B", dec!(10)), ("B", "C", dec!(5))]);
        assert_eq!(eliminate_cycles(&graph), graph);
    }

    #[test]
    fn test_input_graph_not_mutated() {
        let graph = DebtGraph::from_debts([("A", "B", dec!(10)), ("B", "A", dec!(10))]);
        let _ = eliminate_cycles(&graph);
        assert_eq!(graph.edge_count(), 2);
    }
}
