//! Pass-through debt rerouting ("titip duit").
//!
//! When A owes B, B owes C, and A already owes C directly, part of A's debt
//! to B can travel straight to C instead of passing through B. The amount
//! `min(A->B, B->C)` is moved onto the direct edge: B neither receives it
//! nor has to pay it forward, and nobody's net balance changes.

use crate::core::amount::{is_significant, EPSILON};
use crate::core::person::PersonName;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;

/// A triangle eligible for rerouting.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub debtor: PersonName,
    pub middle: PersonName,
    pub creditor: PersonName,
    /// `min(debtor -> middle, middle -> creditor)`.
    pub reroute: Decimal,
}

/// Find the first eligible triangle in name order.
pub fn find_triangle(graph: &DebtGraph) -> Option<Triangle> {
    for (a, b, ab) in graph.edges() {
        if !is_significant(ab) {
            continue;
        }
        for (c, bc) in graph.outgoing(b) {
            if c == a || !is_significant(bc) {
                continue;
            }
            if is_significant(graph.amount(a, c)) {
                return Some(Triangle {
                    debtor: a.clone(),
                    middle: b.clone(),
                    creditor: c.clone(),
                    reroute: ab.min(bc),
                });
            }
        }
    }
    None
}

/// Reroute through direct edges until no triangle is left.
///
/// The scan borrows the graph immutably and only reports the first
/// candidate; the mutation happens afterwards and the scan restarts. Every
/// reroute settles at least one of the two indirect edges, and rounds are
/// additionally capped at `max(people^2, edges) + 1`.
pub fn optimize_triangles(graph: &DebtGraph) -> DebtGraph {
    let mut result = graph.clone();
    let people = graph.people().len();
    let max_rounds = (people * people).max(graph.edge_count()) + 1;
    let mut rounds = 0;

    while let Some(triangle) = find_triangle(&result) {
        if rounds >= max_rounds {
            log::warn!("triangle optimization hit its bound of {} rounds", max_rounds);
            break;
        }
        if triangle.reroute <= EPSILON {
            break;
        }

        let Triangle {
            debtor,
            middle,
            creditor,
            reroute,
        } = triangle;
        result.reduce_debt(&debtor, &middle, reroute);
        result.reduce_debt(&middle, &creditor, reroute);
        result.add_debt(&debtor, &creditor, reroute);
        rounds += 1;
    }

    log::debug!(
        "triangle optimization: {} reroutes, {} -> {} edges",
        rounds,
        graph.edge_count(),
        result.edge_count()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn name(s: &str) -> PersonName {
        PersonName::new(s)
    }

    #[test]
    fn test_reroute_through_direct_edge() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(50)),
            ("B", "C", dec!(50)),
            ("A", "C", dec!(30)),
        ]);
        let result = optimize_triangles(&graph);

        assert_eq!(result.edge_count(), 1);
        assert_eq!(result.amount(&name("A"), &name("C")), dec!(80));
        assert!(graph.net_positions().matches(&result.net_positions(), Decimal::ZERO));
    }

    #[test]
    fn test_partial_reroute() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(50)),
            ("B", "C", dec!(70)),
            ("A", "C", dec!(30)),
        ]);
        let result = optimize_triangles(&graph);

        assert_eq!(result.amount(&name("A"), &name("B")), Decimal::ZERO);
        assert_eq!(result.amount(&name("B"), &name("C")), dec!(20));
        assert_eq!(result.amount(&name("A"), &name("C")), dec!(80));
        assert!(graph.net_positions().matches(&result.net_positions(), Decimal::ZERO));
    }

    #[test]
    fn test_chain_without_direct_edge_untouched() {
        let graph = DebtGraph::from_debts([("A", "B", dec!(50)), ("B", "C", dec!(50))]);
        assert!(find_triangle(&graph).is_none());
        assert_eq!(optimize_triangles(&graph), graph);
    }

    #[test]
    fn test_back_edge_is_not_a_triangle() {
        // B -> A would make C == A.
        let graph = DebtGraph::from_debts([("A", "B", dec!(10)), ("B", "A", dec!(4))]);
        assert!(find_triangle(&graph).is_none());
    }

    #[test]
    fn test_reaches_fixed_point() {
        let graph = DebtGraph::from_debts([
            ("A", "B", dec!(20)),
            ("B", "C", dec!(15)),
            ("A", "C", dec!(5)),
            ("C", "D", dec!(40)),
            ("A", "D", dec!(10)),
            ("B", "D", dec!(8)),
        ]);
        let result = optimize_triangles(&graph);

        assert!(find_triangle(&result).is_none());
        assert!(result.edge_count() < graph.edge_count());
        assert!(graph.net_positions().matches(&result.net_positions(), dec!(0.01)));
    }
}
