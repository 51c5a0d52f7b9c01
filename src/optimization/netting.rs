use crate::core::amount::EPSILON;
use crate::core::person::PersonName;
use crate::graph::debt_graph::DebtGraph;
use std::collections::HashSet;

/// Bilateral netting: collapse mutual debts between each pair of people.
///
/// If A owes B 60 and B owes A 40, the pair is replaced by a single edge
/// A owes B 20. Pairs whose debts cancel to within EPSILON disappear.
/// Every unordered pair is processed exactly once, and the result never
/// holds edges in both directions between the same two people.
pub fn simplify_bilateral(graph: &DebtGraph) -> DebtGraph {
    let mut simplified = DebtGraph::new();
    let mut processed: HashSet<(&PersonName, &PersonName)> = HashSet::new();

    for (from, to, amount) in graph.edges() {
        let pair = if from < to { (from, to) } else { (to, from) };
        if !processed.insert(pair) {
            continue;
        }

        let net = amount - graph.amount(to, from);
        if net.abs() > EPSILON {
            if net.is_sign_positive() {
                simplified.add_debt(from, to, net);
            } else {
                simplified.add_debt(to, from, net.abs());
            }
        }
    }

    log::debug!(
        "bilateral netting: {} -> {} edges",
        graph.edge_count(),
        simplified.edge_count()
    );
    simplified
}
