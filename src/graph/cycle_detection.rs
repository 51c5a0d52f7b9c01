use crate::core::amount::is_significant;
use crate::core::person::PersonName;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// A closed loop of debts: each person owes the next, and the last owes
/// the first. Cancelling the loop moves no money for anybody.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtCycle {
    /// People in cycle order.
    pub people: Vec<PersonName>,
    /// The smallest edge weight along the loop. This is the most that
    /// can be cancelled from every edge at once.
    pub bottleneck: Decimal,
}

impl DebtCycle {
    /// Number of people (and edges) in the cycle.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Edges of the cycle as `(from, to)`, wrapping around at the end.
    pub fn edges(&self) -> impl Iterator<Item = (&PersonName, &PersonName)> {
        let n = self.people.len();
        (0..n).map(move |i| (&self.people[i], &self.people[(i + 1) % n]))
    }

    /// Gross debt removed by cancelling this cycle.
    pub fn potential_savings(&self) -> Decimal {
        self.bottleneck * Decimal::from(self.people.len())
    }
}

/// Find the first directed cycle in the graph, if any.
///
/// Runs a depth-first search from every person in name order, keeping the
/// current path as a recursion stack. The first time an edge leads back to
/// a person already on the stack, the stack slice from that person onward
/// is the cycle. Edges at or below EPSILON are not traversed.
///
/// People whose search finished without a cycle are not searched again.
pub fn find_cycle(graph: &DebtGraph) -> Option<DebtCycle> {
    let mut finished: HashSet<&PersonName> = HashSet::new();

    for start in graph.people() {
        let mut path: Vec<&PersonName> = Vec::new();
        let mut on_path: HashSet<&PersonName> = HashSet::new();

        if let Some(people) = dfs(start, graph, &mut path, &mut on_path, &mut finished) {
            if people.len() >= 2 {
                let bottleneck = compute_bottleneck(&people, graph);
                return Some(DebtCycle { people, bottleneck });
            }
        }
    }
    None
}

fn dfs<'g>(
    current: &'g PersonName,
    graph: &'g DebtGraph,
    path: &mut Vec<&'g PersonName>,
    on_path: &mut HashSet<&'g PersonName>,
    finished: &mut HashSet<&'g PersonName>,
) -> Option<Vec<PersonName>> {
    if on_path.contains(current) {
        let start = path.iter().position(|p| *p == current)?;
        return Some(path[start..].iter().map(|p| (*p).clone()).collect());
    }
    if finished.contains(current) {
        return None;
    }

    path.push(current);
    on_path.insert(current);

    for (next, amount) in graph.outgoing(current) {
        if is_significant(amount) {
            if let Some(cycle) = dfs(next, graph, path, on_path, finished) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    on_path.remove(current);
    finished.insert(current);
    None
}

/// Minimum edge weight along a cycle, wrap-around edge included.
fn compute_bottleneck(people: &[PersonName], graph: &DebtGraph) -> Decimal {
    let n = people.len();
    (0..n)
        .map(|i| graph.amount(&people[i], &people[(i + 1) % n]))
        .min()
        .unwrap_or(Decimal::ZERO)
}
