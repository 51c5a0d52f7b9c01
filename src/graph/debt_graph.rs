use crate::core::activity::Activity;
use crate::core::amount::EPSILON;
use crate::core::ledger::Ledger;
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Directed graph of who owes whom.
///
/// An edge `A -> B` with weight `w` means A owes B the amount `w`. The graph
/// is a map of maps keyed by name, so every traversal visits people in
/// lexical order and the optimization passes are deterministic.
///
/// Invariants maintained by every mutator: no self edges, no edge with a
/// non-positive weight, and no source entry without outgoing edges.
///
/// # Examples
///
/// ```
/// use split_engine::graph::debt_graph::DebtGraph;
/// use split_engine::core::person::PersonName;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::new();
/// let a = PersonName::new("A");
/// let b = PersonName::new("B");
///
/// graph.add_debt(&a, &b, dec!(100));
/// graph.add_debt(&a, &b, dec!(50));
/// graph.add_debt(&a, &a, dec!(10));
///
/// assert_eq!(graph.amount(&a, &b), dec!(150));
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtGraph {
    edges: BTreeMap<PersonName, BTreeMap<PersonName, Decimal>>,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every item of every activity into consumer -> payer debts.
    ///
    /// Each consumer owes the payer their share of the item. Shares
    /// accumulate across items and activities; self-debt and zero shares
    /// add nothing.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut graph = Self::new();
        for activity in activities {
            for item in &activity.items {
                if item.is_void() && !item.member_names.is_empty() {
                    log::warn!(
                        "ignoring item '{}' in '{}': total out of range",
                        item.item_name,
                        activity.title
                    );
                    continue;
                }
                let share = item.share_per_consumer();
                if share <= Decimal::ZERO {
                    continue;
                }
                for member in &item.member_names {
                    graph.add_debt(member, &activity.payer_name, share);
                }
            }
        }
        log::debug!(
            "built debt graph: {} activities, {} edges, gross {}",
            activities.len(),
            graph.edge_count(),
            graph.total_weight()
        );
        graph
    }

    /// Build a graph from explicit `(debtor, creditor, amount)` triples.
    pub fn from_debts<'a, I>(debts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, Decimal)>,
    {
        let mut graph = Self::new();
        for (from, to, amount) in debts {
            graph.add_debt(&PersonName::new(from), &PersonName::new(to), amount);
        }
        graph
    }

    /// Add to the amount `from` owes `to`. Self-debt and non-positive
    /// amounts are ignored.
    pub fn add_debt(&mut self, from: &PersonName, to: &PersonName, amount: Decimal) {
        if from == to || amount <= Decimal::ZERO {
            return;
        }
        *self
            .edges
            .entry(from.clone())
            .or_default()
            .entry(to.clone())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Overwrite an edge. Weights at or below EPSILON remove the edge.
    pub fn set_debt(&mut self, from: &PersonName, to: &PersonName, amount: Decimal) {
        if from == to {
            return;
        }
        if amount <= EPSILON {
            self.remove_debt(from, to);
            return;
        }
        self.edges
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), amount);
    }

    /// Subtract from an edge, dropping it once it is effectively settled.
    /// Returns the remaining weight (zero if the edge is gone).
    pub fn reduce_debt(&mut self, from: &PersonName, to: &PersonName, amount: Decimal) -> Decimal {
        let remaining = self.amount(from, to) - amount;
        if remaining <= EPSILON {
            self.remove_debt(from, to);
            Decimal::ZERO
        } else {
            self.set_debt(from, to, remaining);
            remaining
        }
    }

    /// Remove an edge, and its source entry if that was the last edge.
    pub fn remove_debt(&mut self, from: &PersonName, to: &PersonName) {
        if let Some(out) = self.edges.get_mut(from) {
            out.remove(to);
            if out.is_empty() {
                self.edges.remove(from);
            }
        }
    }

    /// Amount `from` owes `to`, zero when there is no edge.
    pub fn amount(&self, from: &PersonName, to: &PersonName) -> Decimal {
        self.edges
            .get(from)
            .and_then(|out| out.get(to))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Outgoing edges of a person, in name order.
    pub fn outgoing(&self, from: &PersonName) -> impl Iterator<Item = (&PersonName, Decimal)> {
        self.edges
            .get(from)
            .into_iter()
            .flat_map(|out| out.iter().map(|(to, &amount)| (to, amount)))
    }

    /// All edges as `(debtor, creditor, amount)`.
    pub fn edges(&self) -> impl Iterator<Item = (&PersonName, &PersonName, Decimal)> {
        self.edges
            .iter()
            .flat_map(|(from, out)| out.iter().map(move |(to, &amount)| (from, to, amount)))
    }

    /// People with at least one outgoing edge.
    pub fn debtors(&self) -> impl Iterator<Item = &PersonName> {
        self.edges.keys()
    }

    /// Every person appearing on either end of an edge.
    pub fn people(&self) -> BTreeSet<&PersonName> {
        let mut people = BTreeSet::new();
        for (from, to, _) in self.edges() {
            people.insert(from);
            people.insert(to);
        }
        people
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> Decimal {
        self.edges().map(|(_, _, amount)| amount).sum()
    }

    /// Net position of every person implied by the edges.
    pub fn net_positions(&self) -> Ledger {
        let mut ledger = Ledger::new();
        for (from, to, amount) in self.edges() {
            ledger.apply_debt(from, to, amount);
        }
        ledger
    }
}
