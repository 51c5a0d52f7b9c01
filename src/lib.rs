//! # split-engine
//!
//! Itemized bill splitting with graph-optimized debt settlement.
//!
//! Given a list of shared expenses, each with a payer and line items
//! assigned to the people who consumed them, the engine works out who owes
//! whom and reduces those debts to as few payments as it can.
//!
//! ## Architecture
//!
//! - **core** — Input and ledger types: items, activities, events, balances
//! - **graph** — The debt graph and cycle detection
//! - **optimization** — Bilateral netting, cycle elimination, triangle
//!   rerouting, settlement flattening, consumption details, greedy summary
//! - **simulation** — Random events for stress testing

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

pub use crate::optimization::consumption::calculate_consumption_details;
pub use crate::optimization::engine::smart_split_bill;
pub use crate::optimization::summary::calculate_summary;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::activity::{Activity, Event, Participant};
    pub use crate::core::amount::EPSILON;
    pub use crate::core::item::Item;
    pub use crate::core::ledger::Ledger;
    pub use crate::core::person::PersonName;
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::optimization::consumption::ConsumptionDetail;
    pub use crate::optimization::engine::{SettlementMode, SplitEngine, SplitResult};
    pub use crate::optimization::settlement::SettlementTransaction;
    pub use crate::optimization::summary::Summary;
}
