pub mod cycle_detection;
pub mod debt_graph;
