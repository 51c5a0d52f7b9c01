pub mod consumption;
pub mod cycles;
pub mod engine;
pub mod greedy;
pub mod netting;
pub mod report;
pub mod settlement;
pub mod summary;
pub mod triangle;
