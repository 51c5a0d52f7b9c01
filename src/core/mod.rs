pub mod activity;
pub mod amount;
pub mod error;
pub mod item;
pub mod ledger;
pub mod person;
pub mod split;
