pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod resolver;
pub mod ui;
pub mod workflow;
