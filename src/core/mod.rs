//! Services and orchestration built on top of the ledger domain types.

pub mod ledger_manager;
pub mod services;
