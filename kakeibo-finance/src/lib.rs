//! kakeibo-finance: two-party settlement of shared household expenses

pub mod fmt;
pub mod settlement;

pub use settlement::{ExpenseEntry, SettlementResult, calculate_settlement};
