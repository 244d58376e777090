//! # splitledger
//!
//! Shared-expense ledger and minimal-transaction debt settlement engine.
//!
//! Given a list of expenses — who paid, and who shares the cost — this
//! engine derives each participant's net balance and reduces the balance
//! set to a small list of direct payments that zeroes everyone out.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participants, expenses, the balance
//!   ledger, money helpers, id minting
//! - **optimization** — Greedy minimal-transaction settlement planning
//! - **simulation** — Random expense-log generation for stress testing

pub mod core;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::expense::{Expense, ExpenseSet};
    pub use crate::core::ledger::{calculate_balances, Balance, BalanceError, Ledger};
    pub use crate::core::money::{format_currency, SETTLED_EPSILON};
    pub use crate::core::participant::{Participant, ParticipantId};
    pub use crate::optimization::settlement::{DebtOptimizer, DebtSettlement, SettlementPlan};
}
