//! Foundational types: participants, expenses, the balance ledger,
//! money helpers, and id minting.

pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod participant;
