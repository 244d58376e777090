//! Basic balance calculation and settlement example.
//!
//! Demonstrates how a handful of shared expenses reduce to a short
//! payment plan.

use rust_decimal_macros::dec;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::ledger::Ledger;
use splitledger::core::money::format_currency;
use splitledger::core::participant::Participant;
use splitledger::optimization::settlement::DebtOptimizer;

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║  splitledger: Basic Split Example     ║");
    println!("╚═══════════════════════════════════════╝\n");

    let alice = Participant::new("p-alice", "Alice");
    let bob = Participant::new("p-bob", "Bob");
    let charlie = Participant::new("p-charlie", "Charlie");
    let everyone = vec![alice.clone(), bob.clone(), charlie.clone()];

    // --- A weekend away ---
    println!("━━━ Weekend expenses ━━━\n");

    let mut set = ExpenseSet::new();
    set.add(Expense::new(
        "e-1",
        "Dinner",
        dec!(30),
        alice.clone(),
        everyone.clone(),
    ));
    set.add(Expense::new(
        "e-2",
        "Hotel",
        dec!(60),
        bob.clone(),
        everyone.clone(),
    ));
    set.add(Expense::new(
        "e-3",
        "Taxi",
        dec!(20),
        alice.clone(),
        vec![alice.clone(), bob.clone()],
    ));

    for expense in set.expenses() {
        println!(
            "  {} paid {} for {} (split {} ways)",
            expense.payer(),
            format_currency(expense.amount()),
            expense.description(),
            expense.split_group().len()
        );
    }
    println!("\nTotal spent: {}\n", format_currency(set.total_spent()));

    // --- Net balances ---
    println!("━━━ Net balances ━━━\n");

    let ledger = Ledger::from_expenses(set.expenses()).expect("valid expenses");
    let balances = ledger.balances();

    for balance in &balances {
        let status = if balance.is_settled() {
            "SETTLED"
        } else if balance.balance > dec!(0) {
            "CREDITOR"
        } else {
            "DEBTOR"
        };
        println!(
            "  {:<10} {:>10}  [{}]",
            balance.participant_name,
            format_currency(balance.balance),
            status
        );
    }

    // --- Settlement plan ---
    println!("\n━━━ Who pays whom ━━━\n");

    let plan = DebtOptimizer::optimize(&balances);
    println!("{}", plan);
}
