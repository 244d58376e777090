//! A month of flat-share expenses, settled in a handful of payments.
//!
//! Shows subset splits (not every expense involves everyone) and the
//! n − 1 transaction bound of the greedy matching.

use rust_decimal_macros::dec;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::ledger::Ledger;
use splitledger::core::money::format_currency;
use splitledger::core::participant::Participant;
use splitledger::optimization::settlement::DebtOptimizer;

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║  splitledger: Group Trip Example      ║");
    println!("╚═══════════════════════════════════════╝\n");

    let alice = Participant::new("p-alice", "Alice");
    let bob = Participant::new("p-bob", "Bob");
    let carol = Participant::new("p-carol", "Carol");
    let dave = Participant::new("p-dave", "Dave");
    let erin = Participant::new("p-erin", "Erin");
    let household = vec![
        alice.clone(),
        bob.clone(),
        carol.clone(),
        dave.clone(),
        erin.clone(),
    ];

    let mut set = ExpenseSet::new();
    set.add(Expense::new(
        "e-1",
        "Cabin rental",
        dec!(850),
        alice.clone(),
        household.clone(),
    ));
    set.add(Expense::new(
        "e-2",
        "Groceries",
        dec!(214.35),
        bob.clone(),
        household.clone(),
    ));
    set.add(Expense::new(
        "e-3",
        "Fuel",
        dec!(96.40),
        carol.clone(),
        vec![alice.clone(), carol.clone(), dave.clone()],
    ));
    set.add(Expense::new(
        "e-4",
        "Kayak hire",
        dec!(120),
        dave.clone(),
        vec![bob.clone(), dave.clone(), erin.clone()],
    ));
    set.add(Expense::new(
        "e-5",
        "Pizza night",
        dec!(64.80),
        erin.clone(),
        household.clone(),
    ));

    println!("Recorded {} expenses, {} total.\n", set.len(), format_currency(set.total_spent()));

    let ledger = Ledger::from_expenses(set.expenses()).expect("valid expenses");
    let balances = ledger.balances();

    println!("━━━ Net balances ━━━\n");
    for balance in &balances {
        println!(
            "  {:<10} {:>12}",
            balance.participant_name,
            format_currency(balance.balance)
        );
    }

    let plan = DebtOptimizer::optimize(&balances);
    let unsettled = balances.iter().filter(|b| !b.is_settled()).count();

    println!("\n━━━ Settlement ━━━\n");
    println!("{}", plan);
    println!(
        "{} unsettled balances cleared in {} payments (bound: {}).",
        unsettled,
        plan.transaction_count(),
        unsettled.saturating_sub(1)
    );
}
