use crate::core::expense::Expense;
use crate::core::money::{round_to_cents, SETTLED_EPSILON};
use crate::core::participant::ParticipantId;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors arising from balance calculation.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// An expense with nobody to split between — the per-person share is
    /// undefined. Raised before any balance is touched, so a failed
    /// calculation never leaves a partially applied ledger.
    #[error("expense '{expense_id}' has an empty split group; cannot divide {amount} among zero participants")]
    EmptySplitGroup { expense_id: String, amount: Decimal },
}

/// A participant's net position across all recorded expenses.
///
/// Positive = this participant is owed money (net creditor).
/// Negative = this participant owes money (net debtor).
/// A magnitude at or below [`SETTLED_EPSILON`] counts as settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub balance: Decimal,
}

impl Balance {
    /// Whether this balance is within the settled tolerance of zero.
    pub fn is_settled(&self) -> bool {
        self.balance.abs() <= SETTLED_EPSILON
    }
}

/// Tracks the running net position of each participant.
///
/// Built fresh per calculation — there is no cross-call state. Entries keep
/// the order in which participants are first encountered (payer before split
/// group, per expense), so the derived balance list is deterministic.
///
/// # Examples
///
/// ```
/// use splitledger::core::expense::Expense;
/// use splitledger::core::ledger::Ledger;
/// use splitledger::core::participant::Participant;
/// use rust_decimal_macros::dec;
///
/// let alice = Participant::new("p-1", "Alice");
/// let bob = Participant::new("p-2", "Bob");
/// let carol = Participant::new("p-3", "Carol");
///
/// let dinner = Expense::new(
///     "e-1",
///     "Dinner",
///     dec!(30),
///     alice.clone(),
///     vec![alice, bob, carol],
/// );
///
/// let ledger = Ledger::from_expenses([&dinner]).unwrap();
/// let balances = ledger.balances();
///
/// assert_eq!(balances[0].balance, dec!(20));   // Alice paid 30, owes 10
/// assert_eq!(balances[1].balance, dec!(-10));  // Bob owes his share
/// assert_eq!(balances[2].balance, dec!(-10));  // Carol owes hers
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Accounts in first-encounter order.
    accounts: Vec<Account>,
    /// Participant id -> index into `accounts`.
    index: HashMap<ParticipantId, usize>,
}

#[derive(Debug, Clone)]
struct Account {
    id: ParticipantId,
    name: String,
    net: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of expenses into a ledger.
    ///
    /// Fails on the first expense with an empty split group, naming it.
    pub fn from_expenses<'a, I>(expenses: I) -> Result<Self, BalanceError>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut ledger = Self::new();
        for expense in expenses {
            ledger.apply_expense(expense)?;
        }
        Ok(ledger)
    }

    /// Apply one expense: credit the payer the full amount, debit every
    /// split-group member an equal share.
    ///
    /// The payer is debited only when they appear in the split group —
    /// inclusion is the caller's explicit decision.
    pub fn apply_expense(&mut self, expense: &Expense) -> Result<(), BalanceError> {
        let group = expense.split_group();
        if group.is_empty() {
            return Err(BalanceError::EmptySplitGroup {
                expense_id: expense.id().to_string(),
                amount: expense.amount(),
            });
        }

        let share = expense.amount() / Decimal::from(group.len());
        debug!(
            "expense '{}': {} paid {}, split {} ways ({} each)",
            expense.id(),
            expense.payer().name(),
            expense.amount(),
            group.len(),
            share
        );

        self.account_mut(expense.payer().id(), expense.payer().name())
            .net += expense.amount();
        for member in group {
            self.account_mut(member.id(), member.name()).net -= share;
        }
        Ok(())
    }

    /// The raw (unrounded) net position of a participant.
    /// Unknown participants are flat at zero.
    pub fn net_position(&self, id: &ParticipantId) -> Decimal {
        self.index
            .get(id)
            .map(|&i| self.accounts[i].net)
            .unwrap_or(Decimal::ZERO)
    }

    /// Derive the balance list: one entry per participant in first-encounter
    /// order, each rounded to whole cents after the full fold.
    pub fn balances(&self) -> Vec<Balance> {
        self.accounts
            .iter()
            .map(|account| Balance {
                participant_id: account.id.clone(),
                participant_name: account.name.clone(),
                balance: round_to_cents(account.net),
            })
            .collect()
    }

    /// Sum of all positive rounded balances — the total still owed to
    /// creditors, which a settlement plan must move.
    pub fn total_outstanding(&self) -> Decimal {
        self.balances()
            .iter()
            .filter(|b| b.balance > Decimal::ZERO)
            .map(|b| b.balance)
            .sum()
    }

    /// Verify conservation: every dollar paid is claimed by exactly the
    /// split, so raw net positions sum to zero (within tolerance for
    /// division remainders).
    pub fn is_conserved(&self) -> bool {
        let total: Decimal = self.accounts.iter().map(|a| a.net).sum();
        total.abs() <= SETTLED_EPSILON
    }

    pub fn participant_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_mut(&mut self, id: &ParticipantId, name: &str) -> &mut Account {
        let idx = match self.index.get(id) {
            Some(&i) => i,
            None => {
                let i = self.accounts.len();
                self.accounts.push(Account {
                    id: id.clone(),
                    // First-seen display name wins for the lifetime of the ledger.
                    name: name.to_string(),
                    net: Decimal::ZERO,
                });
                self.index.insert(id.clone(), i);
                i
            }
        };
        &mut self.accounts[idx]
    }
}

/// Fold a sequence of expenses straight into a balance list.
///
/// Convenience over [`Ledger::from_expenses`] + [`Ledger::balances`] for
/// callers that only want the derived view.
pub fn calculate_balances(expenses: &[Expense]) -> Result<Vec<Balance>, BalanceError> {
    Ok(Ledger::from_expenses(expenses)?.balances())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::Participant;
    use rust_decimal_macros::dec;

    fn alice() -> Participant {
        Participant::new("p-1", "Alice")
    }

    fn bob() -> Participant {
        Participant::new("p-2", "Bob")
    }

    fn carol() -> Participant {
        Participant::new("p-3", "Carol")
    }

    fn everyone() -> Vec<Participant> {
        vec![alice(), bob(), carol()]
    }

    #[test]
    fn test_three_way_even_split() {
        let expense = Expense::new("e-1", "Dinner", dec!(30), alice(), everyone());
        let balances = calculate_balances(&[expense]).unwrap();

        assert_eq!(balances.len(), 3);
        assert_eq!(balances[0].balance, dec!(20));
        assert_eq!(balances[1].balance, dec!(-10));
        assert_eq!(balances[2].balance, dec!(-10));
    }

    #[test]
    fn test_two_expenses_cancel_out() {
        let expenses = [
            Expense::new("e-1", "Dinner", dec!(30), alice(), everyone()),
            Expense::new("e-2", "Hotel", dec!(60), bob(), everyone()),
        ];
        let balances = calculate_balances(&expenses).unwrap();

        assert_eq!(balances[0].balance, Decimal::ZERO); // Alice
        assert_eq!(balances[1].balance, dec!(30)); // Bob
        assert_eq!(balances[2].balance, dec!(-30)); // Carol
    }

    #[test]
    fn test_subset_split() {
        let expense = Expense::new("e-1", "Taxi", dec!(20), alice(), vec![alice(), bob()]);
        let balances = calculate_balances(&[expense]).unwrap();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].balance, dec!(10));
        assert_eq!(balances[1].balance, dec!(-10));
    }

    #[test]
    fn test_payer_outside_split_keeps_full_credit() {
        let expense = Expense::new("e-1", "Gift", dec!(20), alice(), vec![bob(), carol()]);
        let balances = calculate_balances(&[expense]).unwrap();

        assert_eq!(balances[0].balance, dec!(20)); // Alice credited in full
        assert_eq!(balances[1].balance, dec!(-10));
        assert_eq!(balances[2].balance, dec!(-10));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let balances = calculate_balances(&[]).unwrap();
        assert!(balances.is_empty());
    }

    #[test]
    fn test_empty_split_group_rejected() {
        let expense = Expense::new("e-oops", "Mystery", dec!(10), alice(), vec![]);
        let err = calculate_balances(&[expense]).unwrap_err();
        assert!(err.to_string().contains("e-oops"));
    }

    #[test]
    fn test_failed_expense_leaves_no_partial_state() {
        let mut ledger = Ledger::new();
        let bad = Expense::new("e-bad", "Mystery", dec!(10), alice(), vec![]);
        assert!(ledger.apply_expense(&bad).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rounds_after_fold_not_per_expense() {
        // 10 / 3 = 3.33…; the carried thirds cancel only if rounding
        // happens once at the end.
        let expenses: Vec<Expense> = (0..3)
            .map(|i| Expense::new(format!("e-{}", i), "Coffee", dec!(10), alice(), everyone()))
            .collect();
        let balances = calculate_balances(&expenses).unwrap();

        assert_eq!(balances[0].balance, dec!(20)); // 30 paid − 10 owed, exact
        assert_eq!(balances[1].balance, dec!(-10));
    }

    #[test]
    fn test_rounding_half_away_from_zero_on_balances() {
        // 0.03 split two ways leaves ±0.015 positions.
        let expense = Expense::new("e-1", "Gum", dec!(0.03), alice(), vec![bob(), carol()]);
        let balances = calculate_balances(&[expense]).unwrap();

        assert_eq!(balances[1].balance, dec!(-0.02));
        assert_eq!(balances[2].balance, dec!(-0.02));
    }

    #[test]
    fn test_first_encounter_order_and_first_name_wins() {
        let renamed = Participant::new("p-1", "Alicia");
        let expenses = [
            Expense::new("e-1", "Dinner", dec!(30), bob(), vec![alice(), bob()]),
            Expense::new("e-2", "Taxi", dec!(10), renamed.clone(), vec![renamed]),
        ];
        let balances = calculate_balances(&expenses).unwrap();

        let names: Vec<&str> = balances
            .iter()
            .map(|b| b.participant_name.as_str())
            .collect();
        // Bob first (payer of the first expense); p-1 keeps her first-seen name.
        assert_eq!(names, ["Bob", "Alice"]);
    }

    #[test]
    fn test_conservation() {
        let expenses = [
            Expense::new("e-1", "Dinner", dec!(30), alice(), everyone()),
            Expense::new("e-2", "Museum", dec!(25.55), bob(), vec![alice(), carol()]),
        ];
        let ledger = Ledger::from_expenses(expenses.iter()).unwrap();
        assert!(ledger.is_conserved());
    }

    #[test]
    fn test_total_outstanding_matches_creditor_sum() {
        let expenses = [Expense::new("e-1", "Dinner", dec!(30), alice(), everyone())];
        let ledger = Ledger::from_expenses(expenses.iter()).unwrap();
        assert_eq!(ledger.total_outstanding(), dec!(20));
    }
}
