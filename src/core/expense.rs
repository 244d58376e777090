use crate::core::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single shared expense: one payer, a group that splits the cost equally.
///
/// The payer is credited for the full amount; they share the cost only when
/// listed in the split group themselves. Callers decide inclusion explicitly —
/// the engine never adds the payer to the group on its own.
///
/// Expenses are immutable once created. Balance calculation operates on
/// collections of expenses to derive net positions.
///
/// # Examples
///
/// ```
/// use splitledger::core::expense::Expense;
/// use splitledger::core::participant::Participant;
/// use rust_decimal_macros::dec;
///
/// let alice = Participant::new("p-1", "Alice");
/// let bob = Participant::new("p-2", "Bob");
///
/// let expense = Expense::new(
///     "e-1",
///     "Groceries",
///     dec!(42.50),
///     alice.clone(),
///     vec![alice, bob],
/// );
///
/// assert_eq!(expense.amount(), dec!(42.50));
/// assert_eq!(expense.split_group().len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: String,
    /// Human-readable description ("Dinner", "Taxi to airport").
    description: String,
    /// The amount paid. Must be positive.
    amount: Decimal,
    /// The participant who paid the full amount up front.
    payer: Participant,
    /// The participants among whom the cost is divided equally.
    /// Must be non-empty by the time balances are calculated.
    participants: Vec<Participant>,
    /// When the expense occurred.
    date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated now.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        payer: Participant,
        participants: Vec<Participant>,
    ) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Expense amount must be positive, got {}",
            amount
        );
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            payer,
            participants,
            date: Utc::now(),
        }
    }

    /// Set an explicit date (useful for testing / determinism).
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payer(&self) -> &Participant {
        &self.payer
    }

    /// The cost-sharing group. The payer appears here only if they share
    /// the cost themselves.
    pub fn split_group(&self) -> &[Participant] {
        &self.participants
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// A collection of expenses that can be submitted for balance calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseSet {
    expenses: Vec<Expense>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total amount paid across all expenses.
    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// All distinct participants referenced in this set, in the order they
    /// are first encountered (payer before split group, per expense).
    pub fn participants(&self) -> Vec<Participant> {
        let mut seen: HashSet<ParticipantId> = HashSet::new();
        let mut participants = Vec::new();
        for expense in &self.expenses {
            for p in std::iter::once(expense.payer()).chain(expense.split_group()) {
                if seen.insert(p.id().clone()) {
                    participants.push(p.clone());
                }
            }
        }
        participants
    }
}

impl FromIterator<Expense> for ExpenseSet {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}
