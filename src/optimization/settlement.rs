use crate::core::expense::ExpenseSet;
use crate::core::ledger::{Balance, BalanceError, Ledger};
use crate::core::money::{format_currency, round_to_cents, SETTLED_EPSILON};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single proposed payment: `from` (a debtor) pays `to` (a creditor).
///
/// `from` and `to` carry display names, ready for presentation. Settlements
/// are ephemeral — derived from a balance set, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSettlement {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

impl std::fmt::Display for DebtSettlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}  {}",
            self.from,
            self.to,
            format_currency(self.amount)
        )
    }
}

/// The ordered list of payments that zeroes out a balance set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    settlements: Vec<DebtSettlement>,
    /// Total amount moved by the plan — equals the sum of positive input
    /// balances within rounding tolerance.
    total_settled: Decimal,
}

impl SettlementPlan {
    /// The proposed payments, in the order the matching emitted them
    /// (largest creditor and largest debtor resolve first).
    pub fn settlements(&self) -> &[DebtSettlement] {
        &self.settlements
    }

    pub fn into_settlements(self) -> Vec<DebtSettlement> {
        self.settlements
    }

    /// Number of payments in the plan. At most `n − 1` for `n` unsettled
    /// balances, since every matching step fully resolves at least one party.
    pub fn transaction_count(&self) -> usize {
        self.settlements.len()
    }

    /// Total amount moved by the plan.
    pub fn total_settled(&self) -> Decimal {
        self.total_settled
    }

    /// True when nothing needed settling.
    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Transactions:  {}", self.transaction_count())?;
        writeln!(f, "Total settled: {}", format_currency(self.total_settled))?;
        for settlement in &self.settlements {
            writeln!(f, "  {}", settlement)?;
        }
        Ok(())
    }
}

/// The debt optimizer.
///
/// Reduces a balance set to a small list of direct payments using greedy
/// largest-vs-largest matching. The heuristic is not a proven
/// minimum-transaction solver for every weighted multi-party case, but it
/// emits at most `n − 1` payments and is optimal for the common ones.
pub struct DebtOptimizer;

impl DebtOptimizer {
    /// Compute a settlement plan for a set of balances.
    ///
    /// The input is cloned internally before any running totals are
    /// mutated, so callers keep their balances untouched. Balances within
    /// the settled tolerance never appear in the output.
    ///
    /// # Algorithm
    ///
    /// 1. Partition into creditors (`> 0.01`) and debtors (`< −0.01`);
    ///    discard the already-settled rest.
    /// 2. Sort creditors descending, debtors ascending (most negative first).
    /// 3. Repeatedly match the largest unresolved creditor against the
    ///    largest unresolved debtor for `min(credit, |debt|)`, advancing
    ///    whichever side drops inside the tolerance.
    ///
    /// # Examples
    ///
    /// ```
    /// use splitledger::core::ledger::Balance;
    /// use splitledger::core::participant::ParticipantId;
    /// use splitledger::optimization::settlement::DebtOptimizer;
    /// use rust_decimal_macros::dec;
    ///
    /// let balances = vec![
    ///     Balance {
    ///         participant_id: ParticipantId::new("p-1"),
    ///         participant_name: "Alice".into(),
    ///         balance: dec!(30),
    ///     },
    ///     Balance {
    ///         participant_id: ParticipantId::new("p-2"),
    ///         participant_name: "Bob".into(),
    ///         balance: dec!(-20),
    ///     },
    ///     Balance {
    ///         participant_id: ParticipantId::new("p-3"),
    ///         participant_name: "Carol".into(),
    ///         balance: dec!(-10),
    ///     },
    /// ];
    ///
    /// let plan = DebtOptimizer::optimize(&balances);
    /// assert_eq!(plan.transaction_count(), 2);
    /// assert_eq!(plan.total_settled(), dec!(30));
    /// assert_eq!(plan.settlements()[0].from, "Bob");
    /// ```
    pub fn optimize(balances: &[Balance]) -> SettlementPlan {
        let mut creditors: Vec<Balance> = balances
            .iter()
            .filter(|b| b.balance > SETTLED_EPSILON)
            .cloned()
            .collect();
        let mut debtors: Vec<Balance> = balances
            .iter()
            .filter(|b| b.balance < -SETTLED_EPSILON)
            .cloned()
            .collect();

        creditors.sort_by(|a, b| b.balance.cmp(&a.balance));
        debtors.sort_by(|a, b| a.balance.cmp(&b.balance));

        let mut settlements = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < creditors.len() && j < debtors.len() {
            let creditor = &creditors[i];
            let debtor = &debtors[j];
            let amount = creditor.balance.min(-debtor.balance);

            if amount > SETTLED_EPSILON {
                debug!(
                    "match: {} pays {} {}",
                    debtor.participant_name, creditor.participant_name, amount
                );
                settlements.push(DebtSettlement {
                    from: debtor.participant_name.clone(),
                    to: creditor.participant_name.clone(),
                    amount: round_to_cents(amount),
                });
            }

            creditors[i].balance -= amount;
            debtors[j].balance += amount;

            if creditors[i].balance < SETTLED_EPSILON {
                i += 1;
            }
            if debtors[j].balance > -SETTLED_EPSILON {
                j += 1;
            }
        }

        let total_settled = settlements.iter().map(|s| s.amount).sum();
        SettlementPlan {
            settlements,
            total_settled,
        }
    }

    /// Full pipeline: fold an expense set into balances and plan its
    /// settlement in one call.
    pub fn settle_expenses(expenses: &ExpenseSet) -> Result<SettlementPlan, BalanceError> {
        let ledger = Ledger::from_expenses(expenses.expenses())?;
        Ok(Self::optimize(&ledger.balances()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Expense;
    use crate::core::participant::{Participant, ParticipantId};
    use rust_decimal_macros::dec;

    fn balance(id: &str, name: &str, amount: Decimal) -> Balance {
        Balance {
            participant_id: ParticipantId::new(id),
            participant_name: name.to_string(),
            balance: amount,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        let plan = DebtOptimizer::optimize(&[]);
        assert!(plan.is_empty());
        assert_eq!(plan.total_settled(), Decimal::ZERO);
    }

    #[test]
    fn test_single_pair() {
        let balances = [
            balance("p-1", "Alice", dec!(10)),
            balance("p-2", "Bob", dec!(-10)),
        ];
        let plan = DebtOptimizer::optimize(&balances);

        assert_eq!(plan.transaction_count(), 1);
        assert_eq!(plan.settlements()[0].from, "Bob");
        assert_eq!(plan.settlements()[0].to, "Alice");
        assert_eq!(plan.settlements()[0].amount, dec!(10));
    }

    #[test]
    fn test_largest_debtor_settles_first() {
        let balances = [
            balance("p-1", "Alice", dec!(30)),
            balance("p-2", "Bob", dec!(-20)),
            balance("p-3", "Carol", dec!(-10)),
        ];
        let plan = DebtOptimizer::optimize(&balances);

        assert_eq!(plan.transaction_count(), 2);
        assert_eq!(plan.total_settled(), dec!(30));

        let first = &plan.settlements()[0];
        assert_eq!((first.from.as_str(), first.to.as_str()), ("Bob", "Alice"));
        assert_eq!(first.amount, dec!(20));

        let second = &plan.settlements()[1];
        assert_eq!(
            (second.from.as_str(), second.to.as_str()),
            ("Carol", "Alice")
        );
        assert_eq!(second.amount, dec!(10));
    }

    #[test]
    fn test_settled_balances_never_appear() {
        let balances = [
            balance("p-1", "Alice", dec!(25)),
            balance("p-2", "Bob", dec!(-25)),
            balance("p-3", "Carol", dec!(0.01)),
            balance("p-4", "Dave", dec!(-0.005)),
        ];
        let plan = DebtOptimizer::optimize(&balances);

        for s in plan.settlements() {
            assert_ne!(s.from, "Carol");
            assert_ne!(s.to, "Carol");
            assert_ne!(s.from, "Dave");
            assert_ne!(s.to, "Dave");
        }
    }

    #[test]
    fn test_input_left_untouched() {
        let balances = vec![
            balance("p-1", "Alice", dec!(10)),
            balance("p-2", "Bob", dec!(-10)),
        ];
        let before = balances.clone();
        let _ = DebtOptimizer::optimize(&balances);
        assert_eq!(balances, before);
    }

    #[test]
    fn test_transaction_count_bound() {
        let balances = [
            balance("p-1", "Alice", dec!(40)),
            balance("p-2", "Bob", dec!(20)),
            balance("p-3", "Carol", dec!(-15)),
            balance("p-4", "Dave", dec!(-25)),
            balance("p-5", "Erin", dec!(-20)),
        ];
        let plan = DebtOptimizer::optimize(&balances);
        assert!(plan.transaction_count() <= balances.len() - 1);
        assert_eq!(plan.total_settled(), dec!(60));
    }

    #[test]
    fn test_one_sided_balances_produce_no_plan() {
        // Nothing to match a creditor against.
        let balances = [balance("p-1", "Alice", dec!(10))];
        let plan = DebtOptimizer::optimize(&balances);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_settle_expenses_pipeline() {
        let alice = Participant::new("p-1", "Alice");
        let bob = Participant::new("p-2", "Bob");
        let carol = Participant::new("p-3", "Carol");
        let everyone = vec![alice.clone(), bob.clone(), carol.clone()];

        let mut set = ExpenseSet::new();
        set.add(Expense::new("e-1", "Dinner", dec!(30), alice, everyone.clone()));
        set.add(Expense::new("e-2", "Hotel", dec!(60), bob, everyone));

        let plan = DebtOptimizer::settle_expenses(&set).unwrap();
        assert_eq!(plan.transaction_count(), 1);
        assert_eq!(plan.settlements()[0].from, "Carol");
        assert_eq!(plan.settlements()[0].to, "Bob");
        assert_eq!(plan.settlements()[0].amount, dec!(30));
    }

    #[test]
    fn test_plan_display() {
        let balances = [
            balance("p-1", "Alice", dec!(10)),
            balance("p-2", "Bob", dec!(-10)),
        ];
        let plan = DebtOptimizer::optimize(&balances);
        let rendered = format!("{}", plan);
        assert!(rendered.contains("Transactions:  1"));
        assert!(rendered.contains("Bob → Alice  $10.00"));
    }
}
