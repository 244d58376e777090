//! Stress-testing utilities: random expense-log generation.
