//! Settlement planning: greedy reduction of balance sets to
//! minimal payment lists.

pub mod settlement;
