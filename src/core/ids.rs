//! Process-unique identifier minting for new ledger entities.
//!
//! The engine itself never generates ids — creation flows (CLI, demos,
//! tests, any storage collaborator) mint them here when recording new
//! participants or expenses. Uniqueness is probabilistic: a millisecond
//! timestamp plus a random suffix, with no registry of issued ids.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 8;

/// Mint a collision-resistant opaque string id.
///
/// # Examples
///
/// ```
/// use splitledger::core::ids::unique_id;
///
/// let a = unique_id();
/// let b = unique_id();
/// assert_ne!(a, b);
/// ```
pub fn unique_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{}{}", base36(millis), suffix)
}

/// Lowercase base-36 rendering of an unsigned integer.
fn base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    // DIGITS is ASCII, so the bytes are always valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}
