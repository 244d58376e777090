use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant in the shared-expense ledger.
///
/// Identifiers are opaque strings minted by the caller (see
/// [`crate::core::ids::unique_id`]). The engine never interprets them —
/// any id it has not seen before is simply admitted as a new participant.
///
/// # Examples
///
/// ```
/// use splitledger::core::participant::ParticipantId;
///
/// let alice = ParticipantId::new("p-alice");
/// let bob = ParticipantId::new("p-bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this participant ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A person taking part in shared expenses.
///
/// The `name` is a display label only — it is not required to be unique.
/// Identity is carried entirely by the [`ParticipantId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
}

impl Participant {
    /// Create a new participant with the given id and display name.
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_equality() {
        let a = ParticipantId::new("p-1");
        let b = ParticipantId::new("p-1");
        let c = ParticipantId::new("p-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_id_display() {
        let id = ParticipantId::new("p-carol");
        assert_eq!(format!("{}", id), "p-carol");
    }

    #[test]
    fn test_participant_display_uses_name() {
        let p = Participant::new("p-1", "Alice");
        assert_eq!(format!("{}", p), "Alice");
        assert_eq!(p.id().as_str(), "p-1");
    }

    #[test]
    fn test_names_need_not_be_unique() {
        let a = Participant::new("p-1", "Alex");
        let b = Participant::new("p-2", "Alex");
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }
}
