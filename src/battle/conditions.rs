use schema::MoveData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transient battle condition on a creature. Cleared or aged every round and
/// wiped when the creature leaves the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum VolatileStatus {
    Confused { turns_remaining: u8 },
    Protected,
    Flinch,
    MustRecharge,
    PreparingTo { attack: MoveData },
}

/// Condition kind without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatileKind {
    Confused,
    Protected,
    Flinch,
    MustRecharge,
    PreparingTo,
}

impl VolatileStatus {
    pub fn kind(&self) -> VolatileKind {
        match self {
            VolatileStatus::Confused { .. } => VolatileKind::Confused,
            VolatileStatus::Protected => VolatileKind::Protected,
            VolatileStatus::Flinch => VolatileKind::Flinch,
            VolatileStatus::MustRecharge => VolatileKind::MustRecharge,
            VolatileStatus::PreparingTo { .. } => VolatileKind::PreparingTo,
        }
    }

    /// Whether two conditions count as the same entry.
    ///
    /// Confusion answers "is it present, and has it expired": two expired
    /// entries match, two live entries match whatever their counters, and an
    /// expired entry never matches a live one. `PreparingTo` compares moves.
    pub fn same_condition(&self, other: &VolatileStatus) -> bool {
        match (self, other) {
            (
                VolatileStatus::Confused { turns_remaining: a },
                VolatileStatus::Confused { turns_remaining: b },
            ) => (*a == 0) == (*b == 0),
            (
                VolatileStatus::PreparingTo { attack: a },
                VolatileStatus::PreparingTo { attack: b },
            ) => a == b,
            (a, b) => a.kind() == b.kind(),
        }
    }

    /// One round older. Only confusion counts down.
    pub fn turn(&self) -> VolatileStatus {
        match self {
            VolatileStatus::Confused { turns_remaining } => VolatileStatus::Confused {
                turns_remaining: turns_remaining.saturating_sub(1),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for VolatileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolatileStatus::Confused { turns_remaining } => {
                write!(f, "confused for {} more turns", turns_remaining)
            }
            VolatileStatus::Protected => write!(f, "protected"),
            VolatileStatus::Flinch => write!(f, "flinch"),
            VolatileStatus::MustRecharge => write!(f, "must recharge"),
            VolatileStatus::PreparingTo { attack } => {
                write!(f, "preparing to use {}", attack.name)
            }
        }
    }
}

/// The volatile conditions on one creature, at most one per kind.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VolatileStatusSet {
    entries: Vec<VolatileStatus>,
}

impl VolatileStatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition, replacing any existing entry of the same kind.
    pub fn insert(&mut self, status: VolatileStatus) {
        let kind = status.kind();
        self.entries.retain(|existing| existing.kind() != kind);
        self.entries.push(status);
    }

    pub fn contains_kind(&self, kind: VolatileKind) -> bool {
        self.entries.iter().any(|entry| entry.kind() == kind)
    }

    /// Membership under [`VolatileStatus::same_condition`].
    pub fn contains(&self, status: &VolatileStatus) -> bool {
        self.entries.iter().any(|entry| entry.same_condition(status))
    }

    pub fn get(&self, kind: VolatileKind) -> Option<&VolatileStatus> {
        self.entries.iter().find(|entry| entry.kind() == kind)
    }

    pub fn remove_kind(&mut self, kind: VolatileKind) -> Option<VolatileStatus> {
        let position = self.entries.iter().position(|entry| entry.kind() == kind)?;
        Some(self.entries.remove(position))
    }

    /// Removes the entry matching `status` under [`VolatileStatus::same_condition`].
    pub fn remove(&mut self, status: &VolatileStatus) -> Option<VolatileStatus> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.same_condition(status))?;
        Some(self.entries.remove(position))
    }

    /// Ages every entry by one round.
    pub fn turn(&mut self) {
        self.entries = self.entries.iter().map(VolatileStatus::turn).collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &VolatileStatus> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
