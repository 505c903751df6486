//! Steps: one recorded moment of an algorithm's execution.

use crate::snapshot::{ListNodeId, Snapshot};
use serde::{Deserialize, Serialize};

/// Reference to a piece of the traced structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructRef {
    /// Array index
    Index(usize),
    /// Graph node id
    Node(usize),
    /// Table cell
    Cell {
        /// Row
        row: usize,
        /// Column
        col: usize,
    },
    /// Edge, by position in the input edge list
    Edge(usize),
    /// Activity, by position in the input activity list
    Interval(usize),
    /// Linked-list node, by arena id
    ListNode(ListNodeId),
}

/// Role a highlighted reference plays at this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRole {
    /// Being compared
    Comparing,
    /// Exchanged at this step
    Swapped,
    /// In final position
    Sorted,
    /// Inside the live search range
    Range,
    /// Examined at this step
    Examined,
    /// Already examined and ruled out
    Checked,
    /// Matches the target
    Found,
    /// Visited at this step
    Current,
    /// Visited earlier
    Visited,
    /// Waiting to be visited
    Frontier,
    /// Accepted into the solution
    Selected,
    /// Rejected by the greedy rule
    Discarded,
    /// Read by the recurrence
    Operand,
    /// Written at this step
    Computed,
    /// Walked over by a list cursor
    Traversing,
    /// Newly created node
    Inserted,
    /// Node being removed
    Deleted,
    /// Pointer rewired at this step
    Linked,
}

/// A highlighted reference tagged with its role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Highlight {
    /// Role
    pub role: HighlightRole,
    /// Target
    pub target: StructRef,
}

impl Highlight {
    /// Create a highlight
    #[must_use]
    pub const fn new(role: HighlightRole, target: StructRef) -> Self {
        Self { role, target }
    }
}

/// One discrete moment in an algorithm's execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position within the owning trace
    pub index: usize,
    /// Human-readable explanation
    pub description: String,
    /// References the renderer should distinguish
    pub highlights: Vec<Highlight>,
    /// Full state of the structure as of this step
    pub snapshot: Snapshot,
}

impl Step {
    /// Targets highlighted with `role`, in emission order
    pub fn targets(&self, role: HighlightRole) -> impl Iterator<Item = StructRef> + '_ {
        self.highlights
            .iter()
            .filter(move |h| h.role == role)
            .map(|h| h.target)
    }

    /// Whether `target` carries `role` at this step
    #[must_use]
    pub fn has(&self, role: HighlightRole, target: StructRef) -> bool {
        self.highlights
            .iter()
            .any(|h| h.role == role && h.target == target)
    }

    /// Role of `target`, preferring the first one emitted
    #[must_use]
    pub fn role_of(&self, target: StructRef) -> Option<HighlightRole> {
        self.highlights
            .iter()
            .find(|h| h.target == target)
            .map(|h| h.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ArraySnapshot;

    fn sample() -> Step {
        Step {
            index: 0,
            description: "Comparing 5 and 3".to_string(),
            highlights: vec![
                Highlight::new(HighlightRole::Comparing, StructRef::Index(0)),
                Highlight::new(HighlightRole::Comparing, StructRef::Index(1)),
                Highlight::new(HighlightRole::Sorted, StructRef::Index(4)),
            ],
            snapshot: Snapshot::Array(ArraySnapshot::new(vec![5, 3, 1, 4, 2])),
        }
    }

    #[test]
    fn test_targets_by_role() {
        let step = sample();
        let comparing: Vec<_> = step.targets(HighlightRole::Comparing).collect();
        assert_eq!(comparing, vec![StructRef::Index(0), StructRef::Index(1)]);
        assert_eq!(step.targets(HighlightRole::Swapped).count(), 0);
    }

    #[test]
    fn test_has_and_role_of() {
        let step = sample();
        assert!(step.has(HighlightRole::Sorted, StructRef::Index(4)));
        assert!(!step.has(HighlightRole::Sorted, StructRef::Index(0)));
        assert_eq!(step.role_of(StructRef::Index(1)), Some(HighlightRole::Comparing));
        assert_eq!(step.role_of(StructRef::Index(3)), None);
    }

    #[test]
    fn test_struct_ref_serialization() {
        let cell = StructRef::Cell { row: 2, col: 3 };
        let json = serde_json::to_string(&cell).unwrap();
        let back: StructRef = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, back);
    }
}
