//! Per-family snapshots.
//!
//! A snapshot is an owned copy of the traced structure. Steps never share
//! snapshot storage, so reading step `i` has no effect on step `j`.

use serde::{Deserialize, Serialize};

/// Full structure state recorded with a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    /// Array under sort
    Array(ArraySnapshot),
    /// Array under search
    Search(SearchSnapshot),
    /// Graph traversal progress
    Traversal(TraversalSnapshot),
    /// Greedy selection progress
    Selection(SelectionSnapshot),
    /// Dynamic-programming table
    Table(TableSnapshot),
    /// Linked list with node placements
    List(ListSnapshot),
}

/// Array contents during a sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySnapshot {
    /// Values as observed when the step's comparison is made
    pub values: Vec<i64>,
    /// Exchange performed at this step
    pub swap: Option<(usize, usize)>,
}

impl ArraySnapshot {
    /// Snapshot without an exchange
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, swap: None }
    }

    /// Record an exchange performed at this step
    #[must_use]
    pub fn with_swap(mut self, a: usize, b: usize) -> Self {
        self.swap = Some((a, b));
        self
    }

    /// Values once this step's exchange has been applied
    #[must_use]
    pub fn settled(&self) -> Vec<i64> {
        let mut values = self.values.clone();
        if let Some((a, b)) = self.swap {
            values.swap(a, b);
        }
        values
    }
}

/// Terminal state of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Still searching
    Searching,
    /// Target found at index
    Found(usize),
    /// Range exhausted without a match
    NotFound,
}

/// Array and cursor state during a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// Searched values
    pub values: Vec<i64>,
    /// Target value
    pub target: i64,
    /// Inclusive live range at the time of the comparison
    pub range: Option<(usize, usize)>,
    /// Index examined at this step
    pub cursor: usize,
    /// Outcome after this comparison
    pub outcome: SearchOutcome,
}

/// Traversal progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalSnapshot {
    /// Number of nodes in the graph
    pub node_count: usize,
    /// Nodes visited so far, in visitation order
    pub visited: Vec<usize>,
    /// Queue (BFS) or recursion path (DFS) after this visit
    pub frontier: Vec<usize>,
}

impl TraversalSnapshot {
    /// Whether `node` has been visited
    #[must_use]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.contains(&node)
    }
}

/// Greedy selection progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// Accepted items, by position in the input list, in acceptance order
    pub accepted: Vec<usize>,
    /// Running total weight of the accepted items
    pub total_weight: i64,
}

/// Dynamic-programming table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Row count
    pub rows: usize,
    /// Column count
    pub cols: usize,
    /// Row-major cells; `None` until computed
    pub cells: Vec<Option<i64>>,
    /// Row headers
    pub row_labels: Vec<String>,
    /// Column headers
    pub col_labels: Vec<String>,
}

impl TableSnapshot {
    /// Empty table with headers
    #[must_use]
    pub fn new(rows: usize, cols: usize, row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            row_labels,
            col_labels,
        }
    }

    /// Cell value, if computed
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Write a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = Some(value);
        }
    }

    /// Number of computed cells
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Arena identity of a linked-list node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListNodeId(pub usize);

impl std::fmt::Display for ListNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Node stored in the list arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListArenaNode {
    /// Arena id
    pub id: ListNodeId,
    /// Payload
    pub value: i64,
}

/// Where a node sits in the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Linked into the chain
    Chain,
    /// Off the chain: freshly created or being removed
    Detached,
}

/// Slot a node occupies at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Node
    pub node: ListNodeId,
    /// Horizontal slot, counted from the head
    pub slot: usize,
    /// Lane
    pub lane: Lane,
}

/// Linked list state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Every node ever allocated by the operation, indexed by id
    pub arena: Vec<ListArenaNode>,
    /// Live chain, head first
    pub chain: Vec<ListNodeId>,
    /// Nodes drawn at this step; nodes absent here are not drawn
    pub placements: Vec<Placement>,
}

impl ListSnapshot {
    /// Values along the live chain
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.chain
            .iter()
            .filter_map(|id| self.arena.get(id.0).map(|n| n.value))
            .collect()
    }

    /// Value stored at `id`
    #[must_use]
    pub fn value_of(&self, id: ListNodeId) -> Option<i64> {
        self.arena.get(id.0).map(|n| n.value)
    }

    /// Placement of `id`, if drawn
    #[must_use]
    pub fn placement_of(&self, id: ListNodeId) -> Option<Placement> {
        self.placements.iter().copied().find(|p| p.node == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_settled_applies_swap() {
        let snap = ArraySnapshot::new(vec![5, 3, 1]).with_swap(0, 1);
        assert_eq!(snap.values, vec![5, 3, 1]);
        assert_eq!(snap.settled(), vec![3, 5, 1]);
        assert_eq!(ArraySnapshot::new(vec![1, 2]).settled(), vec![1, 2]);
    }

    #[test]
    fn test_table_get_set() {
        let mut table = TableSnapshot::new(2, 3, vec![], vec![]);
        assert_eq!(table.get(1, 2), None);
        table.set(1, 2, 7);
        assert_eq!(table.get(1, 2), Some(7));
        assert_eq!(table.filled(), 1);
        table.set(5, 5, 1);
        assert_eq!(table.get(5, 5), None);
        assert_eq!(table.filled(), 1);
    }

    #[test]
    fn test_list_values_follow_chain() {
        let snap = ListSnapshot {
            arena: vec![
                ListArenaNode { id: ListNodeId(0), value: 10 },
                ListArenaNode { id: ListNodeId(1), value: 20 },
                ListArenaNode { id: ListNodeId(2), value: 30 },
            ],
            chain: vec![ListNodeId(2), ListNodeId(0)],
            placements: vec![Placement {
                node: ListNodeId(2),
                slot: 0,
                lane: Lane::Chain,
            }],
        };
        assert_eq!(snap.values(), vec![30, 10]);
        assert_eq!(snap.value_of(ListNodeId(1)), Some(20));
        assert!(snap.placement_of(ListNodeId(0)).is_none());
    }

    #[test]
    fn test_snapshot_tagged_serialization() {
        let snap = Snapshot::Selection(SelectionSnapshot {
            accepted: vec![2, 0],
            total_weight: 5,
        });
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["kind"], "selection");
        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
    }
}
