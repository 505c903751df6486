//! Typed algorithm inputs and their validation.
//!
//! Generators only ever see input that passed [`AlgorithmInput::validate`];
//! bounds come from [`GeneratorLimits`] so trace length and memory stay
//! predictable.

use algolab_core::{Algorithm, AlgorithmFamily};
use serde::{Deserialize, Serialize};

/// Input rejected before generation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Required field left empty
    #[error("{field} is required")]
    Missing {
        /// Field name
        field: String,
    },

    /// Field could not be parsed as a number
    #[error("{field} must be a number, got '{value}'")]
    NotNumeric {
        /// Field name
        field: String,
        /// Offending text
        value: String,
    },

    /// Field outside its allowed range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Field name
        field: String,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Field present but semantically wrong
    #[error("{field}: {reason}")]
    Invalid {
        /// Field name
        field: String,
        /// Explanation
        reason: String,
    },

    /// Input shape does not fit the algorithm
    #[error("{algorithm} expects {expected} input")]
    WrongShape {
        /// Algorithm that was requested
        algorithm: Algorithm,
        /// Expected input kind
        expected: &'static str,
    },
}

impl InputError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }

    pub(crate) fn out_of_range(field: &str, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            min,
            max,
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Caps on input size, applied before any generator runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    /// Longest array for sorting and searching
    pub max_array_len: usize,
    /// Most graph nodes for traversal and spanning trees
    pub max_graph_nodes: usize,
    /// Most edges in a graph
    pub max_edges: usize,
    /// Most activities for activity selection
    pub max_activities: usize,
    /// Largest Fibonacci index (92 is the last that fits in `i64`)
    pub max_fibonacci: u32,
    /// Most cells in any dynamic-programming table
    pub max_table_cells: usize,
    /// Longest linked list
    pub max_list_len: usize,
    /// Largest magnitude of an edge weight or activity time
    pub max_magnitude: i64,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_array_len: 20,
            max_graph_nodes: 26,
            max_edges: 64,
            max_activities: 20,
            max_fibonacci: 90,
            max_table_cells: 1024,
            max_list_len: 12,
            max_magnitude: 1_000_000,
        }
    }
}

impl GeneratorLimits {
    /// Set the array cap
    #[must_use]
    pub fn with_max_array_len(mut self, len: usize) -> Self {
        self.max_array_len = len;
        self
    }

    /// Set the table cap
    #[must_use]
    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    /// Set the weight and time cap
    #[must_use]
    pub fn with_max_magnitude(mut self, magnitude: i64) -> Self {
        self.max_magnitude = magnitude;
        self
    }

    fn check_magnitude(&self, field: &str, value: i64) -> Result<(), InputError> {
        let cap = self.max_magnitude;
        if (-cap..=cap).contains(&value) {
            Ok(())
        } else {
            Err(InputError::out_of_range(field, -cap, cap))
        }
    }
}

/// Array to sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInput {
    /// Values in their initial order
    pub values: Vec<i64>,
}

/// Array and target to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    /// Values; must be sorted for binary search
    pub values: Vec<i64>,
    /// Value to look for
    pub target: i64,
}

/// Undirected graph given as an edge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Node count; nodes are `0..node_count`
    pub node_count: usize,
    /// Undirected edges, in insertion order
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create a graph
    #[must_use]
    pub fn new(node_count: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { node_count, edges }
    }

    /// Adjacency lists; neighbors keep edge insertion order
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.node_count];
        for &(a, b) in &self.edges {
            if a >= self.node_count || b >= self.node_count {
                continue;
            }
            if !adj[a].contains(&b) {
                adj[a].push(b);
            }
            if !adj[b].contains(&a) {
                adj[b].push(a);
            }
        }
        adj
    }

    fn validate(&self, limits: &GeneratorLimits) -> Result<(), InputError> {
        if self.node_count == 0 {
            return Err(InputError::missing("nodes"));
        }
        if self.node_count > limits.max_graph_nodes {
            return Err(InputError::out_of_range(
                "nodes",
                1,
                limits.max_graph_nodes as i64,
            ));
        }
        if self.edges.len() > limits.max_edges {
            return Err(InputError::out_of_range("edges", 0, limits.max_edges as i64));
        }
        for &(a, b) in &self.edges {
            if a >= self.node_count || b >= self.node_count {
                return Err(InputError::invalid(
                    "edges",
                    format!("edge {}-{} references a missing node", a, b),
                ));
            }
            if a == b {
                return Err(InputError::invalid(
                    "edges",
                    format!("self-loop on node {}", a),
                ));
            }
        }
        Ok(())
    }
}

/// Graph and start node for a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalInput {
    /// Graph to traverse
    pub graph: Graph,
    /// Start node
    pub start: usize,
}

/// Weighted undirected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// One endpoint
    pub from: usize,
    /// Other endpoint
    pub to: usize,
    /// Weight
    pub weight: i64,
}

impl WeightedEdge {
    /// Create an edge
    #[must_use]
    pub const fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }
}

/// Weighted graph for a spanning forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTreeInput {
    /// Node count
    pub node_count: usize,
    /// Weighted edges
    pub edges: Vec<WeightedEdge>,
}

impl SpanningTreeInput {
    /// Unweighted view of the same graph
    #[must_use]
    pub fn graph(&self) -> Graph {
        Graph::new(
            self.node_count,
            self.edges.iter().map(|e| (e.from, e.to)).collect(),
        )
    }
}

/// Half-open activity `[start, finish)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Start time
    pub start: i64,
    /// Finish time
    pub finish: i64,
}

impl Activity {
    /// Create an activity
    #[must_use]
    pub const fn new(start: i64, finish: i64) -> Self {
        Self { start, finish }
    }
}

/// Activities to schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Candidate activities
    pub activities: Vec<Activity>,
}

/// Fibonacci index to tabulate up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciInput {
    /// Index of the last term
    pub n: u32,
}

/// Knapsack item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackItem {
    /// Value gained by packing the item
    pub value: i64,
    /// Capacity the item consumes
    pub weight: usize,
}

impl KnapsackItem {
    /// Create an item
    #[must_use]
    pub const fn new(value: i64, weight: usize) -> Self {
        Self { value, weight }
    }
}

/// 0/1 knapsack instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackInput {
    /// Items
    pub items: Vec<KnapsackItem>,
    /// Knapsack capacity
    pub capacity: usize,
}

/// Pair of strings for LCS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsInput {
    /// Row string
    pub left: String,
    /// Column string
    pub right: String,
}

/// Where a list operation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPosition {
    /// First node
    Head,
    /// Last node (or after it, for insertion)
    Tail,
    /// Zero-based position
    At(usize),
}

impl ListPosition {
    /// Concrete index for a list of `len` nodes. Insertion at the tail
    /// resolves to `len`, deletion at the tail to `len - 1`.
    #[must_use]
    pub fn resolve(&self, len: usize, inserting: bool) -> usize {
        match self {
            Self::Head => 0,
            Self::Tail if inserting => len,
            Self::Tail => len.saturating_sub(1),
            Self::At(i) => *i,
        }
    }
}

/// Operation applied to a linked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ListOperation {
    /// Insert a value
    Insert {
        /// Value to insert
        value: i64,
        /// Insertion point
        at: ListPosition,
    },
    /// Delete a node
    Delete {
        /// Node to delete
        at: ListPosition,
    },
    /// Search for a value
    Search {
        /// Value to look for
        value: i64,
    },
    /// Reverse in place
    Reverse,
}

impl ListOperation {
    /// Algorithm that performs this operation
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Insert { .. } => Algorithm::ListInsert,
            Self::Delete { .. } => Algorithm::ListDelete,
            Self::Search { .. } => Algorithm::ListSearch,
            Self::Reverse => Algorithm::ListReverse,
        }
    }
}

/// Initial list and the operation to trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInput {
    /// Initial values, head first
    pub values: Vec<i64>,
    /// Operation
    pub operation: ListOperation,
}

/// Per-family parameter bag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlgorithmInput {
    /// Sorting input
    Sort(SortInput),
    /// Searching input
    Search(SearchInput),
    /// Traversal input
    Traversal(TraversalInput),
    /// Kruskal input
    SpanningTree(SpanningTreeInput),
    /// Activity selection input
    Activities(ActivityInput),
    /// Fibonacci input
    Fibonacci(FibonacciInput),
    /// Knapsack input
    Knapsack(KnapsackInput),
    /// LCS input
    Lcs(LcsInput),
    /// Linked-list input
    List(ListInput),
}

impl AlgorithmInput {
    /// Human name of the input kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sort(_) => "sort",
            Self::Search(_) => "search",
            Self::Traversal(_) => "traversal",
            Self::SpanningTree(_) => "spanning-tree",
            Self::Activities(_) => "activities",
            Self::Fibonacci(_) => "fibonacci",
            Self::Knapsack(_) => "knapsack",
            Self::Lcs(_) => "lcs",
            Self::List(_) => "list",
        }
    }

    /// Input kind each algorithm expects
    #[must_use]
    pub const fn expected_kind(algorithm: Algorithm) -> &'static str {
        match algorithm {
            Algorithm::BubbleSort | Algorithm::SelectionSort => "sort",
            Algorithm::LinearSearch | Algorithm::BinarySearch => "search",
            Algorithm::BreadthFirst | Algorithm::DepthFirst => "traversal",
            Algorithm::Kruskal => "spanning-tree",
            Algorithm::ActivitySelection => "activities",
            Algorithm::Fibonacci => "fibonacci",
            Algorithm::Knapsack => "knapsack",
            Algorithm::LongestCommonSubsequence => "lcs",
            Algorithm::ListInsert
            | Algorithm::ListDelete
            | Algorithm::ListSearch
            | Algorithm::ListReverse => "list",
        }
    }

    /// Check the input fits `algorithm` and stays within `limits`
    ///
    /// # Errors
    ///
    /// Returns the first problem found
    pub fn validate(&self, algorithm: Algorithm, limits: &GeneratorLimits) -> Result<(), InputError> {
        let expected = Self::expected_kind(algorithm);
        if self.kind() != expected {
            return Err(InputError::WrongShape { algorithm, expected });
        }

        match self {
            Self::Sort(input) => {
                if input.values.is_empty() {
                    return Err(InputError::missing("values"));
                }
                if input.values.len() > limits.max_array_len {
                    return Err(InputError::out_of_range(
                        "values",
                        1,
                        limits.max_array_len as i64,
                    ));
                }
            }
            Self::Search(input) => {
                if input.values.len() > limits.max_array_len {
                    return Err(InputError::out_of_range(
                        "values",
                        0,
                        limits.max_array_len as i64,
                    ));
                }
                if algorithm == Algorithm::BinarySearch
                    && input.values.windows(2).any(|w| w[0] >= w[1])
                {
                    return Err(InputError::invalid(
                        "values",
                        "binary search needs distinct values in ascending order",
                    ));
                }
            }
            Self::Traversal(input) => {
                input.graph.validate(limits)?;
                if input.start >= input.graph.node_count {
                    return Err(InputError::out_of_range(
                        "start",
                        0,
                        input.graph.node_count as i64 - 1,
                    ));
                }
            }
            Self::SpanningTree(input) => {
                input.graph().validate(limits)?;
                for edge in &input.edges {
                    limits.check_magnitude("weight", edge.weight)?;
                }
            }
            Self::Activities(input) => {
                if input.activities.is_empty() {
                    return Err(InputError::missing("activities"));
                }
                if input.activities.len() > limits.max_activities {
                    return Err(InputError::out_of_range(
                        "activities",
                        1,
                        limits.max_activities as i64,
                    ));
                }
                for activity in &input.activities {
                    limits.check_magnitude("activities", activity.start)?;
                    limits.check_magnitude("activities", activity.finish)?;
                }
                if let Some(bad) = input.activities.iter().find(|a| a.finish < a.start) {
                    return Err(InputError::invalid(
                        "activities",
                        format!("activity {}-{} finishes before it starts", bad.start, bad.finish),
                    ));
                }
            }
            Self::Fibonacci(input) => {
                let cap = (limits.max_fibonacci as usize)
                    .min(limits.max_table_cells.saturating_sub(1))
                    .min(92);
                if input.n < 1 || input.n as usize > cap {
                    return Err(InputError::out_of_range("n", 1, cap as i64));
                }
            }
            Self::Knapsack(input) => {
                if input.items.is_empty() {
                    return Err(InputError::missing("items"));
                }
                if let Some(item) = input.items.iter().find(|i| i.value < 0) {
                    return Err(InputError::invalid(
                        "items",
                        format!("item value {} is negative", item.value),
                    ));
                }
                let cells = (input.items.len() + 1).saturating_mul(input.capacity + 1);
                if cells > limits.max_table_cells {
                    return Err(InputError::invalid(
                        "capacity",
                        format!(
                            "table of {} cells exceeds the limit of {}",
                            cells, limits.max_table_cells
                        ),
                    ));
                }
            }
            Self::Lcs(input) => {
                if input.left.is_empty() {
                    return Err(InputError::missing("left"));
                }
                if input.right.is_empty() {
                    return Err(InputError::missing("right"));
                }
                let cells = (input.left.chars().count() + 1)
                    .saturating_mul(input.right.chars().count() + 1);
                if cells > limits.max_table_cells {
                    return Err(InputError::invalid(
                        "right",
                        format!(
                            "table of {} cells exceeds the limit of {}",
                            cells, limits.max_table_cells
                        ),
                    ));
                }
            }
            Self::List(input) => {
                if input.operation.algorithm() != algorithm {
                    return Err(InputError::invalid(
                        "operation",
                        format!("{} cannot run a {} operation", algorithm, input.operation.algorithm()),
                    ));
                }
                let len = input.values.len();
                if len > limits.max_list_len {
                    return Err(InputError::out_of_range(
                        "values",
                        0,
                        limits.max_list_len as i64,
                    ));
                }
                match input.operation {
                    ListOperation::Insert { at, .. } => {
                        if len >= limits.max_list_len {
                            return Err(InputError::invalid("values", "list is full"));
                        }
                        if at.resolve(len, true) > len {
                            return Err(InputError::out_of_range("position", 0, len as i64));
                        }
                    }
                    ListOperation::Delete { at } => {
                        if len == 0 {
                            return Err(InputError::invalid("values", "list is empty"));
                        }
                        if at.resolve(len, false) >= len {
                            return Err(InputError::out_of_range(
                                "position",
                                0,
                                len as i64 - 1,
                            ));
                        }
                    }
                    ListOperation::Search { .. } | ListOperation::Reverse => {}
                }
            }
        }

        Ok(())
    }

    /// Family whose generators accept this input
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Self::Sort(_) => AlgorithmFamily::Sorting,
            Self::Search(_) => AlgorithmFamily::Searching,
            Self::Traversal(_) => AlgorithmFamily::Graph,
            Self::SpanningTree(_) | Self::Activities(_) => AlgorithmFamily::Greedy,
            Self::Fibonacci(_) | Self::Knapsack(_) | Self::Lcs(_) => {
                AlgorithmFamily::DynamicProgramming
            }
            Self::List(_) => AlgorithmFamily::LinkedList,
        }
    }
}
