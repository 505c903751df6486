//! Algorithm tags and families.
//!
//! Dispatch everywhere in the workspace keys off [`Algorithm`]; the
//! kebab-case tag is what a UI or the CLI passes in.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family an algorithm belongs to. Each family shares one input shape,
/// one snapshot shape and one renderer adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmFamily {
    /// Comparison sorts
    Sorting,
    /// Array searches
    Searching,
    /// Graph traversals
    Graph,
    /// Greedy selection
    Greedy,
    /// Table-filling dynamic programming
    DynamicProgramming,
    /// Linked-list mutation
    LinkedList,
}

impl AlgorithmFamily {
    /// All families, in catalog order
    pub const ALL: [AlgorithmFamily; 6] = [
        AlgorithmFamily::Sorting,
        AlgorithmFamily::Searching,
        AlgorithmFamily::Graph,
        AlgorithmFamily::Greedy,
        AlgorithmFamily::DynamicProgramming,
        AlgorithmFamily::LinkedList,
    ];

    /// Stable tag of the family
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Sorting => "sorting",
            Self::Searching => "searching",
            Self::Graph => "graph",
            Self::Greedy => "greedy",
            Self::DynamicProgramming => "dynamic-programming",
            Self::LinkedList => "linked-list",
        }
    }

    /// Algorithms in this family
    pub fn algorithms(self) -> impl Iterator<Item = Algorithm> {
        Algorithm::ALL.into_iter().filter(move |a| a.family() == self)
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A concrete algorithm that can be traced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Bubble sort
    BubbleSort,
    /// Selection sort
    SelectionSort,
    /// Linear search
    LinearSearch,
    /// Binary search over a sorted array
    BinarySearch,
    /// Breadth-first traversal
    #[serde(rename = "bfs")]
    BreadthFirst,
    /// Depth-first traversal
    #[serde(rename = "dfs")]
    DepthFirst,
    /// Kruskal's minimum spanning forest
    Kruskal,
    /// Activity selection by earliest finish
    ActivitySelection,
    /// Fibonacci tabulation
    Fibonacci,
    /// 0/1 knapsack
    Knapsack,
    /// Longest common subsequence
    #[serde(rename = "lcs")]
    LongestCommonSubsequence,
    /// Insert a node into a linked list
    ListInsert,
    /// Delete a node from a linked list
    ListDelete,
    /// Search a linked list for a value
    ListSearch,
    /// Reverse a linked list in place
    ListReverse,
}

impl Algorithm {
    /// Every algorithm, in catalog order
    pub const ALL: [Algorithm; 15] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::Kruskal,
        Algorithm::ActivitySelection,
        Algorithm::Fibonacci,
        Algorithm::Knapsack,
        Algorithm::LongestCommonSubsequence,
        Algorithm::ListInsert,
        Algorithm::ListDelete,
        Algorithm::ListSearch,
        Algorithm::ListReverse,
    ];

    /// Stable kebab-case tag
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble-sort",
            Self::SelectionSort => "selection-sort",
            Self::LinearSearch => "linear-search",
            Self::BinarySearch => "binary-search",
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::Kruskal => "kruskal",
            Self::ActivitySelection => "activity-selection",
            Self::Fibonacci => "fibonacci",
            Self::Knapsack => "knapsack",
            Self::LongestCommonSubsequence => "lcs",
            Self::ListInsert => "list-insert",
            Self::ListDelete => "list-delete",
            Self::ListSearch => "list-search",
            Self::ListReverse => "list-reverse",
        }
    }

    /// Family this algorithm belongs to
    #[must_use]
    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            Self::BubbleSort | Self::SelectionSort => AlgorithmFamily::Sorting,
            Self::LinearSearch | Self::BinarySearch => AlgorithmFamily::Searching,
            Self::BreadthFirst | Self::DepthFirst => AlgorithmFamily::Graph,
            Self::Kruskal | Self::ActivitySelection => AlgorithmFamily::Greedy,
            Self::Fibonacci | Self::Knapsack | Self::LongestCommonSubsequence => {
                AlgorithmFamily::DynamicProgramming
            }
            Self::ListInsert | Self::ListDelete | Self::ListSearch | Self::ListReverse => {
                AlgorithmFamily::LinkedList
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.tag() == needle)
            .ok_or(CoreError::UnknownAlgorithm { tag: s.to_string() })
    }
}
