//! Generator registry, dispatch by algorithm tag, and catalog text.

use crate::dynamic::DynamicGenerator;
use crate::graph::TraversalGenerator;
use crate::greedy::GreedyGenerator;
use crate::input::{AlgorithmInput, GeneratorLimits, InputError};
use crate::linked_list::LinkedListGenerator;
use crate::searching::SearchingGenerator;
use crate::sorting::SortingGenerator;
use algolab_core::{Algorithm, AlgorithmFamily, Trace};
use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Produces a trace for one algorithm
///
/// Implementations are pure: the same input always yields the same trace.
pub trait TraceGenerator: Send + Sync {
    /// Algorithm this generator runs
    fn algorithm(&self) -> Algorithm;

    /// Run the algorithm to completion
    ///
    /// # Errors
    ///
    /// Returns error if the input is the wrong shape for this algorithm
    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError>;
}

/// Error from registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Input rejected
    #[error(transparent)]
    Input(#[from] InputError),

    /// No generator for the algorithm
    #[error("no generator registered for {algorithm}")]
    NotRegistered {
        /// Algorithm
        algorithm: Algorithm,
    },

    /// Generator already present
    #[error("generator already registered for {algorithm}")]
    AlreadyRegistered {
        /// Algorithm
        algorithm: Algorithm,
    },
}

/// Registry of trace generators keyed by algorithm
#[derive(Clone)]
pub struct GeneratorRegistry {
    generators: IndexMap<Algorithm, Arc<dyn TraceGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            generators: IndexMap::new(),
        }
    }

    /// Registry holding a generator for every known algorithm
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [Arc<dyn TraceGenerator>; 15] = [
            Arc::new(SortingGenerator::bubble()),
            Arc::new(SortingGenerator::selection()),
            Arc::new(SearchingGenerator::linear()),
            Arc::new(SearchingGenerator::binary()),
            Arc::new(TraversalGenerator::breadth_first()),
            Arc::new(TraversalGenerator::depth_first()),
            Arc::new(GreedyGenerator::kruskal()),
            Arc::new(GreedyGenerator::activity_selection()),
            Arc::new(DynamicGenerator::new(Algorithm::Fibonacci)),
            Arc::new(DynamicGenerator::new(Algorithm::Knapsack)),
            Arc::new(DynamicGenerator::new(Algorithm::LongestCommonSubsequence)),
            Arc::new(LinkedListGenerator::new(Algorithm::ListInsert)),
            Arc::new(LinkedListGenerator::new(Algorithm::ListDelete)),
            Arc::new(LinkedListGenerator::new(Algorithm::ListSearch)),
            Arc::new(LinkedListGenerator::new(Algorithm::ListReverse)),
        ];
        for generator in defaults {
            registry.generators.insert(generator.algorithm(), generator);
        }
        registry
    }

    /// Register a generator
    ///
    /// # Errors
    ///
    /// Returns error if the algorithm already has a generator
    pub fn register(&mut self, generator: Arc<dyn TraceGenerator>) -> Result<(), CatalogError> {
        let algorithm = generator.algorithm();
        if self.generators.contains_key(&algorithm) {
            return Err(CatalogError::AlreadyRegistered { algorithm });
        }
        self.generators.insert(algorithm, generator);
        Ok(())
    }

    /// Replace (or add) the generator for its algorithm
    pub fn replace(&mut self, generator: Arc<dyn TraceGenerator>) -> Option<Arc<dyn TraceGenerator>> {
        self.generators.insert(generator.algorithm(), generator)
    }

    /// Generator for `algorithm`
    #[must_use]
    pub fn get(&self, algorithm: Algorithm) -> Option<Arc<dyn TraceGenerator>> {
        self.generators.get(&algorithm).map(Arc::clone)
    }

    /// Whether `algorithm` has a generator
    #[must_use]
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.generators.contains_key(&algorithm)
    }

    /// Registered algorithms, in registration order
    #[must_use]
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.generators.keys().copied().collect()
    }

    /// Number of registered generators
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Validate `input` and run the generator for `algorithm`
    ///
    /// # Errors
    ///
    /// Returns error if no generator is registered or the input is invalid
    pub fn generate(
        &self,
        algorithm: Algorithm,
        input: &AlgorithmInput,
        limits: &GeneratorLimits,
    ) -> Result<Trace, CatalogError> {
        let generator = self
            .generators
            .get(&algorithm)
            .ok_or(CatalogError::NotRegistered { algorithm })?;

        if let Err(err) = input.validate(algorithm, limits) {
            debug!(%algorithm, error = %err, "input rejected");
            return Err(err.into());
        }

        let trace = generator.generate(input)?;
        info!(%algorithm, steps = trace.len(), "trace generated");
        Ok(trace)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

fn shared_registry() -> &'static GeneratorRegistry {
    static REGISTRY: OnceLock<GeneratorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GeneratorRegistry::with_defaults)
}

/// Validate `input` and generate a trace with the built-in generators
///
/// # Errors
///
/// Returns error if the input is invalid for `algorithm`
pub fn generate(
    algorithm: Algorithm,
    input: &AlgorithmInput,
    limits: &GeneratorLimits,
) -> Result<Trace, CatalogError> {
    shared_registry().generate(algorithm, input, limits)
}

/// Display text for an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AlgorithmInfo {
    /// Algorithm
    pub algorithm: Algorithm,
    /// Display name
    pub name: &'static str,
    /// One-paragraph summary
    pub summary: &'static str,
    /// Complexity notes
    pub complexity: &'static [&'static str],
}

impl AlgorithmInfo {
    /// Catalog entry for `algorithm`
    #[must_use]
    pub const fn of(algorithm: Algorithm) -> Self {
        let (name, summary, complexity): (&str, &str, &[&str]) = match algorithm {
            Algorithm::BubbleSort => (
                "Bubble Sort",
                "Repeatedly swaps adjacent elements that are out of order; each pass settles the largest remaining value at the end.",
                &["Time: O(n²)", "Space: O(1)"],
            ),
            Algorithm::SelectionSort => (
                "Selection Sort",
                "Scans the unsorted suffix for its minimum and swaps it into the next position.",
                &["Time: O(n²)", "Space: O(1)", "Swaps: O(n)"],
            ),
            Algorithm::LinearSearch => (
                "Linear Search",
                "Checks each element in turn until the target is found or the array ends.",
                &["Time: O(n)", "Space: O(1)"],
            ),
            Algorithm::BinarySearch => (
                "Binary Search",
                "Halves a sorted range around its midpoint until the target is found or the range is empty.",
                &["Time: O(log n)", "Space: O(1)", "Requires sorted input"],
            ),
            Algorithm::BreadthFirst => (
                "Breadth-First Search (BFS)",
                "Visits nodes level by level from the start, using a FIFO queue as the frontier.",
                &["Time: O(V + E)", "Space: O(V)"],
            ),
            Algorithm::DepthFirst => (
                "Depth-First Search (DFS)",
                "Follows each branch as deep as possible before backtracking.",
                &["Time: O(V + E)", "Space: O(V)"],
            ),
            Algorithm::Kruskal => (
                "Kruskal's Minimum Spanning Tree",
                "Takes edges in ascending weight order, skipping any that would close a cycle.",
                &["Time: O(E log E)", "Space: O(V)"],
            ),
            Algorithm::ActivitySelection => (
                "Activity Selection",
                "Picks the compatible activity that finishes earliest, then repeats on what remains.",
                &["Time: O(n log n)", "Space: O(n)"],
            ),
            Algorithm::Fibonacci => (
                "Fibonacci Sequence",
                "Tabulates F(i) = F(i-1) + F(i-2) bottom-up from the two base cases.",
                &["Time: O(n)", "Space: O(n)"],
            ),
            Algorithm::Knapsack => (
                "0/1 Knapsack",
                "Fills a table of the best value reachable with the first i items and capacity w.",
                &["Time: O(n·W)", "Space: O(n·W)"],
            ),
            Algorithm::LongestCommonSubsequence => (
                "Longest Common Subsequence",
                "Fills a table of LCS lengths for every pair of prefixes of the two strings.",
                &["Time: O(m·n)", "Space: O(m·n)"],
            ),
            Algorithm::ListInsert => (
                "Linked List Insertion",
                "Walks to the insertion point, creates a node and rewires two pointers.",
                &["Time: O(n)", "O(1) with a reference to the node"],
            ),
            Algorithm::ListDelete => (
                "Linked List Deletion",
                "Walks to the node and points its predecessor past it.",
                &["Time: O(n)", "O(1) with a reference to the node"],
            ),
            Algorithm::ListSearch => (
                "Linked List Search",
                "Follows next pointers from the head comparing each value.",
                &["Time: O(n)", "Access: O(n)"],
            ),
            Algorithm::ListReverse => (
                "Linked List Reversal",
                "Flips each next pointer in one pass from head to tail.",
                &["Time: O(n)", "Space: O(1)"],
            ),
        };
        Self {
            algorithm,
            name,
            summary,
            complexity,
        }
    }

    /// Entries for every algorithm
    #[must_use]
    pub fn all() -> Vec<Self> {
        Algorithm::ALL.iter().map(|&a| Self::of(a)).collect()
    }
}

/// Display name and description of a family
#[must_use]
pub const fn family_text(family: AlgorithmFamily) -> (&'static str, &'static str) {
    match family {
        AlgorithmFamily::Sorting => (
            "Sorting Algorithms",
            "Sorting algorithms arrange elements in a specific order, typically ascending or descending.",
        ),
        AlgorithmFamily::Searching => (
            "Searching Algorithms",
            "Searching algorithms find the position of a target value within a data structure.",
        ),
        AlgorithmFamily::Graph => (
            "Graph Algorithms",
            "Graph algorithms solve problems on structures made of vertices and edges.",
        ),
        AlgorithmFamily::Greedy => (
            "Greedy Algorithms",
            "Greedy algorithms make the locally optimal choice at each step and never reconsider it.",
        ),
        AlgorithmFamily::DynamicProgramming => (
            "Dynamic Programming",
            "Dynamic programming breaks a problem into overlapping subproblems and stores their results.",
        ),
        AlgorithmFamily::LinkedList => (
            "Linked List Operations",
            "A linked list stores elements in nodes, each pointing to the next node in the sequence.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{SortInput, FibonacciInput};

    #[test]
    fn test_defaults_cover_every_algorithm() {
        let registry = GeneratorRegistry::with_defaults();
        assert_eq!(registry.len(), Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            assert!(registry.contains(algorithm));
            assert_eq!(registry.get(algorithm).unwrap().algorithm(), algorithm);
        }
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        registry.register(Arc::new(SortingGenerator::bubble())).unwrap();
        let err = registry
            .register(Arc::new(SortingGenerator::bubble()))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::AlreadyRegistered {
                algorithm: Algorithm::BubbleSort
            }
        );
        assert!(registry.replace(Arc::new(SortingGenerator::bubble())).is_some());
    }

    #[test]
    fn test_generate_validates_first() {
        let input = AlgorithmInput::Sort(SortInput { values: vec![] });
        let err = generate(Algorithm::BubbleSort, &input, &GeneratorLimits::default()).unwrap_err();
        assert_eq!(err.to_string(), "values is required");
    }

    #[test]
    fn test_generate_missing_generator() {
        let registry = GeneratorRegistry::new();
        let input = AlgorithmInput::Fibonacci(FibonacciInput { n: 4 });
        assert_eq!(
            registry.generate(Algorithm::Fibonacci, &input, &GeneratorLimits::default()),
            Err(CatalogError::NotRegistered {
                algorithm: Algorithm::Fibonacci
            })
        );
    }

    #[test]
    fn test_generate_dispatches() {
        let input = AlgorithmInput::Sort(SortInput {
            values: vec![5, 3, 1, 4, 2],
        });
        let trace = generate(Algorithm::SelectionSort, &input, &GeneratorLimits::default()).unwrap();
        assert_eq!(trace.algorithm(), Algorithm::SelectionSort);
        assert_eq!(trace.len(), 10);
    }

    #[test]
    fn test_catalog_text() {
        assert_eq!(AlgorithmInfo::all().len(), 15);
        let info = AlgorithmInfo::of(Algorithm::BinarySearch);
        assert_eq!(info.name, "Binary Search");
        assert!(info.complexity.contains(&"Time: O(log n)"));
        assert_eq!(family_text(AlgorithmFamily::Greedy).0, "Greedy Algorithms");
    }
}
