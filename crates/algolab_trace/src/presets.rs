//! Demo inputs and seeded random inputs.
//!
//! Random inputs come from a ChaCha8 stream, so a seed always reproduces the
//! same input on every platform.

use crate::input::{
    Activity, ActivityInput, AlgorithmInput, FibonacciInput, GeneratorLimits, Graph,
    KnapsackInput, KnapsackItem, LcsInput, ListInput, ListOperation, ListPosition, SearchInput,
    SortInput, SpanningTreeInput, TraversalInput, WeightedEdge,
};
use algolab_core::Algorithm;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const GRID_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 3),
    (1, 2),
    (1, 4),
    (2, 5),
    (3, 4),
    (3, 6),
    (4, 5),
    (4, 7),
    (5, 8),
    (6, 7),
    (7, 8),
];

const MST_EDGES: [(usize, usize, i64); 12] = [
    (0, 1, 4),
    (0, 2, 3),
    (1, 2, 1),
    (1, 3, 2),
    (2, 3, 4),
    (3, 4, 2),
    (4, 5, 6),
    (5, 6, 1),
    (6, 7, 3),
    (7, 0, 8),
    (2, 5, 7),
    (3, 6, 5),
];

const ACTIVITIES: [(i64, i64); 11] = [
    (1, 4),
    (3, 5),
    (0, 6),
    (5, 7),
    (3, 9),
    (5, 9),
    (6, 10),
    (8, 11),
    (8, 12),
    (2, 14),
    (12, 16),
];

const DEMO_LIST: [i64; 3] = [10, 20, 30];

/// Demo input shown when an algorithm is first selected
#[must_use]
pub fn default_input(algorithm: Algorithm) -> AlgorithmInput {
    match algorithm {
        Algorithm::BubbleSort | Algorithm::SelectionSort => AlgorithmInput::Sort(SortInput {
            values: vec![12, 3, 17, 8, 20, 1, 15, 6, 10, 4],
        }),
        Algorithm::LinearSearch | Algorithm::BinarySearch => AlgorithmInput::Search(SearchInput {
            values: (0..15).map(|i| i * 7 + 1).collect(),
            target: 43,
        }),
        Algorithm::BreadthFirst | Algorithm::DepthFirst => {
            AlgorithmInput::Traversal(TraversalInput {
                graph: Graph::new(9, GRID_EDGES.to_vec()),
                start: 0,
            })
        }
        Algorithm::Kruskal => AlgorithmInput::SpanningTree(SpanningTreeInput {
            node_count: 8,
            edges: MST_EDGES
                .iter()
                .map(|&(a, b, w)| WeightedEdge::new(a, b, w))
                .collect(),
        }),
        Algorithm::ActivitySelection => AlgorithmInput::Activities(ActivityInput {
            activities: ACTIVITIES
                .iter()
                .map(|&(s, f)| Activity::new(s, f))
                .collect(),
        }),
        Algorithm::Fibonacci => AlgorithmInput::Fibonacci(FibonacciInput { n: 5 }),
        Algorithm::Knapsack => AlgorithmInput::Knapsack(KnapsackInput {
            items: vec![
                KnapsackItem::new(60, 10),
                KnapsackItem::new(100, 20),
                KnapsackItem::new(120, 30),
                KnapsackItem::new(80, 15),
                KnapsackItem::new(40, 5),
            ],
            capacity: 50,
        }),
        Algorithm::LongestCommonSubsequence => AlgorithmInput::Lcs(LcsInput {
            left: "ABCBDAB".to_string(),
            right: "BDCABA".to_string(),
        }),
        Algorithm::ListInsert => list(ListOperation::Insert {
            value: 42,
            at: ListPosition::Tail,
        }),
        Algorithm::ListDelete => list(ListOperation::Delete {
            at: ListPosition::Head,
        }),
        Algorithm::ListSearch => list(ListOperation::Search { value: 20 }),
        Algorithm::ListReverse => list(ListOperation::Reverse),
    }
}

fn list(operation: ListOperation) -> AlgorithmInput {
    AlgorithmInput::List(ListInput {
        values: DEMO_LIST.to_vec(),
        operation,
    })
}

/// Inclusive range `[lo, hi]`, shrunk so it never exceeds `cap`
fn size_in(rng: &mut ChaCha8Rng, lo: usize, hi: usize, cap: usize) -> usize {
    let hi = hi.min(cap).max(1);
    let lo = lo.min(hi);
    rng.gen_range(lo..=hi)
}

/// Connected graph: a random spanning tree plus `extra` random edges
fn connected_edges(rng: &mut ChaCha8Rng, n: usize, extra: usize, max_edges: usize) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = (1..n).map(|i| (rng.gen_range(0..i), i)).collect();
    let budget = max_edges.saturating_sub(edges.len()).min(extra);
    let mut attempts = 0;
    while edges.len() < n - 1 + budget && attempts < extra * 10 {
        attempts += 1;
        let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
        if a == b || edges.iter().any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a)) {
            continue;
        }
        edges.push((a.min(b), a.max(b)));
    }
    edges.truncate(max_edges);
    edges
}

/// Random input for `algorithm`, reproducible from `seed`
#[must_use]
pub fn random_input(algorithm: Algorithm, seed: u64, limits: &GeneratorLimits) -> AlgorithmInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    match algorithm {
        Algorithm::BubbleSort | Algorithm::SelectionSort => {
            let len = size_in(&mut rng, 5, 20, limits.max_array_len);
            AlgorithmInput::Sort(SortInput {
                values: (0..len).map(|_| rng.gen_range(1..=20)).collect(),
            })
        }
        Algorithm::LinearSearch | Algorithm::BinarySearch => {
            let len = size_in(&mut rng, 5, 20, limits.max_array_len);
            let mut values: Vec<i64> = (0..len).map(|_| rng.gen_range(1..=20)).collect();
            if algorithm == Algorithm::BinarySearch {
                values.sort_unstable();
                values.dedup();
            }
            let target = if rng.gen_bool(0.5) {
                values.choose(&mut rng).copied().unwrap_or(1)
            } else {
                rng.gen_range(1..=20)
            };
            AlgorithmInput::Search(SearchInput { values, target })
        }
        Algorithm::BreadthFirst | Algorithm::DepthFirst => {
            let n = 8usize.min(limits.max_graph_nodes).max(1);
            let edges = connected_edges(&mut rng, n, n * 7 / 10, limits.max_edges);
            AlgorithmInput::Traversal(TraversalInput {
                graph: Graph::new(n, edges),
                start: 0,
            })
        }
        Algorithm::Kruskal => {
            let n = 8usize.min(limits.max_graph_nodes).max(1);
            let edges = connected_edges(&mut rng, n, n * 7 / 10, limits.max_edges)
                .into_iter()
                .map(|(a, b)| WeightedEdge::new(a, b, rng.gen_range(1..=9)))
                .collect();
            AlgorithmInput::SpanningTree(SpanningTreeInput {
                node_count: n,
                edges,
            })
        }
        Algorithm::ActivitySelection => {
            let count = size_in(&mut rng, 6, 11, limits.max_activities);
            let activities = (0..count)
                .map(|_| {
                    let start = rng.gen_range(0..15);
                    Activity::new(start, start + rng.gen_range(1..=5))
                })
                .collect();
            AlgorithmInput::Activities(ActivityInput { activities })
        }
        Algorithm::Fibonacci => {
            let cap = (limits.max_fibonacci as usize).min(limits.max_table_cells.saturating_sub(1));
            AlgorithmInput::Fibonacci(FibonacciInput {
                n: size_in(&mut rng, 2, 15, cap) as u32,
            })
        }
        Algorithm::Knapsack => {
            let count = rng.gen_range(3..=5);
            let items = (0..count)
                .map(|_| KnapsackItem::new(rng.gen_range(10..=120), rng.gen_range(1..=10)))
                .collect();
            let max_capacity = (limits.max_table_cells / (count + 1)).saturating_sub(1);
            let capacity = size_in(&mut rng, 10, 20, max_capacity.max(1));
            AlgorithmInput::Knapsack(KnapsackInput { items, capacity })
        }
        Algorithm::LongestCommonSubsequence => {
            let word = |rng: &mut ChaCha8Rng| -> String {
                let len = rng.gen_range(4..=7);
                (0..len)
                    .map(|_| ['A', 'B', 'C', 'D'][rng.gen_range(0..4)])
                    .collect()
            };
            let left = word(&mut rng);
            let right = word(&mut rng);
            AlgorithmInput::Lcs(LcsInput { left, right })
        }
        Algorithm::ListInsert
        | Algorithm::ListDelete
        | Algorithm::ListSearch
        | Algorithm::ListReverse => {
            let cap = limits.max_list_len.saturating_sub(1).max(1);
            let len = size_in(&mut rng, 3, 6, cap);
            let values: Vec<i64> = (0..len).map(|_| rng.gen_range(1..=99)).collect();
            let operation = match algorithm {
                Algorithm::ListInsert => ListOperation::Insert {
                    value: rng.gen_range(1..=99),
                    at: ListPosition::At(rng.gen_range(0..=len)),
                },
                Algorithm::ListDelete => ListOperation::Delete {
                    at: ListPosition::At(rng.gen_range(0..len)),
                },
                Algorithm::ListSearch => ListOperation::Search {
                    value: values.choose(&mut rng).copied().unwrap_or(1),
                },
                _ => ListOperation::Reverse,
            };
            AlgorithmInput::List(ListInput { values, operation })
        }
    }
}
