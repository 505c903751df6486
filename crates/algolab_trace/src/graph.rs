//! Breadth-first and depth-first traversal.
//!
//! One step per visited node. Neighbors are explored in edge insertion
//! order, so traversal order is a function of the input alone. Nodes not
//! reachable from the start are never visited.

use crate::catalog::TraceGenerator;
use crate::input::{AlgorithmInput, Graph, InputError};
use algolab_core::{
    Algorithm, Highlight, HighlightRole, Snapshot, StructRef, Trace, TraceBuilder,
    TraversalSnapshot,
};
use std::collections::VecDeque;
use tracing::debug;

fn visit_highlights(current: usize, visited: &[usize], frontier: &[usize]) -> Vec<Highlight> {
    let mut highlights = vec![Highlight::new(HighlightRole::Current, StructRef::Node(current))];
    highlights.extend(
        visited
            .iter()
            .filter(|&&n| n != current)
            .map(|&n| Highlight::new(HighlightRole::Visited, StructRef::Node(n))),
    );
    highlights.extend(
        frontier
            .iter()
            .filter(|&&n| n != current)
            .map(|&n| Highlight::new(HighlightRole::Frontier, StructRef::Node(n))),
    );
    highlights
}

fn join(nodes: &[usize]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trace a breadth-first traversal from `start`
#[must_use]
pub fn breadth_first(graph: &Graph, start: usize) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::BreadthFirst);
    if start >= graph.node_count {
        return builder.build();
    }

    let adj = graph.adjacency();
    let mut discovered = vec![false; graph.node_count];
    let mut queue = VecDeque::from([start]);
    let mut visited = Vec::new();
    discovered[start] = true;

    while let Some(node) = queue.pop_front() {
        visited.push(node);

        let mut queued = Vec::new();
        for &next in &adj[node] {
            if !discovered[next] {
                discovered[next] = true;
                queue.push_back(next);
                queued.push(next);
            }
        }

        let frontier: Vec<usize> = queue.iter().copied().collect();
        let description = if queued.is_empty() {
            format!("Dequeued node {}; no new neighbors", node)
        } else {
            format!("Dequeued node {}; queued {}", node, join(&queued))
        };

        builder.push(
            description,
            visit_highlights(node, &visited, &frontier),
            Snapshot::Traversal(TraversalSnapshot {
                node_count: graph.node_count,
                visited: visited.clone(),
                frontier,
            }),
        );
    }

    debug!(nodes = graph.node_count, steps = builder.len(), "bfs traced");
    builder.build()
}

/// Explicit call stack standing in for recursion
struct DepthFirstWalk {
    node_count: usize,
    discovered: Vec<bool>,
    visited: Vec<usize>,
    // (node, next neighbor to try)
    stack: Vec<(usize, usize)>,
}

impl DepthFirstWalk {
    fn enter(&mut self, node: usize, parent: Option<usize>, builder: &mut TraceBuilder) {
        self.discovered[node] = true;
        self.visited.push(node);
        self.stack.push((node, 0));

        let path: Vec<usize> = self.stack.iter().map(|&(n, _)| n).collect();
        let description = match parent {
            Some(p) => format!("Visiting node {} from {}; depth {}", node, p, path.len() - 1),
            None => format!("Starting at node {}", node),
        };
        builder.push(
            description,
            visit_highlights(node, &self.visited, &path),
            Snapshot::Traversal(TraversalSnapshot {
                node_count: self.node_count,
                visited: self.visited.clone(),
                frontier: path,
            }),
        );
    }
}

/// Trace a depth-first traversal from `start`, in recursive call order
#[must_use]
pub fn depth_first(graph: &Graph, start: usize) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::DepthFirst);
    if start >= graph.node_count {
        return builder.build();
    }

    let adj = graph.adjacency();
    let mut walk = DepthFirstWalk {
        node_count: graph.node_count,
        discovered: vec![false; graph.node_count],
        visited: Vec::new(),
        stack: Vec::new(),
    };
    walk.enter(start, None, &mut builder);

    while let Some(top) = walk.stack.last_mut() {
        let node = top.0;
        let Some(&next) = adj[node].get(top.1) else {
            walk.stack.pop();
            continue;
        };
        top.1 += 1;
        if !walk.discovered[next] {
            walk.enter(next, Some(node), &mut builder);
        }
    }

    debug!(nodes = graph.node_count, steps = builder.len(), "dfs traced");
    builder.build()
}

/// Generator for the graph family
#[derive(Debug, Clone, Copy)]
pub struct TraversalGenerator {
    algorithm: Algorithm,
}

impl TraversalGenerator {
    /// Breadth-first generator
    #[must_use]
    pub const fn breadth_first() -> Self {
        Self {
            algorithm: Algorithm::BreadthFirst,
        }
    }

    /// Depth-first generator
    #[must_use]
    pub const fn depth_first() -> Self {
        Self {
            algorithm: Algorithm::DepthFirst,
        }
    }
}

impl TraceGenerator for TraversalGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        let AlgorithmInput::Traversal(input) = input else {
            return Err(InputError::WrongShape {
                algorithm: self.algorithm,
                expected: "traversal",
            });
        };
        Ok(match self.algorithm {
            Algorithm::DepthFirst => depth_first(&input.graph, input.start),
            _ => breadth_first(&input.graph, input.start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn grid() -> Graph {
        Graph::new(
            9,
            vec![
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
            ],
        )
    }

    fn order(trace: &Trace) -> Vec<usize> {
        trace
            .iter()
            .filter_map(|s| match s.targets(HighlightRole::Current).next() {
                Some(StructRef::Node(n)) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn reachable(graph: &Graph, start: usize) -> HashSet<usize> {
        let adj = graph.adjacency();
        let mut seen = HashSet::from([start]);
        let mut todo = vec![start];
        while let Some(n) = todo.pop() {
            for &m in &adj[n] {
                if seen.insert(m) {
                    todo.push(m);
                }
            }
        }
        seen
    }

    #[test]
    fn test_grid_orders_differ() {
        let bfs = breadth_first(&grid(), 0);
        let dfs = depth_first(&grid(), 0);
        assert_eq!(order(&bfs), vec![0, 1, 3, 2, 4, 6, 5, 7, 8]);
        assert_eq!(order(&dfs), vec![0, 1, 2, 5, 4, 3, 6, 7, 8]);
    }

    #[test]
    fn test_bfs_frontier_is_queue() {
        let trace = breadth_first(&grid(), 0);
        let Snapshot::Traversal(first) = &trace.get(0).unwrap().snapshot else {
            panic!("expected traversal snapshot");
        };
        assert_eq!(first.frontier, vec![1, 3]);
        assert!(trace.get(0).unwrap().description.contains("queued 1, 3"));
    }

    #[test]
    fn test_dfs_frontier_is_path() {
        let trace = depth_first(&grid(), 0);
        let Snapshot::Traversal(snap) = &trace.get(3).unwrap().snapshot else {
            panic!("expected traversal snapshot");
        };
        assert_eq!(snap.frontier, vec![0, 1, 2, 5]);
        assert!(snap.is_visited(2));
        assert!(!snap.is_visited(4));
    }

    #[test]
    fn test_disconnected_nodes_skipped() {
        let graph = Graph::new(4, vec![(0, 1)]);
        assert_eq!(order(&breadth_first(&graph, 0)), vec![0, 1]);
        assert_eq!(order(&depth_first(&graph, 2)), vec![2]);
    }

    #[test]
    fn test_visited_highlight_excludes_current() {
        let trace = breadth_first(&grid(), 0);
        let step = trace.get(2).unwrap();
        assert!(step.has(HighlightRole::Current, StructRef::Node(3)));
        assert!(!step.has(HighlightRole::Visited, StructRef::Node(3)));
        assert!(step.has(HighlightRole::Visited, StructRef::Node(0)));
    }

    fn arb_graph() -> impl Strategy<Value = Graph> {
        (2usize..10).prop_flat_map(|n| {
            proptest::collection::vec((0..n, 0..n), 0..20).prop_map(move |pairs| {
                let edges = pairs.into_iter().filter(|(a, b)| a != b).collect();
                Graph::new(n, edges)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_each_reachable_node_once(graph in arb_graph()) {
            let expected = reachable(&graph, 0);
            for trace in [breadth_first(&graph, 0), depth_first(&graph, 0)] {
                let visits = order(&trace);
                let unique: HashSet<usize> = visits.iter().copied().collect();
                prop_assert_eq!(unique.len(), visits.len());
                prop_assert_eq!(&unique, &expected);
            }
        }

        #[test]
        fn prop_visited_set_grows(graph in arb_graph()) {
            let trace = depth_first(&graph, 0);
            let mut previous = 0;
            for step in &trace {
                let Snapshot::Traversal(snap) = &step.snapshot else {
                    panic!("expected traversal snapshot");
                };
                prop_assert_eq!(snap.visited.len(), previous + 1);
                previous = snap.visited.len();
            }
        }
    }
}
