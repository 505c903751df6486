//! Greedy selection: Kruskal's spanning forest and activity selection.
//!
//! One step per accepted item. Items rejected since the previous acceptance
//! ride along on the next accepted step as `Discarded` highlights, so the
//! accepted set in the snapshots only ever grows.

use crate::catalog::TraceGenerator;
use crate::input::{Activity, AlgorithmInput, InputError, WeightedEdge};
use algolab_core::{
    Algorithm, Highlight, HighlightRole, SelectionSnapshot, Snapshot, StructRef, Trace,
    TraceBuilder,
};
use tracing::debug;

/// Disjoint-set forest with path compression and union by rank
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// `n` singleton sets
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of the set holding `x`
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

fn selection_highlights(
    current: StructRef,
    earlier: impl Iterator<Item = StructRef>,
    discarded: &[StructRef],
) -> Vec<Highlight> {
    let mut highlights = vec![Highlight::new(HighlightRole::Current, current)];
    highlights.extend(earlier.map(|r| Highlight::new(HighlightRole::Selected, r)));
    highlights.extend(
        discarded
            .iter()
            .map(|&r| Highlight::new(HighlightRole::Discarded, r)),
    );
    highlights
}

/// Trace Kruskal's algorithm over an undirected weighted graph.
///
/// Edge indices in highlights and snapshots refer to positions in `edges`.
/// Stops once the forest spans every component.
#[must_use]
pub fn kruskal(node_count: usize, edges: &[WeightedEdge]) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::Kruskal);
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| edges[i].weight);

    let mut sets = UnionFind::new(node_count);
    let mut accepted: Vec<usize> = Vec::new();
    let mut skipped: Vec<usize> = Vec::new();
    let mut total = 0i64;

    for idx in order {
        if accepted.len() + 1 >= node_count {
            break;
        }
        let edge = edges[idx];
        if edge.from >= node_count || edge.to >= node_count {
            continue;
        }
        if !sets.union(edge.from, edge.to) {
            skipped.push(idx);
            continue;
        }

        total = total.saturating_add(edge.weight);
        let discarded: Vec<StructRef> = skipped.iter().map(|&i| StructRef::Edge(i)).collect();
        let mut highlights = selection_highlights(
            StructRef::Edge(idx),
            accepted.iter().map(|&i| StructRef::Edge(i)),
            &discarded,
        );
        highlights.push(Highlight::new(HighlightRole::Current, StructRef::Node(edge.from)));
        highlights.push(Highlight::new(HighlightRole::Current, StructRef::Node(edge.to)));

        let mut description = format!(
            "Accepted edge {}-{} (weight {}); total weight {}",
            edge.from, edge.to, edge.weight, total
        );
        if !skipped.is_empty() {
            let names: Vec<String> = skipped
                .iter()
                .map(|&i| format!("{}-{}", edges[i].from, edges[i].to))
                .collect();
            description.push_str(&format!("; skipped {} (would form a cycle)", names.join(", ")));
        }

        accepted.push(idx);
        skipped.clear();
        builder.push(
            description,
            highlights,
            Snapshot::Selection(SelectionSnapshot {
                accepted: accepted.clone(),
                total_weight: total,
            }),
        );
    }

    debug!(nodes = node_count, edges = edges.len(), steps = builder.len(), "kruskal traced");
    builder.build()
}

/// Trace earliest-finish-first activity selection.
///
/// Activity indices refer to positions in `activities`. The snapshot weight
/// is the total busy time of the accepted activities.
#[must_use]
pub fn activity_selection(activities: &[Activity]) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::ActivitySelection);
    let mut order: Vec<usize> = (0..activities.len()).collect();
    order.sort_by_key(|&i| activities[i].finish);

    let mut accepted: Vec<usize> = Vec::new();
    let mut skipped: Vec<usize> = Vec::new();
    let mut last_finish: Option<i64> = None;
    let mut busy = 0i64;

    for idx in order {
        let activity = activities[idx];
        if last_finish.is_some_and(|finish| activity.start < finish) {
            skipped.push(idx);
            continue;
        }

        busy = busy.saturating_add(activity.finish.saturating_sub(activity.start));
        let discarded: Vec<StructRef> = skipped.iter().map(|&i| StructRef::Interval(i)).collect();
        let highlights = selection_highlights(
            StructRef::Interval(idx),
            accepted.iter().map(|&i| StructRef::Interval(i)),
            &discarded,
        );

        let mut description = match last_finish {
            Some(finish) => format!(
                "Selected activity {} [{}, {}); starts at or after {}",
                idx, activity.start, activity.finish, finish
            ),
            None => format!(
                "Selected activity {} [{}, {}); earliest finish",
                idx, activity.start, activity.finish
            ),
        };
        if !skipped.is_empty() {
            let names: Vec<String> = skipped.iter().map(ToString::to_string).collect();
            description.push_str(&format!("; skipped overlapping {}", names.join(", ")));
        }

        accepted.push(idx);
        skipped.clear();
        last_finish = Some(activity.finish);
        builder.push(
            description,
            highlights,
            Snapshot::Selection(SelectionSnapshot {
                accepted: accepted.clone(),
                total_weight: busy,
            }),
        );
    }

    debug!(activities = activities.len(), steps = builder.len(), "activity selection traced");
    builder.build()
}

/// Generator for the greedy family
#[derive(Debug, Clone, Copy)]
pub struct GreedyGenerator {
    algorithm: Algorithm,
}

impl GreedyGenerator {
    /// Kruskal generator
    #[must_use]
    pub const fn kruskal() -> Self {
        Self {
            algorithm: Algorithm::Kruskal,
        }
    }

    /// Activity selection generator
    #[must_use]
    pub const fn activity_selection() -> Self {
        Self {
            algorithm: Algorithm::ActivitySelection,
        }
    }
}

impl TraceGenerator for GreedyGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        match (self.algorithm, input) {
            (Algorithm::Kruskal, AlgorithmInput::SpanningTree(input)) => {
                Ok(kruskal(input.node_count, &input.edges))
            }
            (Algorithm::ActivitySelection, AlgorithmInput::Activities(input)) => {
                Ok(activity_selection(&input.activities))
            }
            (algorithm, _) => Err(InputError::WrongShape {
                algorithm,
                expected: AlgorithmInput::expected_kind(algorithm),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selection(step: &algolab_core::Step) -> &SelectionSnapshot {
        match &step.snapshot {
            Snapshot::Selection(snap) => snap,
            other => panic!("unexpected snapshot {:?}", other),
        }
    }

    fn sample_graph() -> Vec<WeightedEdge> {
        vec![
            WeightedEdge::new(0, 1, 4),
            WeightedEdge::new(0, 2, 3),
            WeightedEdge::new(1, 2, 1),
            WeightedEdge::new(1, 3, 2),
            WeightedEdge::new(2, 3, 4),
            WeightedEdge::new(3, 4, 2),
        ]
    }

    /// Minimum spanning forest weight by Prim's algorithm on each component
    fn prim_forest_weight(n: usize, edges: &[WeightedEdge]) -> i64 {
        let mut in_tree = vec![false; n];
        let mut total = 0;
        for root in 0..n {
            if in_tree[root] {
                continue;
            }
            in_tree[root] = true;
            loop {
                let best = edges
                    .iter()
                    .filter(|e| in_tree[e.from] != in_tree[e.to])
                    .min_by_key(|e| e.weight);
                let Some(edge) = best else { break };
                total += edge.weight;
                in_tree[edge.from] = true;
                in_tree[edge.to] = true;
            }
        }
        total
    }

    #[test]
    fn test_union_find() {
        let mut sets = UnionFind::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn test_kruskal_sample() {
        let edges = sample_graph();
        let trace = kruskal(5, &edges);
        assert_eq!(trace.len(), 4);

        let last = selection(trace.last().unwrap());
        assert_eq!(last.accepted, vec![2, 3, 5, 1]);
        assert_eq!(last.total_weight, 8);

        // 0-1 (weight 4) is never reached: the forest completes first.
        assert!(trace.iter().all(|s| !s.has(HighlightRole::Selected, StructRef::Edge(0))));
    }

    #[test]
    fn test_kruskal_discarded_edges_tagged() {
        let edges = vec![
            WeightedEdge::new(0, 1, 1),
            WeightedEdge::new(1, 2, 1),
            WeightedEdge::new(0, 2, 2),
            WeightedEdge::new(2, 3, 3),
        ];
        let trace = kruskal(4, &edges);
        let last = trace.last().unwrap();
        assert!(last.has(HighlightRole::Discarded, StructRef::Edge(2)));
        assert!(last.has(HighlightRole::Current, StructRef::Edge(3)));
        assert!(last.description.contains("would form a cycle"));
    }

    #[test]
    fn test_activity_selection_classic() {
        let activities: Vec<Activity> = [
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
        ]
        .into_iter()
        .map(|(s, f)| Activity::new(s, f))
        .collect();
        let trace = activity_selection(&activities);
        let last = selection(trace.last().unwrap());
        assert_eq!(last.accepted, vec![0, 3, 7, 10]);
        assert_eq!(trace.len(), 4);
        assert_eq!(last.total_weight, 3 + 2 + 3 + 4);
    }

    #[test]
    fn test_kruskal_extreme_weights_saturate() {
        let edges = vec![
            WeightedEdge::new(0, 1, i64::MAX),
            WeightedEdge::new(1, 2, i64::MAX),
        ];
        let trace = kruskal(3, &edges);
        assert_eq!(trace.len(), 2);
        assert_eq!(selection(trace.last().unwrap()).total_weight, i64::MAX);
    }

    #[test]
    fn test_activity_extreme_times_saturate() {
        let trace = activity_selection(&[Activity::new(i64::MIN, i64::MAX)]);
        assert_eq!(trace.len(), 1);
        assert_eq!(selection(trace.last().unwrap()).total_weight, i64::MAX);
    }

    #[test]
    fn test_activity_touching_endpoints_compatible() {
        let trace = activity_selection(&[Activity::new(0, 2), Activity::new(2, 4)]);
        assert_eq!(selection(trace.last().unwrap()).accepted, vec![0, 1]);
    }

    fn arb_weighted() -> impl Strategy<Value = (usize, Vec<WeightedEdge>)> {
        (2usize..8).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 1i64..10).prop_map(|(a, b, w)| WeightedEdge::new(a, b, w));
            proptest::collection::vec(edge, 0..16).prop_map(move |edges| {
                (n, edges.into_iter().filter(|e| e.from != e.to).collect())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_kruskal_is_minimum_forest((n, edges) in arb_weighted()) {
            let trace = kruskal(n, &edges);
            let expected = prim_forest_weight(n, &edges);
            let final_weight = trace.last().map_or(0, |s| selection(s).total_weight);
            prop_assert_eq!(final_weight, expected);

            // Acyclic: every accepted edge joins two different components.
            let accepted = trace.last().map(|s| selection(s).accepted.clone()).unwrap_or_default();
            let mut sets = UnionFind::new(n);
            for &i in &accepted {
                prop_assert!(sets.union(edges[i].from, edges[i].to));
            }
        }

        #[test]
        fn prop_accepted_set_monotonic((n, edges) in arb_weighted()) {
            let trace = kruskal(n, &edges);
            for pair in trace.steps().windows(2) {
                let (a, b) = (selection(&pair[0]), selection(&pair[1]));
                prop_assert_eq!(b.accepted.len(), a.accepted.len() + 1);
                prop_assert!(b.accepted.starts_with(&a.accepted));
            }
        }
    }
}
