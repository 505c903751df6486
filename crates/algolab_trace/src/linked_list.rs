//! Singly linked list operations as seekable traces.
//!
//! Nodes live in an arena addressed by [`ListNodeId`]; a node removed from
//! the chain stays in the arena so earlier steps can still draw it. Each
//! step records where every drawn node sits (slot and lane), which is what
//! the list renderer animates between.

use crate::catalog::TraceGenerator;
use crate::input::{AlgorithmInput, InputError, ListOperation, ListPosition};
use algolab_core::{
    Algorithm, Highlight, HighlightRole, Lane, ListArenaNode, ListNodeId, ListSnapshot, Placement,
    Snapshot, StructRef, Trace, TraceBuilder,
};
use tracing::debug;

fn node(role: HighlightRole, id: ListNodeId) -> Highlight {
    Highlight::new(role, StructRef::ListNode(id))
}

struct ListTracer {
    builder: TraceBuilder,
    arena: Vec<ListArenaNode>,
    chain: Vec<ListNodeId>,
}

impl ListTracer {
    fn new(algorithm: Algorithm, values: &[i64]) -> Self {
        let arena: Vec<ListArenaNode> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| ListArenaNode {
                id: ListNodeId(i),
                value,
            })
            .collect();
        let chain = arena.iter().map(|n| n.id).collect();
        Self {
            builder: TraceBuilder::new(algorithm),
            arena,
            chain,
        }
    }

    fn value(&self, id: ListNodeId) -> i64 {
        self.arena.get(id.0).map_or(0, |n| n.value)
    }

    fn allocate(&mut self, value: i64) -> ListNodeId {
        let id = ListNodeId(self.arena.len());
        self.arena.push(ListArenaNode { id, value });
        id
    }

    fn render_chain(&self) -> String {
        if self.chain.is_empty() {
            return "(empty)".to_string();
        }
        self.chain
            .iter()
            .map(|&id| self.value(id).to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn name(&self, id: ListNodeId) -> String {
        format!("{} ({})", id, self.value(id))
    }

    /// Record a step; `detached` draws one extra node off the chain
    fn push(
        &mut self,
        description: String,
        highlights: Vec<Highlight>,
        detached: Option<(ListNodeId, usize)>,
    ) {
        let mut placements: Vec<Placement> = self
            .chain
            .iter()
            .enumerate()
            .map(|(slot, &node)| Placement {
                node,
                slot,
                lane: Lane::Chain,
            })
            .collect();
        if let Some((node, slot)) = detached {
            placements.push(Placement {
                node,
                slot,
                lane: Lane::Detached,
            });
        }
        let snapshot = Snapshot::List(ListSnapshot {
            arena: self.arena.clone(),
            chain: self.chain.clone(),
            placements,
        });
        self.builder.push(description, highlights, snapshot);
    }

    fn initial(&mut self) {
        let description = format!("Initial list: {}", self.render_chain());
        self.push(description, Vec::new(), None);
    }

    /// Walk from the head over the first `count` nodes
    fn walk(&mut self, count: usize, purpose: &str) {
        for i in 0..count {
            let current = self.chain[i];
            let mut highlights = vec![node(HighlightRole::Traversing, current)];
            highlights.extend(self.chain[..i].iter().map(|&id| node(HighlightRole::Visited, id)));
            let description = format!(
                "{}: at position {}, node {}",
                purpose,
                i,
                self.name(current)
            );
            self.push(description, highlights, None);
        }
    }

    fn finish(self) -> Trace {
        self.builder.build()
    }
}

/// Trace inserting `value` at `at`
#[must_use]
pub fn insert(values: &[i64], value: i64, at: ListPosition) -> Trace {
    let mut list = ListTracer::new(Algorithm::ListInsert, values);
    let pos = at.resolve(values.len(), true).min(values.len());
    list.initial();
    list.walk(pos, &format!("Walking to insertion point {}", pos));

    let created = list.allocate(value);
    list.push(
        format!("Created node {} with value {}", created, value),
        vec![node(HighlightRole::Inserted, created)],
        Some((created, pos)),
    );

    let successor = list.chain.get(pos).copied();
    let description = match successor {
        Some(next) => format!("Pointed {}.next at {}", created, list.name(next)),
        None => format!("Pointed {}.next at null; it becomes the tail", created),
    };
    let mut highlights = vec![
        node(HighlightRole::Inserted, created),
        node(HighlightRole::Linked, created),
    ];
    highlights.extend(successor.map(|next| node(HighlightRole::Linked, next)));
    list.push(description, highlights, Some((created, pos)));

    let predecessor = pos.checked_sub(1).map(|p| list.chain[p]);
    list.chain.insert(pos, created);
    let description = match predecessor {
        Some(prev) => format!("Pointed {}.next at {}", list.name(prev), created),
        None => format!("Head now points at {}", created),
    };
    let mut highlights = vec![
        node(HighlightRole::Inserted, created),
        node(HighlightRole::Linked, created),
    ];
    highlights.extend(predecessor.map(|prev| node(HighlightRole::Linked, prev)));
    list.push(description, highlights, None);

    let description = format!("List after insertion: {}", list.render_chain());
    list.push(description, vec![node(HighlightRole::Inserted, created)], None);

    debug!(len = values.len(), pos, steps = list.builder.len(), "list insert traced");
    list.finish()
}

/// Trace deleting the node at `at`
#[must_use]
pub fn delete(values: &[i64], at: ListPosition) -> Trace {
    let mut list = ListTracer::new(Algorithm::ListDelete, values);
    list.initial();
    if values.is_empty() {
        return list.finish();
    }

    let pos = at.resolve(values.len(), false).min(values.len() - 1);
    list.walk(pos, &format!("Walking to position {}", pos));

    let target = list.chain[pos];
    list.push(
        format!("Marked node {} at position {} for deletion", list.name(target), pos),
        vec![node(HighlightRole::Deleted, target)],
        None,
    );

    let predecessor = pos.checked_sub(1).map(|p| list.chain[p]);
    let successor = list.chain.get(pos + 1).copied();
    list.chain.remove(pos);
    let next_name = successor.map_or_else(|| "null".to_string(), |id| list.name(id));
    let description = match predecessor {
        Some(prev) => format!("Bypassed {}: {}.next = {}", target, list.name(prev), next_name),
        None => format!("Bypassed {}: head = {}", target, next_name),
    };
    let mut highlights = vec![node(HighlightRole::Deleted, target)];
    highlights.extend(predecessor.map(|prev| node(HighlightRole::Linked, prev)));
    list.push(description, highlights, Some((target, pos)));

    let description = format!(
        "Released {}; list after deletion: {}",
        target,
        list.render_chain()
    );
    list.push(description, Vec::new(), None);

    debug!(len = values.len(), pos, steps = list.builder.len(), "list delete traced");
    list.finish()
}

/// Trace a linear scan for `value`
#[must_use]
pub fn search(values: &[i64], value: i64) -> Trace {
    let mut list = ListTracer::new(Algorithm::ListSearch, values);
    list.initial();

    let mut found = false;
    for i in 0..list.chain.len() {
        let current = list.chain[i];
        let current_value = list.value(current);
        let mut highlights = vec![node(HighlightRole::Traversing, current)];
        highlights.extend(list.chain[..i].iter().map(|&id| node(HighlightRole::Checked, id)));

        let description = if current_value == value {
            found = true;
            highlights.push(node(HighlightRole::Found, current));
            format!("Position {}: {} matches; found {}", i, list.name(current), value)
        } else {
            format!("Position {}: {} does not match {}", i, list.name(current), value)
        };
        list.push(description, highlights, None);
        if found {
            break;
        }
    }

    if !found {
        let highlights = list
            .chain
            .iter()
            .map(|&id| node(HighlightRole::Checked, id))
            .collect();
        list.push(
            format!("Reached null; {} is not in the list", value),
            highlights,
            None,
        );
    }

    debug!(len = values.len(), found, steps = list.builder.len(), "list search traced");
    list.finish()
}

/// Trace in-place reversal.
///
/// The chain in each snapshot is the reversed prefix followed by the
/// untouched suffix, so each node slides to the front as its pointer flips.
#[must_use]
pub fn reverse(values: &[i64]) -> Trace {
    let mut list = ListTracer::new(Algorithm::ListReverse, values);
    list.initial();

    let n = list.chain.len();
    for done in 0..n {
        let current = list.chain[done];
        let previous = (done > 0).then(|| list.chain[0]);
        list.chain[..=done].rotate_right(1);

        let target = previous.map_or_else(|| "null".to_string(), |id| list.name(id));
        let description = format!(
            "Flipped {}.next to {}; {} of {} nodes reversed",
            current,
            target,
            done + 1,
            n
        );
        let mut highlights = vec![node(HighlightRole::Linked, current)];
        highlights.extend(previous.map(|id| node(HighlightRole::Visited, id)));
        if let Some(&next) = list.chain.get(done + 1) {
            highlights.push(node(HighlightRole::Traversing, next));
        }
        list.push(description, highlights, None);
    }

    let description = format!("List after reversal: {}", list.render_chain());
    list.push(description, Vec::new(), None);

    debug!(len = n, steps = list.builder.len(), "list reverse traced");
    list.finish()
}

/// Generator for the linked-list family
#[derive(Debug, Clone, Copy)]
pub struct LinkedListGenerator {
    algorithm: Algorithm,
}

impl LinkedListGenerator {
    /// Generator for one list operation
    #[must_use]
    pub const fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

impl TraceGenerator for LinkedListGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        let AlgorithmInput::List(input) = input else {
            return Err(InputError::WrongShape {
                algorithm: self.algorithm,
                expected: "list",
            });
        };
        if input.operation.algorithm() != self.algorithm {
            return Err(InputError::invalid(
                "operation",
                format!("{} cannot run a {} operation", self.algorithm, input.operation.algorithm()),
            ));
        }
        Ok(match input.operation {
            ListOperation::Insert { value, at } => insert(&input.values, value, at),
            ListOperation::Delete { at } => delete(&input.values, at),
            ListOperation::Search { value } => search(&input.values, value),
            ListOperation::Reverse => reverse(&input.values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(step: &algolab_core::Step) -> &ListSnapshot {
        match &step.snapshot {
            Snapshot::List(snap) => snap,
            other => panic!("unexpected snapshot {:?}", other),
        }
    }

    #[test]
    fn test_insert_at_tail() {
        let trace = insert(&[10, 20, 30], 42, ListPosition::Tail);
        // initial, three walk steps, create, link next, link predecessor, final
        assert_eq!(trace.len(), 8);
        assert_eq!(list(trace.last().unwrap()).values(), vec![10, 20, 30, 42]);

        let created = trace.get(4).unwrap();
        let placement = list(created).placement_of(ListNodeId(3)).unwrap();
        assert_eq!(placement.lane, Lane::Detached);
        assert_eq!(placement.slot, 3);
        assert!(created.has(HighlightRole::Inserted, StructRef::ListNode(ListNodeId(3))));

        let linked = trace.get(6).unwrap();
        assert_eq!(list(linked).placement_of(ListNodeId(3)).unwrap().lane, Lane::Chain);
        assert!(linked.has(HighlightRole::Linked, StructRef::ListNode(ListNodeId(2))));
    }

    #[test]
    fn test_insert_at_head_skips_walk() {
        let trace = insert(&[10, 20], 5, ListPosition::Head);
        assert_eq!(trace.len(), 5);
        assert!(trace.get(3).unwrap().description.contains("Head now points at n2"));
        assert_eq!(list(trace.last().unwrap()).values(), vec![5, 10, 20]);
    }

    #[test]
    fn test_delete_head_keeps_arena() {
        let trace = delete(&[10, 20, 30], ListPosition::Head);
        let first = list(trace.get(0).unwrap());
        assert_eq!(first.placement_of(ListNodeId(0)).unwrap().lane, Lane::Chain);

        let last = list(trace.last().unwrap());
        assert_eq!(last.values(), vec![20, 30]);
        assert_eq!(last.value_of(ListNodeId(0)), Some(10));
        assert!(last.placement_of(ListNodeId(0)).is_none());

        let unlinked = trace.get(trace.len() - 2).unwrap();
        assert_eq!(
            list(unlinked).placement_of(ListNodeId(0)).unwrap().lane,
            Lane::Detached
        );
    }

    #[test]
    fn test_search_found_and_missing() {
        let trace = search(&[10, 20, 30], 20);
        assert_eq!(trace.len(), 3);
        assert!(trace.last().unwrap().has(HighlightRole::Found, StructRef::ListNode(ListNodeId(1))));

        let trace = search(&[10, 20, 30], 99);
        assert_eq!(trace.len(), 5);
        assert!(trace.last().unwrap().description.contains("not in the list"));
    }

    #[test]
    fn test_reverse_keeps_identity() {
        let trace = reverse(&[10, 20, 30]);
        assert_eq!(trace.len(), 5);
        let last = list(trace.last().unwrap());
        assert_eq!(last.values(), vec![30, 20, 10]);
        assert_eq!(last.chain, vec![ListNodeId(2), ListNodeId(1), ListNodeId(0)]);

        let middle = list(trace.get(2).unwrap());
        assert_eq!(middle.chain, vec![ListNodeId(1), ListNodeId(0), ListNodeId(2)]);
    }

    #[test]
    fn test_empty_list_operations() {
        assert_eq!(reverse(&[]).len(), 2);
        assert_eq!(search(&[], 1).len(), 2);
        assert_eq!(delete(&[], ListPosition::Head).len(), 1);
        assert_eq!(list(insert(&[], 1, ListPosition::Tail).last().unwrap()).values(), vec![1]);
    }

    proptest! {
        #[test]
        fn prop_insert_matches_vec(
            values in proptest::collection::vec(-50i64..50, 0..10),
            value in -50i64..50,
            raw_pos in 0usize..11,
        ) {
            let pos = raw_pos.min(values.len());
            let trace = insert(&values, value, ListPosition::At(pos));
            let mut expected = values.clone();
            expected.insert(pos, value);
            prop_assert_eq!(list(trace.last().unwrap()).values(), expected);
        }

        #[test]
        fn prop_delete_matches_vec(
            values in proptest::collection::vec(-50i64..50, 1..10),
            raw_pos in 0usize..10,
        ) {
            let pos = raw_pos.min(values.len() - 1);
            let trace = delete(&values, ListPosition::At(pos));
            let mut expected = values.clone();
            expected.remove(pos);
            prop_assert_eq!(list(trace.last().unwrap()).values(), expected);
        }

        #[test]
        fn prop_chain_nodes_always_placed(values in proptest::collection::vec(-50i64..50, 0..10)) {
            let mut arena_len = 0;
            for step in &reverse(&values) {
                let snap = list(step);
                prop_assert!(snap.arena.len() >= arena_len);
                arena_len = snap.arena.len();
                for &id in &snap.chain {
                    prop_assert!(snap.placement_of(id).is_some());
                }
            }
        }
    }
}
