//! Linked lists: nodes placed by slot and lane, animated between steps.
//!
//! Unlike the other families, position is the animated quantity here. Each
//! snapshot says which slot and lane a node occupies; the adapter turns that
//! into coordinates and reports a [`Motion`] for every node whose position
//! changed since the previous step.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::layout::{ListGeometry, Point, StructureLayout};
use crate::visual::{Motion, Shape, Tone, VisualElement};
use algolab_core::{
    AlgorithmFamily, HighlightRole, Lane, ListNodeId, ListSnapshot, Snapshot, Step, StructRef,
    Trace,
};

/// Draws linked-list steps
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAdapter;

impl RendererAdapter for ListAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::LinkedList
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let StructureLayout::List(geometry) = layout else {
            return Err(RenderError::layout(self.family(), layout));
        };
        let step = step_at(trace, index)?;
        let list = list_snapshot(step)?;

        let motions = match index.checked_sub(1) {
            Some(prev) => motions(geometry, list_snapshot(step_at(trace, prev)?)?, list),
            None => Vec::new(),
        };
        Ok(Frame {
            elements: list_elements(geometry, step, list),
            motions,
        })
    }
}

fn list_snapshot(step: &Step) -> Result<&ListSnapshot, RenderError> {
    match &step.snapshot {
        Snapshot::List(list) => Ok(list),
        _ => Err(RenderError::SnapshotMismatch {
            index: step.index,
            expected: "list",
        }),
    }
}

fn position_of(geometry: &ListGeometry, list: &ListSnapshot, id: ListNodeId) -> Option<Point> {
    list.placement_of(id)
        .map(|p| geometry.position(p.slot, p.lane == Lane::Detached))
}

/// Arrow between the facing edges of two node circles
fn arrow(geometry: &ListGeometry, from: Point, to: Point) -> Shape {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt().max(f32::EPSILON);
    let (ux, uy) = (dx / len, dy / len);
    let r = geometry.node_radius;
    Shape::Arrow {
        from: Point::new(from.x + ux * r, from.y + uy * r),
        to: Point::new(to.x - ux * r, to.y - uy * r),
    }
}

fn list_elements(geometry: &ListGeometry, step: &Step, list: &ListSnapshot) -> Vec<VisualElement> {
    let mut elements = Vec::with_capacity(list.placements.len() * 2 + 2);

    // Pointers first so nodes draw on top of them.
    for pair in list.chain.windows(2) {
        let (Some(from), Some(to)) = (
            position_of(geometry, list, pair[0]),
            position_of(geometry, list, pair[1]),
        ) else {
            continue;
        };
        elements.push(VisualElement::new(
            format!("next-{}", pair[0]),
            arrow(geometry, from, to),
            Tone::Connector,
        ));
    }

    // A detached node whose pointer was just set points at the chain node in its slot.
    for placement in list.placements.iter().filter(|p| p.lane == Lane::Detached) {
        if !step.has(HighlightRole::Linked, StructRef::ListNode(placement.node)) {
            continue;
        }
        let Some(&successor) = list.chain.get(placement.slot) else {
            continue;
        };
        if let (Some(from), Some(to)) = (
            position_of(geometry, list, placement.node),
            position_of(geometry, list, successor),
        ) {
            elements.push(VisualElement::new(
                format!("next-{}", placement.node),
                arrow(geometry, from, to),
                Tone::Linked,
            ));
        }
    }

    let tail = geometry.position(list.chain.len(), false);
    elements.push(
        VisualElement::new("null", Shape::Text { at: tail }, Tone::Connector).with_label("null"),
    );
    let head_at = list
        .chain
        .first()
        .and_then(|&id| position_of(geometry, list, id))
        .unwrap_or(tail);
    elements.push(
        VisualElement::new(
            "head",
            Shape::Text {
                at: Point::new(head_at.x, head_at.y - geometry.node_radius * 1.5),
            },
            Tone::Base,
        )
        .with_label("head"),
    );

    for placement in &list.placements {
        let center = geometry.position(placement.slot, placement.lane == Lane::Detached);
        let tone = tone_for(step, StructRef::ListNode(placement.node)).unwrap_or(Tone::Base);
        let value = list.value_of(placement.node).unwrap_or_default();
        elements.push(
            VisualElement::new(
                format!("node-{}", placement.node),
                Shape::Circle {
                    center,
                    radius: geometry.node_radius,
                },
                tone,
            )
            .with_label(value.to_string())
            .with_annotation(placement.node.to_string()),
        );
    }
    elements
}

fn motions(geometry: &ListGeometry, before: &ListSnapshot, after: &ListSnapshot) -> Vec<Motion> {
    after
        .placements
        .iter()
        .filter_map(|placement| {
            let from = position_of(geometry, before, placement.node)?;
            let to = position_of(geometry, after, placement.node)?;
            (from != to).then(|| Motion {
                id: format!("node-{}", placement.node),
                from,
                to,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::render;
    use algolab_trace::linked_list::{delete, insert, reverse, search};
    use algolab_trace::ListPosition;

    fn layout() -> StructureLayout {
        StructureLayout::List(ListGeometry::default())
    }

    fn center(visual: &crate::visual::VisualDescription, id: &str) -> Point {
        match visual.element(id).map(|e| &e.shape) {
            Some(Shape::Circle { center, .. }) => *center,
            other => panic!("expected circle for {}, got {:?}", id, other),
        }
    }

    #[test]
    fn test_tail_insert_drops_then_links() {
        let trace = insert(&[10, 20, 30], 42, ListPosition::Tail);
        let created = render(&trace, 4, &layout()).unwrap();
        assert_eq!(center(&created, "node-n3"), Point::new(550.0, 230.0));
        assert_eq!(created.element("node-n3").unwrap().tone, Tone::Inserted);
        assert!(created.motions.is_empty());

        let linked = render(&trace, 6, &layout()).unwrap();
        assert_eq!(center(&linked, "node-n3"), Point::new(550.0, 120.0));
        assert_eq!(
            linked.motions,
            vec![Motion {
                id: "node-n3".to_string(),
                from: Point::new(550.0, 230.0),
                to: Point::new(550.0, 120.0),
            }]
        );
        assert!(linked.element("next-n2").is_some());
    }

    #[test]
    fn test_head_insert_shifts_chain() {
        let trace = insert(&[10, 20, 30], 5, ListPosition::Head);
        let pointed = render(&trace, 2, &layout()).unwrap();
        assert_eq!(pointed.element("next-n3").unwrap().tone, Tone::Linked);

        let linked = render(&trace, 3, &layout()).unwrap();
        let moved: Vec<&str> = linked.motions.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(moved, ["node-n3", "node-n0", "node-n1", "node-n2"]);
        assert_eq!(center(&linked, "node-n0"), Point::new(250.0, 120.0));
    }

    #[test]
    fn test_deleted_node_drawn_until_released() {
        let trace = delete(&[10, 20, 30], ListPosition::Head);
        let unlinked = render(&trace, 2, &layout()).unwrap();
        assert_eq!(center(&unlinked, "node-n0"), Point::new(100.0, 230.0));
        assert_eq!(unlinked.element("node-n0").unwrap().tone, Tone::Deleted);
        assert!(unlinked.element("next-n0").is_none());

        let released = render(&trace, trace.len() - 1, &layout()).unwrap();
        assert!(released.element("node-n0").is_none());
        assert_eq!(center(&released, "node-n1"), Point::new(100.0, 120.0));

        let earlier = render(&trace, 0, &layout()).unwrap();
        assert_eq!(earlier.element("node-n0").unwrap().label.as_deref(), Some("10"));
    }

    #[test]
    fn test_reverse_moves_every_node() {
        let trace = reverse(&[10, 20, 30]);
        let last = render(&trace, trace.len() - 1, &layout()).unwrap();
        assert_eq!(center(&last, "node-n2"), Point::new(100.0, 120.0));
        assert_eq!(center(&last, "node-n0"), Point::new(400.0, 120.0));

        let total_moves: usize = (0..trace.len())
            .map(|i| render(&trace, i, &layout()).unwrap().motions.len())
            .sum();
        assert!(total_moves >= 3);
    }

    #[test]
    fn test_search_found_tone() {
        let trace = search(&[10, 20, 30], 20);
        let visual = render(&trace, trace.len() - 1, &layout()).unwrap();
        assert_eq!(visual.element("node-n1").unwrap().tone, Tone::Found);
        assert_eq!(visual.element("node-n0").unwrap().tone, Tone::Checked);
    }

    #[test]
    fn test_empty_list_draws_head_and_null() {
        let trace = insert(&[], 7, ListPosition::Head);
        let first = render(&trace, 0, &layout()).unwrap();
        assert!(first.element("head").is_some());
        assert!(first.element("null").is_some());
        assert!(first.elements.iter().all(|e| !e.id.starts_with("node-")));
    }
}
