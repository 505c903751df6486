//! Greedy selection: Kruskal on a graph, activities on a timeline.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::graph::{edge_element, node_elements};
use crate::layout::{GraphGeometry, Point, StructureLayout, TimelineGeometry};
use crate::visual::{Shape, Tone, VisualElement};
use algolab_core::{Algorithm, AlgorithmFamily, SelectionSnapshot, Snapshot, Step, StructRef, Trace};

/// Bar height as a share of the row
const INTERVAL_FILL: f32 = 0.8;

/// Draws greedy selection steps
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAdapter;

impl RendererAdapter for GreedyAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Greedy
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let step = step_at(trace, index)?;
        let Snapshot::Selection(selection) = &step.snapshot else {
            return Err(RenderError::SnapshotMismatch {
                index,
                expected: "selection",
            });
        };

        match (trace.algorithm(), layout) {
            (Algorithm::Kruskal, StructureLayout::Graph(geometry)) => {
                spanning_forest(geometry, step, selection).map(Frame::still)
            }
            (Algorithm::ActivitySelection, StructureLayout::Timeline(geometry)) => {
                Ok(Frame::still(timeline(geometry, step, selection)))
            }
            _ => Err(RenderError::layout(self.family(), layout)),
        }
    }
}

fn total_element(at: Point, text: String) -> VisualElement {
    VisualElement::new("total", Shape::Text { at }, Tone::Base).with_label(text)
}

fn spanning_forest(
    geometry: &GraphGeometry,
    step: &Step,
    selection: &SelectionSnapshot,
) -> Result<Vec<VisualElement>, RenderError> {
    let mut elements = Vec::with_capacity(geometry.edges.len() + geometry.nodes.len() + 1);
    for (i, edge) in geometry.edges.iter().enumerate() {
        let tone = tone_for(step, StructRef::Edge(i)).unwrap_or(Tone::Connector);
        elements.push(edge_element(geometry, i, edge, tone)?);
    }
    elements.extend(node_elements(geometry, step, geometry.nodes.len())?);
    elements.push(total_element(
        Point::new(10.0, 20.0),
        format!(
            "{} edges, total weight {}",
            selection.accepted.len(),
            selection.total_weight
        ),
    ));
    Ok(elements)
}

fn timeline(
    geometry: &TimelineGeometry,
    step: &Step,
    selection: &SelectionSnapshot,
) -> Vec<VisualElement> {
    let mut elements: Vec<VisualElement> = geometry
        .intervals
        .iter()
        .enumerate()
        .map(|(i, &(start, finish))| {
            let shape = Shape::Rect {
                origin: Point::new(
                    geometry.origin.x + start as f32 * geometry.unit_width,
                    geometry.origin.y + i as f32 * geometry.row_height,
                ),
                width: (finish - start).max(0) as f32 * geometry.unit_width,
                height: geometry.row_height * INTERVAL_FILL,
            };
            let tone = tone_for(step, StructRef::Interval(i)).unwrap_or(Tone::Base);
            VisualElement::new(format!("interval-{}", i), shape, tone)
                .with_label(format!("a{}", i))
                .with_annotation(format!("[{}, {})", start, finish))
        })
        .collect();

    let below = geometry.origin.y + geometry.intervals.len() as f32 * geometry.row_height;
    elements.push(total_element(
        Point::new(geometry.origin.x, below + geometry.row_height),
        format!(
            "{} selected, busy time {}",
            selection.accepted.len(),
            selection.total_weight
        ),
    ));
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::render;
    use crate::layout::CellGeometry;
    use algolab_trace::greedy::{activity_selection, kruskal};
    use algolab_trace::{default_input, AlgorithmInput};

    #[test]
    fn test_kruskal_accepted_edges() {
        let input = default_input(Algorithm::Kruskal);
        let layout = StructureLayout::for_input(&input);
        let AlgorithmInput::SpanningTree(tree) = input else {
            panic!("expected spanning tree input");
        };
        let trace = kruskal(tree.node_count, &tree.edges);

        let first = render(&trace, 0, &layout).unwrap();
        let current: Vec<_> = first
            .with_tone(Tone::Current)
            .map(|e| e.id.as_str())
            .collect();
        assert!(current.contains(&"edge-2"));
        assert!(current.contains(&"node-1"));
        assert!(current.contains(&"node-2"));
        assert_eq!(first.element("edge-2").unwrap().label.as_deref(), Some("1"));

        let last = render(&trace, trace.len() - 1, &layout).unwrap();
        let chosen = last
            .elements
            .iter()
            .filter(|e| e.id.starts_with("edge-"))
            .filter(|e| matches!(e.tone, Tone::Current | Tone::Selected))
            .count();
        assert_eq!(chosen, tree.node_count - 1);
    }

    #[test]
    fn test_activity_timeline() {
        let input = default_input(Algorithm::ActivitySelection);
        let layout = StructureLayout::for_input(&input);
        let AlgorithmInput::Activities(activities) = input else {
            panic!("expected activity input");
        };
        let trace = activity_selection(&activities.activities);

        let visual = render(&trace, 1, &layout).unwrap();
        assert_eq!(visual.element("interval-0").unwrap().tone, Tone::Selected);
        assert_eq!(visual.element("interval-3").unwrap().tone, Tone::Current);
        assert_eq!(visual.element("interval-1").unwrap().tone, Tone::Discarded);
        assert_eq!(
            visual.element("interval-3").unwrap().annotation.as_deref(),
            Some("[5, 7)")
        );
        assert!(visual
            .element("total")
            .and_then(|e| e.label.as_deref())
            .is_some_and(|text| text.starts_with("2 selected")));
    }

    #[test]
    fn test_kruskal_needs_graph_layout() {
        let trace = kruskal(2, &[algolab_trace::WeightedEdge::new(0, 1, 3)]);
        let layout = StructureLayout::Cells(CellGeometry::default());
        assert!(matches!(
            render(&trace, 0, &layout),
            Err(RenderError::LayoutMismatch { .. })
        ));
    }
}
