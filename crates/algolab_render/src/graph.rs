//! Graph traversal: nodes at caller-supplied coordinates, edges between them.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::layout::{GraphGeometry, LayoutEdge, StructureLayout};
use crate::visual::{Shape, Tone, VisualElement};
use algolab_core::{AlgorithmFamily, Snapshot, Step, StructRef, Trace};

/// Draws BFS and DFS steps
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphAdapter;

impl RendererAdapter for GraphAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Graph
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let StructureLayout::Graph(geometry) = layout else {
            return Err(RenderError::layout(self.family(), layout));
        };
        let step = step_at(trace, index)?;
        let Snapshot::Traversal(traversal) = &step.snapshot else {
            return Err(RenderError::SnapshotMismatch {
                index,
                expected: "traversal",
            });
        };

        let mut elements = Vec::with_capacity(geometry.edges.len() + traversal.node_count);
        for (i, edge) in geometry.edges.iter().enumerate() {
            let tone = if traversal.is_visited(edge.from) && traversal.is_visited(edge.to) {
                Tone::Visited
            } else {
                Tone::Connector
            };
            elements.push(edge_element(geometry, i, edge, tone)?);
        }

        let mut nodes = node_elements(geometry, step, traversal.node_count)?;
        for (order, &node) in traversal.visited.iter().enumerate() {
            if let Some(element) = nodes.get_mut(node) {
                element.annotation = Some(format!("#{}", order + 1));
            }
        }
        elements.extend(nodes);
        Ok(Frame::still(elements))
    }
}

/// Line for edge `i`, labelled with its weight when it has one
///
/// # Errors
///
/// Returns error if an endpoint has no coordinates
pub(crate) fn edge_element(
    geometry: &GraphGeometry,
    i: usize,
    edge: &LayoutEdge,
    tone: Tone,
) -> Result<VisualElement, RenderError> {
    let point = |node: usize| {
        geometry
            .nodes
            .get(node)
            .copied()
            .ok_or_else(|| RenderError::missing(format!("node {}", node)))
    };
    let shape = Shape::Line {
        from: point(edge.from)?,
        to: point(edge.to)?,
    };
    let element = VisualElement::new(format!("edge-{}", i), shape, tone);
    Ok(match edge.weight {
        Some(weight) => element.with_label(weight.to_string()),
        None => element,
    })
}

/// Circles for nodes `0..count`, toned by the step's highlights
///
/// # Errors
///
/// Returns error if the layout has fewer nodes than `count`
pub(crate) fn node_elements(
    geometry: &GraphGeometry,
    step: &Step,
    count: usize,
) -> Result<Vec<VisualElement>, RenderError> {
    if geometry.nodes.len() < count {
        return Err(RenderError::missing(format!("node {}", geometry.nodes.len())));
    }
    Ok(geometry
        .nodes
        .iter()
        .take(count)
        .enumerate()
        .map(|(node, &center)| {
            let shape = Shape::Circle {
                center,
                radius: geometry.node_radius,
            };
            let tone = tone_for(step, StructRef::Node(node)).unwrap_or(Tone::Base);
            VisualElement::new(format!("node-{}", node), shape, tone).with_label(node.to_string())
        })
        .collect())
}
