//! Searching: one cell per array slot, with range cursors underneath.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::layout::{CellGeometry, Point, StructureLayout};
use crate::visual::{Shape, Tone, VisualElement};
use algolab_core::{Algorithm, AlgorithmFamily, SearchOutcome, SearchSnapshot, Snapshot, Step, StructRef, Trace};

/// Draws search steps as a row of cells
#[derive(Debug, Clone, Copy, Default)]
pub struct CellsAdapter;

impl RendererAdapter for CellsAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Searching
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let StructureLayout::Cells(geometry) = layout else {
            return Err(RenderError::layout(self.family(), layout));
        };
        let step = step_at(trace, index)?;
        let Snapshot::Search(search) = &step.snapshot else {
            return Err(RenderError::SnapshotMismatch {
                index,
                expected: "search",
            });
        };

        let cursors = trace.algorithm() == Algorithm::BinarySearch;
        let mut elements = cell_elements(geometry, step, search, cursors);
        elements.push(target_element(geometry, search));
        Ok(Frame::still(elements))
    }
}

fn cursor_text(search: &SearchSnapshot, i: usize, cursors: bool) -> Option<String> {
    if !cursors {
        return (i == search.cursor).then(|| "i".to_string());
    }
    let (low, high) = search.range?;
    let names: Vec<&str> = [(low, "low"), (search.cursor, "mid"), (high, "high")]
        .iter()
        .filter(|(at, _)| *at == i)
        .map(|&(_, name)| name)
        .collect();
    (!names.is_empty()).then(|| names.join("/"))
}

fn cell_elements(
    geometry: &CellGeometry,
    step: &Step,
    search: &SearchSnapshot,
    cursors: bool,
) -> Vec<VisualElement> {
    search
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let shape = Shape::Rect {
                origin: Point::new(
                    geometry.origin.x + i as f32 * (geometry.size + geometry.gap),
                    geometry.origin.y,
                ),
                width: geometry.size,
                height: geometry.size,
            };
            let tone = tone_for(step, StructRef::Index(i)).unwrap_or(Tone::Base);
            let element =
                VisualElement::new(format!("cell-{}", i), shape, tone).with_label(value.to_string());
            match cursor_text(search, i, cursors) {
                Some(text) => element.with_annotation(text),
                None => element,
            }
        })
        .collect()
}

fn target_element(geometry: &CellGeometry, search: &SearchSnapshot) -> VisualElement {
    let (tone, text) = match search.outcome {
        SearchOutcome::Searching => (Tone::Base, format!("target {}", search.target)),
        SearchOutcome::Found(at) => (Tone::Found, format!("target {} found at {}", search.target, at)),
        SearchOutcome::NotFound => (Tone::Checked, format!("target {} not found", search.target)),
    };
    let at = Point::new(geometry.origin.x, geometry.origin.y - geometry.size / 2.0);
    VisualElement::new("target", Shape::Text { at }, tone).with_label(text)
}
