//! Dynamic programming: the table with headers, filled cells and operands.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::layout::{Point, StructureLayout, TableGeometry};
use crate::visual::{Shape, Tone, VisualElement};
use algolab_core::{AlgorithmFamily, Snapshot, Step, StructRef, TableSnapshot, Trace};

/// Draws DP table steps
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAdapter;

impl RendererAdapter for TableAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::DynamicProgramming
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let StructureLayout::Table(geometry) = layout else {
            return Err(RenderError::layout(self.family(), layout));
        };
        let step = step_at(trace, index)?;
        let Snapshot::Table(table) = &step.snapshot else {
            return Err(RenderError::SnapshotMismatch {
                index,
                expected: "table",
            });
        };
        Ok(Frame::still(table_elements(geometry, step, table)))
    }
}

fn header(id: String, at: Point, text: &str) -> VisualElement {
    VisualElement::new(id, Shape::Text { at }, Tone::Base).with_label(text)
}

fn table_elements(geometry: &TableGeometry, step: &Step, table: &TableSnapshot) -> Vec<VisualElement> {
    let (w, h) = (geometry.cell_width, geometry.cell_height);
    let corner = geometry.origin;
    let mut elements = Vec::with_capacity(table.rows * table.cols + table.rows + table.cols);

    for (col, label) in table.col_labels.iter().enumerate() {
        let at = Point::new(corner.x + (col as f32 + 1.5) * w, corner.y + h / 2.0);
        elements.push(header(format!("col-{}", col), at, label));
    }
    for (row, label) in table.row_labels.iter().enumerate() {
        let at = Point::new(corner.x + w / 2.0, corner.y + (row as f32 + 1.5) * h);
        elements.push(header(format!("row-{}", row), at, label));
    }

    for row in 0..table.rows {
        for col in 0..table.cols {
            let value = table.get(row, col);
            let fallback = if value.is_some() { Tone::Base } else { Tone::Empty };
            let tone = tone_for(step, StructRef::Cell { row, col }).unwrap_or(fallback);
            let shape = Shape::Rect {
                origin: Point::new(
                    corner.x + (col as f32 + 1.0) * w,
                    corner.y + (row as f32 + 1.0) * h,
                ),
                width: w,
                height: h,
            };
            let element = VisualElement::new(format!("cell-{}-{}", row, col), shape, tone);
            elements.push(match value {
                Some(value) => element.with_label(value.to_string()),
                None => element,
            });
        }
    }
    elements
}
