//! Sorting: one bar per array slot, height proportional to the value.

use crate::adapter::{step_at, tone_for, Frame, RenderError, RendererAdapter};
use crate::layout::{BarGeometry, Point, StructureLayout};
use crate::visual::{Shape, Tone, VisualElement};
use algolab_core::{AlgorithmFamily, Snapshot, Step, StructRef, Trace};

/// Shortest bar drawn, so zero values stay visible
const MIN_BAR_HEIGHT: f32 = 2.0;

/// Draws sorting steps as bars
#[derive(Debug, Clone, Copy, Default)]
pub struct BarsAdapter;

impl RendererAdapter for BarsAdapter {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Sorting
    }

    fn draw(
        &self,
        trace: &Trace,
        index: usize,
        layout: &StructureLayout,
    ) -> Result<Frame, RenderError> {
        let StructureLayout::Bars(geometry) = layout else {
            return Err(RenderError::layout(self.family(), layout));
        };
        let step = step_at(trace, index)?;
        let Snapshot::Array(array) = &step.snapshot else {
            return Err(RenderError::SnapshotMismatch {
                index,
                expected: "array",
            });
        };
        Ok(Frame::still(bar_elements(geometry, step, &array.settled())))
    }
}

/// Bars for `values`, toned by the step's highlights
#[must_use]
pub fn bar_elements(geometry: &BarGeometry, step: &Step, values: &[i64]) -> Vec<VisualElement> {
    let peak = values
        .iter()
        .map(|v| v.unsigned_abs())
        .max()
        .unwrap_or(1)
        .max(1) as f32;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let height =
                (geometry.max_height * value.unsigned_abs() as f32 / peak).max(MIN_BAR_HEIGHT);
            let x = geometry.origin.x + i as f32 * (geometry.bar_width + geometry.gap);
            let shape = Shape::Rect {
                origin: Point::new(x, geometry.origin.y - height),
                width: geometry.bar_width,
                height,
            };
            let tone = tone_for(step, StructRef::Index(i)).unwrap_or(Tone::Base);
            VisualElement::new(format!("bar-{}", i), shape, tone).with_label(value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::render;
    use algolab_trace::sorting::{bubble_sort, selection_sort};

    fn layout() -> StructureLayout {
        StructureLayout::Bars(BarGeometry::default())
    }

    fn labels(elements: &[VisualElement]) -> Vec<String> {
        elements.iter().filter_map(|e| e.label.clone()).collect()
    }

    #[test]
    fn test_first_step_shows_swap_result() {
        let trace = bubble_sort(&[5, 3, 1, 4, 2]);
        let visual = render(&trace, 0, &layout()).unwrap();
        assert_eq!(labels(&visual.elements), ["3", "5", "1", "4", "2"]);
        assert_eq!(visual.element("bar-0").unwrap().tone, Tone::Swapped);
        assert_eq!(visual.element("bar-1").unwrap().tone, Tone::Swapped);
        assert_eq!(visual.element("bar-2").unwrap().tone, Tone::Base);
    }

    #[test]
    fn test_last_step_is_sorted() {
        let trace = bubble_sort(&[5, 3, 1, 4, 2]);
        let visual = render(&trace, trace.len() - 1, &layout()).unwrap();
        assert_eq!(labels(&visual.elements), ["1", "2", "3", "4", "5"]);
        assert!(visual.element("bar-4").is_some_and(|e| e.tone == Tone::Sorted));
    }

    #[test]
    fn test_tallest_bar_fills_height() {
        let trace = selection_sort(&[2, 8, 4]);
        let geometry = BarGeometry::default();
        let step = trace.get(0).unwrap();
        let elements = bar_elements(&geometry, step, &[2, 8, 4]);
        let Shape::Rect { height, origin, .. } = elements[1].shape else {
            panic!("expected rect");
        };
        assert!((height - geometry.max_height).abs() < f32::EPSILON);
        assert!((origin.y + height - geometry.origin.y).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_value_still_visible() {
        let trace = bubble_sort(&[0, 0]);
        let visual = render(&trace, 0, &layout()).unwrap();
        for element in &visual.elements {
            let Shape::Rect { height, .. } = element.shape else {
                panic!("expected rect");
            };
            assert!(height >= MIN_BAR_HEIGHT);
        }
    }
}
