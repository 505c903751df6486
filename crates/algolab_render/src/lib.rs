//! ALGOLAB Renderer Adapters
//!
//! Pure mapping from a trace position to a drawable [`VisualDescription`].
//! The caller supplies a [`StructureLayout`] saying where things go; each
//! family's adapter decides tone and labels on top of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod bars;
pub mod cells;
pub mod graph;
pub mod greedy;
pub mod layout;
pub mod list;
pub mod table;
pub mod visual;

pub use adapter::{render, tone_for, Frame, RenderError, RendererAdapter, RendererRegistry};
pub use layout::{
    BarGeometry, CellGeometry, GraphGeometry, LayoutEdge, ListGeometry, Point, StructureLayout,
    TableGeometry, TimelineGeometry,
};
pub use visual::{Motion, Palette, Shape, Tone, VisualDescription, VisualElement};
