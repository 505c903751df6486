//! Renderer adapter seam and dispatch by algorithm family.

use crate::bars::BarsAdapter;
use crate::cells::CellsAdapter;
use crate::graph::GraphAdapter;
use crate::greedy::GreedyAdapter;
use crate::layout::StructureLayout;
use crate::list::ListAdapter;
use crate::table::TableAdapter;
use crate::visual::{Motion, Tone, VisualDescription, VisualElement};
use algolab_core::{AlgorithmFamily, Step, StructRef, Trace};
use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};

/// Elements and motions an adapter produces for one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Elements in draw order
    pub elements: Vec<VisualElement>,
    /// Position changes since the previous step
    pub motions: Vec<Motion>,
}

impl Frame {
    /// Frame without motion
    #[must_use]
    pub fn still(elements: Vec<VisualElement>) -> Self {
        Self {
            elements,
            motions: Vec::new(),
        }
    }
}

/// Draws the steps of one algorithm family
///
/// Adapters are pure: output depends only on the trace, the index and the
/// layout. They decide tone and labels; the layout decides position.
pub trait RendererAdapter: Send + Sync {
    /// Family this adapter draws
    fn family(&self) -> AlgorithmFamily;

    /// Draw step `index`, which is always within the trace
    ///
    /// # Errors
    ///
    /// Returns error if the layout or snapshot does not fit this family
    fn draw(&self, trace: &Trace, index: usize, layout: &StructureLayout)
        -> Result<Frame, RenderError>;
}

/// Error from rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Layout kind does not fit the family
    #[error("{family} traces cannot be drawn on a {layout} layout")]
    LayoutMismatch {
        /// Family of the trace
        family: AlgorithmFamily,
        /// Kind of the supplied layout
        layout: &'static str,
    },

    /// Index past the end of the trace
    #[error("step {index} is outside a trace of {len} steps")]
    StepOutOfRange {
        /// Requested index
        index: usize,
        /// Trace length
        len: usize,
    },

    /// Step carries a snapshot of another family
    #[error("step {index} does not carry a {expected} snapshot")]
    SnapshotMismatch {
        /// Step index
        index: usize,
        /// Snapshot kind the adapter needs
        expected: &'static str,
    },

    /// Layout lacks a position the trace refers to
    #[error("layout has no position for {what}")]
    MissingGeometry {
        /// What is missing, e.g. `node 9`
        what: String,
    },

    /// No adapter for the family
    #[error("no renderer registered for {family}")]
    NotRegistered {
        /// Family
        family: AlgorithmFamily,
    },
}

impl RenderError {
    pub(crate) fn layout(family: AlgorithmFamily, layout: &StructureLayout) -> Self {
        Self::LayoutMismatch {
            family,
            layout: layout.kind(),
        }
    }

    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::MissingGeometry { what: what.into() }
    }
}

pub(crate) fn step_at(trace: &Trace, index: usize) -> Result<&Step, RenderError> {
    trace.get(index).ok_or(RenderError::StepOutOfRange {
        index,
        len: trace.len(),
    })
}

/// Dominant tone of `target` at `step`, if highlighted at all
#[must_use]
pub fn tone_for(step: &Step, target: StructRef) -> Option<Tone> {
    step.highlights
        .iter()
        .filter(|h| h.target == target)
        .map(|h| Tone::from(h.role))
        .max_by_key(Tone::priority)
}

/// Registry of renderer adapters keyed by family
#[derive(Clone)]
pub struct RendererRegistry {
    adapters: IndexMap<AlgorithmFamily, Arc<dyn RendererAdapter>>,
}

impl RendererRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: IndexMap::new(),
        }
    }

    /// Registry with an adapter for every family
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BarsAdapter));
        registry.register(Arc::new(CellsAdapter));
        registry.register(Arc::new(GraphAdapter));
        registry.register(Arc::new(GreedyAdapter));
        registry.register(Arc::new(TableAdapter));
        registry.register(Arc::new(ListAdapter));
        registry
    }

    /// Register an adapter, returning the one it replaces
    pub fn register(&mut self, adapter: Arc<dyn RendererAdapter>) -> Option<Arc<dyn RendererAdapter>> {
        self.adapters.insert(adapter.family(), adapter)
    }

    /// Adapter for `family`
    #[must_use]
    pub fn get(&self, family: AlgorithmFamily) -> Option<&Arc<dyn RendererAdapter>> {
        self.adapters.get(&family)
    }

    /// Families with an adapter, in registration order
    #[must_use]
    pub fn families(&self) -> Vec<AlgorithmFamily> {
        self.adapters.keys().copied().collect()
    }

    /// Describe trace position `current_index`.
    ///
    /// An empty trace yields the nothing-to-show placeholder. An index at or
    /// past the end draws the last step and marks the description completed.
    ///
    /// # Errors
    ///
    /// Returns error if no adapter fits or the layout does not match
    pub fn render(
        &self,
        trace: &Trace,
        current_index: usize,
        layout: &StructureLayout,
    ) -> Result<VisualDescription, RenderError> {
        let algorithm = trace.algorithm();
        let len = trace.len();
        let Some(index) = len.checked_sub(1).map(|last| current_index.min(last)) else {
            return Ok(VisualDescription::nothing_to_show(algorithm));
        };
        let Some(step) = trace.get(index) else {
            return Ok(VisualDescription::nothing_to_show(algorithm));
        };

        let family = algorithm.family();
        let adapter = self
            .adapters
            .get(&family)
            .ok_or(RenderError::NotRegistered { family })?;
        let frame = adapter.draw(trace, index, layout)?;

        let completed = current_index >= len;
        let progress = if completed {
            format!("Completed ({} steps)", len)
        } else {
            format!("Step {} of {}", index + 1, len)
        };

        Ok(VisualDescription {
            algorithm,
            step: Some(index),
            caption: step.description.clone(),
            progress,
            elements: frame.elements,
            motions: frame.motions,
            completed,
        })
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("families", &self.families())
            .finish()
    }
}

fn shared_registry() -> &'static RendererRegistry {
    static REGISTRY: OnceLock<RendererRegistry> = OnceLock::new();
    REGISTRY.get_or_init(RendererRegistry::with_defaults)
}

/// Describe trace position `current_index` with the built-in adapters
///
/// # Errors
///
/// Returns error if the layout does not fit the trace's family
pub fn render(
    trace: &Trace,
    current_index: usize,
    layout: &StructureLayout,
) -> Result<VisualDescription, RenderError> {
    shared_registry().render(trace, current_index, layout)
}
