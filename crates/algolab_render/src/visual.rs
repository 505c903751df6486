//! Drawable output: shapes tagged with a tone, plus captions and motions.

use crate::layout::Point;
use algolab_core::{Algorithm, HighlightRole};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic color class of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Untouched element
    Base,
    /// Not yet computed or not yet reached
    Empty,
    /// Connector between elements
    Connector,
    /// Being compared
    Comparing,
    /// Exchanged at this step
    Swapped,
    /// In final position
    Sorted,
    /// Inside the live search range
    Range,
    /// Examined at this step
    Examined,
    /// Already ruled out
    Checked,
    /// Matches the target
    Found,
    /// Visited at this step
    Current,
    /// Visited earlier
    Visited,
    /// Waiting to be visited
    Frontier,
    /// Accepted into the solution
    Selected,
    /// Rejected by the greedy rule
    Discarded,
    /// Read by the recurrence
    Operand,
    /// Written at this step
    Computed,
    /// Under a list cursor
    Traversing,
    /// Newly created node
    Inserted,
    /// Node being removed
    Deleted,
    /// Pointer rewired at this step
    Linked,
}

impl Tone {
    /// Rank used when one element carries several roles; higher wins
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Base | Self::Empty | Self::Connector => 0,
            Self::Checked => 1,
            Self::Range => 2,
            Self::Sorted => 3,
            Self::Visited => 4,
            Self::Frontier => 5,
            Self::Discarded => 6,
            Self::Selected => 7,
            Self::Operand => 8,
            Self::Computed => 9,
            Self::Traversing => 10,
            Self::Linked => 11,
            Self::Examined => 12,
            Self::Comparing => 13,
            Self::Swapped => 14,
            Self::Current => 15,
            Self::Inserted => 16,
            Self::Deleted => 17,
            Self::Found => 18,
        }
    }
}

impl From<HighlightRole> for Tone {
    fn from(role: HighlightRole) -> Self {
        match role {
            HighlightRole::Comparing => Self::Comparing,
            HighlightRole::Swapped => Self::Swapped,
            HighlightRole::Sorted => Self::Sorted,
            HighlightRole::Range => Self::Range,
            HighlightRole::Examined => Self::Examined,
            HighlightRole::Checked => Self::Checked,
            HighlightRole::Found => Self::Found,
            HighlightRole::Current => Self::Current,
            HighlightRole::Visited => Self::Visited,
            HighlightRole::Frontier => Self::Frontier,
            HighlightRole::Selected => Self::Selected,
            HighlightRole::Discarded => Self::Discarded,
            HighlightRole::Operand => Self::Operand,
            HighlightRole::Computed => Self::Computed,
            HighlightRole::Traversing => Self::Traversing,
            HighlightRole::Inserted => Self::Inserted,
            HighlightRole::Deleted => Self::Deleted,
            HighlightRole::Linked => Self::Linked,
        }
    }
}

/// Tone to color mapping. Overrides win over the built-in lavender scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    overrides: IndexMap<Tone, String>,
}

impl Palette {
    /// Built-in scheme
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the color for `tone`
    #[must_use]
    pub fn with_color(mut self, tone: Tone, color: impl Into<String>) -> Self {
        self.overrides.insert(tone, color.into());
        self
    }

    /// Color for `tone` as a CSS hex string
    #[must_use]
    pub fn color(&self, tone: Tone) -> &str {
        if let Some(color) = self.overrides.get(&tone) {
            return color;
        }
        match tone {
            Tone::Base => "#8b5cf6",
            Tone::Empty => "#f3f4f6",
            Tone::Connector => "#333333",
            Tone::Comparing | Tone::Current | Tone::Deleted | Tone::Examined => "#ef4444",
            Tone::Swapped => "#f59e0b",
            Tone::Sorted | Tone::Visited | Tone::Found | Tone::Selected | Tone::Computed => {
                "#10b981"
            }
            Tone::Range => "#fcd34d",
            Tone::Checked | Tone::Discarded => "#94a3b8",
            Tone::Frontier => "#3b82f6",
            Tone::Operand => "#c4b5fd",
            Tone::Traversing => "#ffa500",
            Tone::Inserted => "#14b8a6",
            Tone::Linked => "#ec4899",
        }
    }
}

/// Geometric primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle by top-left corner
    Rect {
        /// Top-left corner
        origin: Point,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
    /// Circle
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f32,
    },
    /// Undirected segment
    Line {
        /// Start
        from: Point,
        /// End
        to: Point,
    },
    /// Directed segment with a head at `to`
    Arrow {
        /// Tail
        from: Point,
        /// Head
        to: Point,
    },
    /// Free-standing text
    Text {
        /// Anchor
        at: Point,
    },
}

/// One drawable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    /// Stable id across steps, e.g. `bar-3` or `node-n2`
    pub id: String,
    /// Geometry
    pub shape: Shape,
    /// Color class
    pub tone: Tone,
    /// Text drawn on the element
    pub label: Option<String>,
    /// Secondary text drawn next to it, e.g. `mid`
    pub annotation: Option<String>,
}

impl VisualElement {
    /// Create an element with no text
    #[must_use]
    pub fn new(id: impl Into<String>, shape: Shape, tone: Tone) -> Self {
        Self {
            id: id.into(),
            shape,
            tone,
            label: None,
            annotation: None,
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the annotation
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Movement of an element between the previous step and this one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Element id
    pub id: String,
    /// Position at the previous step
    pub from: Point,
    /// Position at this step
    pub to: Point,
}

/// Everything needed to draw one trace position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualDescription {
    /// Algorithm drawn
    pub algorithm: Algorithm,
    /// Step drawn; `None` when there is nothing to show
    pub step: Option<usize>,
    /// Caption, normally the step description
    pub caption: String,
    /// Progress text such as `Step 3 of 10`
    pub progress: String,
    /// Elements in draw order
    pub elements: Vec<VisualElement>,
    /// Position changes since the previous step
    pub motions: Vec<Motion>,
    /// Whether playback has run past the last step
    pub completed: bool,
}

impl VisualDescription {
    /// Placeholder for a trace with no steps
    #[must_use]
    pub fn nothing_to_show(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            step: None,
            caption: "Nothing to show".to_string(),
            progress: "Step 0 of 0".to_string(),
            elements: Vec::new(),
            motions: Vec::new(),
            completed: true,
        }
    }

    /// Whether this is the empty placeholder
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.step.is_none()
    }

    /// Element by id
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&VisualElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements drawn with `tone`
    pub fn with_tone(&self, tone: Tone) -> impl Iterator<Item = &VisualElement> + '_ {
        self.elements.iter().filter(move |e| e.tone == tone)
    }
}
