//! Immutable step sequences.

use crate::algorithm::Algorithm;
use crate::error::{CoreError, CoreResult};
use crate::snapshot::Snapshot;
use crate::step::{Highlight, Step};
use serde::Serialize;

/// Ordered, immutable sequence of steps produced by one generator run.
///
/// `steps[i].index == i` holds for every trace; the only constructors are
/// [`TraceBuilder::build`] and [`Trace::from_steps`], both of which enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl Trace {
    /// Trace with no steps
    #[must_use]
    pub fn empty(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
        }
    }

    /// Rebuild a trace from previously recorded steps
    ///
    /// # Errors
    ///
    /// Returns error if step indices are not `0..len` in order
    pub fn from_steps(algorithm: Algorithm, steps: Vec<Step>) -> CoreResult<Self> {
        if let Some((pos, step)) = steps.iter().enumerate().find(|(i, s)| s.index != *i) {
            return Err(CoreError::Validation {
                field: "steps".to_string(),
                reason: format!("step at position {} carries index {}", pos, step.index),
            });
        }
        Ok(Self { algorithm, steps })
    }

    /// Algorithm that produced this trace
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Last step
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// All steps
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Iterate over steps
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps, assigning contiguous indices
#[derive(Debug)]
pub struct TraceBuilder {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl TraceBuilder {
    /// Create a builder
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
        }
    }

    /// Append a step and return its index
    pub fn push(
        &mut self,
        description: impl Into<String>,
        highlights: Vec<Highlight>,
        snapshot: Snapshot,
    ) -> usize {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            description: description.into(),
            highlights,
            snapshot,
        });
        index
    }

    /// Steps recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Freeze into a trace
    #[must_use]
    pub fn build(self) -> Trace {
        Trace {
            algorithm: self.algorithm,
            steps: self.steps,
        }
    }
}
