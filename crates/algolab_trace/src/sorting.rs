//! Bubble and selection sort.
//!
//! Both emit exactly one step per comparison of the nested-loop schedule,
//! `n * (n - 1) / 2` steps for `n` elements. A step's snapshot shows the
//! array as the comparison sees it; an exchange made at that step is
//! recorded in [`ArraySnapshot::swap`] and shows up in `settled()`.

use crate::catalog::TraceGenerator;
use crate::input::{AlgorithmInput, InputError};
use algolab_core::{
    Algorithm, ArraySnapshot, Highlight, HighlightRole, Snapshot, StructRef, Trace, TraceBuilder,
};
use tracing::debug;

fn comparing(a: usize, b: usize) -> Vec<Highlight> {
    vec![
        Highlight::new(HighlightRole::Comparing, StructRef::Index(a)),
        Highlight::new(HighlightRole::Comparing, StructRef::Index(b)),
    ]
}

fn mark_sorted(highlights: &mut Vec<Highlight>, range: impl Iterator<Item = usize>) {
    highlights.extend(range.map(|i| Highlight::new(HighlightRole::Sorted, StructRef::Index(i))));
}

/// Trace bubble sort over `values`
#[must_use]
pub fn bubble_sort(values: &[i64]) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::BubbleSort);
    let mut arr = values.to_vec();
    let n = arr.len();

    for pass in 0..n.saturating_sub(1) {
        let last = n - 1 - pass;
        for j in 0..last {
            let mut snapshot = ArraySnapshot::new(arr.clone());
            let mut highlights = comparing(j, j + 1);
            let (left, right) = (arr[j], arr[j + 1]);

            let description = if left > right {
                arr.swap(j, j + 1);
                snapshot = snapshot.with_swap(j, j + 1);
                highlights.push(Highlight::new(HighlightRole::Swapped, StructRef::Index(j)));
                highlights.push(Highlight::new(HighlightRole::Swapped, StructRef::Index(j + 1)));
                format!(
                    "Pass {}: comparing {} at {} and {} at {}; {} > {}, swapping",
                    pass + 1,
                    left,
                    j,
                    right,
                    j + 1,
                    left,
                    right
                )
            } else {
                format!(
                    "Pass {}: comparing {} at {} and {} at {}; already in order",
                    pass + 1,
                    left,
                    j,
                    right,
                    j + 1
                )
            };

            // The largest unsorted value settles at `last` once the pass ends.
            let settled_from = if j + 1 == last {
                if last == 1 { 0 } else { last }
            } else {
                last + 1
            };
            mark_sorted(&mut highlights, settled_from..n);

            builder.push(description, highlights, Snapshot::Array(snapshot));
        }
    }

    debug!(len = n, steps = builder.len(), "bubble sort traced");
    builder.build()
}

/// Trace selection sort over `values`
#[must_use]
pub fn selection_sort(values: &[i64]) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::SelectionSort);
    let mut arr = values.to_vec();
    let n = arr.len();

    for pass in 0..n.saturating_sub(1) {
        let mut min = pass;
        for j in pass + 1..n {
            let mut snapshot = ArraySnapshot::new(arr.clone());
            let mut highlights = comparing(min, j);
            let (current, candidate) = (arr[min], arr[j]);

            let mut description = format!(
                "Pass {}: comparing minimum {} at {} with {} at {}",
                pass + 1,
                current,
                min,
                candidate,
                j
            );
            if candidate < current {
                min = j;
                description.push_str(&format!("; new minimum {}", candidate));
            }
            highlights.push(Highlight::new(HighlightRole::Selected, StructRef::Index(min)));

            let pass_done = j == n - 1;
            if pass_done && min != pass {
                arr.swap(pass, min);
                snapshot = snapshot.with_swap(pass, min);
                highlights.push(Highlight::new(HighlightRole::Swapped, StructRef::Index(pass)));
                highlights.push(Highlight::new(HighlightRole::Swapped, StructRef::Index(min)));
                description.push_str(&format!("; swapping positions {} and {}", pass, min));
            }

            let sorted_to = match (pass_done, pass + 2 == n) {
                (true, true) => n,
                (true, false) => pass + 1,
                (false, _) => pass,
            };
            mark_sorted(&mut highlights, 0..sorted_to);

            builder.push(description, highlights, Snapshot::Array(snapshot));
        }
    }

    debug!(len = n, steps = builder.len(), "selection sort traced");
    builder.build()
}

/// Generator for the sorting family
#[derive(Debug, Clone, Copy)]
pub struct SortingGenerator {
    algorithm: Algorithm,
}

impl SortingGenerator {
    /// Bubble sort generator
    #[must_use]
    pub const fn bubble() -> Self {
        Self {
            algorithm: Algorithm::BubbleSort,
        }
    }

    /// Selection sort generator
    #[must_use]
    pub const fn selection() -> Self {
        Self {
            algorithm: Algorithm::SelectionSort,
        }
    }
}

impl TraceGenerator for SortingGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        let AlgorithmInput::Sort(input) = input else {
            return Err(InputError::WrongShape {
                algorithm: self.algorithm,
                expected: "sort",
            });
        };
        Ok(match self.algorithm {
            Algorithm::SelectionSort => selection_sort(&input.values),
            _ => bubble_sort(&input.values),
        })
    }
}
