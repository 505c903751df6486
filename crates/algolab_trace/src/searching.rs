//! Linear and binary search.
//!
//! One step per comparison. The last comparison carries the terminal outcome, so a
//! miss is reported on the step whose comparison exhausted the range rather
//! than on an extra trailing step. Empty input yields an empty trace.

use crate::catalog::TraceGenerator;
use crate::input::{AlgorithmInput, InputError};
use algolab_core::{
    Algorithm, Highlight, HighlightRole, SearchOutcome, SearchSnapshot, Snapshot, StructRef,
    Trace, TraceBuilder,
};
use tracing::debug;

/// Trace a left-to-right scan for `target`
#[must_use]
pub fn linear_search(values: &[i64], target: i64) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::LinearSearch);
    let n = values.len();

    for (i, &value) in values.iter().enumerate() {
        let mut highlights: Vec<Highlight> = (0..i)
            .map(|k| Highlight::new(HighlightRole::Checked, StructRef::Index(k)))
            .collect();
        highlights.push(Highlight::new(HighlightRole::Examined, StructRef::Index(i)));

        let (outcome, description) = if value == target {
            highlights.push(Highlight::new(HighlightRole::Found, StructRef::Index(i)));
            (
                SearchOutcome::Found(i),
                format!("Checking index {} (value {}): found {}", i, value, target),
            )
        } else if i + 1 == n {
            (
                SearchOutcome::NotFound,
                format!(
                    "Checking index {} (value {}): no match; {} is not in the array",
                    i, value, target
                ),
            )
        } else {
            (
                SearchOutcome::Searching,
                format!("Checking index {} (value {}): no match", i, value),
            )
        };

        builder.push(
            description,
            highlights,
            Snapshot::Search(SearchSnapshot {
                values: values.to_vec(),
                target,
                range: Some((i, n - 1)),
                cursor: i,
                outcome,
            }),
        );

        if outcome != SearchOutcome::Searching {
            break;
        }
    }

    debug!(len = n, steps = builder.len(), "linear search traced");
    builder.build()
}

/// Trace a binary search for `target` over strictly ascending `values`
#[must_use]
pub fn binary_search(values: &[i64], target: i64) -> Trace {
    let mut builder = TraceBuilder::new(Algorithm::BinarySearch);
    let n = values.len();
    if n == 0 {
        return builder.build();
    }

    // `high` goes to -1 when the target is below every value.
    let mut low: isize = 0;
    let mut high: isize = n as isize - 1;

    while low <= high {
        let (lo, hi) = (low as usize, high as usize);
        let mid = lo + (hi - lo) / 2;
        let value = values[mid];

        let mut highlights: Vec<Highlight> = (0..n)
            .map(|k| {
                let role = if (lo..=hi).contains(&k) {
                    HighlightRole::Range
                } else {
                    HighlightRole::Checked
                };
                Highlight::new(role, StructRef::Index(k))
            })
            .collect();
        highlights.push(Highlight::new(HighlightRole::Examined, StructRef::Index(mid)));

        let mut description = format!(
            "low={}, mid={}, high={}: comparing {} with {}",
            lo, mid, hi, value, target
        );

        let outcome = if value == target {
            highlights.push(Highlight::new(HighlightRole::Found, StructRef::Index(mid)));
            description.push_str(&format!("; found at index {}", mid));
            SearchOutcome::Found(mid)
        } else {
            if value < target {
                low = mid as isize + 1;
                description.push_str("; target is larger, discarding the left half");
            } else {
                high = mid as isize - 1;
                description.push_str("; target is smaller, discarding the right half");
            }
            if low > high {
                description.push_str(&format!("; range empty, {} not found", target));
                SearchOutcome::NotFound
            } else {
                SearchOutcome::Searching
            }
        };

        builder.push(
            description,
            highlights,
            Snapshot::Search(SearchSnapshot {
                values: values.to_vec(),
                target,
                range: Some((lo, hi)),
                cursor: mid,
                outcome,
            }),
        );

        if outcome != SearchOutcome::Searching {
            break;
        }
    }

    debug!(len = n, steps = builder.len(), "binary search traced");
    builder.build()
}

/// Generator for the searching family
#[derive(Debug, Clone, Copy)]
pub struct SearchingGenerator {
    algorithm: Algorithm,
}

impl SearchingGenerator {
    /// Linear search generator
    #[must_use]
    pub const fn linear() -> Self {
        Self {
            algorithm: Algorithm::LinearSearch,
        }
    }

    /// Binary search generator
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            algorithm: Algorithm::BinarySearch,
        }
    }
}

impl TraceGenerator for SearchingGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        let AlgorithmInput::Search(input) = input else {
            return Err(InputError::WrongShape {
                algorithm: self.algorithm,
                expected: "search",
            });
        };
        Ok(match self.algorithm {
            Algorithm::BinarySearch => binary_search(&input.values, input.target),
            _ => linear_search(&input.values, input.target),
        })
    }
}

/// Outcome carried by the last step of a search trace
#[must_use]
pub fn final_outcome(trace: &Trace) -> Option<SearchOutcome> {
    match &trace.last()?.snapshot {
        Snapshot::Search(snap) => Some(snap.outcome),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn demo_array() -> Vec<i64> {
        (0..15).map(|i| i * 7 + 1).collect()
    }

    #[test]
    fn test_binary_search_miss_within_four_steps() {
        let trace = binary_search(&demo_array(), 7);
        assert!(trace.len() <= 4);
        assert_eq!(final_outcome(&trace), Some(SearchOutcome::NotFound));
        assert!(trace.last().unwrap().description.contains("not found"));
    }

    #[test]
    fn test_binary_search_hit() {
        let values = demo_array();
        let trace = binary_search(&values, 50);
        // First comparison is the midpoint of 0..=14.
        assert_eq!(trace.len(), 1);
        let step = trace.get(0).unwrap();
        assert!(step.has(HighlightRole::Found, StructRef::Index(7)));
        assert_eq!(final_outcome(&trace), Some(SearchOutcome::Found(7)));
    }

    #[test]
    fn test_binary_search_highlights_bounds() {
        let trace = binary_search(&demo_array(), 100);
        let second = trace.get(1).unwrap();
        let Snapshot::Search(snap) = &second.snapshot else {
            panic!("expected search snapshot");
        };
        assert_eq!(snap.range, Some((8, 14)));
        assert_eq!(snap.cursor, 11);
        assert!(second.has(HighlightRole::Checked, StructRef::Index(0)));
        assert!(second.has(HighlightRole::Range, StructRef::Index(8)));
    }

    #[test]
    fn test_linear_search_marks_checked() {
        let trace = linear_search(&[4, 8, 15, 16], 15);
        assert_eq!(trace.len(), 3);
        let last = trace.last().unwrap();
        assert!(last.has(HighlightRole::Checked, StructRef::Index(0)));
        assert!(last.has(HighlightRole::Checked, StructRef::Index(1)));
        assert!(last.has(HighlightRole::Examined, StructRef::Index(2)));
        assert_eq!(final_outcome(&trace), Some(SearchOutcome::Found(2)));
    }

    #[test]
    fn test_linear_search_miss() {
        let trace = linear_search(&[4, 8], 5);
        assert_eq!(trace.len(), 2);
        assert_eq!(final_outcome(&trace), Some(SearchOutcome::NotFound));
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        assert!(linear_search(&[], 1).is_empty());
        assert!(binary_search(&[], 1).is_empty());
        assert_eq!(final_outcome(&binary_search(&[], 1)), None);
    }

    #[test]
    fn test_binary_search_below_all_values() {
        let trace = binary_search(&[10, 20, 30], 1);
        assert_eq!(final_outcome(&trace), Some(SearchOutcome::NotFound));
    }

    proptest! {
        #[test]
        fn prop_binary_search_matches_reference(
            values in proptest::collection::btree_set(-100i64..100, 1..20),
            target in -110i64..110,
        ) {
            let values: Vec<i64> = values.into_iter().collect();
            let trace = binary_search(&values, target);
            let n = values.len();
            let bound = (usize::BITS - n.leading_zeros()) as usize;
            prop_assert!(trace.len() <= bound);
            match values.iter().position(|&v| v == target) {
                Some(i) => prop_assert_eq!(final_outcome(&trace), Some(SearchOutcome::Found(i))),
                None => prop_assert_eq!(final_outcome(&trace), Some(SearchOutcome::NotFound)),
            }
        }

        #[test]
        fn prop_linear_search_matches_reference(
            values in proptest::collection::vec(-20i64..20, 1..20),
            target in -25i64..25,
        ) {
            let trace = linear_search(&values, target);
            match values.iter().position(|&v| v == target) {
                Some(i) => {
                    prop_assert_eq!(trace.len(), i + 1);
                    prop_assert_eq!(final_outcome(&trace), Some(SearchOutcome::Found(i)));
                }
                None => {
                    prop_assert_eq!(trace.len(), values.len());
                    prop_assert_eq!(final_outcome(&trace), Some(SearchOutcome::NotFound));
                }
            }
        }
    }
}
