//! Tabulated dynamic programming: Fibonacci, 0/1 knapsack and LCS.
//!
//! One step per computed cell. Base cells come first (row 0, then column 0),
//! then the recurrence fills the rest row-major. Every step's snapshot owns
//! a copy of the table as of that cell.

use crate::catalog::TraceGenerator;
use crate::input::{AlgorithmInput, InputError, KnapsackItem};
use algolab_core::{
    Algorithm, Highlight, HighlightRole, Snapshot, StructRef, TableSnapshot, Trace, TraceBuilder,
};
use tracing::debug;

const fn cell(row: usize, col: usize) -> StructRef {
    StructRef::Cell { row, col }
}

/// Records cells into a table and a trace in lockstep
struct TableRecorder {
    builder: TraceBuilder,
    table: TableSnapshot,
}

impl TableRecorder {
    fn new(algorithm: Algorithm, table: TableSnapshot) -> Self {
        Self {
            builder: TraceBuilder::new(algorithm),
            table,
        }
    }

    fn value(&self, row: usize, col: usize) -> i64 {
        self.table.get(row, col).unwrap_or(0)
    }

    fn record(
        &mut self,
        row: usize,
        col: usize,
        value: i64,
        operands: &[(usize, usize)],
        description: String,
    ) {
        self.table.set(row, col, value);
        let mut highlights = vec![Highlight::new(HighlightRole::Computed, cell(row, col))];
        highlights.extend(
            operands
                .iter()
                .map(|&(r, c)| Highlight::new(HighlightRole::Operand, cell(r, c))),
        );
        self.builder
            .push(description, highlights, Snapshot::Table(self.table.clone()));
    }

    fn finish(self) -> Trace {
        self.builder.build()
    }
}

/// Trace the bottom-up Fibonacci table `F(0)..=F(n)`
#[must_use]
pub fn fibonacci(n: u32) -> Trace {
    let cols = n as usize + 1;
    let col_labels = (0..cols).map(|i| format!("F({})", i)).collect();
    let mut rec = TableRecorder::new(
        Algorithm::Fibonacci,
        TableSnapshot::new(1, cols, vec!["F".to_string()], col_labels),
    );

    rec.record(0, 0, 0, &[], "Base case: F(0) = 0".to_string());
    if cols > 1 {
        rec.record(0, 1, 1, &[], "Base case: F(1) = 1".to_string());
    }
    for i in 2..cols {
        let (a, b) = (rec.value(0, i - 1), rec.value(0, i - 2));
        let value = a.saturating_add(b);
        rec.record(
            0,
            i,
            value,
            &[(0, i - 1), (0, i - 2)],
            format!(
                "F({}) = F({}) + F({}) = {} + {} = {}",
                i,
                i - 1,
                i - 2,
                a,
                b,
                value
            ),
        );
    }

    debug!(n, steps = rec.builder.len(), "fibonacci traced");
    rec.finish()
}

/// Trace the 0/1 knapsack table; rows are items, columns capacities
#[must_use]
pub fn knapsack(items: &[KnapsackItem], capacity: usize) -> Trace {
    let rows = items.len() + 1;
    let cols = capacity + 1;
    let row_labels = std::iter::once("none".to_string())
        .chain(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("#{} w{} v{}", i + 1, item.weight, item.value)),
        )
        .collect();
    let col_labels = (0..cols).map(|c| c.to_string()).collect();
    let mut rec = TableRecorder::new(
        Algorithm::Knapsack,
        TableSnapshot::new(rows, cols, row_labels, col_labels),
    );

    for w in 0..cols {
        rec.record(
            0,
            w,
            0,
            &[],
            format!("Base case: no items, capacity {} holds value 0", w),
        );
    }
    for i in 1..rows {
        rec.record(
            i,
            0,
            0,
            &[],
            format!("Base case: capacity 0 holds value 0 with item {}", i),
        );
    }

    for i in 1..rows {
        let item = items[i - 1];
        for w in 1..cols {
            let skip = rec.value(i - 1, w);
            let (value, operands, description) = if item.weight > w {
                (
                    skip,
                    vec![(i - 1, w)],
                    format!(
                        "Item {} (weight {}) does not fit capacity {}: dp[{}][{}] = dp[{}][{}] = {}",
                        i,
                        item.weight,
                        w,
                        i,
                        w,
                        i - 1,
                        w,
                        skip
                    ),
                )
            } else {
                let rest = rec.value(i - 1, w - item.weight);
                let take = rest.saturating_add(item.value);
                let best = skip.max(take);
                (
                    best,
                    vec![(i - 1, w), (i - 1, w - item.weight)],
                    format!(
                        "Item {} at capacity {}: dp[{}][{}] = max(skip {}, take {} + {}) = {}",
                        i, w, i, w, skip, item.value, rest, best
                    ),
                )
            };
            rec.record(i, w, value, &operands, description);
        }
    }

    debug!(items = items.len(), capacity, steps = rec.builder.len(), "knapsack traced");
    rec.finish()
}

/// Trace the longest-common-subsequence table of `left` (rows) and `right` (columns)
#[must_use]
pub fn lcs(left: &str, right: &str) -> Trace {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let labels = |chars: &[char]| {
        std::iter::once(String::new())
            .chain(chars.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
    };
    let mut rec = TableRecorder::new(
        Algorithm::LongestCommonSubsequence,
        TableSnapshot::new(rows, cols, labels(&a), labels(&b)),
    );

    for j in 0..cols {
        rec.record(0, j, 0, &[], format!("Base case: empty prefix of left, dp[0][{}] = 0", j));
    }
    for i in 1..rows {
        rec.record(i, 0, 0, &[], format!("Base case: empty prefix of right, dp[{}][0] = 0", i));
    }

    for i in 1..rows {
        for j in 1..cols {
            let (ca, cb) = (a[i - 1], b[j - 1]);
            if ca == cb {
                let diag = rec.value(i - 1, j - 1);
                rec.record(
                    i,
                    j,
                    diag + 1,
                    &[(i - 1, j - 1)],
                    format!(
                        "'{}' = '{}': dp[{}][{}] = dp[{}][{}] + 1 = {}",
                        ca,
                        cb,
                        i,
                        j,
                        i - 1,
                        j - 1,
                        diag + 1
                    ),
                );
            } else {
                let (up, left_val) = (rec.value(i - 1, j), rec.value(i, j - 1));
                let best = up.max(left_val);
                rec.record(
                    i,
                    j,
                    best,
                    &[(i - 1, j), (i, j - 1)],
                    format!(
                        "'{}' != '{}': dp[{}][{}] = max(dp[{}][{}], dp[{}][{}]) = max({}, {}) = {}",
                        ca,
                        cb,
                        i,
                        j,
                        i - 1,
                        j,
                        i,
                        j - 1,
                        up,
                        left_val,
                        best
                    ),
                );
            }
        }
    }

    debug!(rows, cols, steps = rec.builder.len(), "lcs traced");
    rec.finish()
}

/// Generator for the dynamic-programming family
#[derive(Debug, Clone, Copy)]
pub struct DynamicGenerator {
    algorithm: Algorithm,
}

impl DynamicGenerator {
    /// Generator for one of the DP algorithms
    #[must_use]
    pub const fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

impl TraceGenerator for DynamicGenerator {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn generate(&self, input: &AlgorithmInput) -> Result<Trace, InputError> {
        match (self.algorithm, input) {
            (Algorithm::Fibonacci, AlgorithmInput::Fibonacci(input)) => Ok(fibonacci(input.n)),
            (Algorithm::Knapsack, AlgorithmInput::Knapsack(input)) => {
                Ok(knapsack(&input.items, input.capacity))
            }
            (Algorithm::LongestCommonSubsequence, AlgorithmInput::Lcs(input)) => {
                Ok(lcs(&input.left, &input.right))
            }
            (algorithm, _) => Err(InputError::WrongShape {
                algorithm,
                expected: AlgorithmInput::expected_kind(algorithm),
            }),
        }
    }
}
