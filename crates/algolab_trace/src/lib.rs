//! ALGOLAB Trace Generators
//!
//! Pure, deterministic generators: each one runs an algorithm to completion
//! against validated input and returns an immutable [`Trace`].
//!
//! [`Trace`]: algolab_core::Trace

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod dynamic;
pub mod graph;
pub mod greedy;
pub mod input;
pub mod linked_list;
pub mod params;
pub mod presets;
pub mod searching;
pub mod sorting;

pub use catalog::{
    family_text, generate, AlgorithmInfo, CatalogError, GeneratorRegistry, TraceGenerator,
};
pub use input::{
    Activity, ActivityInput, AlgorithmInput, FibonacciInput, GeneratorLimits, Graph, InputError,
    KnapsackInput, KnapsackItem, LcsInput, ListInput, ListOperation, ListPosition, SearchInput,
    SortInput, SpanningTreeInput, TraversalInput, WeightedEdge,
};
pub use params::{parse_input, RawParams};
pub use presets::{default_input, random_input};
