//! Raw string parameters from a form or command line into typed input.
//!
//! Keys that are absent keep the algorithm's demo value; keys that are
//! present must parse. Lists accept commas, whitespace or both as
//! separators, so `"5, 3 1"` reads as three values.
//!
//! | key | used by | format |
//! |---|---|---|
//! | `values` | sorting, searching, lists | `5,3,1` |
//! | `target` | searching | integer |
//! | `nodes`, `start` | graphs | integer |
//! | `edges` | traversal / kruskal | `0-1 0-3` / `0-1:4 1-2:2` |
//! | `activities` | activity selection | `1-4, 3-5` |
//! | `n` | fibonacci | integer |
//! | `items`, `capacity` | knapsack | `60/10 100/20`, integer |
//! | `left`, `right` | lcs | text |
//! | `value`, `position` | lists | integer; `head`, `tail` or index |

use crate::input::{
    Activity, AlgorithmInput, InputError, KnapsackItem, ListOperation, ListPosition,
    WeightedEdge,
};
use crate::presets::default_input;
use algolab_core::Algorithm;
use indexmap::IndexMap;
use std::str::FromStr;

/// Raw key/value parameters, in the order they were supplied
pub type RawParams = IndexMap<String, String>;

fn field<'a>(params: &'a RawParams, key: &str) -> Result<Option<&'a str>, InputError> {
    match params.get(key).map(|v| v.trim()) {
        None => Ok(None),
        Some("") => Err(InputError::missing(key)),
        Some(text) => Ok(Some(text)),
    }
}

fn number<T: FromStr>(key: &str, text: &str) -> Result<T, InputError> {
    text.trim().parse().map_err(|_| InputError::NotNumeric {
        field: key.to_string(),
        value: text.trim().to_string(),
    })
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn pair<T: FromStr>(key: &str, token: &str, sep: char) -> Result<(T, T), InputError> {
    let (a, b) = token.split_once(sep).ok_or_else(|| {
        InputError::invalid(key, format!("expected 'a{}b', got '{}'", sep, token))
    })?;
    Ok((number(key, a)?, number(key, b)?))
}

fn values(key: &str, text: &str) -> Result<Vec<i64>, InputError> {
    tokens(text).map(|t| number(key, t)).collect()
}

fn edges(text: &str) -> Result<Vec<(usize, usize)>, InputError> {
    tokens(text).map(|t| pair("edges", t, '-')).collect()
}

fn weighted_edges(text: &str) -> Result<Vec<WeightedEdge>, InputError> {
    tokens(text)
        .map(|t| {
            let (ends, weight) = t.split_once(':').ok_or_else(|| {
                InputError::invalid("edges", format!("expected 'a-b:weight', got '{}'", t))
            })?;
            let (from, to) = pair("edges", ends, '-')?;
            Ok(WeightedEdge::new(from, to, number("edges", weight)?))
        })
        .collect()
}

fn position(text: &str) -> Result<ListPosition, InputError> {
    match text.to_ascii_lowercase().as_str() {
        "head" | "start" | "beginning" => Ok(ListPosition::Head),
        "tail" | "end" => Ok(ListPosition::Tail),
        other => Ok(ListPosition::At(number("position", other)?)),
    }
}

/// Build typed input for `algorithm` from raw parameters.
///
/// Validation against limits happens later, in the registry.
///
/// # Errors
///
/// Returns error if a present field is empty or does not parse
pub fn parse_input(algorithm: Algorithm, params: &RawParams) -> Result<AlgorithmInput, InputError> {
    let mut input = default_input(algorithm);

    match &mut input {
        AlgorithmInput::Sort(sort) => {
            if let Some(text) = field(params, "values")? {
                sort.values = values("values", text)?;
            }
        }
        AlgorithmInput::Search(search) => {
            if let Some(text) = field(params, "values")? {
                search.values = values("values", text)?;
            }
            if let Some(text) = field(params, "target")? {
                search.target = number("target", text)?;
            }
        }
        AlgorithmInput::Traversal(traversal) => {
            if let Some(text) = field(params, "nodes")? {
                traversal.graph.node_count = number("nodes", text)?;
            }
            if let Some(text) = field(params, "edges")? {
                traversal.graph.edges = edges(text)?;
            }
            if let Some(text) = field(params, "start")? {
                traversal.start = number("start", text)?;
            }
        }
        AlgorithmInput::SpanningTree(tree) => {
            if let Some(text) = field(params, "nodes")? {
                tree.node_count = number("nodes", text)?;
            }
            if let Some(text) = field(params, "edges")? {
                tree.edges = weighted_edges(text)?;
            }
        }
        AlgorithmInput::Activities(input) => {
            if let Some(text) = field(params, "activities")? {
                input.activities = tokens(text)
                    .map(|t| pair("activities", t, '-').map(|(s, f)| Activity::new(s, f)))
                    .collect::<Result<_, _>>()?;
            }
        }
        AlgorithmInput::Fibonacci(fib) => {
            if let Some(text) = field(params, "n")? {
                fib.n = number("n", text)?;
            }
        }
        AlgorithmInput::Knapsack(knapsack) => {
            if let Some(text) = field(params, "items")? {
                knapsack.items = tokens(text)
                    .map(|t| pair::<i64>("items", t, '/'))
                    .map(|r| {
                        r.and_then(|(value, weight)| {
                            usize::try_from(weight)
                                .map(|w| KnapsackItem::new(value, w))
                                .map_err(|_| InputError::invalid("items", "weights must be non-negative"))
                        })
                    })
                    .collect::<Result<_, _>>()?;
            }
            if let Some(text) = field(params, "capacity")? {
                knapsack.capacity = number("capacity", text)?;
            }
        }
        AlgorithmInput::Lcs(lcs) => {
            if let Some(text) = field(params, "left")? {
                lcs.left = text.to_string();
            }
            if let Some(text) = field(params, "right")? {
                lcs.right = text.to_string();
            }
        }
        AlgorithmInput::List(list) => {
            if let Some(text) = field(params, "values")? {
                list.values = values("values", text)?;
            }
            let value = field(params, "value")?
                .map(|t| number::<i64>("value", t))
                .transpose()?;
            let at = field(params, "position")?.map(position).transpose()?;
            list.operation = match list.operation {
                ListOperation::Insert {
                    value: default_value,
                    at: default_at,
                } => ListOperation::Insert {
                    value: value.unwrap_or(default_value),
                    at: at.unwrap_or(default_at),
                },
                ListOperation::Delete { at: default_at } => ListOperation::Delete {
                    at: at.unwrap_or(default_at),
                },
                ListOperation::Search {
                    value: default_value,
                } => ListOperation::Search {
                    value: value.unwrap_or(default_value),
                },
                ListOperation::Reverse => ListOperation::Reverse,
            };
        }
    }

    Ok(input)
}
