//! Caller-supplied structure geometry.
//!
//! A layout fixes where things are drawn; adapters only decide tone and
//! labels on top of it. The exception is the list layout, which gives slot
//! and lane spacing and leaves actual positions to the step's placements.

use algolab_trace::AlgorithmInput;
use serde::{Deserialize, Serialize};

/// Point in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate, growing downward
    pub y: f32,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vertical bars standing on a baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    /// Left end of the baseline
    pub origin: Point,
    /// Bar width
    pub bar_width: f32,
    /// Space between bars
    pub gap: f32,
    /// Height of the tallest bar
    pub max_height: f32,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(20.0, 300.0),
            bar_width: 20.0,
            gap: 10.0,
            max_height: 240.0,
        }
    }
}

/// Row of square cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    /// Top-left of the first cell
    pub origin: Point,
    /// Cell side length
    pub size: f32,
    /// Space between cells
    pub gap: f32,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(20.0, 60.0),
            size: 40.0,
            gap: 4.0,
        }
    }
}

/// Edge drawn between two graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    /// One endpoint
    pub from: usize,
    /// Other endpoint
    pub to: usize,
    /// Weight label, if any
    pub weight: Option<i64>,
}

/// Node coordinates and the edges between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphGeometry {
    /// Center of each node, indexed by node id
    pub nodes: Vec<Point>,
    /// Edges, indexed as in the input edge list
    pub edges: Vec<LayoutEdge>,
    /// Node radius
    pub node_radius: f32,
}

impl GraphGeometry {
    /// Nodes on a grid, row-major, `cols` per row
    #[must_use]
    pub fn grid(count: usize, cols: usize, spacing: f32, origin: Point) -> Self {
        let cols = cols.max(1);
        let nodes = (0..count)
            .map(|i| {
                Point::new(
                    origin.x + (i % cols) as f32 * spacing,
                    origin.y + (i / cols) as f32 * spacing,
                )
            })
            .collect();
        Self {
            nodes,
            edges: Vec::new(),
            node_radius: 16.0,
        }
    }

    /// Nodes evenly spaced on a circle, node 0 at the top
    #[must_use]
    pub fn circle(count: usize, center: Point, radius: f32) -> Self {
        let nodes = (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count.max(1) as f32
                    - std::f32::consts::FRAC_PI_2;
                Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Self {
            nodes,
            edges: Vec::new(),
            node_radius: 16.0,
        }
    }

    /// Attach edges
    #[must_use]
    pub fn with_edges(mut self, edges: Vec<LayoutEdge>) -> Self {
        self.edges = edges;
        self
    }
}

/// Intervals on a time axis, one row each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGeometry {
    /// Top-left of the axis
    pub origin: Point,
    /// Width of one time unit
    pub unit_width: f32,
    /// Row height
    pub row_height: f32,
    /// `(start, finish)` of each interval, indexed as in the input
    pub intervals: Vec<(i64, i64)>,
}

/// Grid of table cells with a header row and column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Top-left of the header corner
    pub origin: Point,
    /// Cell width
    pub cell_width: f32,
    /// Cell height
    pub cell_height: f32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(10.0, 10.0),
            cell_width: 48.0,
            cell_height: 32.0,
        }
    }
}

/// Slot spacing for linked-list nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListGeometry {
    /// Center of slot 0 on the chain lane
    pub origin: Point,
    /// Horizontal distance between slots
    pub slot_width: f32,
    /// Vertical offset of the detached lane
    pub detached_offset: f32,
    /// Node radius
    pub node_radius: f32,
}

impl Default for ListGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(100.0, 120.0),
            slot_width: 150.0,
            detached_offset: 110.0,
            node_radius: 40.0,
        }
    }
}

impl ListGeometry {
    /// Center of a node at `slot`, on the chain lane or below it
    #[must_use]
    pub fn position(&self, slot: usize, detached: bool) -> Point {
        let y = if detached {
            self.origin.y + self.detached_offset
        } else {
            self.origin.y
        };
        Point::new(self.origin.x + slot as f32 * self.slot_width, y)
    }
}

/// Geometry for one structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureLayout {
    /// Bars for sorting
    Bars(BarGeometry),
    /// Cells for searching
    Cells(CellGeometry),
    /// Nodes and edges
    Graph(GraphGeometry),
    /// Interval rows
    Timeline(TimelineGeometry),
    /// DP table
    Table(TableGeometry),
    /// Linked list
    List(ListGeometry),
}

impl StructureLayout {
    /// Layout kind name
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bars(_) => "bars",
            Self::Cells(_) => "cells",
            Self::Graph(_) => "graph",
            Self::Timeline(_) => "timeline",
            Self::Table(_) => "table",
            Self::List(_) => "list",
        }
    }

    /// Default geometry for `input`. Square node counts go on a grid,
    /// anything else on a circle.
    #[must_use]
    pub fn for_input(input: &AlgorithmInput) -> Self {
        match input {
            AlgorithmInput::Sort(_) => Self::Bars(BarGeometry::default()),
            AlgorithmInput::Search(_) => Self::Cells(CellGeometry::default()),
            AlgorithmInput::Traversal(traversal) => {
                let edges = traversal
                    .graph
                    .edges
                    .iter()
                    .map(|&(from, to)| LayoutEdge {
                        from,
                        to,
                        weight: None,
                    })
                    .collect();
                Self::Graph(graph_geometry(traversal.graph.node_count).with_edges(edges))
            }
            AlgorithmInput::SpanningTree(tree) => {
                let edges = tree
                    .edges
                    .iter()
                    .map(|e| LayoutEdge {
                        from: e.from,
                        to: e.to,
                        weight: Some(e.weight),
                    })
                    .collect();
                Self::Graph(graph_geometry(tree.node_count).with_edges(edges))
            }
            AlgorithmInput::Activities(input) => Self::Timeline(TimelineGeometry {
                origin: Point::new(20.0, 20.0),
                unit_width: 24.0,
                row_height: 24.0,
                intervals: input.activities.iter().map(|a| (a.start, a.finish)).collect(),
            }),
            AlgorithmInput::Fibonacci(_)
            | AlgorithmInput::Knapsack(_)
            | AlgorithmInput::Lcs(_) => Self::Table(TableGeometry::default()),
            AlgorithmInput::List(_) => Self::List(ListGeometry::default()),
        }
    }
}

fn graph_geometry(count: usize) -> GraphGeometry {
    let side = (count as f64).sqrt().round() as usize;
    if side > 1 && side * side == count {
        GraphGeometry::grid(count, side, 100.0, Point::new(60.0, 60.0))
    } else {
        GraphGeometry::circle(count, Point::new(200.0, 200.0), 150.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolab_core::Algorithm;
    use algolab_trace::default_input;

    #[test]
    fn test_grid_positions() {
        let grid = GraphGeometry::grid(9, 3, 100.0, Point::new(60.0, 60.0));
        assert_eq!(grid.nodes[0], Point::new(60.0, 60.0));
        assert_eq!(grid.nodes[4], Point::new(160.0, 160.0));
        assert_eq!(grid.nodes[8], Point::new(260.0, 260.0));
    }

    #[test]
    fn test_circle_starts_at_top() {
        let circle = GraphGeometry::circle(4, Point::new(0.0, 0.0), 10.0);
        assert!((circle.nodes[0].x).abs() < 1e-4);
        assert!((circle.nodes[0].y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_default_layouts_by_family() {
        let grid = StructureLayout::for_input(&default_input(Algorithm::BreadthFirst));
        let StructureLayout::Graph(geometry) = grid else {
            panic!("expected graph layout");
        };
        assert_eq!(geometry.nodes.len(), 9);
        assert_eq!(geometry.edges.len(), 12);

        let mst = StructureLayout::for_input(&default_input(Algorithm::Kruskal));
        let StructureLayout::Graph(geometry) = mst else {
            panic!("expected graph layout");
        };
        assert_eq!(geometry.edges[2].weight, Some(1));

        assert_eq!(StructureLayout::for_input(&default_input(Algorithm::Knapsack)).kind(), "table");
        assert_eq!(StructureLayout::for_input(&default_input(Algorithm::ListReverse)).kind(), "list");
    }

    #[test]
    fn test_list_lane_offset() {
        let geometry = ListGeometry::default();
        assert_eq!(geometry.position(2, false), Point::new(400.0, 120.0));
        assert_eq!(geometry.position(2, true), Point::new(400.0, 230.0));
    }
}
