use serde::{Deserialize, Serialize};

use crate::types::Color;

/// The canonical tabular snapshot the host hands to the layout engine.
///
/// ```text
///   Host data table ──▶ TableSnapshot ──▶ Layout engine ──▶ Scene ──▶ Renderer
///                          (this)
/// ```
///
/// A snapshot is immutable for the duration of one layout cycle. The host
/// rebuilds it on every data change; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// All rows, in source order. Row indices in scene records point here.
    pub rows: Vec<Row>,
    /// The hierarchy over the time axis.
    pub axis: TimeAxis,
    /// Upstream error messages. Non-empty means the data is not in a
    /// renderable state.
    pub errors: Vec<String>,
    /// Whether the host is still streaming rows in.
    pub loading: bool,
}

impl TableSnapshot {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One source row projected onto the two axes the chart cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Resolved 0-based position of this row's time value on the flattened
    /// leaf axis. `None` when the value does not map to any leaf.
    pub leaf_index: Option<usize>,
    /// Formatted event text. Empty string means "no event on this row".
    pub description: String,
    /// Fill color assigned by the host.
    pub color: Color,
    /// Current mark (selection) state of the row.
    pub marked: bool,
}

/// A node in the time-axis hierarchy (e.g. Year > Quarter > Month).
///
/// Leaves are the atomic time segments; an internal node spans all leaves
/// beneath it. A synthetic root spans the whole axis and is never rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisNode {
    /// Formatted label for this grouping level value.
    pub label: String,
    pub children: Vec<AxisNode>,
}

impl AxisNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<AxisNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaf segments this node spans. This is the node's weight
    /// in the proportional ruler partition.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(AxisNode::leaf_count).sum()
        }
    }

    /// Levels below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// The hierarchy over the time axis, rooted at a synthetic node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeAxis {
    pub root: AxisNode,
}

impl TimeAxis {
    pub fn new(root: AxisNode) -> Self {
        Self { root }
    }

    /// An axis with no levels at all — the "time axis absent" state.
    pub fn empty() -> Self {
        Self {
            root: AxisNode::branch("", Vec::new()),
        }
    }

    /// Total number of leaf time segments.
    pub fn leaf_count(&self) -> usize {
        if self.root.is_leaf() {
            0
        } else {
            self.root.leaf_count()
        }
    }

    /// Number of grouping levels, excluding the synthetic root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Labels of all leaves in axis order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        fn walk<'a>(node: &'a AxisNode, out: &mut Vec<&'a str>) {
            if node.is_leaf() {
                out.push(&node.label);
            } else {
                for child in &node.children {
                    walk(child, out);
                }
            }
        }
        let mut out = Vec::new();
        if !self.root.is_leaf() {
            for child in &self.root.children {
                walk(child, &mut out);
            }
        }
        out
    }
}

/// How a mark mutation combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkMode {
    /// The marked rows become the entire selection.
    Replace,
    /// The marked rows are toggled into the existing selection.
    ToggleOrAdd,
}

/// The mark-mutation interface the host exposes to the engine.
///
/// Row indices refer to the snapshot's row list.
pub trait MarkSink {
    fn mark_rows(&mut self, rows: &[usize], mode: MarkMode);
    fn clear_marks(&mut self);
}
