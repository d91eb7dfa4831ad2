use fishbone_protocol::{Rect, RulerSegment, TimeAxis};

use crate::layout::Metrics;

/// Partition the time-axis hierarchy into ruler segments.
///
/// Each node's weight is its leaf descendant count, so sibling widths are
/// proportional to the leaves they span. Positions come from cumulative
/// leaf offsets multiplied by the exact per-leaf width, which makes child
/// widths sum to their parent's width by construction — no floating-point
/// drift accumulates across siblings.
///
/// Levels stack top-to-bottom by depth: the root's children form the top
/// band, their children the next, down to the leaves. The synthetic root
/// itself is never emitted. An axis with zero leaves yields no segments.
pub fn build_ruler(axis: &TimeAxis, ruler_top: f64, metrics: &Metrics) -> Vec<RulerSegment> {
    if axis.leaf_count() == 0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut leaf_offset = 0;
    for child in &axis.root.children {
        walk(
            child,
            0,
            &mut leaf_offset,
            ruler_top,
            metrics,
            &mut segments,
        );
    }
    segments
}

fn walk(
    node: &fishbone_protocol::AxisNode,
    level: usize,
    leaf_offset: &mut usize,
    ruler_top: f64,
    metrics: &Metrics,
    out: &mut Vec<RulerSegment>,
) {
    let leaf_start = *leaf_offset;
    let leaf_count = node.leaf_count();

    out.push(RulerSegment {
        rect: Rect::new(
            metrics.margin + leaf_start as f64 * metrics.segment_width,
            ruler_top + level as f64 * metrics.band_height,
            leaf_count as f64 * metrics.segment_width,
            metrics.band_height,
        ),
        label: node.label.clone(),
        level,
        leaf_start,
        leaf_count,
    });

    if node.is_leaf() {
        *leaf_offset += 1;
    } else {
        for child in &node.children {
            walk(child, level + 1, leaf_offset, ruler_top, metrics, out);
        }
    }
}
