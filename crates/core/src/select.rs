use fishbone_protocol::{MarkMode, MarkSink, Point, Rect, Scene};

#[derive(Debug, Clone, Copy)]
struct Drag {
    origin: Point,
    current: Point,
}

/// Rubber-band drag state: idle until a pointer-down begins a drag, live
/// while the pointer moves, back to idle on release.
///
/// The live rectangle is always normalized, so dragging up-left works the
/// same as down-right.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubberBand {
    drag: Option<Drag>,
}

impl RubberBand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer-down: capture the start corner.
    pub fn begin(&mut self, at: Point) {
        self.drag = Some(Drag {
            origin: at,
            current: at,
        });
    }

    /// Pointer-move while dragging. Ignored when idle.
    pub fn update(&mut self, to: Point) {
        if let Some(drag) = &mut self.drag {
            drag.current = to;
        }
    }

    /// The live selection rectangle, if a drag is in progress.
    pub fn rect(&self) -> Option<Rect> {
        self.drag
            .map(|d| Rect::from_corners(d.origin, d.current))
    }

    /// Pointer-up: return the final rectangle and reset to idle.
    pub fn release(&mut self, at: Point) -> Option<Rect> {
        self.update(at);
        let rect = self.rect();
        self.drag = None;
        rect
    }
}

/// What a completed drag did to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// At least one card intersected the rectangle; its rows were marked.
    Marked { rows: Vec<usize>, mode: MarkMode },
    /// Nothing was hit; the external selection was cleared.
    Cleared,
}

/// Intersect the released rectangle against the committed scene's cards.
///
/// A held modifier switches from replacing the selection to toggling rows
/// into it, matching the usual spreadsheet convention.
pub fn resolve_selection(scene: &Scene, area: &Rect, additive: bool) -> SelectionOutcome {
    let rows = scene.rows_intersecting(area);
    if rows.is_empty() {
        SelectionOutcome::Cleared
    } else {
        let mode = if additive {
            MarkMode::ToggleOrAdd
        } else {
            MarkMode::Replace
        };
        SelectionOutcome::Marked { rows, mode }
    }
}

/// Push the outcome through the host's mark interface.
pub fn apply_selection(outcome: &SelectionOutcome, sink: &mut dyn MarkSink) {
    match outcome {
        SelectionOutcome::Marked { rows, mode } => sink.mark_rows(rows, *mode),
        SelectionOutcome::Cleared => sink.clear_marks(),
    }
}
