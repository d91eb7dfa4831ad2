use fishbone_protocol::{MarkSink, Point, Scene, TableSnapshot, Viewport};
use thiserror::Error;

use crate::autoscroll::Autoscroll;
use crate::layout::{CardMapper, Event, Metrics, assign_lanes, build_ruler, lane_spacing};
use crate::select::{RubberBand, SelectionOutcome, apply_selection, resolve_selection};

/// Hard cap on leaf time segments. Above this the chart degrades to empty
/// rather than attempting an unusably dense layout.
pub const MAX_LEAF_SEGMENTS: usize = 2000;

/// Default host-imposed row ceiling.
pub const DEFAULT_ROW_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum RenderError {
    /// User-visible: the host should surface the message and render nothing.
    #[error("cannot render timeline: {count} rows exceeds the limit of {limit}")]
    RowLimit { count: usize, limit: usize },
    /// Any other per-cycle fault. Contained: the host keeps running and the
    /// next data change retries.
    #[error("timeline layout failed: {0}")]
    Internal(String),
}

/// What one render cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A fresh scene was committed. Returned exactly once per successful
    /// cycle — this is the "render complete" signal.
    Rendered,
    /// Data not in a renderable state (mid-fetch, upstream errors,
    /// loading). The previous scene is left untouched.
    Skipped,
    /// Unsupported configuration (axis absent, no leaves, or leaf cap
    /// exceeded). The scene was replaced with an empty one, silently.
    Cleared,
    /// A newer cycle superseded this one before it could commit.
    Superseded,
}

/// The timeline component: owns the committed scene and all interaction
/// state, and runs one synchronous layout cycle per data/viewport change.
///
/// Cycles are rebuilt from scratch — nothing computed in one cycle feeds
/// the next, so a failed cycle cannot corrupt a later one. Supersession is
/// a generation counter: the host calls [`Timeline::begin_cycle`] when it
/// starts fetching a snapshot and [`Timeline::invalidate`] whenever newer
/// data arrives; a render carrying a stale generation returns
/// [`RenderOutcome::Superseded`] without committing.
#[derive(Debug)]
pub struct Timeline {
    generation: u64,
    row_limit: usize,
    scene: Scene,
    timeline_width: f64,
    completed_cycles: u64,
    rubber_band: RubberBand,
    autoscroll: Autoscroll,
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_row_limit(DEFAULT_ROW_LIMIT)
    }

    pub fn with_row_limit(limit: usize) -> Self {
        Self {
            generation: 0,
            row_limit: limit,
            scene: Scene::default(),
            timeline_width: 0.0,
            completed_cycles: 0,
            rubber_band: RubberBand::new(),
            autoscroll: Autoscroll::new(),
        }
    }

    /// The generation token for a cycle that is about to start.
    pub fn begin_cycle(&self) -> u64 {
        self.generation
    }

    /// A newer data snapshot exists; any in-flight cycle is now stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// The most recently committed scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Full horizontal extent of the committed timeline, margins included.
    pub fn timeline_width(&self) -> f64 {
        self.timeline_width
    }

    /// Furthest the viewport can scroll right.
    pub fn max_scroll(&self, viewport_width: f64) -> f64 {
        (self.timeline_width - viewport_width).max(0.0)
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn autoscroll(&self) -> &Autoscroll {
        &self.autoscroll
    }

    pub fn autoscroll_mut(&mut self) -> &mut Autoscroll {
        &mut self.autoscroll
    }

    pub fn rubber_band(&self) -> &RubberBand {
        &self.rubber_band
    }

    /// Run one layout cycle.
    ///
    /// `cycle` is the token from [`Timeline::begin_cycle`]; `snapshot` is
    /// `None` when the host's data was invalidated mid-fetch.
    pub fn render(
        &mut self,
        cycle: u64,
        snapshot: Option<&TableSnapshot>,
        viewport: &Viewport,
    ) -> Result<RenderOutcome, RenderError> {
        if cycle != self.generation {
            return Ok(RenderOutcome::Superseded);
        }

        let Some(snapshot) = snapshot else {
            return Ok(RenderOutcome::Skipped);
        };
        if !snapshot.errors.is_empty() || snapshot.loading {
            return Ok(RenderOutcome::Skipped);
        }

        if viewport.width <= 0.0 || viewport.height <= 0.0 || viewport.font_size <= 0.0 {
            return Err(RenderError::Internal(format!(
                "viewport has no usable area ({}x{}, font {})",
                viewport.width, viewport.height, viewport.font_size
            )));
        }

        if snapshot.row_count() > self.row_limit {
            self.commit(Scene::default(), 0.0);
            return Err(RenderError::RowLimit {
                count: snapshot.row_count(),
                limit: self.row_limit,
            });
        }

        let leaf_count = snapshot.axis.leaf_count();
        if snapshot.axis.depth() == 0 || leaf_count == 0 || leaf_count > MAX_LEAF_SEGMENTS {
            self.commit(Scene::default(), 0.0);
            return Ok(RenderOutcome::Cleared);
        }

        let metrics = Metrics::from_viewport(viewport);
        let mut events = collect_events(snapshot, leaf_count);
        let max_lanes = assign_lanes(&mut events, metrics.segments_per_card());

        let ruler_height = metrics.ruler_height(snapshot.axis.depth());
        let spacing = lane_spacing(max_lanes, ruler_height, viewport.height, &metrics);
        let ruler_top = (viewport.height - ruler_height) / 2.0;
        let ruler_bottom = ruler_top + ruler_height;

        let mapper = CardMapper::new(metrics, spacing, ruler_top, ruler_bottom);
        let scene = Scene {
            cards: events.iter().map(|e| mapper.card(e)).collect(),
            connectors: events.iter().map(|e| mapper.connector(e)).collect(),
            ruler: build_ruler(&snapshot.axis, ruler_top, &metrics),
        };

        self.commit(scene, metrics.timeline_width(leaf_count));
        self.completed_cycles += 1;
        Ok(RenderOutcome::Rendered)
    }

    fn commit(&mut self, scene: Scene, timeline_width: f64) {
        // Replaces the prior output wholesale; observers never see a
        // half-updated scene.
        self.scene = scene;
        self.timeline_width = timeline_width;
    }

    // --- pointer interaction, delegated to the rubber band against the
    // --- committed scene

    pub fn pointer_down(&mut self, at: Point) {
        self.rubber_band.begin(at);
    }

    pub fn pointer_move(&mut self, to: Point) {
        self.rubber_band.update(to);
    }

    /// Finish a drag: hit-test the committed cards, push marks through the
    /// sink, and return what happened. `None` when no drag was active.
    pub fn pointer_up(
        &mut self,
        at: Point,
        additive: bool,
        sink: &mut dyn MarkSink,
    ) -> Option<SelectionOutcome> {
        let rect = self.rubber_band.release(at)?;
        let outcome = resolve_selection(&self.scene, &rect, additive);
        apply_selection(&outcome, sink);
        Some(outcome)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One event per row with a non-empty description and a leaf index that
/// actually exists on the axis, in ascending time order (ties keep row
/// order, via stable sort).
fn collect_events(snapshot: &TableSnapshot, leaf_count: usize) -> Vec<Event> {
    let mut events: Vec<Event> = snapshot
        .rows
        .iter()
        .enumerate()
        .filter_map(|(row, r)| {
            let time_index = r.leaf_index.filter(|&i| i < leaf_count)?;
            if r.description.is_empty() {
                return None;
            }
            Some(Event {
                row,
                time_index,
                label: r.description.clone(),
                color: r.color,
                marked: r.marked,
                lane: 0,
            })
        })
        .collect();
    events.sort_by_key(|e| e.time_index);
    events
}
