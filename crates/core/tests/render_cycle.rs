//! Integration test: run full layout cycles over a realistic project
//! snapshot and verify packing, spacing, ruler partition, and selection
//! invariants end to end.

use fishbone_core::layout::Metrics;
use fishbone_core::{RenderOutcome, Timeline};
use fishbone_protocol::{
    AxisNode, Color, MarkMode, MarkSink, Point, Row, TableSnapshot, TimeAxis, Viewport,
};

fn project_axis() -> TimeAxis {
    let year = |label: &str, start_month: usize| {
        let quarter = |q: usize| {
            AxisNode::branch(
                format!("Q{q}"),
                (0..3)
                    .map(|m| AxisNode::leaf(format!("M{}", start_month + (q - 1) * 3 + m)))
                    .collect(),
            )
        };
        AxisNode::branch(label, (1..=4).map(quarter).collect())
    };
    TimeAxis::new(AxisNode::branch(
        "",
        vec![year("2025", 0), year("2026", 12)],
    ))
}

fn milestone(leaf_index: usize, description: &str) -> Row {
    Row {
        leaf_index: Some(leaf_index),
        description: description.into(),
        color: Color::rgb(0.2, 0.45, 0.8),
        marked: false,
    }
}

fn project_snapshot() -> TableSnapshot {
    TableSnapshot {
        rows: vec![
            milestone(0, "Kickoff"),
            milestone(1, "Requirements signed"),
            milestone(2, "Design review"),
            milestone(2, "Hiring complete"),
            milestone(7, "Alpha"),
            milestone(9, "Beta"),
            milestone(10, "Feature freeze"),
            milestone(14, "Launch"),
            milestone(15, "Retrospective"),
            milestone(23, "v2 planning"),
        ],
        axis: project_axis(),
        errors: Vec::new(),
        loading: false,
    }
}

#[derive(Default)]
struct DemoMarks {
    last: Option<(Vec<usize>, MarkMode)>,
    clears: usize,
}

impl MarkSink for DemoMarks {
    fn mark_rows(&mut self, rows: &[usize], mode: MarkMode) {
        self.last = Some((rows.to_vec(), mode));
    }

    fn clear_marks(&mut self) {
        self.clears += 1;
    }
}

#[test]
fn full_cycle_produces_a_consistent_scene() {
    let viewport = Viewport {
        width: 1200.0,
        height: 700.0,
        font_size: 12.0,
    };
    let snapshot = project_snapshot();
    let mut timeline = Timeline::new();

    let cycle = timeline.begin_cycle();
    let outcome = timeline
        .render(cycle, Some(&snapshot), &viewport)
        .expect("cycle should succeed");
    assert_eq!(outcome, RenderOutcome::Rendered);
    assert_eq!(timeline.completed_cycles(), 1);

    let scene = timeline.scene();
    println!(
        "scene: {} cards, {} connectors, {} ruler segments",
        scene.cards.len(),
        scene.connectors.len(),
        scene.ruler.len()
    );

    // Every milestone row became a card with a matching connector.
    assert_eq!(scene.cards.len(), snapshot.rows.len());
    assert_eq!(scene.connectors.len(), scene.cards.len());
    for (card, conn) in scene.cards.iter().zip(&scene.connectors) {
        assert_eq!(card.row, conn.row);
        let card_center = card.rect.x + card.rect.w / 2.0;
        let conn_center = conn.rect.x + conn.rect.w / 2.0;
        assert!((card_center - conn_center).abs() < 1e-9);
    }

    // 2 years + 8 quarters + 24 months.
    assert_eq!(scene.ruler.len(), 34);
    let metrics = Metrics::from_viewport(&viewport);
    for level in 0..3 {
        let width: f64 = scene
            .ruler
            .iter()
            .filter(|s| s.level == level)
            .map(|s| s.rect.w)
            .sum();
        assert!(
            (width - metrics.segment_width * 24.0).abs() < 1e-9,
            "level {level} does not tile the axis"
        );
    }

    // No two cards overlap; the packer plus the mappers must keep every
    // pair disjoint regardless of lane.
    for a in 0..scene.cards.len() {
        for b in (a + 1)..scene.cards.len() {
            let (ra, rb) = (scene.cards[a].rect, scene.cards[b].rect);
            let disjoint = ra.right() <= rb.x
                || rb.right() <= ra.x
                || ra.bottom() <= rb.y
                || rb.bottom() <= ra.y;
            assert!(
                disjoint,
                "cards for rows {} and {} overlap: {ra:?} vs {rb:?}",
                scene.cards[a].row, scene.cards[b].row
            );
        }
    }

    // Everything stays inside the viewport vertically.
    for card in &scene.cards {
        assert!(card.rect.y >= -1e-6, "card above viewport: {:?}", card.rect);
        assert!(
            card.rect.bottom() <= viewport.height + 1e-6,
            "card below viewport: {:?}",
            card.rect
        );
    }
}

#[test]
fn selection_round_trips_through_the_mark_sink() {
    let viewport = Viewport {
        width: 1200.0,
        height: 700.0,
        font_size: 12.0,
    };
    let snapshot = project_snapshot();
    let mut timeline = Timeline::new();
    let cycle = timeline.begin_cycle();
    timeline
        .render(cycle, Some(&snapshot), &viewport)
        .expect("cycle should succeed");

    // Drag around the "Launch" card only.
    let launch = timeline
        .scene()
        .cards
        .iter()
        .find(|c| c.label == "Launch")
        .expect("launch card")
        .rect;

    let mut marks = DemoMarks::default();
    timeline.pointer_down(Point::new(launch.x - 1.0, launch.y - 1.0));
    let outcome = timeline.pointer_up(
        Point::new(launch.right() + 1.0, launch.bottom() + 1.0),
        true,
        &mut marks,
    );
    assert!(outcome.is_some());
    let (rows, mode) = marks.last.expect("marks applied");
    assert_eq!(mode, MarkMode::ToggleOrAdd);
    assert_eq!(rows.len(), 1);
    assert_eq!(snapshot.rows[rows[0]].description, "Launch");
}

#[test]
fn growing_data_supersedes_the_older_cycle() {
    let viewport = Viewport {
        width: 1200.0,
        height: 700.0,
        font_size: 12.0,
    };
    let old = project_snapshot();
    let mut new = project_snapshot();
    new.rows.push(milestone(20, "Board demo"));

    let mut timeline = Timeline::new();

    // The first cycle starts, then fresh data arrives before it commits.
    let stale_gen = timeline.begin_cycle();
    timeline.invalidate();
    let fresh_gen = timeline.begin_cycle();

    assert_eq!(
        timeline
            .render(fresh_gen, Some(&new), &viewport)
            .expect("fresh cycle"),
        RenderOutcome::Rendered
    );
    assert_eq!(
        timeline
            .render(stale_gen, Some(&old), &viewport)
            .expect("stale cycle"),
        RenderOutcome::Superseded
    );

    // The stale cycle must not have replaced the fresh scene.
    assert_eq!(timeline.scene().cards.len(), new.rows.len());
    assert_eq!(timeline.completed_cycles(), 1);
}

#[test]
fn cramped_viewport_compresses_the_lane_pitch() {
    let viewport = Viewport {
        width: 600.0,
        height: 220.0,
        font_size: 12.0,
    };
    // Pile events onto nearby indices to force many lanes.
    let mut snapshot = project_snapshot();
    for i in 0..8 {
        snapshot.rows.push(milestone(i % 3, "crowded"));
    }

    let mut timeline = Timeline::new();
    let cycle = timeline.begin_cycle();
    timeline
        .render(cycle, Some(&snapshot), &viewport)
        .expect("cycle should succeed");

    let metrics = Metrics::from_viewport(&viewport);
    let ruler_height = metrics.ruler_height(snapshot.axis.depth());

    // Distinct card tops above the ruler, one per lane pair, innermost
    // first.
    let mut tops: Vec<f64> = timeline
        .scene()
        .cards
        .iter()
        .filter(|c| c.rect.y < viewport.height / 2.0)
        .map(|c| c.rect.y)
        .collect();
    tops.sort_by(|a, b| b.partial_cmp(a).expect("finite"));
    tops.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    assert!(tops.len() > 1, "expected a stacked layout");

    let pitch = tops[0] - tops[1];
    assert!(
        pitch < metrics.natural_spacing(),
        "pitch {pitch} was not compressed"
    );
    for pair in tops.windows(2) {
        assert!((pair[0] - pair[1] - pitch).abs() < 1e-6, "uneven pitch");
    }

    // The compressed stack total is exactly the viewport height.
    let pair_rows = tops.len();
    let total = pitch * (2 * pair_rows) as f64 + ruler_height;
    assert!(
        total <= viewport.height + 1e-6,
        "stack total {total} exceeds viewport {}",
        viewport.height
    );
}

#[test]
fn compressed_cards_stay_inside_the_viewport() {
    let viewport = Viewport {
        width: 600.0,
        height: 220.0,
        font_size: 12.0,
    };
    // 18 events on 3 adjacent indices: every event gets its own lane, so
    // 9 pair rows have to share 220 vertical pixels with the ruler.
    let mut snapshot = project_snapshot();
    snapshot.rows.clear();
    for i in 0..18 {
        snapshot.rows.push(milestone(i % 3, "crowded"));
    }

    let mut timeline = Timeline::new();
    let cycle = timeline.begin_cycle();
    timeline
        .render(cycle, Some(&snapshot), &viewport)
        .expect("cycle should succeed");
    assert_eq!(timeline.scene().cards.len(), 18);

    for card in &timeline.scene().cards {
        assert!(
            card.rect.y >= -1e-6,
            "card for row {} pokes above the viewport: {:?}",
            card.row,
            card.rect
        );
        assert!(
            card.rect.bottom() <= viewport.height + 1e-6,
            "card for row {} pokes below the viewport: {:?}",
            card.row,
            card.rect
        );
    }
    for conn in &timeline.scene().connectors {
        assert!(conn.rect.h >= 0.0, "negative connector: {:?}", conn.rect);
    }
}
