use fishbone_protocol::{Card, Connector, Rect};

use crate::layout::{Event, Metrics};

const CONNECTOR_WIDTH: f64 = 1.0;

/// Maps (time index, lane) pairs to pixel rectangles for one cycle.
///
/// Even lanes stack upward from the ruler's top edge, odd lanes downward
/// from its bottom edge. Lane pair `n` has its far edge `(n + 1)` spacing
/// steps out from the ruler, so the outermost pair's far edges land exactly
/// on the viewport edges when the spacing resolver compresses. At natural
/// spacing this leaves the innermost pair the fixed clearance plus the
/// inter-card gap off the ruler band.
#[derive(Debug, Clone, Copy)]
pub struct CardMapper {
    metrics: Metrics,
    lane_spacing: f64,
    ruler_top: f64,
    ruler_bottom: f64,
}

impl CardMapper {
    pub fn new(metrics: Metrics, lane_spacing: f64, ruler_top: f64, ruler_bottom: f64) -> Self {
        Self {
            metrics,
            lane_spacing,
            ruler_top,
            ruler_bottom,
        }
    }

    /// Horizontal center of the leaf segment at `time_index`.
    pub fn segment_center(&self, time_index: usize) -> f64 {
        let m = &self.metrics;
        m.margin + time_index as f64 * m.segment_width + m.segment_width / 2.0
    }

    fn card_top(&self, lane: usize) -> f64 {
        let m = &self.metrics;
        let steps = (lane / 2 + 1) as f64;
        if lane % 2 == 0 {
            self.ruler_top - steps * self.lane_spacing
        } else {
            self.ruler_bottom + steps * self.lane_spacing - m.card_height
        }
    }

    pub fn card_rect(&self, event: &Event) -> Rect {
        let m = &self.metrics;
        Rect::new(
            self.segment_center(event.time_index) - m.card_width / 2.0,
            self.card_top(event.lane),
            m.card_width,
            m.card_height,
        )
    }

    /// Vertical leader line from the ruler edge to the card's near edge,
    /// overreaching into the card by the fixed overlap so the join never
    /// shows a gap. Under heavy compression the inner cards overlap the
    /// ruler band; the connector then degenerates to zero height rather
    /// than a negative extent.
    pub fn connector_rect(&self, event: &Event) -> Rect {
        let m = &self.metrics;
        let x = self.segment_center(event.time_index) - CONNECTOR_WIDTH / 2.0;
        let card_top = self.card_top(event.lane);
        if event.lane % 2 == 0 {
            let y = card_top + m.card_height - m.connector_overlap;
            Rect::new(x, y, CONNECTOR_WIDTH, (self.ruler_top - y).max(0.0))
        } else {
            Rect::new(
                x,
                self.ruler_bottom,
                CONNECTOR_WIDTH,
                (card_top + m.connector_overlap - self.ruler_bottom).max(0.0),
            )
        }
    }

    pub fn card(&self, event: &Event) -> Card {
        Card {
            rect: self.card_rect(event),
            fill: event.color,
            text_color: event.color.contrast_text(),
            label: event.label.clone(),
            marked: event.marked,
            row: event.row,
        }
    }

    pub fn connector(&self, event: &Event) -> Connector {
        Connector {
            rect: self.connector_rect(event),
            row: event.row,
        }
    }
}
