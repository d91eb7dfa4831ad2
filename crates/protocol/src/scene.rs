use serde::{Deserialize, Serialize};

use crate::types::{Color, Rect};

/// One event card: a filled rectangle with its display text, resolved text
/// color, mark state, and the source row it maps back to for interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub rect: Rect,
    pub fill: Color,
    pub text_color: Color,
    pub label: String,
    pub marked: bool,
    /// Index of the source row in the snapshot.
    pub row: usize,
}

/// The leader line between a card and its point on the time ruler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub rect: Rect,
    /// Source row of the card this connector belongs to.
    pub row: usize,
}

/// One segment of the hierarchical time ruler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulerSegment {
    pub rect: Rect,
    pub label: String,
    /// Hierarchy level, 0 = topmost band.
    pub level: usize,
    /// First leaf segment this node spans.
    pub leaf_start: usize,
    /// Number of leaf segments spanned (the node's partition weight).
    pub leaf_count: usize,
}

/// The complete geometry output of one layout cycle.
///
/// Stateless value records only — binding them to a rendering surface is
/// the renderer's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub cards: Vec<Card>,
    pub connectors: Vec<Connector>,
    pub ruler: Vec<RulerSegment>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.connectors.is_empty() && self.ruler.is_empty()
    }

    /// Rows of all cards whose rectangle intersects `area`, deduplicated,
    /// in card order.
    pub fn rows_intersecting(&self, area: &Rect) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .cards
            .iter()
            .filter(|card| card.rect.intersects(area))
            .map(|card| card.row)
            .collect();
        rows.dedup();
        rows
    }
}
