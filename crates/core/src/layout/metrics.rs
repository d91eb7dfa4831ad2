use fishbone_protocol::Viewport;

/// All pixel constants for one layout cycle, derived from the host's font
/// size so the chart scales with the application's text settings.
///
/// Fixed at cycle start; every mapper reads from the same instance so card,
/// connector, and ruler geometry stay consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Width of one leaf time segment.
    pub segment_width: f64,
    /// Fixed card width.
    pub card_width: f64,
    /// Fixed card height.
    pub card_height: f64,
    /// Horizontal margin before the first segment.
    pub margin: f64,
    /// Height of one ruler level band.
    pub band_height: f64,
    /// Vertical gap between stacked cards in adjacent lanes.
    pub card_gap: f64,
    /// Fixed clearance between the ruler edge and the nearest card.
    pub clearance: f64,
    /// How far a connector reaches into its card so the join is seamless.
    pub connector_overlap: f64,
}

impl Metrics {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let font = viewport.font_size;
        Self {
            segment_width: font * 1.5,
            card_width: font * 9.0,
            card_height: font * 3.0,
            margin: font,
            band_height: font * 1.6,
            card_gap: font * 0.5,
            clearance: font,
            connector_overlap: 2.0,
        }
    }

    /// Integer number of leaf segments a card physically covers. This is
    /// the minimum horizontal separation (in time indices) between two
    /// events sharing a lane.
    pub fn segments_per_card(&self) -> usize {
        ((self.card_width / self.segment_width).ceil() as usize).max(1)
    }

    /// Natural distance between stacked lanes before any compression.
    pub fn natural_spacing(&self) -> f64 {
        self.card_height + self.clearance + self.card_gap
    }

    /// Total ruler height for the given number of hierarchy levels.
    pub fn ruler_height(&self, levels: usize) -> f64 {
        self.band_height * levels as f64
    }

    /// Full horizontal extent of the timeline, margins included.
    pub fn timeline_width(&self, leaf_count: usize) -> f64 {
        self.margin * 2.0 + self.segment_width * leaf_count as f64
    }
}
