use std::collections::HashMap;

use fishbone_protocol::Color;

/// One renderable event: a row with a non-empty description, resolved to a
/// position on the flattened time axis. Rebuilt from the snapshot every
/// cycle; `lane` is filled in by [`assign_lanes`].
#[derive(Debug, Clone)]
pub struct Event {
    /// Index of the source row in the snapshot.
    pub row: usize,
    /// 0-based position on the flattened leaf axis.
    pub time_index: usize,
    pub label: String,
    pub color: Color,
    pub marked: bool,
    /// Vertical slot, assigned by the packer.
    pub lane: usize,
}

/// Assign each event the smallest lane whose previous occupant is at least
/// `segments_per_card` time indices away, and return the number of lanes
/// used.
///
/// Greedy first-fit in encounter order. Events must already be sorted
/// ascending by `time_index` (ties in row order); the packer then only has
/// to remember, per lane, the index of the last event placed there. The
/// result is deterministic for a fixed input order and guarantees no
/// horizontal overlap, but makes no attempt to minimize the lane count —
/// downstream spacing expects exactly this assignment.
pub fn assign_lanes(events: &mut [Event], segments_per_card: usize) -> usize {
    // lane -> time index of the last event placed in that lane
    let mut last_used: HashMap<usize, usize> = HashMap::new();
    let mut max_lanes = 0;

    for event in events.iter_mut() {
        let mut lane = 0;
        loop {
            match last_used.get(&lane) {
                Some(&last) if event.time_index.saturating_sub(last) < segments_per_card => {
                    lane += 1;
                }
                _ => break,
            }
        }
        last_used.insert(lane, event.time_index);
        event.lane = lane;
        max_lanes = max_lanes.max(lane + 1);
    }

    max_lanes
}
