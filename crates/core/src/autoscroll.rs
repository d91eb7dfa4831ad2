use std::time::Duration;

/// Delay between autoscroll steps. The host re-schedules a step after each
/// tick while the controller reports itself enabled.
pub const TICK: Duration = Duration::from_millis(30);

/// Timed horizontal scroll toggle.
///
/// While enabled, each tick advances the scroll position by one pixel until
/// the end of the timeline is reached. Reaching the end does not disable
/// the controller — it simply stops advancing until toggled off (and on
/// again after the user scrolls back).
#[derive(Debug, Clone, Copy, Default)]
pub struct Autoscroll {
    enabled: bool,
}

impl Autoscroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the flag. Bound to modifier+double-click in hosts.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// One tick: the new scroll position.
    pub fn step(&self, scroll_x: f64, max_scroll: f64) -> f64 {
        if self.enabled && scroll_x < max_scroll {
            (scroll_x + 1.0).min(max_scroll)
        } else {
            scroll_x
        }
    }
}
