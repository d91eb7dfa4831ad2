use crate::layout::Metrics;

/// Lanes alternate above/below the ruler, so vertical space is consumed in
/// pairs: lanes 0 and 1 form the innermost pair row, 2 and 3 the next, etc.
pub fn pair_rows(max_lanes: usize) -> usize {
    max_lanes.div_ceil(2)
}

/// Distance between stacked lanes, compressed to fit the viewport.
///
/// The natural spacing places each card a full card height plus clearance
/// and gap from its neighbor. When the resulting stack (both sides plus the
/// ruler band) would overflow the viewport, the spacing is scaled down so
/// the total exactly fills the available height instead — cards get denser
/// but never render below the visible area.
pub fn lane_spacing(
    max_lanes: usize,
    ruler_height: f64,
    viewport_height: f64,
    metrics: &Metrics,
) -> f64 {
    let natural = metrics.natural_spacing();
    let rows = pair_rows(max_lanes);
    if rows == 0 {
        return natural;
    }

    let required = natural * (2 * rows) as f64 + ruler_height;
    if required <= viewport_height {
        natural
    } else {
        ((viewport_height - ruler_height) / (2 * rows) as f64).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishbone_protocol::Viewport;

    fn metrics() -> Metrics {
        Metrics::from_viewport(&Viewport {
            width: 800.0,
            height: 600.0,
            font_size: 12.0,
        })
    }

    #[test]
    fn roomy_viewport_keeps_natural_spacing() {
        let m = metrics();
        let spacing = lane_spacing(2, 40.0, 2000.0, &m);
        assert!((spacing - m.natural_spacing()).abs() < 1e-9);
    }

    #[test]
    fn compressed_stack_fits_exactly() {
        let m = metrics();
        let ruler = 40.0;
        let viewport = 300.0;
        let lanes = 9; // 5 pair rows, natural total well over 300px
        let spacing = lane_spacing(lanes, ruler, viewport, &m);
        assert!(spacing < m.natural_spacing());
        let total = spacing * (2 * pair_rows(lanes)) as f64 + ruler;
        assert!((total - viewport).abs() < 1e-6);
    }

    #[test]
    fn stack_never_exceeds_viewport() {
        let m = metrics();
        for lanes in 0..40 {
            for &height in &[80.0, 150.0, 400.0, 1200.0] {
                let ruler = 48.0;
                let spacing = lane_spacing(lanes, ruler, height, &m);
                let total = spacing * (2 * pair_rows(lanes)) as f64 + ruler;
                let allowed = height.max(ruler);
                assert!(
                    total <= allowed + 1e-6,
                    "lanes={lanes} height={height} total={total}"
                );
            }
        }
    }

    #[test]
    fn zero_lanes_is_well_defined() {
        let m = metrics();
        let spacing = lane_spacing(0, 40.0, 300.0, &m);
        assert!(spacing.is_finite());
        assert!(spacing >= 0.0);
    }

    #[test]
    fn spacing_never_negative_even_in_tiny_viewports() {
        let m = metrics();
        let spacing = lane_spacing(6, 100.0, 50.0, &m);
        assert!(spacing >= 0.0);
    }

    #[test]
    fn odd_lane_counts_round_up_to_a_full_pair() {
        assert_eq!(pair_rows(0), 0);
        assert_eq!(pair_rows(1), 1);
        assert_eq!(pair_rows(2), 1);
        assert_eq!(pair_rows(3), 2);
        assert_eq!(pair_rows(4), 2);
    }
}
