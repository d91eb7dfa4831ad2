use fishbone_protocol::{AxisNode, Color, MarkMode, MarkSink, Row, TableSnapshot, TimeAxis};

/// A small in-memory "host": two years of project milestones over a
/// Year > Quarter > Month axis, with mutable mark state.
pub struct DemoTable {
    milestones: Vec<Milestone>,
    marked: Vec<bool>,
}

struct Milestone {
    month: usize,
    label: &'static str,
    color: Color,
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl DemoTable {
    pub fn new() -> Self {
        let blue = Color::rgb(0.25, 0.5, 0.85);
        let orange = Color::rgb(0.9, 0.55, 0.15);
        let green = Color::rgb(0.2, 0.7, 0.4);
        let milestones = vec![
            Milestone { month: 0, label: "Kickoff", color: blue },
            Milestone { month: 1, label: "Requirements", color: blue },
            Milestone { month: 2, label: "Design review", color: blue },
            Milestone { month: 2, label: "Hiring done", color: green },
            Milestone { month: 5, label: "Prototype", color: orange },
            Milestone { month: 7, label: "Alpha", color: orange },
            Milestone { month: 9, label: "Beta", color: orange },
            Milestone { month: 10, label: "Feature freeze", color: orange },
            Milestone { month: 13, label: "Launch", color: green },
            Milestone { month: 14, label: "Retrospective", color: blue },
            Milestone { month: 18, label: "v1.1", color: green },
            Milestone { month: 22, label: "v2 planning", color: blue },
        ];
        let marked = vec![false; milestones.len()];
        Self { milestones, marked }
    }

    fn axis() -> TimeAxis {
        let years = (0..2)
            .map(|y| {
                let quarters = (0..4)
                    .map(|q| {
                        let months = (0..3)
                            .map(|m| AxisNode::leaf(MONTH_NAMES[q * 3 + m]))
                            .collect();
                        AxisNode::branch(format!("Q{}", q + 1), months)
                    })
                    .collect();
                AxisNode::branch(format!("{}", 2025 + y), quarters)
            })
            .collect();
        TimeAxis::new(AxisNode::branch("", years))
    }

    /// Build the immutable snapshot for one layout cycle.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            rows: self
                .milestones
                .iter()
                .zip(&self.marked)
                .map(|(m, &marked)| Row {
                    leaf_index: Some(m.month),
                    description: m.label.to_string(),
                    color: m.color,
                    marked,
                })
                .collect(),
            axis: Self::axis(),
            errors: Vec::new(),
            loading: false,
        }
    }

    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }
}

impl MarkSink for DemoTable {
    fn mark_rows(&mut self, rows: &[usize], mode: MarkMode) {
        if mode == MarkMode::Replace {
            self.marked.fill(false);
        }
        for &row in rows {
            if let Some(mark) = self.marked.get_mut(row) {
                *mark = match mode {
                    MarkMode::Replace => true,
                    MarkMode::ToggleOrAdd => !*mark,
                };
            }
        }
    }

    fn clear_marks(&mut self) {
        self.marked.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_spans_two_years_of_months() {
        let table = DemoTable::new();
        let snap = table.snapshot();
        assert_eq!(snap.axis.leaf_count(), 24);
        assert_eq!(snap.axis.depth(), 3);
        assert!(snap.rows.iter().all(|r| r.leaf_index.is_some_and(|i| i < 24)));
    }

    #[test]
    fn replace_marks_exactly_the_given_rows() {
        let mut table = DemoTable::new();
        table.mark_rows(&[1, 3], MarkMode::Replace);
        table.mark_rows(&[2], MarkMode::Replace);
        assert_eq!(table.marked_count(), 1);
        assert!(table.marked[2]);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut table = DemoTable::new();
        table.mark_rows(&[0], MarkMode::Replace);
        table.mark_rows(&[1], MarkMode::ToggleOrAdd);
        assert_eq!(table.marked_count(), 2);
        table.mark_rows(&[0], MarkMode::ToggleOrAdd);
        assert_eq!(table.marked_count(), 1);
        table.clear_marks();
        assert_eq!(table.marked_count(), 0);
    }
}
