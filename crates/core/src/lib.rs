pub mod autoscroll;
pub mod layout;
pub mod select;
pub mod timeline;

pub use autoscroll::Autoscroll;
pub use select::{RubberBand, SelectionOutcome};
pub use timeline::{DEFAULT_ROW_LIMIT, MAX_LEAF_SEGMENTS, RenderError, RenderOutcome, Timeline};
