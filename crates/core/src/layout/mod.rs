pub mod cards;
pub mod metrics;
pub mod pack;
pub mod ruler;
pub mod spacing;

pub use cards::CardMapper;
pub use metrics::Metrics;
pub use pack::{Event, assign_lanes};
pub use ruler::build_ruler;
pub use spacing::lane_spacing;
