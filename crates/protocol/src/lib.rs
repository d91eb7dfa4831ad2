pub mod scene;
pub mod table;
pub mod types;

pub use scene::{Card, Connector, RulerSegment, Scene};
pub use table::{AxisNode, MarkMode, MarkSink, Row, TableSnapshot, TimeAxis};
pub use types::{Color, Point, Rect, Viewport};
