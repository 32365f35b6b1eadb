pub mod category;
pub mod color;
pub mod record;
pub mod tracker;

pub use category::TrackerCategory;
pub use color::Rgba;
pub use record::TrackerRecord;
pub use tracker::{Tracker, TrackerKind};
