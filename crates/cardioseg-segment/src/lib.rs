pub mod config;
pub mod labeler;
pub mod tag;

pub use config::SegmenterConfig;
pub use labeler::{LabeledSegments, SegmentLabeler};
pub use tag::{is_ventricular, normalize, UNKNOWN_LABEL, VENTRICULAR_PATTERNS};
