pub mod annotations;
pub mod header;
pub mod reader;
pub mod signal;

pub use annotations::{read_annotations, Annotation, Annotations};
pub use header::{parse_header, read_header, Header, SignalSpec};
pub use reader::{read_record, Record};
pub use signal::read_signal;
