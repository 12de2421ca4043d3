use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed header line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("Signal format {0} not supported")]
    UnsupportedFormat(u16),

    #[error("Signal data truncated: header promises {expected} frames, file holds {found}")]
    TruncatedSignal { expected: usize, found: usize },

    #[error("Malformed annotation stream at byte {offset}: {reason}")]
    MalformedAnnotation { offset: usize, reason: String },
}

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Annotation arrays disagree: {samples} sample indices vs {notes} notes")]
    AnnotationMismatch { samples: usize, notes: usize },

    #[error("Sampling rate must be positive, got {0}")]
    InvalidSamplingRate(u32),

    #[error("Segment duration must be positive, got {0}s")]
    InvalidSegmentDuration(u32),
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing per-record file: {0:?}")]
    MissingRecordFile(PathBuf),

    #[error("Failed to read array: {0}")]
    NpyRead(#[from] ndarray_npy::ReadNpyError),

    #[error("Failed to write array: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    #[error("Segment shape mismatch in record {record}: expected per-window shape {expected:?}, found {found:?}")]
    ShapeMismatch {
        record: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Concatenation failed: {0}")]
    Concatenate(#[from] ndarray::ShapeError),

    #[error("Nothing to combine: record list is empty")]
    EmptyRecordList,
}
