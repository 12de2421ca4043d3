use std::path::Path;

use cardioseg_foundation::RecordError;
use ndarray::Array2;

use crate::annotations::{self, Annotations};
use crate::header::{self, Header};
use crate::signal;

/// A fully loaded record: physical-unit signal plus its annotations.
#[derive(Debug)]
pub struct Record {
    pub id: String,
    pub fs: u32,
    pub signal: Array2<f64>,
    pub annotations: Annotations,
    pub header: Header,
}

/// Loads the `<id>.hea` / `<id>.dat` / `<id>.atr` triple from `data_dir`.
pub fn read_record(data_dir: &Path, id: &str) -> Result<Record, RecordError> {
    let base = data_dir.join(id);
    let header = header::read_header(&base.with_extension("hea"))?;
    if header.signals.is_empty() {
        return Err(RecordError::MalformedHeader {
            line: 1,
            reason: format!("record {} declares no signals", id),
        });
    }

    // All signals of a 212-format record share one .dat file.
    let dat_path = data_dir.join(&header.signals[0].file_name);
    let signal = signal::read_signal(&dat_path, &header)?;
    let annotations = annotations::read_annotations(&base.with_extension("atr"))?;

    tracing::info!(
        "Loaded record {}: {} samples x {} channels at {} Hz, {} annotations",
        id,
        signal.nrows(),
        signal.ncols(),
        header.fs,
        annotations.len()
    );

    Ok(Record {
        id: id.to_string(),
        fs: header.fs,
        signal,
        annotations,
        header,
    })
}
