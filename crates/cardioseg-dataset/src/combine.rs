use std::path::Path;

use cardioseg_foundation::DatasetError;
use ndarray::{concatenate, Array1, Array3, Axis};
use ndarray_npy::write_npy;

use crate::store;

/// The concatenated training dataset.
#[derive(Debug, Clone)]
pub struct CombinedDataset {
    /// Shape `(total_segments, samples_per_segment, channels)`.
    pub segments: Array3<f32>,
    /// Shape `(total_segments,)`.
    pub labels: Array1<i32>,
}

/// Loads every record's stored pair from `output_dir` and concatenates
/// along the window axis, in the given record order.
///
/// Every record's per-window shape must match the first record's.
pub fn combine_records(
    output_dir: &Path,
    record_ids: &[impl AsRef<str>],
) -> Result<CombinedDataset, DatasetError> {
    if record_ids.is_empty() {
        return Err(DatasetError::EmptyRecordList);
    }

    let mut all_segments = Vec::with_capacity(record_ids.len());
    let mut all_labels = Vec::with_capacity(record_ids.len());
    let mut window_shape: Option<(usize, usize)> = None;

    for id in record_ids {
        let id = id.as_ref();
        let (segments, labels) = store::load_record(output_dir, id)?;

        let shape = (segments.len_of(Axis(1)), segments.len_of(Axis(2)));
        match window_shape {
            None => window_shape = Some(shape),
            Some(expected) if expected != shape => {
                return Err(DatasetError::ShapeMismatch {
                    record: id.to_string(),
                    expected,
                    found: shape,
                });
            }
            Some(_) => {}
        }

        all_segments.push(segments);
        all_labels.push(labels);
    }

    let segment_views: Vec<_> = all_segments.iter().map(|a| a.view()).collect();
    let label_views: Vec<_> = all_labels.iter().map(|a| a.view()).collect();
    let segments = concatenate(Axis(0), &segment_views)?;
    let labels = concatenate(Axis(0), &label_views)?;

    tracing::info!(
        "Combined {} records into {} segments",
        record_ids.len(),
        segments.len_of(Axis(0))
    );
    Ok(CombinedDataset { segments, labels })
}

/// Writes the combined pair to its two output paths.
pub fn write_combined(
    dataset: &CombinedDataset,
    segments_out: &Path,
    labels_out: &Path,
) -> Result<(), DatasetError> {
    write_npy(segments_out, &dataset.segments)?;
    write_npy(labels_out, &dataset.labels)?;
    Ok(())
}
