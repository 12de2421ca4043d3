use std::path::{Path, PathBuf};

use cardioseg_foundation::DatasetError;
use ndarray::{Array1, Array3, Axis};
use ndarray_npy::{read_npy, write_npy};

pub fn segments_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{id}_segments.npy"))
}

pub fn labels_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{id}_labels.npy"))
}

/// Persists one record's window and label arrays, creating `output_dir`
/// if absent.
pub fn save_record(
    output_dir: &Path,
    id: &str,
    segments: &Array3<f64>,
    labels: &Array1<i32>,
) -> Result<(), DatasetError> {
    std::fs::create_dir_all(output_dir).map_err(|e| DatasetError::Io {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    write_npy(segments_path(output_dir, id), segments)?;
    write_npy(labels_path(output_dir, id), labels)?;

    tracing::info!(
        "Saved record {}: {} segments to {:?}",
        id,
        segments.len_of(Axis(0)),
        output_dir
    );
    Ok(())
}

/// Loads one record's pair back, converting segments to the `f32`
/// training dtype.
pub fn load_record(
    output_dir: &Path,
    id: &str,
) -> Result<(Array3<f32>, Array1<i32>), DatasetError> {
    let seg_path = segments_path(output_dir, id);
    if !seg_path.exists() {
        return Err(DatasetError::MissingRecordFile(seg_path));
    }
    let lab_path = labels_path(output_dir, id);
    if !lab_path.exists() {
        return Err(DatasetError::MissingRecordFile(lab_path));
    }

    let segments: Array3<f64> = read_npy(&seg_path)?;
    let labels: Array1<i32> = read_npy(&lab_path)?;
    Ok((segments.mapv(|v| v as f32), labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let segments = Array3::from_shape_fn((3, 4, 2), |(i, j, k)| (i * 8 + j * 2 + k) as f64);
        let labels = Array1::from_vec(vec![0, 1, 0]);

        save_record(dir.path(), "418", &segments, &labels).unwrap();
        let (loaded_segments, loaded_labels) = load_record(dir.path(), "418").unwrap();

        assert_eq!(loaded_segments, segments.mapv(|v| v as f32));
        assert_eq!(loaded_labels, labels);
    }

    #[test]
    fn save_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("processed").join("run1");
        let segments = Array3::zeros((1, 2, 2));
        let labels = Array1::zeros(1);

        save_record(&nested, "602", &segments, &labels).unwrap();
        assert!(segments_path(&nested, "602").exists());
        assert!(labels_path(&nested, "602").exists());
    }

    #[test]
    fn load_without_files_names_the_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        match load_record(dir.path(), "605") {
            Err(DatasetError::MissingRecordFile(path)) => {
                assert!(path.to_string_lossy().ends_with("605_segments.npy"));
            }
            other => panic!("expected MissingRecordFile, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn zero_segment_record_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let segments = Array3::<f64>::zeros((0, 2000, 2));
        let labels = Array1::<i32>::zeros(0);

        save_record(dir.path(), "607", &segments, &labels).unwrap();
        let (loaded_segments, loaded_labels) = load_record(dir.path(), "607").unwrap();
        assert_eq!(loaded_segments.shape(), &[0, 2000, 2]);
        assert_eq!(loaded_labels.len(), 0);
    }
}
