//! File-based reader tests over synthesized WFDB triples.

use std::path::Path;

use cardioseg_foundation::RecordError;
use cardioseg_record::annotations::{encode_atr, Annotation, CODE_RHYTHM};
use cardioseg_record::signal::encode_212;
use cardioseg_record::read_record;

fn write_triple(dir: &Path, id: &str, frames: usize, events: &[Annotation]) {
    let header = format!(
        "{id} 2 250 {frames}\n{id}.dat 212 200 12 0 0 0 0 ECG1\n{id}.dat 212 200 12 0 0 0 0 ECG2\n"
    );
    std::fs::write(dir.join(format!("{id}.hea")), header).unwrap();

    let samples: Vec<i32> = (0..frames as i32 * 2).map(|i| i % 1000).collect();
    std::fs::write(dir.join(format!("{id}.dat")), encode_212(&samples)).unwrap();
    std::fs::write(dir.join(format!("{id}.atr")), encode_atr(events)).unwrap();
}

fn rhythm(sample: usize, note: &str) -> Annotation {
    Annotation {
        sample,
        code: CODE_RHYTHM,
        aux_note: note.to_string(),
    }
}

#[test]
fn reads_full_record_triple() {
    let dir = tempfile::tempdir().unwrap();
    write_triple(dir.path(), "418", 500, &[rhythm(100, "(VT\0"), rhythm(300, "(N")]);

    let record = read_record(dir.path(), "418").unwrap();
    assert_eq!(record.id, "418");
    assert_eq!(record.fs, 250);
    assert_eq!(record.signal.shape(), &[500, 2]);
    assert_eq!(record.annotations.samples(), vec![100, 300]);
    assert_eq!(record.annotations.aux_notes(), vec!["(VT\0", "(N"]);
    // Digital 1 at gain 200, baseline 0.
    assert!((record.signal[[0, 1]] - 0.005).abs() < 1e-12);
}

#[test]
fn missing_header_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_record(dir.path(), "999").unwrap_err();
    match err {
        RecordError::Io { path, .. } => {
            assert!(path.to_string_lossy().ends_with("999.hea"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn missing_dat_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write_triple(dir.path(), "420", 10, &[]);
    std::fs::remove_file(dir.path().join("420.dat")).unwrap();

    assert!(matches!(
        read_record(dir.path(), "420").unwrap_err(),
        RecordError::Io { .. }
    ));
}

#[test]
fn record_without_annotations_loads_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    write_triple(dir.path(), "421", 20, &[]);

    let record = read_record(dir.path(), "421").unwrap();
    assert!(record.annotations.is_empty());
}
