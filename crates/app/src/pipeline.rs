use cardioseg_dataset::{combine_records, save_record, write_combined};
use cardioseg_foundation::{AppError, PipelineConfig};
use cardioseg_record::read_record;
use cardioseg_segment::{SegmentLabeler, SegmenterConfig};

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub total_segments: usize,
}

/// Reads one record, segments and labels it, persists the `.npy` pair.
///
/// Nothing is written when any stage fails; the record's outputs are
/// all-or-nothing.
pub fn process_record(config: &PipelineConfig, id: &str) -> Result<usize, AppError> {
    let record = read_record(&config.data_dir, id)?;

    let labeler = SegmentLabeler::new(SegmenterConfig {
        sampling_rate_hz: config.sampling_rate_hz,
        segment_duration_s: config.segment_duration_s,
    })?;
    let labeled = labeler.segment(
        record.signal.view(),
        &record.annotations.samples(),
        &record.annotations.aux_notes(),
    )?;
    let segment_count = labeled.labels.len();

    save_record(&config.output_dir, id, &labeled.segments, &labeled.labels)?;
    tracing::info!("Processed record {}: {} segments saved", id, segment_count);
    Ok(segment_count)
}

/// Runs every configured record, skipping failures and carrying on.
pub fn run_batch(config: &PipelineConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for id in &config.records {
        match process_record(config, id) {
            Ok(count) => {
                summary.total_segments += count;
                summary.processed.push(id.clone());
            }
            Err(e) => {
                tracing::warn!("Skipping record {}: {}", id, e);
                summary.failed.push((id.clone(), e.to_string()));
            }
        }
    }
    summary
}

/// Concatenates the given records' stored pairs into the combined dataset
/// files. Returns the combined segment count.
pub fn combine_outputs(
    config: &PipelineConfig,
    record_ids: &[String],
) -> Result<usize, AppError> {
    let dataset = combine_records(&config.output_dir, record_ids)?;
    write_combined(
        &dataset,
        &config.combined_segments_path,
        &config.combined_labels_path,
    )?;
    Ok(dataset.labels.len())
}
