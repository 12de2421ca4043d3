use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Record ids of the MIT-BIH Malignant Ventricular Ectopy Database.
pub const DEFAULT_RECORD_IDS: &[&str] = &[
    "418", "419", "420", "421", "422", "423", "424", "425", "426", "427", "428", "429", "430",
    "602", "605", "607", "609", "610", "611", "612", "614", "615",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the `.hea`/`.dat`/`.atr` file triples.
    pub data_dir: PathBuf,
    /// Directory receiving the per-record `.npy` pairs.
    pub output_dir: PathBuf,
    pub sampling_rate_hz: u32,
    pub segment_duration_s: u32,
    pub records: Vec<String>,
    /// Destination of the combined segment array.
    pub combined_segments_path: PathBuf,
    /// Destination of the combined label array.
    pub combined_labels_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/mit-bih-malignant-ventricular-ectopy-database-1.0.0"),
            output_dir: PathBuf::from("processed_data"),
            sampling_rate_hz: 250,
            segment_duration_s: 8,
            records: DEFAULT_RECORD_IDS.iter().map(|s| s.to_string()).collect(),
            combined_segments_path: PathBuf::from("all_segments.npy"),
            combined_labels_path: PathBuf::from("all_labels.npy"),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = toml::from_str(&text)
            .map_err(|e| AppError::Config(format!("invalid config {}: {}", path.display(), e)))?;
        tracing::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_uses_full_record_list() {
        let config = PipelineConfig::default();
        assert_eq!(config.records.len(), 22);
        assert_eq!(config.sampling_rate_hz, 250);
        assert_eq!(config.segment_duration_s, 8);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardioseg.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "segment_duration_s = 4").unwrap();
        writeln!(f, "records = [\"418\", \"615\"]").unwrap();
        drop(f);

        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.segment_duration_s, 4);
        assert_eq!(config.records, vec!["418", "615"]);
        assert_eq!(config.sampling_rate_hz, 250);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "records = 42").unwrap();

        match PipelineConfig::from_toml_file(&path) {
            Err(AppError::Config(msg)) => assert!(msg.contains("broken.toml")),
            other => panic!("expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = PipelineConfig::from_toml_file(Path::new("/nonexistent/cardioseg.toml"));
        assert!(matches!(err, Err(AppError::Config(_))));
    }
}
