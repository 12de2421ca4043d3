use cardioseg_foundation::SegmentError;
use ndarray::{s, Array1, Array3, ArrayView2, Axis};

use crate::config::SegmenterConfig;
use crate::tag::{self, UNKNOWN_LABEL};

/// Windows of one record plus their binary labels, in window order.
#[derive(Debug, Clone)]
pub struct LabeledSegments {
    /// Shape `(total_segments, samples_per_segment, channels)`.
    pub segments: Array3<f64>,
    /// Shape `(total_segments,)`, values 0 or 1.
    pub labels: Array1<i32>,
}

/// Partitions a signal into fixed non-overlapping windows and labels each
/// window from the annotations falling inside it.
pub struct SegmentLabeler {
    samples_per_segment: usize,
}

impl SegmentLabeler {
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmentError> {
        config.validate()?;
        Ok(Self {
            samples_per_segment: config.samples_per_segment(),
        })
    }

    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    /// Textual per-window labels.
    ///
    /// Each window takes the first non-empty normalized tag among the
    /// annotations inside `[start, end)`, in annotation order. Unannotated
    /// windows inherit the previous window's label; windows before the
    /// first tag get [`UNKNOWN_LABEL`]. The carried label is local to this
    /// call.
    pub fn rhythm_labels(
        &self,
        total_samples: usize,
        samples: &[usize],
        aux_notes: &[impl AsRef<str>],
    ) -> Result<Vec<String>, SegmentError> {
        if samples.len() != aux_notes.len() {
            return Err(SegmentError::AnnotationMismatch {
                samples: samples.len(),
                notes: aux_notes.len(),
            });
        }

        let total_segments = total_samples / self.samples_per_segment;
        let mut labels = Vec::with_capacity(total_segments);
        let mut last_label: Option<String> = None;

        for i in 0..total_segments {
            let start = i * self.samples_per_segment;
            let end = start + self.samples_per_segment;

            let first_tag = samples.iter().zip(aux_notes).find_map(|(&sample, note)| {
                if sample < start || sample >= end {
                    return None;
                }
                let tag = tag::normalize(note.as_ref());
                if tag.is_empty() {
                    None
                } else {
                    Some(tag)
                }
            });

            let label = match first_tag {
                Some(tag) => {
                    last_label = Some(tag.clone());
                    tag
                }
                None => match &last_label {
                    Some(carried) => carried.clone(),
                    None => UNKNOWN_LABEL.to_string(),
                },
            };
            labels.push(label);
        }

        Ok(labels)
    }

    /// Full pass: slices the signal into windows and reduces each window's
    /// textual label to the binary ventricular class.
    pub fn segment(
        &self,
        signal: ArrayView2<'_, f64>,
        samples: &[usize],
        aux_notes: &[impl AsRef<str>],
    ) -> Result<LabeledSegments, SegmentError> {
        let total_samples = signal.nrows();
        let channels = signal.ncols();

        let textual = self.rhythm_labels(total_samples, samples, aux_notes)?;
        let total_segments = textual.len();

        let mut segments =
            Array3::<f64>::zeros((total_segments, self.samples_per_segment, channels));
        for i in 0..total_segments {
            let start = i * self.samples_per_segment;
            segments
                .index_axis_mut(Axis(0), i)
                .assign(&signal.slice(s![start..start + self.samples_per_segment, ..]));
        }

        let labels = Array1::from_vec(
            textual
                .iter()
                .map(|label| tag::is_ventricular(label) as i32)
                .collect(),
        );

        tracing::debug!(
            "Labeled {} windows of {} samples ({} flagged ventricular)",
            total_segments,
            self.samples_per_segment,
            labels.iter().filter(|&&l| l == 1).count()
        );

        Ok(LabeledSegments { segments, labels })
    }
}
