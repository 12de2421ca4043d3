use serde::{Deserialize, Serialize};

use cardioseg_foundation::SegmentError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    pub sampling_rate_hz: u32,
    pub segment_duration_s: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        // 8 s at 250 Hz, the MIT-BIH malignant ventricular ectopy setup.
        Self {
            sampling_rate_hz: 250,
            segment_duration_s: 8,
        }
    }
}

impl SegmenterConfig {
    pub fn samples_per_segment(&self) -> usize {
        (self.sampling_rate_hz * self.segment_duration_s) as usize
    }

    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.sampling_rate_hz == 0 {
            return Err(SegmentError::InvalidSamplingRate(self.sampling_rate_hz));
        }
        if self.segment_duration_s == 0 {
            return Err(SegmentError::InvalidSegmentDuration(self.segment_duration_s));
        }
        Ok(())
    }
}
