use std::path::Path;

use cardioseg_foundation::RecordError;
use ndarray::Array2;

use crate::header::Header;

/// Reads and decodes a `.dat` signal file into physical units.
///
/// Output shape is `(frames, n_sig)`; each digital sample is converted as
/// `(adc - baseline) / gain` using the per-signal specs from the header.
pub fn read_signal(dat_path: &Path, header: &Header) -> Result<Array2<f64>, RecordError> {
    let bytes = std::fs::read(dat_path).map_err(|e| RecordError::Io {
        path: dat_path.to_path_buf(),
        source: e,
    })?;
    decode_signal(&bytes, header)
}

pub fn decode_signal(bytes: &[u8], header: &Header) -> Result<Array2<f64>, RecordError> {
    let format = header.signals.first().map(|s| s.format).unwrap_or(0);
    let digital = match format {
        212 => decode_212(bytes),
        16 => decode_16(bytes),
        other => return Err(RecordError::UnsupportedFormat(other)),
    };

    let n_sig = header.n_sig.max(1);
    let frames_in_file = digital.len() / n_sig;
    let frames = if header.n_samples == 0 {
        frames_in_file
    } else if frames_in_file < header.n_samples {
        return Err(RecordError::TruncatedSignal {
            expected: header.n_samples,
            found: frames_in_file,
        });
    } else {
        header.n_samples
    };

    let mut signal = Array2::<f64>::zeros((frames, n_sig));
    for frame in 0..frames {
        for ch in 0..n_sig {
            let spec = &header.signals[ch];
            let adc = digital[frame * n_sig + ch] as f64;
            signal[[frame, ch]] = (adc - spec.baseline as f64) / spec.gain;
        }
    }

    tracing::debug!(
        "Decoded {} frames x {} signals (format {})",
        frames,
        n_sig,
        format
    );
    Ok(signal)
}

/// Format 212: two 12-bit two's-complement samples packed into 3 bytes.
fn decode_212(bytes: &[u8]) -> Vec<i32> {
    let mut out = Vec::with_capacity(bytes.len() / 3 * 2);
    for chunk in bytes.chunks_exact(3) {
        let s0 = (((chunk[1] & 0x0F) as i32) << 8) | chunk[0] as i32;
        let s1 = (((chunk[1] & 0xF0) as i32) << 4) | chunk[2] as i32;
        out.push(sign_extend_12(s0));
        out.push(sign_extend_12(s1));
    }
    out
}

/// Format 16: 16-bit little-endian signed samples.
fn decode_16(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]) as i32)
        .collect()
}

fn sign_extend_12(v: i32) -> i32 {
    if v > 2047 {
        v - 4096
    } else {
        v
    }
}

/// Packs pairs of 12-bit samples into format 212 bytes (test fixtures).
pub fn encode_212(samples: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() / 2 * 3 + 3);
    for pair in samples.chunks(2) {
        let s0 = (pair[0] & 0xFFF) as u32;
        let s1 = (*pair.get(1).unwrap_or(&0) & 0xFFF) as u32;
        out.push((s0 & 0xFF) as u8);
        out.push((((s1 >> 8) << 4) | (s0 >> 8)) as u8);
        out.push((s1 & 0xFF) as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_header;

    fn two_channel_header(n_samples: usize) -> Header {
        parse_header(&format!(
            "t 2 250 {n_samples}\nt.dat 212 200 12 0 0 0 0 ECG1\nt.dat 212 200 12 0 0 0 0 ECG2\n"
        ))
        .unwrap()
    }

    #[test]
    fn format_212_round_trips_signed_samples() {
        let samples = vec![0, -1, 2047, -2048, 100, -100];
        let bytes = encode_212(&samples);
        assert_eq!(decode_212(&bytes), samples);
    }

    #[test]
    fn format_212_odd_sample_count_pads_with_zero() {
        let bytes = encode_212(&[5, 6, 7]);
        assert_eq!(decode_212(&bytes), vec![5, 6, 7, 0]);
    }

    #[test]
    fn decode_converts_to_physical_units() {
        let header = two_channel_header(2);
        // Frames interleave channels: (400, -200), (0, 200).
        let bytes = encode_212(&[400, -200, 0, 200]);
        let signal = decode_signal(&bytes, &header).unwrap();
        assert_eq!(signal.shape(), &[2, 2]);
        assert_eq!(signal[[0, 0]], 2.0);
        assert_eq!(signal[[0, 1]], -1.0);
        assert_eq!(signal[[1, 0]], 0.0);
        assert_eq!(signal[[1, 1]], 1.0);
    }

    #[test]
    fn baseline_is_subtracted_before_scaling() {
        let header = parse_header("t 1 250 2\nt.dat 16 100(50)/mV 12 50 0 0 0 ECG\n").unwrap();
        let bytes: Vec<u8> = [150i16, 50]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let signal = decode_signal(&bytes, &header).unwrap();
        assert_eq!(signal[[0, 0]], 1.0);
        assert_eq!(signal[[1, 0]], 0.0);
    }

    #[test]
    fn short_file_is_truncated_signal() {
        let header = two_channel_header(10);
        let bytes = encode_212(&[1, 2, 3, 4]);
        let err = decode_signal(&bytes, &header).unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedSignal {
                expected: 10,
                found: 2
            }
        ));
    }

    #[test]
    fn zero_length_header_infers_frames_from_file() {
        let header = two_channel_header(0);
        let bytes = encode_212(&[1, 2, 3, 4, 5, 6]);
        let signal = decode_signal(&bytes, &header).unwrap();
        assert_eq!(signal.nrows(), 3);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let header = parse_header("t 1 250 2\nt.dat 80 200 12 0 0 0 0 ECG\n").unwrap();
        assert!(matches!(
            decode_signal(&[0, 0], &header),
            Err(RecordError::UnsupportedFormat(80))
        ));
    }
}
