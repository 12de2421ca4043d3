use std::path::Path;

use cardioseg_foundation::RecordError;

// MIT annotation pseudo-codes.
const CODE_SKIP: u8 = 59;
const CODE_NUM: u8 = 60;
const CODE_SUB: u8 = 61;
const CODE_CHN: u8 = 62;
const CODE_AUX: u8 = 63;

/// Rhythm-change annotation code ('+'); its aux note names the new rhythm.
pub const CODE_RHYTHM: u8 = 28;

/// One annotation decoded from an `.atr` stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub sample: usize,
    pub code: u8,
    /// Raw aux-note bytes as stored, NULs and leading '(' included.
    pub aux_note: String,
}

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub events: Vec<Annotation>,
}

impl Annotations {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sample indices, parallel to [`aux_notes`](Self::aux_notes).
    pub fn samples(&self) -> Vec<usize> {
        self.events.iter().map(|a| a.sample).collect()
    }

    /// Raw aux notes, empty string for annotations without one.
    pub fn aux_notes(&self) -> Vec<String> {
        self.events.iter().map(|a| a.aux_note.clone()).collect()
    }
}

pub fn read_annotations(path: &Path) -> Result<Annotations, RecordError> {
    let bytes = std::fs::read(path).map_err(|e| RecordError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_atr(&bytes)
}

/// Decodes an MIT-format annotation stream.
///
/// The stream is a sequence of little-endian 16-bit words. The top 6 bits
/// carry the annotation code, the low 10 bits a sample-interval delta.
/// Pseudo-codes modify the stream: SKIP carries a 4-byte long interval for
/// the next annotation, NUM/SUB/CHN set fields this pipeline ignores, and
/// AUX carries a counted note string (padded to even length) attached to
/// the preceding annotation. A zero word terminates.
pub fn decode_atr(bytes: &[u8]) -> Result<Annotations, RecordError> {
    let mut events: Vec<Annotation> = Vec::new();
    let mut time: i64 = 0;
    let mut pending_skip: i64 = 0;
    let mut pos = 0;

    while pos + 2 <= bytes.len() {
        let word = u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);
        pos += 2;
        let code = (word >> 10) as u8;
        let delta = (word & 0x3FF) as i64;

        match code {
            0 if delta == 0 => break,
            CODE_SKIP if delta == 0 => {
                if pos + 4 > bytes.len() {
                    return Err(RecordError::MalformedAnnotation {
                        offset: pos,
                        reason: "SKIP interval runs past end of stream".into(),
                    });
                }
                let hi = u16::from_le_bytes([bytes[pos], bytes[pos + 1]]) as u32;
                let lo = u16::from_le_bytes([bytes[pos + 2], bytes[pos + 3]]) as u32;
                pos += 4;
                pending_skip += ((hi << 16) | lo) as i32 as i64;
            }
            CODE_NUM | CODE_SUB | CODE_CHN => {}
            CODE_AUX => {
                let n = delta as usize;
                if pos + n > bytes.len() {
                    return Err(RecordError::MalformedAnnotation {
                        offset: pos,
                        reason: format!("aux note of {} bytes runs past end of stream", n),
                    });
                }
                let note = String::from_utf8_lossy(&bytes[pos..pos + n]).into_owned();
                pos += n + (n & 1);
                if let Some(last) = events.last_mut() {
                    last.aux_note = note;
                }
            }
            _ => {
                time += pending_skip + delta;
                pending_skip = 0;
                if time < 0 {
                    return Err(RecordError::MalformedAnnotation {
                        offset: pos,
                        reason: format!("annotation time went negative ({})", time),
                    });
                }
                events.push(Annotation {
                    sample: time as usize,
                    code,
                    aux_note: String::new(),
                });
            }
        }
    }

    tracing::debug!("Decoded {} annotations", events.len());
    Ok(Annotations { events })
}

/// Encodes annotations back into an MIT-format stream (test fixtures).
pub fn encode_atr(events: &[Annotation]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut prev: i64 = 0;
    for event in events {
        let mut delta = event.sample as i64 - prev;
        prev = event.sample as i64;
        if delta > 0x3FF {
            out.extend_from_slice(&(((CODE_SKIP as u16) << 10).to_le_bytes()));
            out.extend_from_slice(&(((delta >> 16) as u16).to_le_bytes()));
            out.extend_from_slice(&((delta as u16).to_le_bytes()));
            delta = 0;
        }
        let word = ((event.code as u16) << 10) | (delta as u16 & 0x3FF);
        out.extend_from_slice(&word.to_le_bytes());
        if !event.aux_note.is_empty() {
            let note = event.aux_note.as_bytes();
            let aux_word = ((CODE_AUX as u16) << 10) | (note.len() as u16 & 0x3FF);
            out.extend_from_slice(&aux_word.to_le_bytes());
            out.extend_from_slice(note);
            if note.len() % 2 == 1 {
                out.push(0);
            }
        }
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}
