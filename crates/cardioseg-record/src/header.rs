use std::path::Path;

use cardioseg_foundation::RecordError;

/// WFDB default ADC gain, used when a signal line declares gain 0.
const DEFAULT_GAIN: f64 = 200.0;

/// Parsed `.hea` file: the record line plus one spec per signal.
#[derive(Debug, Clone)]
pub struct Header {
    pub record_name: String,
    pub n_sig: usize,
    pub fs: u32,
    /// Frames per signal. Zero when the header omits the length, in which
    /// case it is inferred from the `.dat` file size.
    pub n_samples: usize,
    pub signals: Vec<SignalSpec>,
}

#[derive(Debug, Clone)]
pub struct SignalSpec {
    pub file_name: String,
    pub format: u16,
    pub gain: f64,
    pub baseline: i32,
    pub adc_zero: i32,
    pub units: String,
    pub description: String,
}

pub fn read_header(path: &Path) -> Result<Header, RecordError> {
    let text = std::fs::read_to_string(path).map_err(|e| RecordError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_header(&text)
}

pub fn parse_header(text: &str) -> Result<Header, RecordError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (line_no, record_line) = lines.next().ok_or(RecordError::MalformedHeader {
        line: 1,
        reason: "empty header".into(),
    })?;
    let (record_name, n_sig, fs, n_samples) = parse_record_line(line_no, record_line)?;

    let mut signals = Vec::with_capacity(n_sig);
    for _ in 0..n_sig {
        let (line_no, signal_line) = lines.next().ok_or(RecordError::MalformedHeader {
            line: line_no,
            reason: format!("expected {} signal lines", n_sig),
        })?;
        signals.push(parse_signal_line(line_no, signal_line)?);
    }

    Ok(Header {
        record_name,
        n_sig,
        fs,
        n_samples,
        signals,
    })
}

fn parse_record_line(
    line: usize,
    text: &str,
) -> Result<(String, usize, u32, usize), RecordError> {
    let malformed = |reason: String| RecordError::MalformedHeader { line, reason };

    let mut fields = text.split_whitespace();
    let name = fields
        .next()
        .ok_or_else(|| malformed("missing record name".into()))?;
    // The record name field may carry a segment count ("name/n").
    let name = name.split('/').next().unwrap_or(name).to_string();

    let n_sig: usize = fields
        .next()
        .ok_or_else(|| malformed("missing signal count".into()))?
        .parse()
        .map_err(|_| malformed("signal count is not an integer".into()))?;

    // Sampling frequency may carry counter info ("250/..." or "250(...)").
    let fs = match fields.next() {
        Some(tok) => {
            let base = tok
                .split(|c| c == '/' || c == '(')
                .next()
                .unwrap_or(tok);
            base.parse::<f64>()
                .map_err(|_| malformed(format!("invalid sampling frequency {:?}", tok)))?
                as u32
        }
        None => 250,
    };

    let n_samples = match fields.next() {
        Some(tok) => tok
            .parse()
            .map_err(|_| malformed(format!("invalid sample count {:?}", tok)))?,
        None => 0,
    };

    Ok((name, n_sig, fs, n_samples))
}

fn parse_signal_line(line: usize, text: &str) -> Result<SignalSpec, RecordError> {
    let malformed = |reason: String| RecordError::MalformedHeader { line, reason };

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(malformed("signal line needs at least file and format".into()));
    }

    let file_name = fields[0].to_string();

    // Format digits may be followed by a skew/offset suffix ("212x4", "212:8").
    let fmt_digits: String = fields[1].chars().take_while(|c| c.is_ascii_digit()).collect();
    let format: u16 = fmt_digits
        .parse()
        .map_err(|_| malformed(format!("invalid format {:?}", fields[1])))?;

    // Gain field: "200", "200/mV", or "200(baseline)/mV".
    let (mut gain, baseline, units) = match fields.get(2) {
        Some(tok) => parse_gain_field(tok).ok_or_else(|| malformed(format!("invalid gain {:?}", tok)))?,
        None => (DEFAULT_GAIN, None, String::new()),
    };

    let adc_zero: i32 = match fields.get(4) {
        Some(tok) => tok
            .parse()
            .map_err(|_| malformed(format!("invalid ADC zero {:?}", tok)))?,
        None => 0,
    };

    if gain == 0.0 {
        gain = DEFAULT_GAIN;
    }
    let baseline = baseline.unwrap_or(adc_zero);

    let description = if fields.len() > 8 {
        fields[8..].join(" ")
    } else {
        String::new()
    };

    Ok(SignalSpec {
        file_name,
        format,
        gain,
        baseline,
        adc_zero,
        units,
        description,
    })
}

fn parse_gain_field(tok: &str) -> Option<(f64, Option<i32>, String)> {
    let (value_part, units) = match tok.split_once('/') {
        Some((v, u)) => (v, u.to_string()),
        None => (tok, String::new()),
    };
    let (gain_part, baseline) = match value_part.split_once('(') {
        Some((g, rest)) => {
            let baseline = rest.strip_suffix(')')?.parse::<i32>().ok()?;
            (g, Some(baseline))
        }
        None => (value_part, None),
    };
    let gain = gain_part.parse::<f64>().ok()?;
    Some((gain, baseline, units))
}
