/// Label carried by windows before the first annotated window.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Substrings marking a window as ventricular arrhythmia. Matching is by
/// substring, so "VFIB" is already covered by the "VF" entry; the list is
/// kept as-is.
pub const VENTRICULAR_PATTERNS: [&str; 3] = ["VT", "VF", "VFIB"];

/// Normalizes a raw aux-note tag: drops embedded NULs, strips one leading
/// '(', trims whitespace, uppercases.
pub fn normalize(raw: &str) -> String {
    let without_nuls: String = raw.chars().filter(|&c| c != '\0').collect();
    let without_paren = without_nuls.strip_prefix('(').unwrap_or(&without_nuls);
    without_paren.trim().to_uppercase()
}

/// True when a normalized label flags ventricular tachycardia/fibrillation.
pub fn is_ventricular(label: &str) -> bool {
    VENTRICULAR_PATTERNS.iter().any(|p| label.contains(p))
}
