use rapidfuzz::fuzz;

/// Default similarity cutoff for names, origins and streets
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Case-insensitive fuzzy equality of two transcribed strings.
///
/// Computes the normalized Indel similarity ratio (1.0 for identical
/// strings) with `cutoff` as the library's score gate. The answer is
/// binary: a ratio under the cutoff is gated to "no score" and the strings
/// differ; any positive score that passes the gate counts as a match, no
/// matter by how much it cleared the cutoff.
#[must_use]
pub fn close_enough(text1: &str, text2: &str, cutoff: f64) -> bool {
    let text1 = text1.to_lowercase();
    let text2 = text2.to_lowercase();
    let args = fuzz::Args::default().score_cutoff(cutoff);
    matches!(
        fuzz::ratio_with_args(text1.chars(), text2.chars(), &args),
        Some(score) if score > 0.0
    )
}
