/// Fraction a `+` label adds when used as a lower bound (`min_level`).
pub const MIN_LEVEL_PLUS_OFFSET: f64 = 0.7;
/// Fraction a `+` label adds when used as an upper bound (`max_level`).
pub const MAX_LEVEL_PLUS_OFFSET: f64 = 0.5;

/// Maps a level label onto the numeric scale, e.g. `"9+"` -> `9.0 + plus_offset`.
///
/// Returns `None` when the label is not a number with an optional trailing `+`.
pub fn parse_level(label: &str, plus_offset: f64) -> Option<f64> {
    let label = label.trim();
    let (base, plus) = match label.strip_suffix('+') {
        Some(base) => (base.trim_end(), true),
        None => (label, false),
    };

    let value: f64 = base.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if plus { value + plus_offset } else { value })
}
