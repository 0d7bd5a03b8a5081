//! Score and play-rating formulas.

pub const MAX_SCORE: u32 = 10_000_000;
/// Score at which the rating modifier crosses zero.
pub const RATING_BREAKPOINT: u32 = 9_800_000;

const UPPER_BAND_WIDTH: f64 = 200_000.0;
const LOWER_BAND_WIDTH: f64 = 300_000.0;
const PERFECT_MODIFIER: f64 = 2.0;

/// Points each pure note is worth on a chart with `notes` notes.
pub fn note_weight(notes: u32) -> f64 {
    f64::from(MAX_SCORE) / f64::from(notes)
}

/// `floor(pure * weight)`. `notes` must be non-zero.
pub fn total_score(pure_count: u32, notes: u32) -> u32 {
    (f64::from(pure_count) * note_weight(notes)).floor() as u32
}

pub fn rating_modifier(score: u32) -> f64 {
    let delta = f64::from(score) - f64::from(RATING_BREAKPOINT);
    if score > RATING_BREAKPOINT && score < MAX_SCORE {
        1.0 + delta / UPPER_BAND_WIDTH
    } else if score == MAX_SCORE {
        PERFECT_MODIFIER
    } else {
        // Also reached above MAX_SCORE and below the breakpoint, where it
        // goes negative without a floor.
        delta / LOWER_BAND_WIDTH
    }
}

pub fn play_rating(score: u32, cc: f64) -> f64 {
    round2((cc + rating_modifier(score)).max(0.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pure_is_max_score() {
        assert_eq!(total_score(1000, 1000), MAX_SCORE);
        assert_eq!(rating_modifier(MAX_SCORE), 2.0);
    }

    #[test]
    fn test_breakpoint_falls_to_lower_branch() {
        assert_eq!(total_score(980, 1000), RATING_BREAKPOINT);
        assert_eq!(rating_modifier(RATING_BREAKPOINT), 0.0);
    }

    #[test]
    fn test_upper_band_is_linear() {
        assert_eq!(total_score(990, 1000), 9_900_000);
        assert_eq!(rating_modifier(9_900_000), 1.5);
    }

    #[test]
    fn test_lower_branch_is_unbounded() {
        assert_eq!(rating_modifier(9_500_000), -1.0);
        assert_eq!(rating_modifier(0), -(9_800_000.0 / 300_000.0));
    }

    #[test]
    fn test_rating_is_clamped_and_rounded() {
        assert_eq!(play_rating(0, 10.0), 0.0);
        assert_eq!(play_rating(MAX_SCORE, 10.7), 12.7);
        assert_eq!(play_rating(9_900_000, 11.3), 12.8);
    }

    #[test]
    fn test_score_floors_fractional_weight() {
        // weight = 10_000_000 / 3
        assert_eq!(total_score(1, 3), 3_333_333);
        assert_eq!(total_score(2, 3), 6_666_666);
    }
}
