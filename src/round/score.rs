const MAX_SCORE_INPUT_LENGTH: usize = 4;

/// Keeps only the digits of `input`, capped at four characters.
pub fn sanitize_score_input(input: &str) -> String {
    input
        .chars()
        .filter(|character| character.is_ascii_digit())
        .take(MAX_SCORE_INPUT_LENGTH)
        .collect()
}

/// Parses raw score input. `None` when nothing numeric is left after sanitizing.
pub fn parse_score_input(input: &str) -> Option<i64> {
    sanitize_score_input(input).parse().ok()
}

/// "Top X%" feedback for a self-reported score against `max_reference_score`.
///
/// Scores at or above the reference land in `top_bracket_percent`.
pub fn percentile_feedback(score: u32, max_reference_score: u32, top_bracket_percent: u32) -> u32 {
    let max_reference_score = max_reference_score.max(1);
    if score >= max_reference_score {
        top_bracket_percent
    } else {
        let percent = 100.0 - f64::from(score) / f64::from(max_reference_score) * 100.0;
        percent.round() as u32
    }
}
