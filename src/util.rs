pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Text for a wpm reading, which is infinite right after the first keystroke
pub fn format_wpm(wpm: f64) -> String {
    if wpm.is_finite() {
        format!("{wpm:.0}")
    } else {
        "--".to_string()
    }
}
