//! Presentation helpers shared by every front end.

/// Renders a rupee amount the way the price cards do: rupee symbol, Indian
/// digit grouping (`1,20,000`), no fraction digits.
pub fn format_inr(value: f64) -> String {
    let rounded = if value.is_finite() {
        value.round()
    } else {
        0.0
    };
    let digits = format!("{}", rounded.abs() as u128);
    let grouped = group_indian(&digits);
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Groups the last three digits, then every two digits before them.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Normalizes a stored margin percentage for display.
///
/// Upstream sheets deliver either `12.5` (already a percentage) or `0.125`
/// (a fraction). Values greater than 1 are taken as percentages, everything
/// else is multiplied by 100. This is a display heuristic, not a data
/// contract: a genuine 0.5% margin renders as 50%.
pub fn margin_percentage_value(raw: f64) -> f64 {
    if raw > 1.0 { raw } else { raw * 100.0 }
}

/// One-decimal label for a stored margin percentage, without the `%` sign.
pub fn display_margin_percentage(raw: f64) -> String {
    format!("{:.1}", margin_percentage_value(raw))
}
