/// Format a score or total with two decimals
pub fn format_score(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a weight with three decimals
pub fn format_weight(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format a weight as a percentage (e.g. 0.25 -> "25.0%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format a signed difference, always showing the sign
pub fn format_diff(value: f64) -> String {
    // -0.00 reads as a lead for Ex, show ties as +0.00
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("{:+.2}", value)
}
