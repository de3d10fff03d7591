use schematics::geometry::{round_coord, Point, COORD_DECIMALS};

/// Format a number the way the document stores coordinates: at most four
/// fractional digits, no trailing zeros, no trailing dot, never `-0`.
pub fn fmt_coord(value: f64) -> String {
    let formatted = format!("{:.*}", COORD_DECIMALS, round_coord(value));
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn fmt_point(point: Point) -> String {
    format!("{} {}", fmt_coord(point.x), fmt_coord(point.y))
}

/// Quote a string value, escaping special characters.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// `(effects ...)` with a square font of `size`.
pub fn effects(size: f64, justify_left: bool, hidden: bool) -> String {
    let size = fmt_coord(size);
    format!(
        "(effects (font (size {} {})){}{})",
        size,
        size,
        if justify_left { " (justify left)" } else { "" },
        if hidden { " hide" } else { "" }
    )
}
