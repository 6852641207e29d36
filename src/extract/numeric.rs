//! Locale-tolerant numeric normalization.
//!
//! Monetary values arrive as free text: currency symbols, thousands
//! separators, and either `.` or `,` as the decimal point depending on
//! locale. These helpers reduce such text to plain numbers and never
//! fail — an unparseable value degrades to `None`.

/// Parse a free-text amount into a float.
///
/// Keeps only digits, comma, dot, and minus. A single comma with no dot
/// is treated as the decimal point (`"12,5"` is 12.5); otherwise commas
/// acting as thousands separators are removed (`"1,234.56"` is 1234.56).
pub fn to_float(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if stripped.is_empty() {
        return None;
    }

    let commas = stripped.matches(',').count();
    let dots = stripped.matches('.').count();
    let normalized = if commas == 1 && dots == 0 {
        stripped.replace(',', ".")
    } else {
        strip_thousands(&stripped)
    };

    normalized.parse::<f64>().ok()
}

/// Remove commas that separate thousands groups: a comma preceded by a
/// digit and followed by exactly three digits ending at a boundary.
fn strip_thousands(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &ch) in chars.iter().enumerate() {
        if ch == ',' {
            let after_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let three_digits = chars
                .get(i + 1..i + 4)
                .is_some_and(|w| w.iter().all(|c| c.is_ascii_digit()));
            let at_boundary = match chars.get(i + 4) {
                None => true,
                Some(c) => !c.is_ascii_alphanumeric() && *c != '_',
            };
            if after_digit && three_digits && at_boundary {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Parse a free-text quantity into an integer.
///
/// Keeps only digits and minus. When direct integer parsing fails, the
/// stripped text goes through float parsing and truncates toward zero.
pub fn to_int(raw: &str) -> Option<i64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if stripped.is_empty() {
        return None;
    }
    if let Ok(n) = stripped.parse::<i64>() {
        return Some(n);
    }
    to_float(&stripped).map(|f| f.trunc() as i64)
}

/// Render a 0-100 confidence with one fractional digit and a `%` sign;
/// absent confidences render as the empty string.
pub fn percent(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{:.1}%", c),
        None => String::new(),
    }
}
