//! French (`fr-FR`) number formatting for the printed report.

/// Thousands separator used by `fr-FR` (narrow no-break space).
pub const THOUSANDS_SEPARATOR: char = '\u{202F}';

/// Decimal separator used by `fr-FR`.
pub const DECIMAL_SEPARATOR: char = ',';

/// Format an integer with `fr-FR` digit grouping: `10000` -> `10 000`.
pub fn format_grouped(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format a real with a fixed number of decimals in `fr-FR` style:
/// `112888.9` with 2 decimals -> `112 888,90`.
pub fn format_decimal_fr(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * THOUSANDS_SEPARATOR.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
