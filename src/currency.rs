//! Currency display formatting for view-layer projections.
//!
//! Amounts are stored as integer cents everywhere; only display DTOs carry
//! formatted strings.

/// Format an integer amount of cents as a USD display string.
///
/// `345077` becomes `$3,450.77`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let fraction = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}
