/// Format a float as a currency amount with thousands separators, e.g.
/// `money(1234.5, "$")` is `$1,234.50`.
pub fn money(val: f64, symbol: &str) -> String {
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if val < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{dec_part}")
}
