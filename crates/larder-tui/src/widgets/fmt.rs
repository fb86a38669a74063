//! Display formatting for money and quantities.

/// Format a cost value with thousands separators and two decimals,
/// e.g. `1234.5` → `"1,234.50"`.
pub fn fmt_money(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Format a quantity without trailing zeros: `10.0` → `"10"`, `1.5` → `"1.5"`.
pub fn fmt_qty(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(fmt_money(0.0), "0.00");
        assert_eq!(fmt_money(12.5), "12.50");
        assert_eq!(fmt_money(1234.5), "1,234.50");
        assert_eq!(fmt_money(1_234_567.891), "1,234,567.89");
        assert_eq!(fmt_money(-999.9), "-999.90");
    }

    #[test]
    fn qty_drops_trailing_zeros() {
        assert_eq!(fmt_qty(10.0), "10");
        assert_eq!(fmt_qty(1.5), "1.5");
        assert_eq!(fmt_qty(0.25), "0.25");
    }
}
