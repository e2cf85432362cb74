// Value helpers shared across the engine.

// Module for US currency-formatted strings as they appear in the procurement sheet,
// e.g. "$1,234.50".
pub mod currency_format {
    use std::str::FromStr;

    /// Strips `$` and `,` and parses the rest as a float.
    /// Anything that does not parse to a finite number (empty, "N/A", "nan") is `None`.
    pub fn parse_amount(s: &str) -> Option<f64> {
        let normalized: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return None;
        }
        f64::from_str(normalized).ok().filter(|v| v.is_finite())
    }

    /// Renders a number for CSV output. Whole numbers keep one decimal ("30.0").
    pub fn format_number(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{:.1}", value)
        } else {
            format!("{}", value)
        }
    }

    /// Renders "$156,000.00" for console summaries.
    pub fn format_currency(value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        let fixed = format!("{:.2}", value.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}${}.{}", sign, grouped, cents)
    }

}
