use crate::types::{round_cents, Money, Percent};

/// `$1,234.56`; negative amounts render as `-$1,234.56`.
pub fn format_currency(value: Money) -> String {
    let rounded = round_cents(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// `12.34%`
pub fn format_percentage(value: Percent) -> String {
    format!("{:.2}%", round_cents(value))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
