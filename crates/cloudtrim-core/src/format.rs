//! Display formatting shared by every view.

/// Formats an amount as whole US dollars: `8200.0` → `"$8,200"`.
///
/// Rounds half away from zero and groups thousands with commas, matching
/// en-US currency formatting with zero fraction digits.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats an amount with cents: `45.2` → `"$45.20"`.
pub fn format_usd_cents(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let negative = amount < 0.0 && format!("{:.2}", amount.abs()) != "0.00";
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);
    if negative {
        format!("-${grouped}.{cents}")
    } else {
        format!("${grouped}.{cents}")
    }
}

/// Month-over-month trend line, e.g. `"8.5% from last month"`.
pub fn format_trend(trend_percentage: f64) -> String {
    let magnitude = trend_percentage.abs();
    if magnitude.fract() == 0.0 {
        format!("{magnitude:.0}% from last month")
    } else {
        format!("{magnitude:.1}% from last month")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
