//! USD price formatting for the table's Price column.
//!
//! en-US conventions: comma thousands separator, dot decimal point, at least
//! two and at most three fraction digits.

const MIN_FRACTION_DIGITS: usize = 2;
const MAX_FRACTION_DIGITS: usize = 3;

/// `65432.1` -> `$65,432.10`
pub fn format_usd(price: f64) -> String {
    format!("${}", format_grouped(price))
}

/// Group the integer part by thousands and clamp the fraction to 2..=3 digits.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = round_to_thousandths(value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < MIN_FRACTION_DIGITS {
        fraction.push('0');
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    format!("{}{}.{}", sign, group_thousands(int_part), fraction)
}

/// Fixed three-decimal rendering of a non-negative value, ties rounded up.
///
/// `{:.3}` rounds exact ties to even. A binary value sits exactly halfway
/// between two thousandths only when it is an odd multiple of 1/16, and then
/// `value * 1000.0` is exact, so `f64::round` can settle the tie.
fn round_to_thousandths(value: f64) -> String {
    let sixteenths = value * 16.0;
    let is_tie = sixteenths.fract() == 0.0 && sixteenths % 2.0 == 1.0;

    if is_tie {
        let thousandths = (value * 1000.0).round() as u64;
        format!("{}.{:03}", thousandths / 1000, thousandths % 1000)
    } else {
        format!("{:.*}", MAX_FRACTION_DIGITS, value)
    }
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
