//! en-US style number formatting for prices, volumes and percentages.

/// Inserts thousands separators into a plain decimal string like `-1234.50`.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `decimals` fixed places, rounding the shortest decimal form of `value`
/// half away from zero: `0.125` -> `0.13`. A negative value that rounds to
/// zero loses its sign.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let shortest = value.abs().to_string();
    let (integer, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();
    if fraction.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let split = text.len() - decimals;
    let body = if decimals == 0 { text } else { format!("{}.{}", &text[..split], &text[split..]) };
    if value < 0.0 && digits.iter().any(|d| *d != 0) { format!("-{body}") } else { body }
}

/// Two fixed decimals with separators: `64321` -> `64,321.00`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    group_thousands(&format_fixed(value, 2))
}

/// Currency style with the sign ahead of the dollar: `-$5.00`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    let body = format_usd(value.abs());
    if value < 0.0 && body != "0.00" { format!("-${body}") } else { format!("${body}") }
}

/// Whole units with separators; missing volume shows as `0`.
pub fn format_volume(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    group_thousands(&format_fixed(value.round(), 0))
}

/// Signed percentage with two decimals: `+10.00%`.
pub fn format_pct(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_fixed(value, 2))
}
