//! Display formatting for energy, money and percentages.

use chrono::{DateTime, Utc};

/// Fixed decimals with `,` thousands separators: `1234.5` -> `"1,234.5"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.0 and values that round to zero print unsigned
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// kWh scaled to MWh / GWh at 1e3 / 1e6, one decimal.
pub fn format_energy(kwh: f64) -> String {
    if kwh >= 1_000_000.0 {
        format!("{} GWh", format_number(kwh / 1_000_000.0, 1))
    } else if kwh >= 1_000.0 {
        format!("{} MWh", format_number(kwh / 1_000.0, 1))
    } else {
        format!("{} kWh", format_number(kwh, 1))
    }
}

/// Whole New Taiwan dollars.
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-NT${}", format_number(-amount, 0))
    } else {
        format!("NT${}", format_number(amount, 0))
    }
}

/// Signed percentage: `5.2` -> `"+5.2%"`, `-7.8` -> `"-7.8%"`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}%")
}

/// Coarse "time ago" label relative to `now`.
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} h ago")
    } else if days < 7 {
        format!("{days} d ago")
    } else {
        then.format("%Y/%m/%d").to_string()
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
