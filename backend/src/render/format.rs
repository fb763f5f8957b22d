//! Number formatting for tooltips and axis ticks.

use crate::models::ValueFormat;

/// Insert thousands separators into a whole number.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Full-precision display used in tooltips.
pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Currency if value < 0.0 => format!("-${}", group_thousands(-value)),
        ValueFormat::Currency => format!("${}", group_thousands(value)),
        ValueFormat::Area => format!("{} sqft", group_thousands(value)),
        ValueFormat::Ratio => format!("{:.1}x", value),
        ValueFormat::Plain => group_thousands(value),
    }
}

/// Compact display used for axis ticks (`$1.2M`, `$350K`, `7.5x`).
pub fn format_tick(value: f64, format: ValueFormat) -> String {
    let compact = |v: f64| -> String {
        let abs = v.abs();
        let (scaled, suffix) = if abs >= 1e9 {
            (v / 1e9, "B")
        } else if abs >= 1e6 {
            (v / 1e6, "M")
        } else if abs >= 1e3 {
            (v / 1e3, "K")
        } else {
            (v, "")
        };
        let text = if (scaled - scaled.round()).abs() < 1e-9 {
            format!("{:.0}", scaled)
        } else if abs < 1.0 && suffix.is_empty() {
            format!("{:.2}", scaled)
        } else {
            format!("{:.1}", scaled)
        };
        format!("{}{}", text, suffix)
    };

    match format {
        ValueFormat::Currency => format!("${}", compact(value)),
        ValueFormat::Area | ValueFormat::Plain => compact(value),
        ValueFormat::Ratio => format!("{}x", compact(value)),
    }
}
