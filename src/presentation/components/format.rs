//! Display formatting for sensor values.
//!
//! Missing or non-finite values render as `--`.

const MISSING: &str = "--";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Formats a number with a fixed number of decimals.
#[must_use]
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    finite(value).map_or_else(|| MISSING.to_string(), |v| format!("{v:.decimals$}"))
}

/// Formats watts, switching to kilowatts from 1000 W.
#[must_use]
pub fn format_power(watts: Option<f64>, decimals: usize) -> String {
    match finite(watts) {
        None => MISSING.to_string(),
        Some(w) if w.abs() >= 1000.0 => format!("{:.1}kW", w / 1000.0),
        Some(w) => format!("{w:.decimals$}W"),
    }
}

/// Formats energy in kWh.
#[must_use]
pub fn format_energy(kwh: Option<f64>, decimals: usize) -> String {
    finite(kwh).map_or_else(|| MISSING.to_string(), |v| format!("{v:.decimals$}kWh"))
}

/// Formats a temperature rounded to whole degrees.
#[must_use]
pub fn format_temperature(value: Option<f64>, unit: &str) -> String {
    finite(value).map_or_else(|| MISSING.to_string(), |v| format!("{}{unit}", v.round()))
}

/// Formats a percentage.
#[must_use]
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    finite(value).map_or_else(|| MISSING.to_string(), |v| format!("{v:.decimals$}%"))
}

/// Formats a duration in seconds as `1d 2h`, `3h 4m` or `5m`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return MISSING.to_string();
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Converts `snake_case` to `Title Case`.
#[must_use]
pub fn snake_to_title(text: &str) -> String {
    text.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Truncates to `max_len` characters, ending with `...` when shortened.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}
