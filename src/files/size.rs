const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count for the listing: `0 B`, `5.0 B`, `1.5 KB`, `1.0 GB`.
///
/// Values past the last unit stay in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}
