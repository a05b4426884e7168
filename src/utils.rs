//! Number formatting for log lines, the hosts file header and `status`.

const THOUSANDS_SEPARATOR: char = ',';

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Compact count for progress lines: `950`, `1.5K`, `2.3M`.
///
/// # Examples
/// ```
/// use hostsmate::utils::format_count;
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1500), "1.5K");
/// assert_eq!(format_count(1_500_000), "1.5M");
/// ```
pub fn format_count(count: usize) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}K", count as f64 / 1e3),
        _ => format!("{:.1}M", count as f64 / 1e6),
    }
}

/// Full count grouped by thousands, as shown in the hosts file header.
///
/// # Examples
/// ```
/// use hostsmate::utils::format_count_with_separator;
/// assert_eq!(format_count_with_separator(1000), "1,000");
/// assert_eq!(format_count_with_separator(1234567), "1,234,567");
/// ```
pub fn format_count_with_separator(n: usize) -> String {
    let digits = n.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        rem => rem,
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    grouped.push_str(&digits[..lead]);
    for chunk in digits.as_bytes()[lead..].chunks(3) {
        grouped.push(THOUSANDS_SEPARATOR);
        // Digits are ASCII
        grouped.extend(chunk.iter().map(|&b| b as char));
    }
    grouped
}

/// Download size in binary units: `512 B`, `1.0 KB`, `2.9 MB`.
///
/// # Examples
/// ```
/// use hostsmate::utils::format_bytes;
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// assert_eq!(format_bytes(1_500_000), "1.4 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, BYTE_UNITS[0])
    } else {
        format!("{:.1} {}", value, BYTE_UNITS[unit])
    }
}
