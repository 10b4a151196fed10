//! Size, throughput, and duration reporting for upload log lines

use std::time::Duration;

/// One capacity unit: 1 MiB
pub const MIB: u64 = 1_048_576;

/// Whole capacity units for the "Uploading x (N MiB)" part of the log line
pub fn whole_mib(bytes: u64) -> u64 {
    bytes / MIB
}

/// Transfer rate in MiB/s, rounded up to the next whole unit.
///
/// A zero-length elapsed duration reports the size itself, as if the
/// transfer took one second.
pub fn rate_mib_per_sec(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return (bytes as f64 / MIB as f64).ceil();
    }
    (bytes as f64 / (secs * MIB as f64)).ceil()
}

const UNITS: [(u64, &str); 5] = [
    (86_400_000, "day"),
    (3_600_000, "hour"),
    (60_000, "minute"),
    (1_000, "second"),
    (1, "millisecond"),
];

/// Render a duration in words, truncated to the two leading magnitude
/// components: "2 minutes 13 seconds", "1 hour 2 minutes", "450 milliseconds".
pub fn format_duration(elapsed: Duration) -> String {
    let mut rest = elapsed.as_millis() as u64;
    let mut parts = Vec::new();

    for (unit_ms, name) in UNITS {
        if parts.len() == 2 {
            break;
        }
        let count = rest / unit_ms;
        // Zero-valued components never print: 3601s is "1 hour 1 second".
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {name}{plural}"));
            rest %= unit_ms;
        }
    }

    if parts.is_empty() {
        return "0 seconds".to_string();
    }
    parts.join(" ")
}
