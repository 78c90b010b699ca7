//! Timing label formatting and averaging utilities
//!
//! Provides pure functions turning raw request timings into the
//! rendered label strings embedded in table rows.

use std::time::Duration;

/// Round an elapsed duration to whole milliseconds.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use benchtab::util::format::elapsed_millis;
///
/// assert_eq!(elapsed_millis(Duration::from_millis(12)), 12);
/// assert_eq!(elapsed_millis(Duration::from_micros(1499)), 1);
/// assert_eq!(elapsed_millis(Duration::from_micros(1500)), 2);
/// ```
pub fn elapsed_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

/// Format the label for a single timed request.
///
/// # Examples
/// ```
/// use benchtab::util::format::request_time_label;
///
/// assert_eq!(request_time_label(42), "42 ms");
/// ```
pub fn request_time_label(elapsed_ms: u64) -> String {
    format!("{} ms", elapsed_ms)
}

/// Average the collected request timings into the rendered label.
///
/// The mean is arithmetic with no weighting or outlier rejection and is
/// formatted to exactly two decimal places. An empty sample set renders
/// as `"Average: N/A"` so that a zero-request run never leaks a
/// not-a-number value into the output.
///
/// # Examples
/// ```
/// use benchtab::util::format::average_label;
///
/// assert_eq!(average_label(&[10, 20, 30]), "Average: 20.00 ms");
/// assert_eq!(average_label(&[]), "Average: N/A");
/// ```
pub fn average_label(samples: &[u64]) -> String {
    if samples.is_empty() {
        return "Average: N/A".to_string();
    }

    let sum: u64 = samples.iter().sum();
    let mean = sum as f64 / samples.len() as f64;

    format!("Average: {:.2} ms", mean)
}
