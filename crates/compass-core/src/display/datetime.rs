//! Timestamp formatting in the system timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a borrowed `Timestamp` as `YYYY-MM-DD HH:MM TZ` in the system
/// timezone, e.g. `2025-03-14 09:30 CET`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M %Z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_shape() {
        let ts: Timestamp = "2025-03-14T09:30:00Z".parse().unwrap();
        let rendered = LocalDateTime(&ts).to_string();

        // Date and time components are zero-padded regardless of timezone.
        let (date, rest) = rendered.split_at(10);
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&rest[3..4], ":");
    }
}
