//! Format - Timestamp formatting for exports and logs

use chrono::{DateTime, Local};

/// Human-readable local timestamp
pub fn format_local_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Compact timestamp usable in directory names
pub fn format_export_stamp(dt: &DateTime<Local>) -> String {
    dt.format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let dt = Local
            .with_ymd_and_hms(2021, 8, 8, 20, 5, 9)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_local_datetime(&dt), "2021-08-08 20:05:09");
        assert_eq!(format_export_stamp(&dt), "20210808-200509");
    }
}
