use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Anything that names a calendar day for scheduling. Instants are viewed in
/// UTC before their time of day is dropped.
pub trait CalendarDay {
    fn utc_date(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn utc_date(&self) -> NaiveDate {
        *self
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn utc_date(&self) -> NaiveDate {
        self.with_timezone(&Utc).date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn utc_date(&self) -> NaiveDate {
        (**self).utc_date()
    }
}

pub(crate) fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The calendar day containing `instant` as seen from `frame`.
pub(crate) fn day_key<Tz: TimeZone>(instant: &DateTime<Utc>, frame: &Tz) -> NaiveDate {
    instant.with_timezone(frame).date_naive()
}

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reads a stored due date. Strings with an offset are absolute; date-times
/// without one, and bare dates, are wall-clock time in `frame`.
pub(crate) fn parse_due_at<Tz: TimeZone>(raw: &str, frame: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;
    match frame.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn instants_normalize_to_utc_date() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let tokyo_morning = offset.with_ymd_and_hms(2025, 1, 2, 7, 0, 0).unwrap();
        assert_eq!(
            tokyo_morning.utc_date(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!((&date).utc_date(), date);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_due_at("2025-01-02T00:01:00+01:00", &Utc).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 1, 23, 1, 0).unwrap());
        let parsed = parse_due_at("2025-01-02T00:01:00.250Z", &Berlin).unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn naive_times_use_the_frame() {
        let parsed = parse_due_at("2025-01-01T18:00:00", &Berlin).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 1, 17, 0, 0).unwrap());
        let parsed = parse_due_at("2025-01-01 18:00:00", &Utc).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 0).unwrap());
        let parsed = parse_due_at("2025-01-01", &Berlin).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap());
    }

    #[test]
    fn dst_gap_is_rejected_and_fold_takes_earliest() {
        assert_eq!(parse_due_at("2025-03-30T02:30:00", &Berlin), None);
        let fold = parse_due_at("2025-10-26T02:30:00", &Berlin).unwrap();
        assert_eq!(fold, Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["not-a-date", "", "2025-13-01", "2025-02-30T10:00:00", "tomorrow"] {
            assert_eq!(parse_due_at(raw, &Utc), None, "{raw}");
        }
    }

    #[test]
    fn day_key_depends_on_frame() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(
            day_key(&instant, &Utc),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            day_key(&instant, &Berlin),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
    }
}
