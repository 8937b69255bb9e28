use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::bucketing::Exercise;
use crate::scheduler::ScheduleState;

pub(crate) trait TestHelper {
    fn assert_approx_eq(self, expected: f64);
}

impl TestHelper for f64 {
    #[track_caller]
    fn assert_approx_eq(self, expected: f64) {
        assert!(
            (self - expected).abs() < 1e-9,
            "expected {expected}, got {self}"
        );
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

pub(crate) fn state(interval_in_days: u32, ease: f64, deck: u8) -> ScheduleState {
    ScheduleState {
        interval_in_days,
        ease,
        deck,
    }
}

pub(crate) fn exercise(id: &str, due_at: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        title: format!("Exercise {id}"),
        due_at: due_at.to_string(),
    }
}

pub(crate) fn ids(exercises: &[Exercise]) -> Vec<&str> {
    exercises.iter().map(|e| e.id.as_str()).collect()
}
