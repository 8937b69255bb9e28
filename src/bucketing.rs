use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::{day_key, parse_due_at};
use crate::error::{InvalidDueDateSnafu, Result};

pub type ExerciseId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub title: String,
    /// An RFC 3339 instant, or a wall-clock date-time / date in the
    /// bucketer's reference frame.
    pub due_at: String,
}

/// Exercises grouped by due day, each group ascending by due instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    pub overdue: Vec<Exercise>,
    pub due_today: Vec<Exercise>,
    pub upcoming: Vec<Exercise>,
}

impl Buckets {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.due_today.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overdue first, then due today, then upcoming.
    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.overdue
            .iter()
            .chain(&self.due_today)
            .chain(&self.upcoming)
    }
}

/// Classifies exercises by calendar day in a fixed reference frame.
#[derive(Debug, Clone)]
pub struct Bucketer<Tz: TimeZone> {
    frame: Tz,
}

impl Bucketer<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz: TimeZone> Bucketer<Tz> {
    pub fn new(frame: Tz) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &Tz {
        &self.frame
    }

    pub fn bucket(&self, exercises: &[Exercise], now: DateTime<Utc>) -> Result<Buckets> {
        bucket_by_due_date(exercises, now, &self.frame)
    }
}

/// Splits `exercises` into overdue, due today and upcoming relative to the
/// day containing `now`, with both sides seen from `frame`.
///
/// Every due date is parsed before anything is classified, so one malformed
/// record fails the whole call.
pub fn bucket_by_due_date<Tz: TimeZone>(
    exercises: &[Exercise],
    now: DateTime<Utc>,
    frame: &Tz,
) -> Result<Buckets> {
    let parsed: Vec<(DateTime<Utc>, &Exercise)> = exercises
        .iter()
        .map(|exercise| match parse_due_at(&exercise.due_at, frame) {
            Some(due) => Ok((due, exercise)),
            None => {
                warn!(
                    "exercise {} has an unreadable due date {:?}",
                    exercise.id, exercise.due_at
                );
                InvalidDueDateSnafu {
                    exercise_id: exercise.id.clone(),
                }
                .fail()
            }
        })
        .collect::<Result<_>>()?;

    let today = day_key(&now, frame);
    let mut overdue = vec![];
    let mut due_today = vec![];
    let mut upcoming = vec![];
    for (due, exercise) in parsed {
        let bucket = match day_key(&due, frame).cmp(&today) {
            Ordering::Less => &mut overdue,
            Ordering::Equal => &mut due_today,
            Ordering::Greater => &mut upcoming,
        };
        bucket.push((due, exercise));
    }

    let buckets = Buckets {
        overdue: sorted_by_due(overdue),
        due_today: sorted_by_due(due_today),
        upcoming: sorted_by_due(upcoming),
    };
    debug!(
        "bucketed {} exercises for {today}: {} overdue, {} due today, {} upcoming",
        exercises.len(),
        buckets.overdue.len(),
        buckets.due_today.len(),
        buckets.upcoming.len()
    );
    Ok(buckets)
}

// stable, so equal instants keep their input order
fn sorted_by_due(bucket: Vec<(DateTime<Utc>, &Exercise)>) -> Vec<Exercise> {
    bucket
        .into_iter()
        .sorted_by_key(|(due, _)| *due)
        .map(|(_, exercise)| exercise.clone())
        .collect()
}
