//! Deck-based spaced repetition for practice exercises: a [`Scheduler`] that
//! turns a review rating into the next due date, and a [`Bucketer`] that
//! splits an exercise set into overdue, due today and upcoming.

mod bucketing;
mod calendar;
mod error;
mod planner;
mod policy;
mod rating;
mod scheduler;
#[cfg(test)]
mod test_helpers;

pub use bucketing::{Bucketer, Buckets, Exercise, ExerciseId, bucket_by_due_date};
pub use calendar::CalendarDay;
pub use error::{PlannerError, Result};
pub use planner::{ExerciseStore, MemoryStore, Planner};
pub use policy::{EaseDeltas, MAX_DECK, MIN_DECK, Policy};
pub use rating::Rating;
pub use scheduler::{NextSchedules, ScheduleResult, ScheduleState, Scheduler, next_schedule};
