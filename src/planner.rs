use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use log::info;

use crate::bucketing::{Bucketer, Buckets, Exercise, ExerciseId};
use crate::calendar::day_key;
use crate::error::{ExerciseNotFoundSnafu, Result};
use crate::rating::Rating;
use crate::scheduler::{NextSchedules, ScheduleResult, ScheduleState, Scheduler};

/// Where the planner reads exercises and their repetition state from, and
/// where it writes review outcomes back to.
pub trait ExerciseStore {
    fn exercises(&self) -> Result<Vec<Exercise>>;

    fn schedule_state(&self, exercise_id: &str) -> Result<ScheduleState>;

    /// Persists the outcome of a review, including the new due date.
    ///
    /// Store the due day as the bare date `result.due_date()`, not the
    /// `due_at` instant. The bucketer reads a bare date as midnight in its own
    /// frame, while `due_at` is midnight UTC, which a frame west of UTC reads
    /// back as the previous day.
    fn record_schedule(&mut self, exercise_id: &str, result: &ScheduleResult) -> Result<()>;
}

/// An [`ExerciseStore`] kept in memory, listing exercises in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(Exercise, ScheduleState)>,
    index: HashMap<ExerciseId, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exercise, replacing any existing one with the same id.
    pub fn insert(&mut self, exercise: Exercise, state: ScheduleState) {
        match self.index.get(&exercise.id) {
            Some(&position) => self.entries[position] = (exercise, state),
            None => {
                self.index.insert(exercise.id.clone(), self.entries.len());
                self.entries.push((exercise, state));
            }
        }
    }

    pub fn get(&self, exercise_id: &str) -> Option<(&Exercise, &ScheduleState)> {
        self.index
            .get(exercise_id)
            .map(|&position| &self.entries[position])
            .map(|(exercise, state)| (exercise, state))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, exercise_id: &str) -> Result<usize> {
        self.index
            .get(exercise_id)
            .copied()
            .ok_or_else(|| ExerciseNotFoundSnafu { exercise_id }.build())
    }
}

impl ExerciseStore for MemoryStore {
    fn exercises(&self) -> Result<Vec<Exercise>> {
        Ok(self
            .entries
            .iter()
            .map(|(exercise, _)| exercise.clone())
            .collect())
    }

    fn schedule_state(&self, exercise_id: &str) -> Result<ScheduleState> {
        let position = self.position(exercise_id)?;
        Ok(self.entries[position].1)
    }

    /// Stores the due day as a bare date, so it is read back as midnight in
    /// whatever frame the bucketer uses.
    fn record_schedule(&mut self, exercise_id: &str, result: &ScheduleResult) -> Result<()> {
        let position = self.position(exercise_id)?;
        let (exercise, state) = &mut self.entries[position];
        exercise.due_at = result.due_date().to_string();
        *state = result.state();
        Ok(())
    }
}

/// Composes a store with the scheduler and bucketer: today's view of the
/// exercise set, and the review flow.
#[derive(Debug, Clone)]
pub struct Planner<S, Tz: TimeZone> {
    store: S,
    scheduler: Scheduler,
    bucketer: Bucketer<Tz>,
}

impl<S: ExerciseStore, Tz: TimeZone> Planner<S, Tz> {
    pub fn new(store: S, scheduler: Scheduler, bucketer: Bucketer<Tz>) -> Self {
        Self {
            store,
            scheduler,
            bucketer,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn today_buckets(&self, now: DateTime<Utc>) -> Result<Buckets> {
        let exercises = self.store.exercises()?;
        self.bucketer.bucket(&exercises, now)
    }

    /// What each rating would do to the exercise, without recording anything.
    pub fn preview(&self, exercise_id: &str, now: DateTime<Utc>) -> Result<NextSchedules> {
        let state = self.store.schedule_state(exercise_id)?;
        self.scheduler
            .next_schedules(&state, day_key(&now, self.bucketer.frame()))
    }

    /// Schedules the next review of an exercise and records it. "Today" is
    /// the calendar day of `now` in the bucketer's frame.
    pub fn review(
        &mut self,
        exercise_id: &str,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<ScheduleResult> {
        let state = self.store.schedule_state(exercise_id)?;
        let today = day_key(&now, self.bucketer.frame());
        let result = self.scheduler.next_schedule(&state, rating, today)?;
        self.store.record_schedule(exercise_id, &result)?;
        info!(
            "exercise {exercise_id} rated {rating}: deck {}, due {}",
            result.deck,
            result.due_date()
        );
        Ok(result)
    }
}
