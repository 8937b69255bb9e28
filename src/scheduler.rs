use chrono::{DateTime, Days, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDay, utc_midnight};
use crate::error::{DueDateOutOfRangeSnafu, Result};
use crate::policy::{MIN_DECK, Policy, clamp_deck};
use crate::rating::Rating;

/// The persisted repetition progress of one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub interval_in_days: u32,
    pub ease: f64,
    pub deck: u8,
}

/// The state after a review, together with the day it is due again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub interval_in_days: u32,
    pub ease: f64,
    pub deck: u8,
    /// Midnight UTC of the due day.
    pub due_at: DateTime<Utc>,
}

impl ScheduleResult {
    /// The state to persist for the next review.
    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            interval_in_days: self.interval_in_days,
            ease: self.ease,
            deck: self.deck,
        }
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_at.date_naive()
    }
}

/// The outcome of every rating for the same state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextSchedules {
    pub forgot: ScheduleResult,
    pub hard: ScheduleResult,
    pub ok: ScheduleResult,
    pub easy: ScheduleResult,
}

impl NextSchedules {
    pub fn get(&self, rating: Rating) -> &ScheduleResult {
        match rating {
            Rating::Forgot => &self.forgot,
            Rating::Hard => &self.hard,
            Rating::Ok => &self.ok,
            Rating::Easy => &self.easy,
        }
    }
}

/// Computes review transitions under a fixed [`Policy`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheduler {
    policy: Policy,
}

impl Scheduler {
    pub fn new(policy: Policy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// `state.ease` must be finite; a NaN would pass through the ease clamp.
    pub fn next_schedule(
        &self,
        state: &ScheduleState,
        rating: Rating,
        today: impl CalendarDay,
    ) -> Result<ScheduleResult> {
        debug_assert!(state.ease.is_finite(), "ease must be finite, got {}", state.ease);
        let proposed = self.proposed_interval(state.interval_in_days, rating);
        let deck = next_deck(state.deck, rating);
        let interval_in_days = proposed.max(self.policy.deck_baseline(deck));
        let ease = self
            .policy
            .clamp_ease(state.ease + self.policy.ease_deltas.for_rating(rating));
        let due_at = today
            .utc_date()
            .checked_add_days(Days::new(u64::from(interval_in_days)))
            .map(utc_midnight)
            .ok_or_else(|| DueDateOutOfRangeSnafu { interval_in_days }.build())?;

        debug!(
            "{rating}: deck {} -> {deck}, interval {} -> {interval_in_days} (proposed {proposed}), ease {:.2} -> {ease:.2}",
            state.deck, state.interval_in_days, state.ease
        );
        Ok(ScheduleResult {
            interval_in_days,
            ease,
            deck,
            due_at,
        })
    }

    pub fn next_schedules(
        &self,
        state: &ScheduleState,
        today: impl CalendarDay,
    ) -> Result<NextSchedules> {
        let today = today.utc_date();
        Ok(NextSchedules {
            forgot: self.next_schedule(state, Rating::Forgot, today)?,
            hard: self.next_schedule(state, Rating::Hard, today)?,
            ok: self.next_schedule(state, Rating::Ok, today)?,
            easy: self.next_schedule(state, Rating::Easy, today)?,
        })
    }

    fn proposed_interval(&self, previous: u32, rating: Rating) -> u32 {
        match rating {
            Rating::Forgot => self.policy.forgot_days,
            Rating::Hard => self.policy.hard_days,
            Rating::Ok => scale_up(previous, self.policy.ok_factor),
            Rating::Easy => scale_up(previous, self.policy.easy_factor),
        }
    }
}

/// `ceil(days * factor)`; the cast saturates at `u32::MAX`.
fn scale_up(days: u32, factor: f64) -> u32 {
    (f64::from(days) * factor).ceil() as u32
}

fn next_deck(deck: u8, rating: Rating) -> u8 {
    let next = match rating {
        Rating::Forgot => MIN_DECK,
        Rating::Hard => deck.saturating_sub(1),
        Rating::Ok => deck,
        Rating::Easy => deck.saturating_add(1),
    };
    clamp_deck(next)
}

/// [`Scheduler::next_schedule`] under the default policy.
pub fn next_schedule(
    state: &ScheduleState,
    rating: Rating,
    today: impl CalendarDay,
) -> Result<ScheduleResult> {
    Scheduler::default().next_schedule(state, rating, today)
}
