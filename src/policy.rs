use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{InvalidPolicySnafu, Result};
use crate::rating::Rating;

pub const MIN_DECK: u8 = 1;
pub const MAX_DECK: u8 = 5;
const DECK_COUNT: usize = MAX_DECK as usize;

const DEFAULT_DECK_BASELINES: [u32; DECK_COUNT] = [1, 3, 7, 14, 30];

/// Additive ease change applied after a review, per rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EaseDeltas {
    pub forgot: f64,
    pub hard: f64,
    pub ok: f64,
    pub easy: f64,
}

impl EaseDeltas {
    pub fn for_rating(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Forgot => self.forgot,
            Rating::Hard => self.hard,
            Rating::Ok => self.ok,
            Rating::Easy => self.easy,
        }
    }

    fn all(&self) -> [f64; 4] {
        [self.forgot, self.hard, self.ok, self.easy]
    }
}

impl Default for EaseDeltas {
    fn default() -> Self {
        Self {
            forgot: -0.30,
            hard: -0.15,
            ok: 0.0,
            easy: 0.05,
        }
    }
}

/// The tunable constants of the scheduler. Override single fields with
/// `Policy { ok_factor: 1.5, ..Default::default() }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Interval after a forgotten review, ignoring the previous interval.
    pub forgot_days: u32,
    /// Interval after a hard review, ignoring the previous interval.
    pub hard_days: u32,
    pub ok_factor: f64,
    pub easy_factor: f64,
    pub ease_deltas: EaseDeltas,
    pub ease_min: f64,
    pub ease_max: f64,
    /// Minimum interval in days for decks 1..=5.
    pub deck_baselines: [u32; DECK_COUNT],
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            forgot_days: 1,
            hard_days: 2,
            ok_factor: 1.4,
            easy_factor: 2.0,
            ease_deltas: EaseDeltas::default(),
            ease_min: 1.8,
            ease_max: 3.0,
            deck_baselines: DEFAULT_DECK_BASELINES,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.forgot_days >= 1 && self.hard_days >= 1,
            InvalidPolicySnafu {
                reason: "fixed intervals must be at least one day",
            }
        );
        for (name, factor) in [
            ("ok_factor", self.ok_factor),
            ("easy_factor", self.easy_factor),
        ] {
            ensure!(
                factor.is_finite() && factor >= 1.0,
                InvalidPolicySnafu {
                    reason: format!("{name} must be finite and at least 1.0, got {factor}"),
                }
            );
        }
        ensure!(
            self.ease_deltas.all().iter().all(|d| d.is_finite()),
            InvalidPolicySnafu {
                reason: "ease deltas must be finite",
            }
        );
        ensure!(
            self.ease_min.is_finite()
                && self.ease_max.is_finite()
                && self.ease_min <= self.ease_max,
            InvalidPolicySnafu {
                reason: format!(
                    "ease bounds must be finite and ordered, got [{}, {}]",
                    self.ease_min, self.ease_max
                ),
            }
        );
        ensure!(
            self.deck_baselines[0] >= 1,
            InvalidPolicySnafu {
                reason: "deck baselines must be at least one day",
            }
        );
        ensure!(
            self.deck_baselines.is_sorted(),
            InvalidPolicySnafu {
                reason: format!(
                    "deck baselines must not decrease with the deck, got {:?}",
                    self.deck_baselines
                ),
            }
        );
        Ok(())
    }

    /// Minimum interval for `deck`, which is clamped into `MIN_DECK..=MAX_DECK`.
    pub fn deck_baseline(&self, deck: u8) -> u32 {
        self.deck_baselines[usize::from(clamp_deck(deck) - MIN_DECK)]
    }

    pub(crate) fn clamp_ease(&self, ease: f64) -> f64 {
        ease.clamp(self.ease_min, self.ease_max)
    }
}

pub(crate) fn clamp_deck(deck: u8) -> u8 {
    deck.clamp(MIN_DECK, MAX_DECK)
}
