use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::error::{PlannerError, Result, UnhandledRatingSnafu};

/// The learner's self-reported recall quality for a single review.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Forgot,
    Hard,
    Ok,
    Easy,
}

/// Stored ratings use `0=Forgot, 1=Hard, 2=Ok, 3=Easy`.
impl TryFrom<u8> for Rating {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Rating::Forgot),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Ok),
            3 => Ok(Rating::Easy),
            _ => UnhandledRatingSnafu {
                value: value.to_string(),
            }
            .fail(),
        }
    }
}

impl FromStr for Rating {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Rating::iter()
            .find(|rating| rating.as_ref().eq_ignore_ascii_case(name))
            .ok_or_else(|| PlannerError::UnhandledRating {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn ordinals_follow_stored_order() -> Result<()> {
        let ratings = (0u8..4).map(Rating::try_from).collect::<Result<Vec<_>>>()?;
        assert_eq!(ratings, Rating::iter().collect_vec());
        Ok(())
    }

    #[test]
    fn out_of_range_ordinal_is_unhandled() {
        assert_eq!(
            Rating::try_from(4),
            Err(PlannerError::UnhandledRating {
                value: "4".to_string()
            })
        );
        assert!(Rating::try_from(u8::MAX).is_err());
    }

    #[test]
    fn names_parse_case_insensitively() -> Result<()> {
        assert_eq!("FORGOT".parse::<Rating>()?, Rating::Forgot);
        assert_eq!("hard".parse::<Rating>()?, Rating::Hard);
        assert_eq!(" Ok ".parse::<Rating>()?, Rating::Ok);
        assert_eq!("easy".parse::<Rating>()?, Rating::Easy);
        Ok(())
    }

    #[test]
    fn unknown_name_is_unhandled() {
        assert_eq!(
            "GOOD".parse::<Rating>(),
            Err(PlannerError::UnhandledRating {
                value: "GOOD".to_string()
            })
        );
    }

    #[test]
    fn display_uses_upper_case_names() {
        let names = Rating::iter().map(|r| r.to_string()).collect_vec();
        assert_eq!(names, ["FORGOT", "HARD", "OK", "EASY"]);
    }
}
