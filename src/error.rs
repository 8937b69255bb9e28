use snafu::Snafu;

use crate::bucketing::ExerciseId;

#[derive(Snafu, Debug, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum PlannerError {
    /// A due date could not be read as an instant. The whole batch is rejected.
    #[snafu(display("exercise {exercise_id} has an invalid due date"))]
    InvalidDueDate { exercise_id: ExerciseId },
    #[snafu(display("unhandled rating: {value}"))]
    UnhandledRating { value: String },
    #[snafu(display("invalid policy: {reason}"))]
    InvalidPolicy { reason: String },
    #[snafu(display("a {interval_in_days} day interval leaves the supported calendar range"))]
    DueDateOutOfRange { interval_in_days: u32 },
    #[snafu(display("exercise {exercise_id} not found"))]
    ExerciseNotFound { exercise_id: ExerciseId },
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
