use chrono::{DateTime, Utc};
use practice_planner::{Policy, Rating, ScheduleState, Scheduler};

struct Exercise {
    due: DateTime<Utc>,
    state: ScheduleState,
    last_review: Option<DateTime<Utc>>,
}

impl Exercise {
    pub fn new() -> Self {
        Self {
            due: Utc::now(),
            last_review: None,
            state: ScheduleState {
                interval_in_days: 1,
                ease: 2.5,
                deck: 1,
            },
        }
    }
}

fn print_preview(
    scheduler: &Scheduler,
    exercise: &Exercise,
) -> Result<(), Box<dyn std::error::Error>> {
    let next = scheduler.next_schedules(&exercise.state, Utc::now())?;
    println!("Forgot interval: {} days", next.forgot.interval_in_days);
    println!("Hard interval: {} days", next.hard.interval_in_days);
    println!("OK interval: {} days", next.ok.interval_in_days);
    println!("Easy interval: {} days", next.easy.interval_in_days);
    Ok(())
}

fn schedule_new_exercise() -> Result<(), Box<dyn std::error::Error>> {
    let mut exercise = Exercise::new();
    let scheduler = Scheduler::default();

    print_preview(&scheduler, &exercise)?;

    // Assume the review went fine
    let result = scheduler.next_schedule(&exercise.state, Rating::Ok, Utc::now())?;

    exercise.state = result.state();
    exercise.last_review = Some(Utc::now());
    exercise.due = result.due_at;

    println!("Next review due: {}", exercise.due.date_naive());
    println!("State: {:?}", exercise.state);
    Ok(())
}

fn schedule_practised_exercise() -> Result<(), Box<dyn std::error::Error>> {
    let mut exercise = Exercise {
        due: Utc::now(),
        last_review: Some(Utc::now() - chrono::Duration::days(7)),
        state: ScheduleState {
            interval_in_days: 7,
            ease: 2.3,
            deck: 3,
        },
    };

    // A stricter policy for someone who wants more frequent practice
    let scheduler = Scheduler::new(Policy {
        ok_factor: 1.2,
        easy_factor: 1.6,
        ..Default::default()
    })?;

    print_preview(&scheduler, &exercise)?;

    // Raw ratings usually come from storage or a form field
    let rating: Rating = "forgot".parse()?;
    let result = scheduler.next_schedule(&exercise.state, rating, Utc::now())?;

    exercise.state = result.state();
    exercise.last_review = Some(Utc::now());
    exercise.due = result.due_at;

    println!("Next review due: {}", exercise.due.date_naive());
    println!("State: {:?}", exercise.state);
    if let Some(last_review) = exercise.last_review {
        println!("Last review: {last_review}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Scheduling a new exercise:");
    schedule_new_exercise()?;

    println!("\nScheduling a practised exercise:");
    schedule_practised_exercise()?;

    Ok(())
}
