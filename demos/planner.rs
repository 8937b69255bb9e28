use chrono::{Duration, Utc};
use chrono_tz::Europe::Berlin;
use practice_planner::{
    Bucketer, Buckets, Exercise, MemoryStore, Planner, Rating, ScheduleState, Scheduler,
};

fn setup_logger() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()
}

fn print_buckets(buckets: &Buckets) {
    for (name, exercises) in [
        ("overdue", &buckets.overdue),
        ("due today", &buckets.due_today),
        ("upcoming", &buckets.upcoming),
    ] {
        println!("{name} ({})", exercises.len());
        for exercise in exercises {
            println!("  {} (due {})", exercise.title, exercise.due_at);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger()?;

    let now = Utc::now();
    let mut store = MemoryStore::new();
    for (id, title, offset_days, deck) in [
        ("1", "Major scales", -2, 2),
        ("2", "Chord changes", 0, 1),
        ("3", "Sight reading", 0, 3),
        ("4", "Etude no. 4", 5, 4),
    ] {
        store.insert(
            Exercise {
                id: id.to_string(),
                title: title.to_string(),
                due_at: (now + Duration::days(offset_days)).to_rfc3339(),
            },
            ScheduleState {
                interval_in_days: 3,
                ease: 2.5,
                deck,
            },
        );
    }

    let mut planner = Planner::new(store, Scheduler::default(), Bucketer::new(Berlin));
    print_buckets(&planner.today_buckets(now)?);

    let preview = planner.preview("1", now)?;
    println!(
        "\nreviewing \"Major scales\" as OK would push it to {}",
        preview.ok.due_date()
    );

    planner.review("1", Rating::Ok, now)?;
    planner.review("2", Rating::Hard, now)?;
    planner.review("3", Rating::Easy, now)?;

    println!();
    print_buckets(&planner.today_buckets(now)?);
    Ok(())
}
