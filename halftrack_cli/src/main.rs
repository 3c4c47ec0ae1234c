use chrono::{Local, NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};
use halftrack_core::store::PLAN_FILE;
use halftrack_core::timefmt::{format_duration, format_pace, parse_time_secs};
use halftrack_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "halftrack")]
#[command(about = "Adaptive half-marathon training planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new plan from a runner profile
    Init(InitArgs),

    /// Show the workouts of a week (default: current week)
    Show {
        /// Week number
        #[arg(long, conflicts_with = "all")]
        week: Option<u32>,

        /// Show the whole plan
        #[arg(long)]
        all: bool,
    },

    /// Show today's workouts (default)
    Today,

    /// Log a workout as completed
    Complete {
        id: String,
        #[command(flatten)]
        results: ResultArgs,

        /// Log a workout older than the stale window
        #[arg(long)]
        confirm: bool,
    },

    /// Edit the logged results of a completed workout
    Update {
        id: String,
        #[command(flatten)]
        results: ResultArgs,
    },

    /// Undo a completion
    Uncomplete { id: String },

    /// Skip a workout
    Skip { id: String },

    /// Undo a skip
    Unskip { id: String },

    /// Change a workout's type (easy, tempo, long, recovery, race)
    Retype { id: String, kind: WorkoutType },

    /// Move a workout to another date
    Move { id: String, date: NaiveDate },

    /// Add a workout
    Add {
        date: NaiveDate,

        #[arg(long = "type", default_value = "easy")]
        kind: WorkoutType,

        /// Distance in miles
        #[arg(long)]
        distance: f64,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Delete a workout
    Delete { id: String },

    /// Set a workout's notes
    Note { id: String, text: String },

    /// Show plan statistics and projections
    Stats,

    /// Show the weekly reference pace trend
    Trend,

    /// Export the workout log as CSV
    Export { path: PathBuf },
}

#[derive(Args)]
struct InitArgs {
    #[arg(long, default_value = "Runner")]
    name: String,

    /// 5K time (M:SS or H:MM:SS)
    #[arg(long)]
    five_k: Option<String>,

    /// 10K time (M:SS or H:MM:SS)
    #[arg(long)]
    ten_k: Option<String>,

    /// Runs per week (3-6)
    #[arg(long, value_parser = clap::value_parser!(u8).range(3..=6))]
    days: Option<u8>,

    /// Long run weekday (e.g. Sat, Sunday)
    #[arg(long)]
    long_day: Option<Weekday>,

    /// Plan start date; defaults to twelve weeks before the race week
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Race date
    #[arg(long)]
    race: Option<NaiveDate>,

    /// Explicit plan length in weeks (1-52)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=52))]
    weeks: Option<u32>,

    /// Use progressively tightening paces
    #[arg(long)]
    punishment: bool,

    /// Replace an existing plan
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ResultArgs {
    /// Miles actually run
    #[arg(long)]
    distance: Option<f64>,

    /// Actual pace per mile (M:SS)
    #[arg(long, value_parser = parse_pace)]
    pace: Option<f64>,

    /// Tempo warm-up miles
    #[arg(long)]
    warmup: Option<f64>,

    /// Tempo segment miles
    #[arg(long)]
    tempo: Option<f64>,

    /// Tempo cool-down miles
    #[arg(long)]
    cooldown: Option<f64>,
}

impl ResultArgs {
    fn into_input(self, confirm_stale: bool) -> CompletionInput {
        CompletionInput {
            actual_distance: self.distance,
            actual_pace: self.pace,
            tempo: TempoBreakdown {
                warmup: self.warmup,
                tempo: self.tempo,
                cooldown: self.cooldown,
            },
            confirm_stale,
        }
    }
}

fn parse_pace(s: &str) -> std::result::Result<f64, String> {
    parse_time_secs(s)
        .filter(|&secs| secs > 0)
        .map(f64::from)
        .ok_or_else(|| format!("invalid pace '{}', expected M:SS", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    halftrack_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let plan_path = data_dir.join(PLAN_FILE);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!("Plan file {:?}, today {}", plan_path, today);

    match cli.command {
        Some(Commands::Init(args)) => cmd_init(&plan_path, args, today, &config),
        Some(Commands::Show { week, all }) => cmd_show(&plan_path, week, all, today),
        Some(Commands::Today) | None => cmd_today(&plan_path, today),
        Some(Commands::Complete {
            id,
            results,
            confirm,
        }) => {
            let input = results.into_input(confirm);
            let stale_after = config.completion.stale_after_days;
            let (plan, id) = TrainingPlan::update(&plan_path, |plan| {
                let id = plan.resolve_id(&id)?;
                plan.complete_within(id, &input, today, stale_after)?;
                Ok(id)
            })?;
            println!("✓ Workout logged!");
            print_recalibrated(&plan, id);
            Ok(())
        }
        Some(Commands::Update { id, results }) => {
            let input = results.into_input(false);
            let (plan, id) = TrainingPlan::update(&plan_path, |plan| {
                let id = plan.resolve_id(&id)?;
                plan.update_actuals(id, &input, today)?;
                Ok(id)
            })?;
            println!("✓ Results updated");
            print_recalibrated(&plan, id);
            Ok(())
        }
        Some(Commands::Uncomplete { id }) => {
            edit(&plan_path, &id, |plan, id| plan.uncomplete(id))?;
            println!("✓ Completion undone");
            Ok(())
        }
        Some(Commands::Skip { id }) => {
            edit(&plan_path, &id, |plan, id| plan.skip(id))?;
            println!("✓ Workout skipped");
            Ok(())
        }
        Some(Commands::Unskip { id }) => {
            edit(&plan_path, &id, |plan, id| plan.unskip(id))?;
            println!("✓ Skip undone");
            Ok(())
        }
        Some(Commands::Retype { id, kind }) => {
            edit(&plan_path, &id, |plan, id| plan.retype(id, kind))?;
            println!("✓ Workout is now a {}", kind.label());
            Ok(())
        }
        Some(Commands::Move { id, date }) => {
            edit(&plan_path, &id, |plan, id| plan.move_to(id, date, today))?;
            println!("✓ Workout moved to {}", date);
            Ok(())
        }
        Some(Commands::Add {
            date,
            kind,
            distance,
            notes,
        }) => {
            let (plan, id) = TrainingPlan::update(&plan_path, |plan| {
                plan.add_workout(date, kind, distance, notes)
            })?;
            println!("✓ Workout added");
            if let Some(w) = plan.get(id) {
                print_workout(w);
            }
            Ok(())
        }
        Some(Commands::Delete { id }) => {
            let (_, removed) = TrainingPlan::update(&plan_path, |plan| {
                let id = plan.resolve_id(&id)?;
                plan.delete(id)
            })?;
            println!("✓ Deleted {} on {}", removed.label, removed.date);
            Ok(())
        }
        Some(Commands::Note { id, text }) => {
            edit(&plan_path, &id, |plan, id| plan.set_notes(id, text))?;
            println!("✓ Notes saved");
            Ok(())
        }
        Some(Commands::Stats) => cmd_stats(&plan_path, today),
        Some(Commands::Trend) => cmd_trend(&plan_path, today),
        Some(Commands::Export { path }) => {
            let plan = TrainingPlan::load_existing(&plan_path)?;
            let count = write_workout_log(&plan.workouts, &path)?;
            println!("✓ Exported {} workouts", count);
            println!("  CSV: {}", path.display());
            Ok(())
        }
    }
}

/// Resolve an id prefix, apply `f`, and save the plan
fn edit<F>(plan_path: &Path, id: &str, f: F) -> Result<()>
where
    F: FnOnce(&mut TrainingPlan, uuid::Uuid) -> Result<()>,
{
    TrainingPlan::update(plan_path, |plan| {
        let id = plan.resolve_id(id)?;
        f(plan, id)
    })?;
    Ok(())
}

fn cmd_init(plan_path: &Path, args: InitArgs, today: NaiveDate, config: &Config) -> Result<()> {
    if plan_path.exists() && !args.force {
        return Err(Error::State(format!(
            "A plan already exists at {}; pass --force to replace it",
            plan_path.display()
        )));
    }

    for (label, time) in [("5K", &args.five_k), ("10K", &args.ten_k)] {
        if let Some(t) = time {
            if parse_time_secs(t).is_none() {
                eprintln!("Ignoring unreadable {} time '{}'", label, t);
            }
        }
    }

    let start_date = args
        .start
        .or_else(|| args.race.map(calc_start_from_race))
        .unwrap_or(today);

    let profile = RunnerProfile {
        name: args.name,
        five_k_time: args.five_k,
        ten_k_time: args.ten_k,
        days_per_week: args.days.unwrap_or(config.plan.days_per_week),
        long_run_day: args.long_day.unwrap_or(config.plan.long_run_day),
        start_date,
        race_date: args.race,
        total_weeks: args.weeks,
    };

    let plan = if args.punishment {
        TrainingPlan::generate_punishment(profile)
    } else {
        TrainingPlan::generate(profile)
    };
    plan.save(plan_path)?;

    println!(
        "✓ Generated {}-week plan with {} workouts",
        plan.total_weeks(),
        plan.workouts.len()
    );
    println!("  Starts: {}", plan.profile.start_date);
    let paces = plan.profile.paces();
    println!(
        "  Paces: easy {}  tempo {}  long {}  recovery {}  race {}",
        format_pace(Some(paces.easy)),
        format_pace(Some(paces.tempo)),
        format_pace(Some(paces.long)),
        format_pace(Some(paces.recovery)),
        format_pace(Some(paces.race)),
    );
    if let Some(half) = estimate_half(plan.profile.five_k_seconds(), plan.profile.ten_k_seconds()) {
        println!("  Estimated half marathon: {}", format_duration(half));
    }
    Ok(())
}

fn cmd_show(plan_path: &Path, week: Option<u32>, all: bool, today: NaiveDate) -> Result<()> {
    let plan = TrainingPlan::load_existing(plan_path)?;
    let total = plan.total_weeks();

    let weeks: Vec<u32> = if all {
        (1..=total).collect()
    } else {
        vec![week.unwrap_or_else(|| current_week(&plan.workouts, today))]
    };

    for week in weeks {
        let info = WeekInfo::for_week(week, total);
        println!();
        println!("Week {} of {} ({:?})", week, total, info.phase());
        println!("─────────────────────────────────────────");
        for w in plan.week(week) {
            print_workout(w);
        }
    }
    println!();
    Ok(())
}

fn cmd_today(plan_path: &Path, today: NaiveDate) -> Result<()> {
    let plan = TrainingPlan::load_existing(plan_path)?;

    let todays: Vec<&Workout> = plan.on_date(today).collect();
    if todays.is_empty() {
        println!("Rest day ({})", today);
        if let Some(next) = plan
            .workouts
            .iter()
            .find(|w| w.is_pending() && w.date > today)
        {
            println!("\nNext up:");
            print_workout(next);
        }
    } else {
        println!("Today ({})", today);
        for w in todays {
            print_workout(w);
        }
    }
    Ok(())
}

fn cmd_stats(plan_path: &Path, today: NaiveDate) -> Result<()> {
    let plan = TrainingPlan::load_existing(plan_path)?;
    let stats = PlanStats::compute(&plan.workouts, &plan.profile, today);

    println!("\n{}'s plan", plan.profile.name);
    println!("─────────────────────────────────────────");
    println!(
        "  Workouts: {} done, {} skipped, {} upcoming ({} total)",
        stats.completed, stats.skipped, stats.upcoming, stats.total
    );
    println!(
        "  Miles: {:.1} of {:.1}",
        stats.miles_completed, stats.miles_planned
    );
    println!("  Streak: {} day(s)", stats.streak);
    println!(
        "  Half estimate (race times): {}",
        stats.half_estimate.map_or_else(|| "--".into(), format_duration)
    );
    println!(
        "  Half projection (training): {}",
        stats
            .training_projection
            .map_or_else(|| "--".into(), format_duration)
    );
    println!();
    for (week, volume) in &stats.weeks {
        println!(
            "  W{:>2}  planned {:>5.1}  done {:>5.1}  skipped {:>5.1}",
            week, volume.planned, volume.completed, volume.skipped
        );
    }
    println!();
    Ok(())
}

fn cmd_trend(plan_path: &Path, today: NaiveDate) -> Result<()> {
    let plan = TrainingPlan::load_existing(plan_path)?;
    let trend = pace_trend(&plan.workouts, today);

    if trend.is_empty() {
        println!("No logged paces yet.");
        return Ok(());
    }
    for point in trend {
        println!(
            "  W{:>2}  {}",
            point.week,
            format_pace(Some(point.reference_pace))
        );
    }
    Ok(())
}

fn print_recalibrated(plan: &TrainingPlan, id: uuid::Uuid) {
    if let Some(w) = plan.get(id) {
        print_workout(w);
    }
    if let Some(next) = plan.workouts.iter().find(|w| w.is_pending()) {
        println!("  Next target: {} @ {}", next.label, format_pace(Some(next.estimated_pace)));
    }
}

fn print_workout(w: &Workout) {
    let id = w.id.to_string();
    let status = match w.status {
        WorkoutStatus::Scheduled => "",
        WorkoutStatus::Completed => "✓",
        WorkoutStatus::Skipped => "skipped",
    };
    let actual = if w.is_completed() {
        format!(
            " → {:.1} mi @ {}",
            w.effective_distance(),
            format_pace(w.actual_pace.or(Some(w.estimated_pace)))
        )
    } else {
        String::new()
    };

    println!(
        "  {}  {} {}  {:<13} {:>5.1} mi @ {}{} {}",
        &id[..8],
        w.date,
        w.date.format("%a"),
        w.label,
        w.distance,
        format_pace(Some(w.estimated_pace)),
        actual,
        status
    );
    if !w.notes.is_empty() {
        println!("            {}", w.notes);
    }
}
