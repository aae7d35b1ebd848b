use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "trackitall", version, about = "TrackItAll CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Points and levels
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Badge awards
    Badge {
        #[command(subcommand)]
        action: commands::badge::BadgeAction,
    },
    /// Habit completions and streaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Leaderboard ranking
    Leaderboard {
        #[command(subcommand)]
        action: commands::leaderboard::LeaderboardAction,
    },
    /// Expense records and category totals
    Expense {
        #[command(subcommand)]
        action: commands::expense::ExpenseAction,
    },
    /// Course attendance
    Attendance {
        #[command(subcommand)]
        action: commands::attendance::AttendanceAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("TRACKITALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Points { action } => commands::points::run(action),
        Commands::Badge { action } => commands::badge::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Leaderboard { action } => commands::leaderboard::run(action),
        Commands::Expense { action } => commands::expense::run(action),
        Commands::Attendance { action } => commands::attendance::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
