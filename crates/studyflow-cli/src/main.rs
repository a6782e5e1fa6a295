use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyflow-cli", version, about = "StudyFlow CLI")]
struct Cli {
    /// Skip narrative generation and always use deterministic fallback text
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a user's courses, tasks and profile
    Setup {
        /// User identifier
        #[arg(long)]
        user: String,
        /// Path to a JSON payload with courses, tasks and profile ("-" for stdin)
        #[arg(long)]
        file: String,
    },
    /// Plan study blocks for one day
    Plan {
        /// User identifier
        #[arg(long)]
        user: String,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Available window, HH:MM-HH:MM (repeatable)
        #[arg(long = "window")]
        windows: Vec<String>,
        /// Session to continue
        #[arg(long)]
        session: Option<String>,
    },
    /// Record a post-session reflection
    Reflect {
        /// User identifier
        #[arg(long)]
        user: String,
        /// Task ID completed this session (repeatable)
        #[arg(long = "completed")]
        completed: Vec<String>,
        /// Task ID partially done this session (repeatable)
        #[arg(long = "partial")]
        partial: Vec<String>,
        /// Difficulty rating, 1 (easy) to 5 (hard)
        #[arg(long)]
        difficulty: u32,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Reflection date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show progress status
    Status {
        /// User identifier
        #[arg(long)]
        user: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Setup { user, file } => commands::setup::run(&user, &file),
        Commands::Plan {
            user,
            date,
            windows,
            session,
        } => commands::plan::run(&user, &date, &windows, session, cli.offline),
        Commands::Reflect {
            user,
            completed,
            partial,
            difficulty,
            notes,
            date,
        } => commands::reflect::run(
            &user,
            completed,
            partial,
            difficulty,
            notes,
            date.as_deref(),
            cli.offline,
        ),
        Commands::Status { user } => commands::status::run(&user),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
