mod commands;
mod logging;
mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = "A small local todo list", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Date used for overdue / due-today marks (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty todo list in the current directory
    Init,

    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a task done, or not done again
    Toggle {
        /// Task ID (full or prefix)
        id: String,
    },

    /// Change a task's text (empty text keeps the old one)
    Edit {
        /// Task ID (full or prefix)
        id: String,

        /// New text
        text: Vec<String>,
    },

    /// Set or clear a task's due date
    Due {
        /// Task ID (full or prefix)
        id: String,

        /// Due date (YYYY-MM-DD)
        #[arg(required_unless_present = "clear")]
        date: Option<NaiveDate>,

        /// Remove the due date
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },

    /// Cycle a task's priority (low -> medium -> high -> low)
    Priority {
        /// Task ID (full or prefix)
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID (full or prefix)
        id: String,
    },

    /// Delete every completed task
    ClearCompleted,

    /// Move a task into another task's place in the manual order
    Move {
        /// Task to move
        dragged: String,

        /// Task whose place it takes
        target: String,
    },

    /// Show tasks
    List {
        /// Status filter (all, active, completed)
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter (all, low, medium, high)
        #[arg(long, default_value = "all")]
        priority: String,

        /// Case-insensitive text search
        #[arg(long, default_value = "")]
        search: String,

        /// Sort order (manual, due, priority)
        #[arg(long, default_value = "manual")]
        sort: String,
    },

    /// Show task counts
    Stats,

    /// Show or change the theme (no argument toggles it)
    Theme {
        /// dark or light
        mode: Option<String>,
    },

    /// Read commands from stdin, one per line
    Shell,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add { text } => commands::task::add(text.join(" ")),
        Commands::Toggle { id } => commands::task::toggle(id),
        Commands::Edit { id, text } => commands::task::edit(id, text.join(" ")),
        Commands::Due { id, date, clear } => {
            commands::task::due(id, if clear { None } else { date })
        }
        Commands::Priority { id } => commands::task::priority(id),
        Commands::Rm { id } => commands::task::remove(id),
        Commands::ClearCompleted => commands::task::clear_completed(),
        Commands::Move { dragged, target } => commands::task::reorder(dragged, target),
        Commands::List {
            status,
            priority,
            search,
            sort,
        } => commands::list::run(status, priority, search, sort, today, cli.json),
        Commands::Stats => commands::list::stats(cli.json),
        Commands::Theme { mode } => commands::theme::run(mode),
        Commands::Shell => commands::shell::run(today, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
