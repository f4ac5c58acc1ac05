use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kliv", about = "Project-scoped task board with kanban, calendar, and list views")]
pub struct Cli {
    /// Store directory [default: ~/.kliv]
    #[arg(long, env = "KLIV_STORE", global = true)]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Project the task belongs to [default: Personal]
        #[arg(short, long)]
        project: Option<String>,
        /// Task description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Edit a task
    Edit {
        /// Task id
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New project
        #[arg(short, long)]
        project: Option<String>,
        /// New status (todo, in-progress, done)
        #[arg(short, long)]
        status: Option<String>,
        /// New due date (YYYY-MM-DD), or "none" to clear
        #[arg(long)]
        due: Option<String>,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show task details
    Show {
        /// Task id
        id: String,
    },

    /// List tasks for a project
    List {
        /// Project to list [default: Personal]
        #[arg(short, long)]
        project: Option<String>,
        /// Sort order (due, name, newest, priority)
        #[arg(long)]
        sort: Option<String>,
        /// List tasks across all projects
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a task to another board column (drag-drop from the shell)
    Move {
        /// Task id
        id: String,
        /// Target status (todo, in-progress, done)
        status: String,
    },

    /// Add a comment to a task
    Comment {
        /// Task id
        id: String,
        /// Comment text
        text: String,
    },

    /// Add a subtask to a task
    Subtask {
        /// Task id
        id: String,
        /// Subtask text
        text: String,
    },

    /// Add a tag to a task
    Tag {
        /// Task id
        id: String,
        /// Tag (alta/media/baja act as priorities)
        tag: String,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Render the kanban board for a project
    Board {
        /// Project to show [default: Personal]
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Render a calendar month with due tasks
    Calendar {
        /// Month to show (YYYY-MM) [default: current month]
        month: Option<String>,
        /// Project to show [default: Personal]
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Sign in against the mock accounts and print the session
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// Launch the interactive board
    Tui {
        /// Project to open [default: Personal]
        #[arg(short, long)]
        project: Option<String>,
        /// Poll interval in milliseconds
        #[arg(long, default_value = "250")]
        poll_interval: u64,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project
    Add {
        /// Project name
        name: String,
    },
    /// Remove a project and all of its tasks
    Rm {
        /// Project name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
