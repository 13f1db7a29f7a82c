use clap::{Parser, Subcommand};
use organizer_core::model::TaskPatch;

#[derive(Parser, Debug)]
#[command(
    name = "task-organizer",
    version,
    about = "a CLI tool to help manage your tasks",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: task-organizer add -n "Buy milk" -d "2 liters" -t 2026-01-15 -p high -s pending -c errands
    Add {
        /// Task name
        #[arg(short = 'n', long)]
        name: String,
        /// Task description
        #[arg(short = 'd', long)]
        description: String,
        /// Due date
        #[arg(short = 't', long = "due_date")]
        due_date: String,
        /// Priority
        #[arg(short = 'p', long)]
        priority: String,
        /// Status
        #[arg(short = 's', long)]
        status: String,
        /// Category
        #[arg(short = 'c', long)]
        category: String,
    },
    /// Mark a task as completed
    ///
    /// Example: task-organizer done -i 0
    Done {
        /// Index of the task to mark as done
        #[arg(short = 'i', long)]
        index: String,
    },
    /// List tasks
    ///
    /// Example: task-organizer list
    /// Example: task-organizer list --pending
    /// Example: task-organizer list -i 2
    List {
        /// Index of a single task; status filters are ignored when set
        #[arg(short = 'i', long)]
        index: Option<String>,
        /// Show only completed tasks
        #[arg(long)]
        completed: bool,
        /// Show only pending tasks
        #[arg(long)]
        pending: bool,
        /// Show only ongoing tasks
        #[arg(long)]
        ongoing: bool,
    },
    /// Update a task's fields
    ///
    /// Example: task-organizer update -i 0 -n "Buy oat milk" -p low
    Update {
        /// Index of the task to update
        #[arg(short = 'i', long)]
        index: String,
        /// Task name
        #[arg(short = 'n', long)]
        name: Option<String>,
        /// Task description
        #[arg(short = 'd', long)]
        description: Option<String>,
        /// Due date
        #[arg(short = 't', long = "due_date")]
        due_date: Option<String>,
        /// Priority
        #[arg(short = 'p', long)]
        priority: Option<String>,
        /// Status
        #[arg(short = 's', long)]
        status: Option<String>,
        /// Category
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: task-organizer delete -i 0
    Delete {
        /// Index of the task to delete
        #[arg(short = 'i', long)]
        index: String,
    },
}

/// Collapse the status filter flags into a single filter; `completed` wins
/// over `pending` wins over `ongoing`, matching the documented surface.
pub fn status_filter(completed: bool, pending: bool, ongoing: bool) -> Option<&'static str> {
    use organizer_core::model::{STATUS_COMPLETED, STATUS_ONGOING, STATUS_PENDING};

    if completed {
        Some(STATUS_COMPLETED)
    } else if pending {
        Some(STATUS_PENDING)
    } else if ongoing {
        Some(STATUS_ONGOING)
    } else {
        None
    }
}

/// Fold the `update` subcommand's optional flags into a patch.
pub fn patch_from_flags(
    name: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    category: Option<String>,
) -> TaskPatch {
    TaskPatch {
        name,
        description,
        due_date,
        priority,
        status,
        category,
    }
}
