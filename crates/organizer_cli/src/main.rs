mod cli;

use clap::Parser;
use cli::{Cli, Command, patch_from_flags, status_filter};
use organizer_core::error::AppError;
use organizer_core::model::{Task, TaskDraft};
use organizer_core::storage::TaskStore;
use organizer_core::storage::json_store::JsonStore;
use organizer_core::task_api;

fn print_task_fields(task: &Task) {
    println!("  ID: {}", task.task_id);
    println!("  Name: {}", task.name);
    println!("  Description: {}", task.description);
    println!("  Due Date: {}", task.due_date);
    println!("  Priority: {}", task.priority);
    println!("  Status: {}", task.status);
    println!("  Category: {}", task.category);
    if let Some(completed_at) = task.completed_at.as_deref() {
        println!("  Completed At: {completed_at}");
    }
}

fn print_tasks_plain(tasks: &[Task]) {
    println!("All tasks:");
    for (index, task) in tasks.iter().enumerate() {
        println!("\n[{index}] Task:");
        print_task_fields(task);
    }
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let payload =
        serde_json::to_string_pretty(task).map_err(|err| AppError::invalid_input(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_input(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn run_command(cli: Cli, store: &dyn TaskStore) -> Result<(), AppError> {
    match cli.command {
        Command::Add {
            name,
            description,
            due_date,
            priority,
            status,
            category,
        } => {
            let draft = TaskDraft {
                name,
                description,
                due_date,
                priority,
                status,
                category,
            };
            let task = task_api::add_task(store, draft)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Task added successfully");
            }
        }
        Command::Done { index } => {
            let task = task_api::mark_done(store, &index)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Task marked as completed:");
                print_task_fields(&task);
            }
        }
        Command::List {
            index,
            completed,
            pending,
            ongoing,
        } => {
            // An explicit index returns a single task; status filters apply
            // only to full listings.
            if let Some(raw_index) = index {
                let task = task_api::get_task(store, &raw_index)?;
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    print_task_fields(&task);
                }
            } else {
                let mut tasks = task_api::get_tasks(store)?;
                if let Some(wanted) = status_filter(completed, pending, ongoing) {
                    tasks.retain(|task| task.status == wanted);
                }
                if cli.json {
                    print_tasks_json(&tasks)?;
                } else {
                    print_tasks_plain(&tasks);
                }
            }
        }
        Command::Update {
            index,
            name,
            description,
            due_date,
            priority,
            status,
            category,
        } => {
            let patch = patch_from_flags(name, description, due_date, priority, status, category);
            if patch.is_empty() {
                println!("No updates provided");
                return Ok(());
            }

            let task = task_api::update_task(store, &index, &patch)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Task updated successfully:");
                print_task_fields(&task);
            }
        }
        Command::Delete { index } => {
            let task = task_api::delete_task(store, &index)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Task deleted successfully:");
                print_task_fields(&task);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version surface as clap "errors" that print to
            // stdout and exit cleanly.
            if !err.use_stderr() {
                let _ = err.print();
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let store = match JsonStore::open_default() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = store.init() {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }

    // Command failures are reported but do not fail the process; only
    // argument parsing and store setup exit non-zero.
    if let Err(err) = run_command(cli, &store) {
        eprintln!("ERROR: {err}");
    }
}
