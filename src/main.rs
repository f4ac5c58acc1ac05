mod auth;
mod cli;
mod dragdrop;
mod error;
mod model;
mod output;
mod storage;
mod store;
mod tui;
mod validate;
mod view;
mod watch;

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ProjectCommand};
use model::{NewTask, SortKey, Status, TaskPatch};
use store::{Store, DEFAULT_PROJECT};

fn default_store_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".kliv"))
}

fn resolve_store_dir(cli_store: Option<String>) -> Result<PathBuf> {
    match cli_store {
        Some(p) => Ok(PathBuf::from(p)),
        None => default_store_dir(),
    }
}

fn parse_due(s: &str) -> Result<NaiveDate> {
    s.parse::<NaiveDate>()
        .with_context(|| format!("invalid due date '{s}': expected YYYY-MM-DD"))
}

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let (y, m) = s
        .split_once('-')
        .with_context(|| format!("invalid month '{s}': expected YYYY-MM"))?;
    let year: i32 = y.parse().with_context(|| format!("invalid year '{y}'"))?;
    let month: u32 = m.parse().with_context(|| format!("invalid month '{m}'"))?;
    if !(1..=12).contains(&month) {
        bail!("invalid month '{s}': month must be 01-12");
    }
    Ok((year, month))
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store_dir = resolve_store_dir(cli.store)?;

    match cli.command {
        Command::Add {
            title,
            project,
            desc,
            due,
            tag,
        } => {
            let mut store = Store::open(&store_dir)?;
            let due_date = due.as_deref().map(parse_due).transpose()?;
            let task = store.create(NewTask {
                id: None,
                title,
                project,
                description: desc,
                status: None,
                due_date,
                tags: tag,
            })?;
            eprintln!("Added task '{}' ({})", task.title, task.id);
        }

        Command::Edit {
            id,
            title,
            desc,
            project,
            status,
            due,
        } => {
            let mut store = Store::open(&store_dir)?;
            let status = status.map(|s| Status::parse(&s)).transpose()?;
            let due_date = match due.as_deref() {
                None => None,
                Some("none") => Some(None),
                Some(s) => Some(Some(parse_due(s)?)),
            };
            let task = store.update(
                &id,
                TaskPatch {
                    title,
                    project,
                    description: desc,
                    status,
                    due_date,
                    ..TaskPatch::default()
                },
            )?;
            eprintln!("Updated task '{}'", task.id);
        }

        Command::Rm { id, yes } => {
            let mut store = Store::open(&store_dir)?;
            let task = store
                .get(&id)
                .ok_or_else(|| error::StoreError::TaskNotFound(id.clone()))?;
            if !yes && !confirm(&format!("Remove task '{}'?", task.title))? {
                eprintln!("Aborted");
                return Ok(());
            }
            store.remove(&id)?;
            eprintln!("Removed task '{id}'");
        }

        Command::Show { id } => {
            let store = Store::open(&store_dir)?;
            let task = store
                .get(&id)
                .ok_or_else(|| error::StoreError::TaskNotFound(id.clone()))?;
            print!("{}", output::format_task_detail(task));
        }

        Command::List {
            project,
            sort,
            all,
            json,
        } => {
            let store = Store::open(&store_dir)?;
            let project = project.unwrap_or_else(|| DEFAULT_PROJECT.to_string());
            let sort = sort.map(|s| SortKey::parse(&s)).transpose()?;
            let scoped = if all {
                store.tasks().iter().collect()
            } else {
                store.list(&project)
            };
            let tasks = view::sorted(&scoped, sort);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", output::format_task_list(&tasks));
            }
        }

        Command::Move { id, status } => {
            let mut store = Store::open(&store_dir)?;
            let status = Status::parse(&status)?;
            match dragdrop::handle_drop(&mut store, &id, status)? {
                dragdrop::DropOutcome::Moved => eprintln!("Moved '{id}' to {status}"),
                dragdrop::DropOutcome::Ignored => eprintln!("Task '{id}' no longer exists"),
            }
        }

        Command::Comment { id, text } => {
            let mut store = Store::open(&store_dir)?;
            store.add_comment(&id, &text)?;
            eprintln!("Added comment to '{id}'");
        }

        Command::Subtask { id, text } => {
            let mut store = Store::open(&store_dir)?;
            store.add_subtask(&id, &text)?;
            eprintln!("Added subtask to '{id}'");
        }

        Command::Tag { id, tag } => {
            let mut store = Store::open(&store_dir)?;
            store.add_tag(&id, &tag)?;
            eprintln!("Tagged '{id}' with '{tag}'");
        }

        Command::Project { command } => match command {
            ProjectCommand::Add { name } => {
                let mut store = Store::open(&store_dir)?;
                store.add_project(&name)?;
                eprintln!("Added project '{name}'");
            }
            ProjectCommand::Rm { name, yes } => {
                let mut store = Store::open(&store_dir)?;
                let task_count = store.list(&name).len();
                if !yes
                    && !confirm(&format!(
                        "Remove project '{name}' and its {task_count} task(s)?"
                    ))?
                {
                    eprintln!("Aborted");
                    return Ok(());
                }
                store.remove_project(&name)?;
                eprintln!("Removed project '{name}'");
            }
            ProjectCommand::List { json } => {
                let store = Store::open(&store_dir)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(store.projects())?);
                } else {
                    print!("{}", output::format_projects(store.projects()));
                }
            }
        },

        Command::Board { project } => {
            let store = Store::open(&store_dir)?;
            let project = project.unwrap_or_else(|| DEFAULT_PROJECT.to_string());
            let tasks = store.list(&project);
            print!("{}", output::format_board(&view::kanban(&tasks)));
        }

        Command::Calendar { month, project } => {
            let store = Store::open(&store_dir)?;
            let project = project.unwrap_or_else(|| DEFAULT_PROJECT.to_string());
            let today = chrono::Local::now().date_naive();
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => (today.year(), today.month()),
            };
            let tasks = store.list(&project);
            let grid = view::calendar(&tasks, year, month, today)?;
            print!("{}", output::format_calendar(&grid));
        }

        Command::Login { email, password } => {
            let session = auth::MockAuth::default().authenticate(&email, &password)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }

        Command::Tui {
            project,
            poll_interval,
        } => {
            let store = Store::open(&store_dir)?;
            let project = project.unwrap_or_else(|| DEFAULT_PROJECT.to_string());
            tui::run(&store_dir, store, &project, poll_interval)?;
        }
    }

    Ok(())
}
