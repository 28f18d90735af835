//! `getdone` command line front end.
//!
//! # Responsibility
//! - Open the store once, run one command through `TodoService`, close it.
//! - Render results as plain text or JSON.
//!
//! Exit codes: 0 success, 1 command failure, 2 startup failure.

mod cli;

use clap::Parser;
use cli::{CategoryCommand, CliArgs, Command, ItemCommand};
use getdone_core::{
    core_version, init_logging, Category, Item, SqliteStore, TodoService, TodoServiceError,
    TodoStore,
};
use log::info;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

const EXIT_OK: u8 = 0;
const EXIT_COMMAND_FAILED: u8 = 1;
const EXIT_STARTUP_FAILED: u8 = 2;

#[derive(Debug)]
enum CliError {
    Service(TodoServiceError),
    Output(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to render output: {err}"),
        }
    }
}

impl From<TodoServiceError> for CliError {
    fn from(value: TodoServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Some(log_dir) = args.resolve_log_dir() {
        if let Err(err) = init_logging(&args.resolve_log_level(), &log_dir) {
            eprintln!("getdone: cannot initialize logging: {err}");
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    }
    info!("event=cli_start module=cli status=ok version={}", core_version());

    let db_path = args.resolve_db_path();
    let store = match SqliteStore::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!(
                "getdone: cannot open store at `{}`: {err}",
                db_path.display()
            );
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    };

    let outcome = run(&TodoService::new(&store), &args.command, args.json);

    if let Err(err) = store.close() {
        eprintln!("getdone: failed to close store: {err}");
    }

    if let Err(ref err) = outcome {
        eprintln!("getdone: {err}");
    }
    ExitCode::from(exit_status(&outcome))
}

fn exit_status(outcome: &Result<(), CliError>) -> u8 {
    match outcome {
        Ok(()) => EXIT_OK,
        Err(_) => EXIT_COMMAND_FAILED,
    }
}

fn run<S: TodoStore>(
    service: &TodoService<S>,
    command: &Command,
    json: bool,
) -> Result<(), CliError> {
    match command {
        Command::Category(CategoryCommand::Add { name, color }) => {
            let category = service.create_category(name, color.as_deref())?;
            emit(json, &category, || print_category(&category))
        }
        Command::Category(CategoryCommand::List) => {
            let categories = service.list_categories()?;
            emit(json, &categories, || {
                if categories.is_empty() {
                    println!("No categories added yet");
                }
                categories.iter().for_each(print_category);
            })
        }
        Command::Category(CategoryCommand::Delete { id }) => {
            service.delete_category(*id)?;
            emit(json, &serde_json::json!({ "deleted": id }), || {
                println!("deleted category {id}")
            })
        }
        Command::Item(ItemCommand::Add { category, title }) => {
            let item = service.create_item(*category, title)?;
            emit(json, &item, || print_item(&item))
        }
        Command::Item(ItemCommand::List { category, search }) => {
            let items = service.list_items(*category, search.as_deref())?;
            emit(json, &items, || {
                if items.is_empty() {
                    println!("No items");
                }
                items.iter().for_each(print_item);
            })
        }
        Command::Item(ItemCommand::Toggle { id }) => {
            let item = service.toggle_item(*id)?;
            emit(json, &item, || print_item(&item))
        }
        Command::Item(ItemCommand::Delete { id }) => {
            service.delete_item(*id)?;
            emit(json, &serde_json::json!({ "deleted": id }), || {
                println!("deleted item {id}")
            })
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, plain: impl FnOnce()) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain();
    }
    Ok(())
}

fn print_category(category: &Category) {
    println!(
        "{}  #{}  {}  ({}/{} open)",
        category.id,
        category.color_tag,
        category.name,
        category.open_item_count(),
        category.items.len()
    );
}

fn print_item(item: &Item) {
    let mark = if item.done { "x" } else { " " };
    println!("{}  [{mark}] {}", item.id, item.title);
}
