//! Command line definitions for the `getdone` binary.
//!
//! Priority resolution: CLI flags > env vars > defaults.

use clap::{Parser, Subcommand};
use getdone_core::{default_log_level, CategoryId, ItemId};
use std::path::PathBuf;

const DEFAULT_DB_FILE: &str = "getdone.sqlite3";

/// GetDone: categories and to-do items in a local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "getdone", version, about)]
pub struct CliArgs {
    /// Path to the SQLite database file.
    #[arg(long = "db", global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage items inside a category.
    #[command(subcommand)]
    Item(ItemCommand),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category. A random palette color is used unless `--color` is set.
    Add {
        name: String,
        /// Six hex digits, with or without a leading `#`.
        #[arg(long)]
        color: Option<String>,
    },
    /// List categories in creation order.
    List,
    /// Delete a category and all of its items.
    Delete { id: CategoryId },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// Add an item to a category.
    Add { category: CategoryId, title: String },
    /// List a category's items sorted by title.
    List {
        category: CategoryId,
        /// Keep only titles containing this text (case-insensitive).
        #[arg(long)]
        search: Option<String>,
    },
    /// Flip an item's done flag.
    Toggle { id: ItemId },
    /// Delete an item.
    Delete { id: ItemId },
}

impl CliArgs {
    /// Priority: --db flag > GETDONE_DB env var > ./getdone.sqlite3.
    pub fn resolve_db_path(&self) -> PathBuf {
        if let Some(ref path) = self.db {
            return path.clone();
        }
        std::env::var_os("GETDONE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }

    /// Priority: --log-dir flag > GETDONE_LOG_DIR env var. `None` disables logging.
    pub fn resolve_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| std::env::var_os("GETDONE_LOG_DIR").map(PathBuf::from))
    }

    /// Priority: --log-level flag > GETDONE_LOG_LEVEL env var > build default.
    pub fn resolve_log_level(&self) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        std::env::var("GETDONE_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryCommand, CliArgs, Command, ItemCommand};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_category_add_with_color() {
        let args =
            CliArgs::try_parse_from(["getdone", "category", "add", "Work", "--color", "#e8c413"])
                .unwrap();
        match args.command {
            Command::Category(CategoryCommand::Add { name, color }) => {
                assert_eq!(name, "Work");
                assert_eq!(color.as_deref(), Some("#e8c413"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_item_list_with_search_and_global_flags() {
        let args = CliArgs::try_parse_from([
            "getdone",
            "item",
            "list",
            "11111111-2222-4333-8444-555555555555",
            "--search",
            "call",
            "--json",
            "--db",
            "/tmp/todo.sqlite3",
        ])
        .unwrap();
        assert!(args.json);
        assert_eq!(args.resolve_db_path(), PathBuf::from("/tmp/todo.sqlite3"));
        assert!(matches!(
            args.command,
            Command::Item(ItemCommand::List { search: Some(ref needle), .. }) if needle == "call"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn db_path_from_env_keeps_non_utf8_bytes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/tmp/getdone-\xff.sqlite3".to_vec());
        std::env::set_var("GETDONE_DB", &raw);
        let args = CliArgs::try_parse_from(["getdone", "category", "list"]).unwrap();
        let resolved = args.resolve_db_path();
        std::env::remove_var("GETDONE_DB");

        assert_eq!(resolved, PathBuf::from(raw));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(CliArgs::try_parse_from(["getdone", "item", "toggle", "not-a-uuid"]).is_err());
    }
}
