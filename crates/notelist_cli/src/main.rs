//! Terminal front end for the note list.
//!
//! # Responsibility
//! - Collect titles and positions from the command line.
//! - Drive the list coordinator and print its row signals.
//!
//! Positions are 1-based in display order.

use clap::{Parser, Subcommand};
use notelist_core::db::open_db;
use notelist_core::{
    init_from_config, AppConfig, ListCoordinator, ListObserver, NoteRepository,
    SqliteNoteRepository, StorageService,
};
use std::process::ExitCode;

/// notelist - single-list note keeper backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "notelist", version, about = "Create, rename and delete notes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show all notes in display order
    List,

    /// Append a new note
    Add {
        /// Note title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Replace the title of the note at a position
    Rename {
        /// 1-based position in the list
        #[arg(value_parser = parse_position)]
        position: usize,

        /// New title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete the note at a position
    Delete {
        /// 1-based position in the list
        #[arg(value_parser = parse_position)]
        position: usize,
    },
}

struct PrintObserver;

impl ListObserver for PrintObserver {
    fn inserted(&mut self, index: usize) {
        println!("added #{}", index + 1);
    }

    fn refreshed(&mut self, index: usize) {
        println!("updated #{}", index + 1);
    }

    fn removed(&mut self, index: usize) {
        println!("deleted #{}", index + 1);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match run(&config, cli.command.unwrap_or(Command::List)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_run module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig, command: Command) -> Result<(), String> {
    let conn = open_db(&config.db_path)
        .map_err(|err| format!("cannot open `{}`: {err}", config.db_path.display()))?;
    let repo = SqliteNoteRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let storage = StorageService::new(repo);
    let mut list = ListCoordinator::new(&storage, PrintObserver);
    list.load();

    match command {
        Command::List => {}
        Command::Add { title } => {
            if list.create(&title.join(" ")).map_err(|err| err.to_string())?.is_none() {
                println!("empty title, nothing saved");
            }
        }
        Command::Rename { position, title } => {
            if !list.update(position, &title.join(" ")).map_err(|err| err.to_string())? {
                println!("empty title, nothing changed");
            }
        }
        Command::Delete { position } => {
            list.delete(position).map_err(|err| err.to_string())?;
        }
    }

    print_list(&list);
    Ok(())
}

fn print_list<R: NoteRepository, O: ListObserver>(list: &ListCoordinator<'_, R, O>) {
    if list.is_empty() {
        println!("(no notes)");
        return;
    }
    for (position, title) in list.titles().into_iter().enumerate() {
        println!("{:>3}. {title}", position + 1);
    }
}

/// Parses a 1-based position into a list index.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(format!("position must be a number starting at 1, got `{raw}`")),
    }
}
