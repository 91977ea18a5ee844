use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::mpsc;

use regbook::app::App;
use regbook::dashboard;
use regbook::logging;
use regbook::storage::{
    ConfigStorage, JsonRegistrationStorage, RegistrationStorage, TomlConfigStorage,
    ensure_directories,
};
use regbook::ui;

#[derive(Parser)]
#[command(name = "regbook")]
#[command(about = "Course Registration Book TUI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show registered courses
    List {
        /// Number of entries to show (default: 10)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show registration statistics
    Stats,

    /// Remove the course at a 1-based list position
    Remove { position: usize },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { limit }) => {
            env_logger::init();
            cmd_list(limit)
        }
        Some(Commands::Stats) => {
            env_logger::init();
            cmd_stats()
        }
        Some(Commands::Remove { position }) => {
            env_logger::init();
            cmd_remove(position)
        }
        None => run_tui(),
    }
}

/// Launch the TUI (default when no subcommand is given)
fn run_tui() -> Result<()> {
    let (data_dir, config_dir) = ensure_directories()?;

    let config_storage = TomlConfigStorage::new(config_dir.join("regbook.toml"));
    let config = config_storage.load()?;

    // Logger tees to a rolling file and the flash message channel
    let (flash_tx, flash_rx) = mpsc::channel();
    logging::init_logger(
        &data_dir.join("logs"),
        Some(flash_tx),
        &config.general.file_log_level,
        &config.general.flash_log_level,
    )?;

    let storage = JsonRegistrationStorage::new(data_dir.join("registrations.json"));
    let book = storage.load()?;

    let (fetch_tx, fetch_rx) =
        dashboard::spawn_fetch_worker(config.dashboard.endpoint.clone());

    let mut app = App::new(
        book,
        Box::new(storage),
        config,
        Some(flash_rx),
        fetch_tx,
        fetch_rx,
    );

    // Initial dashboard fetch; the panel shows skeletons until it resolves
    app.refresh_dashboard();

    ui::terminal::run_app(&mut app)
}

fn open_storage() -> Result<JsonRegistrationStorage> {
    let (data_dir, _) = ensure_directories()?;
    Ok(JsonRegistrationStorage::new(
        data_dir.join("registrations.json"),
    ))
}

/// Print registered courses to stdout
fn cmd_list(limit: usize) -> Result<()> {
    let storage = open_storage()?;
    let book = storage.load()?;

    println!("Registered Courses (showing up to {limit}):");
    println!("{}", "=".repeat(72));

    for (i, reg) in book.entries().iter().take(limit).enumerate() {
        println!(
            "{:3}. {:<24} {:<18} {:<8} {}",
            i + 1,
            reg.student_name,
            reg.matric_number,
            reg.course_code,
            reg.course_title
        );
    }

    if book.is_empty() {
        println!("(no courses registered yet)");
    }

    Ok(())
}

/// Print registration statistics
fn cmd_stats() -> Result<()> {
    let storage = open_storage()?;
    let book = storage.load()?;

    let mut students: Vec<&str> = book
        .entries()
        .iter()
        .map(|r| r.student_name.as_str())
        .collect();
    students.sort_unstable();
    students.dedup();

    let mut codes: Vec<&str> = book
        .entries()
        .iter()
        .map(|r| r.course_code.as_str())
        .collect();
    codes.sort_unstable();
    codes.dedup();

    println!("Registration Statistics");
    println!("=======================");
    println!("Total registrations: {}", book.len());
    println!("Distinct students:   {}", students.len());
    println!("Distinct courses:    {}", codes.len());
    println!("Storage file:        {:?}", storage.path());

    Ok(())
}

/// Remove one course by its 1-based position in the list
fn cmd_remove(position: usize) -> Result<()> {
    if position == 0 {
        anyhow::bail!("Positions start at 1");
    }

    let storage = open_storage()?;
    let mut book = storage.load()?;

    let removed = book.remove_at(position - 1)?;
    storage.save(&book)?;

    println!(
        "Removed {} ({}) for {}",
        removed.course_code, removed.course_title, removed.student_name
    );

    Ok(())
}
