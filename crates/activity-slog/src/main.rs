//! `slog` - CLI for activity-slog
//!
//! One-shot subcommands tap buttons, edit the grid and print the log; the
//! `session` subcommand keeps a logger open for an interactive loop.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use activity_slog::cli::{Cli, Command, ConfigCommand, OutputFormat};
use activity_slog::render::{self, Clock};
use activity_slog::{
    init_logging, session, ActivityLogger, Config, Console, Error, Prompter, ScriptedPrompter,
    Storage,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<Error>().is_some_and(Error::is_user_error) {
                eprintln!("slog: {e}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Validation reads its own file, so a broken default config must not stop it
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        let path = file
            .clone()
            .or_else(|| cli.config.clone())
            .unwrap_or_else(Config::default_config_path);
        return validate_config(&path);
    }

    let config = Config::load_from(cli.config.clone())?;
    let clock = Clock::from_utc_flag(config.display.utc);

    match cli.command {
        Command::Buttons(cmd) => {
            let app = open_logger(&config, ScriptedPrompter::new())?;
            let buttons = app.visible_buttons();
            match cmd.format {
                OutputFormat::Plain => print!("{}", render::buttons_text(&buttons, false)),
                OutputFormat::Json => println!("{}", render::buttons_json(&buttons)?),
            }
        }
        Command::Log(cmd) => {
            let mut app = open_logger(&config, ScriptedPrompter::new())?;
            let outcome = app.tap(&cmd.label)?;
            println!("{}", render::outcome_text(&outcome));
        }
        Command::List(cmd) => {
            let app = open_logger(&config, ScriptedPrompter::new())?;
            let limit = cmd.limit.or_else(|| config.log_limit());
            match cmd.format {
                OutputFormat::Plain => print!("{}", render::log_text(app.state(), clock, limit)),
                OutputFormat::Json => println!("{}", render::log_json(app.state(), clock, limit)?),
            }
        }
        Command::Add(cmd) => {
            let prompter: Box<dyn Prompter> = match cmd.label {
                Some(label) => Box::new(ScriptedPrompter::new().answer(label)),
                None => terminal(),
            };
            let mut app = open_logger(&config, prompter)?;
            let outcome = app.add_new_button()?;
            println!("{}", render::outcome_text(&outcome));
        }
        Command::DeleteEntry(cmd) => {
            let index = usize::try_from(cmd.position.saturating_sub(1))
                .context("log position is out of range")?;
            let mut app = open_logger(&config, confirmer(cmd.yes))?;
            let outcome = app.delete_log_entry(index)?;
            println!("{}", render::outcome_text(&outcome));
        }
        Command::DeleteButton(cmd) => {
            let mut app = open_logger(&config, confirmer(cmd.yes))?;
            app.toggle_delete_mode();
            let outcome = app.tap(&cmd.label)?;
            println!("{}", render::outcome_text(&outcome));
        }
        Command::Session => {
            let console = Console::new(std::io::stdin().lock(), std::io::stdout());
            let mut app = open_logger(&config, console)?;
            session::run(&mut app, clock, config.log_limit())?;
        }
        Command::Status(cmd) => handle_status(&config, clock, cmd.json)?,
        Command::Config(cmd) => handle_config(&config, cli.config.as_deref(), cmd)?,
    }
    Ok(())
}

fn open_logger<P: Prompter>(config: &Config, prompter: P) -> anyhow::Result<ActivityLogger<P>> {
    let storage = open_storage(config)?;
    Ok(ActivityLogger::initialize(storage, prompter, config.duplicate_policy())?)
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("cannot open store at {}", path.display()))
}

fn terminal() -> Box<dyn Prompter> {
    Box::new(Console::new(std::io::stdin().lock(), std::io::stdout()))
}

fn confirmer(yes: bool) -> Box<dyn Prompter> {
    if yes {
        Box::new(ScriptedPrompter::always_confirm())
    } else {
        terminal()
    }
}

fn handle_status(config: &Config, clock: Clock, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let state = storage.load_state()?;
    let oldest = state.log.first().map(|e| e.timestamp);
    let newest = state.log.last().map(|e| e.timestamp);

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "db_size_bytes": stats.db_size_bytes,
            "keys": stats.keys,
            "value_bytes": stats.value_bytes,
            "last_write": stats.last_write,
            "log_entries": state.log.len(),
            "oldest_entry": oldest,
            "newest_entry": newest,
            "custom_buttons": state.custom_buttons.len(),
            "hidden_defaults": state.deleted_default_buttons.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let date = |ts: Option<chrono::DateTime<chrono::Utc>>| {
            ts.map_or_else(|| "-".to_string(), |ts| clock.format_date(&ts))
        };
        println!("slog status");
        println!("-----------");
        println!("Database:        {}", storage.path().display());
        println!("Size:            {} bytes", stats.db_size_bytes);
        println!("Keys:            {} ({} bytes)", stats.keys, stats.value_bytes);
        println!(
            "Last write:      {}",
            stats
                .last_write
                .map_or_else(|| "never".to_string(), |ts| ts.to_rfc3339())
        );
        println!();
        println!("Log entries:     {}", state.log.len());
        println!("Oldest entry:    {}", date(oldest));
        println!("Newest entry:    {}", date(newest));
        println!("Custom buttons:  {}", state.custom_buttons.len());
        println!("Hidden defaults: {}", state.deleted_default_buttons.len());
    }
    Ok(())
}

fn handle_config(config: &Config, path: Option<&Path>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let log_limit = config
                    .log_limit()
                    .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Buttons]");
                println!("  Allow duplicates:   {}", config.buttons.allow_duplicates);
                println!();
                println!("[Display]");
                println!("  UTC dates:          {}", config.display.utc);
                println!("  Log limit:          {log_limit}");
            }
        }
        ConfigCommand::Path => {
            let path = path.map_or_else(Config::default_config_path, PathBuf::from);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            validate_config(&path)?;
        }
    }
    Ok(())
}

fn validate_config(path: &Path) -> anyhow::Result<()> {
    println!("Validating configuration: {}", path.display());
    if !path.exists() {
        println!("No configuration file found; defaults apply.");
        return Ok(());
    }
    Config::load_from(Some(path.to_path_buf()))
        .with_context(|| format!("{} is not valid", path.display()))?;
    println!("Configuration is valid.");
    Ok(())
}
