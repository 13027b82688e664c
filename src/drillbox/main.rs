use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use drillbox::api::{CmdResult, ConfigAction, DrillApi};
use drillbox::commands::calc::format_number;
use drillbox::config::DrillConfig;
use drillbox::error::{DrillError, Result};
use drillbox::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;

mod args;
mod cli;
use args::{BookCommands, Cli, Commands, LinkCommands};

const DATA_DIR_ENV: &str = "DRILLBOX_DATA";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        if e.is_transient() {
            eprintln!("{}", "This is temporary; retrying later may succeed.".dimmed());
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut api = init_api(cli.data_dir)?;

    let result = match cli.command {
        Commands::Book { action } => match action {
            BookCommands::Add {
                title,
                author,
                copies,
            } => api.add_book(&title, &author, copies)?,
            BookCommands::Search { query } => api.search_books(&query)?,
            BookCommands::Borrow { id } => api.borrow_book(&id)?,
            BookCommands::Return { id } => api.return_book(&id)?,
        },
        Commands::Link { action } => match action {
            LinkCommands::Shorten { url } => api.shorten(&url)?,
            LinkCommands::Open { code } => api.redirect(&code)?,
        },
        Commands::Calc { expr } => {
            let result = api.calculate(&expr.join(" "))?;
            if let Some(value) = result.value {
                println!("Result: {}", format_number(value).bold());
            }
            return Ok(());
        }
        Commands::History => api.history()?,
        Commands::Lis { values } => {
            let result = api.lis_length(&values)?;
            if let Some(length) = result.length {
                println!("LIS length: {}", length);
            }
            return Ok(());
        }
        Commands::Words { text } => api.word_frequencies(&text)?,
        Commands::Brackets { text } => api.brackets(&text)?,
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(key), None) => ConfigAction::ShowKey(key),
                (Some(key), Some(value)) => ConfigAction::Set(key, value),
            };
            api.config(action)?
        }
    };

    render(&result);
    Ok(())
}

fn init_api(flag: Option<PathBuf>) -> Result<DrillApi<FileStore>> {
    let data_dir = resolve_data_dir(flag)?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = DrillConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());
    Ok(DrillApi::new(store, data_dir, &config))
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "drillbox", "drillbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            DrillError::Store(format!(
                "Could not determine a data directory; pass --data-dir or set {}",
                DATA_DIR_ENV
            ))
        })
}

fn render(result: &CmdResult) {
    cli::print_books(&result.books);
    cli::print_links(&result.links);
    cli::print_history(&result.history);
    cli::print_words(&result.words);
    if let Some(config) = &result.config {
        cli::print_config(config);
    }
    cli::print_messages(&result.messages);
}
