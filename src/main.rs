use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use searchbar::app::App;
use searchbar::logging::init_logger;
use searchbar::storage::{ConfigStorage, TomlConfigStorage, ensure_directories};
use searchbar::ui::BuiltInTheme;
use searchbar::ui::theme::list_custom_themes;

const SAMPLE_ITEMS: &[&str] = &[
    "anyhow", "chrono", "clap", "crossterm", "env_logger", "log", "nucleo-matcher", "ratatui",
    "serde", "thiserror", "toml", "tracing-appender", "tui-input", "unicode-width",
];

#[derive(Parser)]
#[command(name = "searchbar")]
#[command(about = "Filter a list with an expandable search bar", long_about = None)]
struct Cli {
    /// Read items from a file, one per line (default: stdin when piped)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Start with the search bar expanded
    #[arg(short, long)]
    expanded: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in and custom themes
    Themes,

    /// Show the config file path, creating it with defaults if missing
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Themes) => cmd_themes(),
        Some(Commands::Config) => cmd_config(),
        None => cmd_tui(cli.file.as_deref(), cli.expanded),
    }
}

/// Launch the TUI and print the picked item, if any
fn cmd_tui(file: Option<&Path>, expanded: bool) -> Result<()> {
    let (data_dir, config_dir) = ensure_directories()?;

    let config_storage = TomlConfigStorage::new(config_dir.join("searchbar.toml"));
    let mut config = config_storage.load()?;
    config.search_bar.start_expanded |= expanded;

    // The terminal is ours while the TUI runs, so logs go to a file
    let (flash_tx, flash_rx) = mpsc::channel();
    init_logger(
        data_dir.join("searchbar.log"),
        Some(flash_tx),
        &config.general.log_level,
        &config.general.flash_level,
    )?;

    let items = load_items(file)?;
    log::info!("Starting searchbar with {} items", items.len());

    let mut app = App::new(items, config, Some(flash_rx));

    let mut terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    execute!(io::stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;

    let result = app.run(&mut terminal);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result?;

    if let Some(picked) = app.results.picked.as_deref() {
        println!("{}", picked);
    }

    Ok(())
}

/// Items from `--file`, then piped stdin, then the built-in sample list
fn load_items(file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read items from {:?}", path))?;
        return Ok(non_empty_lines(contents.lines().map(str::to_string)));
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let lines = stdin
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read items from stdin")?;
        return Ok(non_empty_lines(lines));
    }

    Ok(SAMPLE_ITEMS.iter().map(|s| s.to_string()).collect())
}

fn non_empty_lines(lines: impl IntoIterator<Item = String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// List available themes
fn cmd_themes() -> Result<()> {
    env_logger::init();

    println!("Built-in themes:");
    for theme in BuiltInTheme::all() {
        println!("  {}", theme.name());
    }

    let custom = list_custom_themes()?;
    if custom.is_empty() {
        println!("(no custom themes)");
    } else {
        println!("Custom themes:");
        for name in custom {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Print the config file location
fn cmd_config() -> Result<()> {
    env_logger::init();

    let (_, config_dir) = ensure_directories()?;
    let config_storage = TomlConfigStorage::new(config_dir.join("searchbar.toml"));
    let config = config_storage.load()?;

    println!("Config file: {}", config_storage.path().display());
    println!("Theme: {}", config.general.theme);
    println!("Expanded width: {}", config.search_bar.expanded_width);

    Ok(())
}
