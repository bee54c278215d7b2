//! Hangman - CLI
//!
//! Console hangman with guest play and persistent accounts, plus maintenance
//! commands for the accounts file.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use hangman::{
    commands::{
        DEFAULT_BACKUP_NAME, DEFAULT_BACKUPS_KEPT, account_stats, backup_store, cleanup_backups,
        repair_store, store_info,
    },
    config::{Config, DEFAULT_LOG_LEVEL},
    interactive::{StdConsole, run_session},
    output::{
        display::interrupted_text, print_account_summary, print_backup_created,
        print_cleanup_result, print_file_info, print_repair_outcome,
    },
    storage::{AccountStore, DEFAULT_ACCOUNTS_FILE, file::hold_writes},
    wordlists::{
        DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, NoSource, WordListSource, WordPicker, WordSource,
    },
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hangman",
    about = "Console hangman with guest play and saved accounts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Accounts file (JSON array of account records)
    #[arg(short, long, global = true, env = "HANGMAN_ACCOUNTS", default_value = DEFAULT_ACCOUNTS_FILE)]
    accounts: PathBuf,

    /// Newline-separated word list to draw secret words from (default: built-in words)
    #[arg(short = 'w', long, global = true, env = "HANGMAN_WORD_LIST")]
    word_list: Option<PathBuf>,

    /// Shortest secret word to request
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Longest secret word to request
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "HANGMAN_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            accounts_file: self.accounts.clone(),
            word_list: self.word_list.clone(),
            min_word_length: self.min_length,
            max_word_length: self.max_length,
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (default)
    Play,

    /// Show lifetime statistics for an account
    Stats {
        /// Username to look up
        username: String,
    },

    /// Validate the accounts file, quarantining it if corrupted
    Repair,

    /// Show facts about the accounts file
    Info,

    /// Copy the accounts file to <stem>_<NAME>.json
    Backup {
        /// Backup name
        #[arg(default_value = DEFAULT_BACKUP_NAME)]
        name: String,
    },

    /// Remove old backups, keeping the most recent ones
    Cleanup {
        /// Number of backups to keep
        #[arg(short, long, default_value_t = DEFAULT_BACKUPS_KEPT)]
        keep: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    init_tracing(&config.log_level);
    install_interrupt_handler();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e, &config);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Ctrl+C waits out any save in progress, says goodbye, and ends the process
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        let _writes = hold_writes();
        println!("{}", interrupted_text());
        std::process::exit(0);
    });
    if let Err(e) = installed {
        warn!("could not install Ctrl+C handler: {e}");
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    config.validate().context("invalid configuration")?;
    let path = config.accounts_file.as_path();

    match command {
        Commands::Play => run_play_command(config),
        Commands::Stats { username } => {
            let store = AccountStore::load(path)
                .with_context(|| format!("could not load {}", path.display()))?;
            let summary = account_stats(&store, &username)?;
            print_account_summary(&summary);
            Ok(())
        }
        Commands::Repair => {
            let outcome = repair_store(path)?;
            print_repair_outcome(path, &outcome);
            Ok(())
        }
        Commands::Info => {
            print_file_info(path, &store_info(path));
            Ok(())
        }
        Commands::Backup { name } => {
            if name.trim().is_empty() {
                bail!("backup name cannot be empty");
            }
            let target = backup_store(path, name.trim())?;
            print_backup_created(&target);
            Ok(())
        }
        Commands::Cleanup { keep } => {
            let removed = cleanup_backups(path, keep)?;
            print_cleanup_result(&removed);
            Ok(())
        }
    }
}

fn run_play_command(config: &Config) -> Result<()> {
    println!("Initializing Hangman Game...");
    let opened = AccountStore::open(&config.accounts_file);

    if let Some(e) = &opened.load_error {
        println!(
            "{}",
            format!("Warning: could not load saved accounts ({e}).").yellow()
        );
        if let Some(backup) = &opened.quarantined {
            println!("Corrupted file backed up as: {}", backup.display());
        }
        println!("Starting with no saved accounts.");
    }

    let mut picker = build_picker(config);
    run_session(&mut StdConsole, opened.store, &mut picker).context("console input failed")?;
    Ok(())
}

/// Word list source if one is configured and readable, else fallback-only
fn build_picker(config: &Config) -> WordPicker {
    let source: Box<dyn WordSource> = match &config.word_list {
        Some(path) => match WordListSource::from_file(path) {
            Ok(source) => Box::new(source),
            Err(e) => {
                warn!("{e}; using built-in words");
                Box::new(NoSource)
            }
        },
        None => Box::new(NoSource),
    };
    WordPicker::new(source, config.min_word_length, config.max_word_length)
}

fn report_failure(error: &anyhow::Error, config: &Config) {
    eprintln!("\n{} {error:#}", "Error:".red().bold());
    eprintln!("If this problem persists, check:");
    eprintln!("- the accounts file: {}", config.accounts_file.display());
    match &config.word_list {
        Some(path) => eprintln!("- the word list: {}", path.display()),
        None => eprintln!("- the word list: none configured, built-in words in use"),
    }
}
