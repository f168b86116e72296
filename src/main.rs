//! # L1t Main Entry Point
//!
//! Parses the command line, sets up logging, picks the levels to play and
//! runs them in the terminal.

use clap::Parser;
use l1t::{
    builtin_sources, discover, InputHandler, KeyBindings, L1tError, L1tResult, LevelSession,
    LevelSource, SceneManager, TerminalDisplay, TerminalInput,
};
use log::info;
use std::path::{Path, PathBuf};

/// Command line arguments for L1t.
#[derive(Parser, Debug)]
#[command(name = "l1t")]
#[command(about = "A terminal puzzle game about lasers, mirrors and statues")]
#[command(version)]
struct Args {
    /// Play a single level file
    #[arg(short, long, conflicts_with = "levels_dir")]
    file: Option<PathBuf>,

    /// Play every .l1t file in a directory
    #[arg(short, long)]
    levels_dir: Option<PathBuf>,

    /// Level to start from (1-based)
    #[arg(short, long, default_value_t = 1)]
    start: usize,

    /// Key binding file (defaults to ~/.config/l1t.conf)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the first level's frame as JSON after one beam pass and exit
    #[arg(long)]
    dump: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = l1t::config::DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> L1tResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level, args.log_file.as_deref())?;

    info!("Starting L1t v{}", l1t::VERSION);

    let sources = select_sources(&args)?;

    if args.dump {
        return dump_first(sources);
    }

    run_game(&args, sources)
}

/// Parses a `--log-level` value, rejecting anything `log` does not know.
fn parse_log_level(log_level: &str) -> L1tResult<log::LevelFilter> {
    log_level
        .parse::<log::LevelFilter>()
        .map_err(|_| L1tError::InvalidState(format!("unknown log level {:?}", log_level)))
}

/// Initializes logging at the given level, to a file when one is given.
fn initialize_logging(log_level: &str, log_file: Option<&Path>) -> L1tResult<()> {
    let level = parse_log_level(log_level)?;

    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::filter::LevelFilter;

        let level = match level {
            log::LevelFilter::Off => LevelFilter::OFF,
            log::LevelFilter::Error => LevelFilter::ERROR,
            log::LevelFilter::Warn => LevelFilter::WARN,
            log::LevelFilter::Info => LevelFilter::INFO,
            log::LevelFilter::Debug => LevelFilter::DEBUG,
            log::LevelFilter::Trace => LevelFilter::TRACE,
        };

        let builder = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false);
        match log_file {
            Some(path) => {
                let file = std::fs::File::create(path)?;
                builder
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file))
                    .init();
            }
            None => builder.with_writer(std::io::stderr).init(),
        }
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(level)
            .format_target(false)
            .parse_default_env();
        if let Some(path) = log_file {
            let file = std::fs::File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        builder.init();
    }

    Ok(())
}

/// Works out which levels to play from the command line.
fn select_sources(args: &Args) -> L1tResult<Vec<LevelSource>> {
    let mut sources = match (&args.file, &args.levels_dir) {
        (Some(path), _) => vec![LevelSource::File(path.clone())],
        (None, Some(dir)) => {
            let found = discover(dir)?;
            if found.is_empty() {
                return Err(L1tError::InvalidState(format!(
                    "no .{} files in {}",
                    l1t::config::LEVEL_FILE_EXTENSION,
                    dir.display()
                )));
            }
            found
        }
        (None, None) => builtin_sources(),
    };

    if args.start == 0 || args.start > sources.len() {
        return Err(L1tError::InvalidState(format!(
            "--start must be between 1 and {}",
            sources.len()
        )));
    }
    sources.drain(..args.start - 1);
    Ok(sources)
}

/// Loads the first level, runs one beam pass and prints the frame.
fn dump_first(sources: Vec<LevelSource>) -> L1tResult<()> {
    let source = sources
        .into_iter()
        .next()
        .ok_or_else(|| L1tError::InvalidState("no level to dump".to_string()))?;

    let mut session = LevelSession::load(source)?;
    session.run_beams();
    println!("{}", serde_json::to_string_pretty(&session.frame())?);
    Ok(())
}

/// Plays the levels in the terminal and prints a summary afterwards.
fn run_game(args: &Args, sources: Vec<LevelSource>) -> L1tResult<()> {
    let config_path = args.config.clone().unwrap_or_else(KeyBindings::default_path);
    let bindings = KeyBindings::load(&config_path)?;
    let handler = InputHandler::new(bindings);

    let display = TerminalDisplay::new(handler.bindings().help_line())?;
    let input = TerminalInput::new(handler);

    let mut manager = SceneManager::new(sources, display, input);
    let result = manager.run();
    // Restore the terminal before printing anything.
    drop(manager);

    let summary = result?;
    if summary.completed {
        println!("All levels solved. Well done!");
    } else {
        println!("Solved {} level(s).", summary.solved.len());
    }
    Ok(())
}
