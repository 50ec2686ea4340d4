use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use services::{AlwaysConfirm, Confirm, StepProgressStore, load_guide};
use storage::{JsonFileStore, ProgressRepository};

mod logging;
mod render;
mod walk;

const DEFAULT_STORE: &str = ".stepwise/progress.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug)]
enum ArgsError {
    MissingGuide,
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStep { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingGuide => write!(f, "a guide file is required"),
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStep { raw } => write!(f, "invalid step number: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  stepwise <guide.json> [--store <path>] [--yes] [--log <level>] [command]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status           show progress and the step checklist (default)");
    eprintln!("  toggle <n>       toggle step n (1-based)");
    eprintln!("  complete-all     mark every step complete");
    eprintln!("  reset            clear progress (asks first unless --yes)");
    eprintln!("  walk             step through the guide interactively");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store {DEFAULT_STORE}");
    eprintln!("  --log {DEFAULT_LOG_LEVEL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STEPWISE_STORE, STEPWISE_LOG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Status,
    /// 0-based index; parsed from a 1-based step number.
    Toggle(usize),
    CompleteAll,
    Reset,
    Walk,
}

#[derive(Debug)]
struct Args {
    guide_path: PathBuf,
    store_path: PathBuf,
    log_level: String,
    assume_yes: bool,
    command: Command,
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut store_path = env("STEPWISE_STORE")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from);
        let mut log_level = env("STEPWISE_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());
        let mut assume_yes = false;
        let mut positionals = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => store_path = PathBuf::from(require_value(&mut args, "--store")?),
                "--log" => log_level = require_value(&mut args, "--log")?,
                "--yes" | "-y" => assume_yes = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positionals.push(arg),
            }
        }

        let mut positionals = positionals.into_iter();
        let guide_path: PathBuf = positionals.next().ok_or(ArgsError::MissingGuide)?.into();
        let command = match positionals.next().as_deref() {
            None | Some("status") => Command::Status,
            Some("toggle") => {
                let raw = positionals.next().ok_or(ArgsError::MissingValue { flag: "toggle" })?;
                let number: usize = raw
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ArgsError::InvalidStep { raw: raw.clone() })?;
                Command::Toggle(number - 1)
            }
            Some("complete-all") => Command::CompleteAll,
            Some("reset") => Command::Reset,
            Some("walk") => Command::Walk,
            Some(other) => return Err(ArgsError::UnknownArg(other.to_owned())),
        };
        if let Some(extra) = positionals.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Parsed::Run(Self {
            guide_path,
            store_path,
            log_level,
            assume_yes,
            command,
        }))
    }
}

fn read_stdin_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Yes/no prompt on the terminal. End of input counts as "no".
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        matches!(
            read_stdin_line().map(|line| line.map(|l| l.trim().to_ascii_lowercase())),
            Ok(Some(answer)) if answer == "y" || answer == "yes"
        )
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    logging::init_logging(&args.log_level);
    tracing::debug!(guide = %args.guide_path.display(), store = %args.store_path.display(), "starting");

    let guide = load_guide(&args.guide_path)?;
    let repo = ProgressRepository::new(Arc::new(JsonFileStore::open(&args.store_path)?));
    let mut store = if args.assume_yes {
        StepProgressStore::new(guide, repo, AlwaysConfirm)
    } else {
        StepProgressStore::new(guide, repo, TerminalConfirm)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Status => {}
        Command::Toggle(index) => {
            if !store.toggle_step(index) {
                writeln!(
                    out,
                    "step {} does not exist (guide has {} steps)",
                    index + 1,
                    store.guide().len()
                )?;
            }
        }
        Command::CompleteAll => store.mark_all_complete(),
        Command::Reset => {
            if !store.reset_progress() {
                writeln!(out, "Reset cancelled.")?;
            }
        }
        Command::Walk => return Ok(walk::run(&mut store, read_stdin_line, &mut out)?),
    }

    write!(out, "{}", render::summary(&store))?;
    write!(out, "{}", render::checklist(&store))?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // Binary glue: report once and bail.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
