//! PostIndex CLI
//!
//! Three modes:
//! - **Shell mode**: `postindex [flags] COMMAND`, runs one command and exits
//! - **REPL mode**: `postindex [flags]`, interactive prompt when stdin is a TTY
//! - **Pipe mode**: `echo "get --tag news" | postindex`, one command per stdin line
//!
//! The index lives in memory only; `--seed N` pre-populates it with random
//! posts so shell mode has something to query.

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::process;

use postindex::{EngineConfig, PostIndex};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_output, OutputMode};
use parse::{matches_to_action, CliAction};
use state::SessionState;

fn main() {
    init_tracing();

    let cli = build_cli();
    let matches = cli.get_matches();

    // Determine output mode
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let index = match open_index(&matches) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let mut state = SessionState::new(index);

    // Dispatch mode
    if matches.subcommand().is_some() {
        let exit_code = run_shell_mode(&matches, &mut state, output_mode);
        process::exit(exit_code);
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
    } else {
        let exit_code = repl::run_pipe(&mut state, output_mode);
        process::exit(exit_code);
    }
}

// Logs go to stderr so stdout stays parseable in --json and --raw modes.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_index(matches: &clap::ArgMatches) -> postindex::Result<PostIndex> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut builder = PostIndex::builder().config(config);
    if let Some(&capacity) = matches.get_one::<usize>("cache-capacity") {
        builder = builder.cache_capacity(capacity);
    }
    let index = builder.open()?;

    if let Some(&count) = matches.get_one::<usize>("preload") {
        index.seed(count)?;
    }
    Ok(index)
}

fn run_shell_mode(matches: &clap::ArgMatches, state: &mut SessionState, mode: OutputMode) -> i32 {
    match matches_to_action(matches) {
        Ok(CliAction::Execute(cmd)) => match state.execute(cmd) {
            Ok(output) => {
                let formatted = format_output(&output, mode);
                if !formatted.is_empty() {
                    println!("{}", formatted);
                }
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                1
            }
        },
        Ok(CliAction::Meta(_)) => {
            eprintln!("(error) Meta-commands are only available in REPL mode");
            1
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}
