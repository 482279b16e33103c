//! Interactive REPL and line-by-line pipe mode.

use std::io::{self, BufRead};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::build_line_cli;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{parse_line, CliAction, MetaCommand};
use crate::state::SessionState;

const PROMPT: &str = "postindex> ";

/// What happened to one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Ok,
    Failed,
    Quit,
}

/// Run the interactive prompt until `quit` or EOF.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("(error) failed to start line editor: {}", e);
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        // a missing history file is normal on first run
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if run_line(state, line, mode) == LineOutcome::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::debug!(error = %e, "could not save REPL history");
        }
    }
}

/// Execute stdin line by line. Returns the process exit code: 1 if any
/// line failed.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let mut exit_code = 0;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match run_line(state, line, mode) {
            LineOutcome::Ok => {}
            LineOutcome::Failed => exit_code = 1,
            LineOutcome::Quit => break,
        }
    }
    exit_code
}

/// Parse and execute one line, printing its result.
pub fn run_line(state: &mut SessionState, line: &str, mode: OutputMode) -> LineOutcome {
    match parse_line(line) {
        Ok(CliAction::Execute(cmd)) => match state.execute(cmd) {
            Ok(output) => {
                let formatted = format_output(&output, mode);
                if !formatted.is_empty() {
                    println!("{}", formatted);
                }
                LineOutcome::Ok
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                LineOutcome::Failed
            }
        },
        Ok(CliAction::Meta(MetaCommand::Quit)) => LineOutcome::Quit,
        Ok(CliAction::Meta(MetaCommand::Clear)) => {
            print!("\x1b[2J\x1b[H");
            LineOutcome::Ok
        }
        Ok(CliAction::Meta(MetaCommand::Help { command })) => print_help(command.as_deref()),
        Err(e) => {
            eprintln!("(error) {}", e);
            LineOutcome::Failed
        }
    }
}

fn print_help(command: Option<&str>) -> LineOutcome {
    let mut cli = build_line_cli();
    match command {
        None => {
            println!("Commands:");
            for sub in cli.get_subcommands() {
                println!(
                    "  {:<8} {}",
                    sub.get_name(),
                    sub.get_about().map(|s| s.to_string()).unwrap_or_default()
                );
            }
            println!("  {:<8} {}", "help", "Show help, or help for one command");
            println!("  {:<8} {}", "clear", "Clear the screen");
            println!("  {:<8} {}", "quit", "Leave the REPL (also: exit)");
            LineOutcome::Ok
        }
        Some(name) => match cli.find_subcommand_mut(name) {
            Some(sub) => {
                println!("{}", sub.render_help());
                LineOutcome::Ok
            }
            None => {
                eprintln!("(error) Unknown command: {}", name);
                LineOutcome::Failed
            }
        },
    }
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".postindex_history"))
}
