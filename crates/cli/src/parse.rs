//! ArgMatches → CliCommand/MetaCommand conversion.
//!
//! Translates clap's parsed arguments into the appropriate action:
//! - Index commands → `CliAction::Execute(CliCommand)`
//! - REPL meta-commands → `CliAction::Meta`

use clap::ArgMatches;
use postindex::PostQuery;
use serde_json::json;

use crate::commands::build_line_cli;

/// The result of parsing user input.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// A command to run against the index.
    Execute(CliCommand),
    /// A REPL-only meta-command.
    Meta(MetaCommand),
}

/// Commands run against the index.
#[derive(Debug, PartialEq)]
pub enum CliCommand {
    Add {
        timestamp: i64,
        tags: Vec<String>,
        content: String,
    },
    Get {
        query: PostQuery,
        no_cache: bool,
    },
    Seed {
        count: usize,
    },
    Stats,
}

/// REPL meta-commands.
#[derive(Debug, PartialEq)]
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let cmd = parts.next()?;

    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => {
            let command = parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            Some(MetaCommand::Help { command })
        }
        _ => None,
    }
}

/// Parse one REPL or pipe line.
pub fn parse_line(line: &str) -> Result<CliAction, String> {
    if let Some(meta) = check_meta_command(line) {
        return Ok(CliAction::Meta(meta));
    }
    let args = shlex::split(line).ok_or_else(|| "Unbalanced quotes".to_string())?;
    let matches = build_line_cli()
        .try_get_matches_from(args)
        .map_err(|e| e.to_string().trim_end().to_string())?;
    matches_to_action(&matches)
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "add" => parse_add(sub_matches),
        "get" => parse_get(sub_matches),
        "seed" => {
            let count = required::<usize>(sub_matches, "count")?;
            Ok(CliAction::Execute(CliCommand::Seed { count }))
        }
        "stats" => Ok(CliAction::Execute(CliCommand::Stats)),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_add(matches: &ArgMatches) -> Result<CliAction, String> {
    let timestamp = required::<i64>(matches, "timestamp")?;
    let content = required::<String>(matches, "content")?;
    Ok(CliAction::Execute(CliCommand::Add {
        timestamp,
        tags: repeated_tags(matches),
        content,
    }))
}

fn parse_get(matches: &ArgMatches) -> Result<CliAction, String> {
    let mut tags = match matches.get_one::<String>("tags") {
        Some(encoded) => decode_tags(encoded)?,
        None => Vec::new(),
    };
    tags.extend(repeated_tags(matches));

    let mut query = PostQuery::new();
    if !tags.is_empty() {
        query = query.tags(tags);
    }
    if let Some(&start) = matches.get_one::<i64>("start") {
        query = query.start(start);
    }
    if let Some(&end) = matches.get_one::<i64>("end") {
        query = query.end(end);
    }
    if let Some(&k) = matches.get_one::<usize>("k") {
        query = query.k(k);
    }
    Ok(CliAction::Execute(CliCommand::Get {
        query,
        no_cache: matches.get_flag("no-cache"),
    }))
}

// `--tags` carries the same JSON-encoded array the query string does, so it
// goes through the boundary decoder.
fn decode_tags(encoded: &str) -> Result<Vec<String>, String> {
    PostQuery::from_json(&json!({ "tags": encoded }))
        .map(|q| q.tags.unwrap_or_default())
        .map_err(|e| e.to_string())
}

fn repeated_tags(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("tag")
        .map(|tags| tags.cloned().collect())
        .unwrap_or_default()
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T, String> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", id))
}
