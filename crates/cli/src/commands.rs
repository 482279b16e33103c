//! Clap command tree.
//!
//! The same tree parses process arguments (shell mode) and, with
//! `no_binary_name`, each line typed into the REPL or piped on stdin.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("postindex")
        .about("In-memory index of timestamped, tagged posts")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Load engine settings from a TOML file"),
        )
        .arg(
            Arg::new("cache-capacity")
                .long("cache-capacity")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Maximum memoized queries (0 disables the cache)"),
        )
        .arg(
            Arg::new("preload")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Pre-populate with N random posts"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .action(ArgAction::SetTrue)
                .help("Print bare values without decoration"),
        )
        .subcommand(add_command())
        .subcommand(get_command())
        .subcommand(
            Command::new("seed")
                .about("Insert random posts dated within the last year")
                .arg(
                    Arg::new("count")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("stats").about("Show post count and cache counters"))
}

/// Command used for lines read in REPL and pipe mode.
pub fn build_line_cli() -> Command {
    build_cli()
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
}

fn add_command() -> Command {
    Command::new("add")
        .about("Add a post")
        .arg(
            Arg::new("timestamp")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Post time in seconds"),
        )
        .arg(Arg::new("content").required(true).help("Post body"))
        .arg(tag_arg())
}

fn get_command() -> Command {
    Command::new("get")
        .about("Most recent posts matching any tag within a time range")
        .arg(tag_arg())
        .arg(
            Arg::new("tags")
                .long("tags")
                .value_name("JSON")
                .help("Tags as a JSON array, e.g. '[\"sports\",\"news\"]'"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("TS")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Earliest timestamp, inclusive"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("TS")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Latest timestamp, inclusive"),
        )
        .arg(
            Arg::new("k")
                .short('k')
                .long("limit")
                .value_name("K")
                .value_parser(value_parser!(usize))
                .help("Maximum posts to return (default 10)"),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .action(ArgAction::SetTrue)
                .help("Bypass the query cache"),
        )
}

fn tag_arg() -> Arg {
    Arg::new("tag")
        .long("tag")
        .short('t')
        .value_name("TAG")
        .action(ArgAction::Append)
        .help("Tag (repeatable)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_consistent() {
        build_cli().debug_assert();
        build_line_cli().debug_assert();
    }
}
