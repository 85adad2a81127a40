//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! with visibility adjusted per command via `.hide(true)`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Script file (positional, `-` for stdin).
pub fn file_path_arg() -> Arg {
    Arg::new("file_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Script file, or - for stdin")
}

/// Inline script text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .conflicts_with("file_path")
        .help("Inline script text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

pub fn no_local_checks_arg() -> Arg {
    Arg::new("no_local_checks")
        .long("no-local-checks")
        .action(ArgAction::SetTrue)
        .help("Don't check initializers of and assignments to locals")
}

pub fn no_module_checks_arg() -> Arg {
    Arg::new("no_module_checks")
        .long("no-module-checks")
        .action(ArgAction::SetTrue)
        .help("Don't check initializers of and assignments to module variables")
}

pub fn no_return_checks_arg() -> Arg {
    Arg::new("no_return_checks")
        .long("no-return-checks")
        .action(ArgAction::SetTrue)
        .help("Don't check returned values against return annotations")
}

/// Nesting limit (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("N")
        .default_value("256")
        .value_parser(value_parser!(u32).range(1..=1024))
        .help("Maximum nesting of blocks, functions and expressions")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
