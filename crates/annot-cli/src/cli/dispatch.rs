//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap,
//! pulling only the fields a command uses (hidden unified flags are ignored).

use std::path::PathBuf;

use annot_compiler::Config;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;

/// Check toggles shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParams {
    pub local_checks: bool,
    pub module_checks: bool,
    pub return_checks: bool,
    pub recursion_limit: u32,
}

impl ConfigParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            local_checks: !m.get_flag("no_local_checks"),
            module_checks: !m.get_flag("no_module_checks"),
            return_checks: !m.get_flag("no_return_checks"),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied().unwrap_or(256),
        }
    }
}

impl From<ConfigParams> for Config {
    fn from(p: ConfigParams) -> Self {
        Config::new()
            .check_locals(p.local_checks)
            .check_module_variables(p.module_checks)
            .check_returns(p.return_checks)
            .recursion_limit(p.recursion_limit)
    }
}

pub struct CheckParams {
    pub file_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config: ConfigParams,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file_path: m.get_one::<PathBuf>("file_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            config: ConfigParams::from_matches(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            file_path: p.file_path,
            source_text: p.source_text,
            config: p.config.into(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub file_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config: ConfigParams,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: strict is parsed but not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file_path: m.get_one::<PathBuf>("file_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            config: ConfigParams::from_matches(m),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            file_path: p.file_path,
            source_text: p.source_text,
            config: p.config.into(),
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

/// Number of `-v` flags given anywhere on the command line.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_one::<u8>("verbose").copied().unwrap_or(0)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
