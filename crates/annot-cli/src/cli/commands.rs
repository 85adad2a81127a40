//! Command builders for the CLI.
//!
//! Both commands accept the same flags so switching between them never
//! breaks a command line; flags a command ignores are hidden from `--help`.

use clap::Command;

use super::args::*;

/// Script input plus the checks to run.
fn with_compile_args(cmd: Command) -> Command {
    cmd.arg(file_path_arg())
        .arg(source_text_arg())
        .arg(no_local_checks_arg())
        .arg(no_module_checks_arg())
        .arg(no_return_checks_arg())
        .arg(recursion_limit_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("annot")
        .about("Advisory type annotation checks for scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Compile a script and report diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check a script's type annotations")
        .override_usage(
            "\
  annot check <FILE>
  annot check -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  annot check app.annot                      # report warnings and errors
  annot check app.annot --strict             # fail on warnings too
  annot check -s 'var x: Num = "one"'        # inline script
  cat app.annot | annot check -              # stdin"#,
        )
        .arg(strict_arg())
        .arg(color_arg());

    with_compile_args(cmd).arg(compact_arg().hide(true))
}

/// Print the declared types collected while compiling.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print declared types of module variables and functions as JSON")
        .override_usage(
            "\
  annot dump <FILE>
  annot dump -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  annot dump app.annot                       # pretty JSON
  annot dump app.annot --compact             # one line
  annot dump -s 'fn f(a: Num): Num {}'       # inline script"#,
        )
        .arg(compact_arg())
        .arg(color_arg());

    with_compile_args(cmd).arg(strict_arg().hide(true))
}
