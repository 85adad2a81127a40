use std::path::PathBuf;

use annot_compiler::{Config, Error, compile};

use super::run_common::{fails, load_or_exit, report};

pub struct CheckArgs {
    pub file_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config: Config,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let script = load_or_exit(args.file_path.as_deref(), args.source_text.as_deref());

    let diagnostics = match compile(&script.text, &args.config) {
        Ok(compiled) => compiled.diagnostics().clone(),
        Err(Error::CompileFailed(diagnostics)) => diagnostics,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    report(&diagnostics, &script, args.color);
    tracing::debug!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        strict = args.strict,
        "check finished"
    );

    if fails(&diagnostics, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
