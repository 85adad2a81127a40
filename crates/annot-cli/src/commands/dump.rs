use std::path::PathBuf;

use annot_compiler::{Config, Error, ModuleSummary, compile};

use super::run_common::{load_or_exit, report};

pub struct DumpArgs {
    pub file_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config: Config,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let script = load_or_exit(args.file_path.as_deref(), args.source_text.as_deref());

    let compiled = match compile(&script.text, &args.config) {
        Ok(compiled) => compiled,
        Err(Error::CompileFailed(diagnostics)) => {
            report(&diagnostics, &script, args.color);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Warnings don't block the dump.
    report(compiled.diagnostics(), &script, args.color);

    match render_json(compiled.summary(), args.compact) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize summary: {e}");
            std::process::exit(1);
        }
    }
}

pub fn render_json(summary: &ModuleSummary<'_>, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(summary)
    } else {
        serde_json::to_string_pretty(summary)
    }
}
