//! Shared logic for check and dump commands.

use std::path::Path;

use annot_compiler::Diagnostics;

use super::script_loader::{Script, load_script};

/// Load the script or exit with status 1.
pub fn load_or_exit(file_path: Option<&Path>, source_text: Option<&str>) -> Script {
    load_script(file_path, source_text).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

/// Render diagnostics to stderr, with the script's name as the path.
pub fn report(diagnostics: &Diagnostics, script: &Script, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    let rendered = diagnostics
        .printer(&script.text)
        .path(&script.name)
        .colored(color)
        .render();
    eprintln!("{rendered}");
}

/// Whether diagnostics should make the process exit with status 1.
pub fn fails(diagnostics: &Diagnostics, strict: bool) -> bool {
    diagnostics.has_errors() || (strict && diagnostics.has_warnings())
}
