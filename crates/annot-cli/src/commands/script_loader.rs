//! Loading the script to compile from a file, stdin, or inline text.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Display name used for inline scripts in diagnostics.
pub const INLINE_NAME: &str = "<inline>";
pub const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("script is required: use a positional argument, - for stdin, or -s/--source")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Shown as the path in rendered diagnostics.
    pub name: String,
    pub text: String,
}

pub fn load_script(file_path: Option<&Path>, source_text: Option<&str>) -> Result<Script, LoadError> {
    if let Some(text) = source_text {
        return Ok(Script {
            name: INLINE_NAME.to_owned(),
            text: text.to_owned(),
        });
    }

    match file_path {
        Some(path) if path.as_os_str() == "-" => load_stdin(),
        Some(path) => load_file(path),
        None => Err(LoadError::Missing),
    }
}

fn load_stdin() -> Result<Script, LoadError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(LoadError::Stdin)?;
    Ok(Script {
        name: STDIN_NAME.to_owned(),
        text,
    })
}

fn load_file(path: &Path) -> Result<Script, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "script loaded");
    Ok(Script {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}
