//! Test helpers for compiling snippets.

use crate::{Compiled, Config, Diagnostics, Error, compile};

/// Compile `source` with the default config, panicking on errors.
pub fn expect_compiled(source: &str) -> Compiled<'_> {
    expect_compiled_with(source, &Config::default())
}

pub fn expect_compiled_with<'src>(source: &'src str, config: &Config) -> Compiled<'src> {
    match compile(source, config) {
        Ok(compiled) => compiled,
        Err(err) => panic!("expected `{source}` to compile, got {err:?}"),
    }
}

/// Warning messages, in report order.
pub fn warnings(source: &str) -> Vec<String> {
    warnings_with(source, &Config::default())
}

pub fn warnings_with(source: &str, config: &Config) -> Vec<String> {
    expect_compiled_with(source, config)
        .diagnostics()
        .iter()
        .map(|d| d.message().to_string())
        .collect()
}

/// Filtered diagnostics of a compilation expected to fail.
pub fn expect_failed(source: &str) -> Diagnostics {
    match compile(source, &Config::default()) {
        Err(Error::CompileFailed(diagnostics)) => diagnostics,
        other => panic!("expected `{source}` to fail, got {other:?}"),
    }
}

/// Error messages of a compilation expected to fail.
pub fn errors(source: &str) -> Vec<String> {
    expect_failed(source)
        .iter()
        .filter(|d| d.severity() == crate::Severity::Error)
        .map(|d| d.message().to_string())
        .collect()
}
