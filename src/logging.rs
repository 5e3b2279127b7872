//! Parse-failure diagnostics.

use crate::error::ParseError;

/// Sink for parse-failure diagnostics.
///
/// Fire-and-forget: the parser reports each failure exactly once and
/// never consults the sink for control flow, so any implementation
/// (including a no-op) leaves parse results unchanged.
pub trait DiagnosticSink {
    fn parse_failure(&self, input: &str, error: &ParseError);
}

/// Forwards diagnostics to the `log` facade.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn parse_failure(&self, input: &str, error: &ParseError) {
        log::error!("error parsing '{input}': {error}");
    }
}

/// Install a terminal logger writing to stderr.
/// Best-effort: an already installed logger is left in place.
pub fn init(level: log::LevelFilter) {
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}
