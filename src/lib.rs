//! varline: a parser for `%VAR%` substitution-rule assignment lines.
//!
//! One line of text such as `%TITLE% = %EPISODE%`,
//! `%OUT% = system(rename, %FILE%)`, or `%FLAG% = %COND%?%YES%:%NO%`
//! becomes an [`Assignment`]: the assigned variable plus a classified
//! [`Expression`] — composed substitution text, a shell-command
//! invocation, or a conditional test. The parser recognizes and
//! structures only; substitution, command execution, and conditional
//! evaluation belong to a downstream evaluation stage.
//!
//! # Architecture
//!
//! - **[`parse`](mod@parse)** — the recursive-descent parser: assignment
//!   split, ordered expression probes, space trimming, reference
//!   validation.
//! - **[`command`]** — `varcmd: <name>` descriptor validation: the
//!   collaborator trait plus the config-driven
//!   [`CommandRegistry`](command::CommandRegistry).
//! - **[`config`]** — embedded defaults + user overlay merge.
//! - **[`error`]** — the typed parse-failure taxonomy.
//! - **[`logging`]** — diagnostic sink trait with a `log`-facade default.

/// Command-specification parsing: trait seam and config-driven registry.
pub mod command;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Typed parse failures.
pub mod error;
/// Diagnostic sink trait, `log` forwarding, terminal logger setup.
pub mod logging;
/// The assignment parser: entry point, recognizers, text utilities.
pub mod parse;

pub use command::{CommandRegistry, CommandSpecParser};
pub use error::ParseError;
pub use parse::{Assignment, CondOp, Expression, ParsedDocument, SkippedLine, VarParser};

use logging::LogSink;

/// Parse one assignment line with the default command registry and the
/// `log`-facade diagnostic sink.
///
/// This is the main entry point for tests and simple usage. To restrict
/// the commands permitted in `system(...)` expressions or to capture
/// diagnostics, build a [`VarParser`] with your own collaborators.
pub fn parse(line: &str) -> Result<Assignment, ParseError> {
    let config = config::Config::default_config();
    let registry = CommandRegistry::from_config(&config);
    VarParser::new(&registry, &LogSink).parse(line)
}
