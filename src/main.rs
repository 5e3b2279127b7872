//! varline CLI: parse a definition document and emit JSON.
//!
//! Reads `%VAR% = <expression>` lines from FILE (or stdin), prints the
//! parsed assignments as a JSON array on stdout, and reports skipped
//! lines on stderr.

use std::io::Read;
use std::process::ExitCode;

use varline::config::Config;
use varline::logging::{self, LogSink};
use varline::{CommandRegistry, VarParser};

fn main() -> ExitCode {
    let mut verbose = false;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            _ if arg.starts_with('-') => {
                eprintln!("unknown option: {arg}");
                print_usage();
                return ExitCode::FAILURE;
            }
            _ => path = Some(arg),
        }
    }

    logging::init(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });

    let input = match read_input(path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            log::error!("cannot read {}: {e}", path.as_deref().unwrap_or("stdin"));
            return ExitCode::FAILURE;
        }
    };

    let config = Config::load();
    let registry = CommandRegistry::from_config(&config);
    let parser = VarParser::new(&registry, &LogSink);

    let doc = parser.parse_document(&input);
    log::debug!(
        "{} assignment(s) parsed, {} line(s) skipped",
        doc.assignments.len(),
        doc.skipped.len()
    );
    for skip in &doc.skipped {
        log::warn!("line {} skipped ({})", skip.line, skip.error.code());
    }

    match serde_json::to_string_pretty(&doc.assignments) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("cannot serialize assignments: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_usage() {
    eprintln!("usage: varline [FILE] [-v|--verbose]");
    eprintln!("  parses %VAR% = <expression> lines from FILE (or stdin)");
    eprintln!("  and prints the parsed assignments as a JSON array");
}
