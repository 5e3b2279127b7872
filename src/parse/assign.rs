//! Top-level assignment parsing: `name = expression` lines and whole
//! definition documents.

use crate::command::CommandSpecParser;
use crate::error::ParseError;
use crate::logging::DiagnosticSink;
use crate::parse::expr;
use crate::parse::text::{is_variable_reference, strip_spaces};
use crate::parse::types::Assignment;

/// Parser for `name = expression` lines.
///
/// Holds only references to its collaborators and no per-call state:
/// recognizers are pure functions returning fresh values, so one instance
/// can be reused across any number of lines (and shared across threads
/// when the collaborators are `Sync`).
pub struct VarParser<'a> {
    commands: &'a dyn CommandSpecParser,
    diag: &'a dyn DiagnosticSink,
}

impl<'a> VarParser<'a> {
    pub fn new(commands: &'a dyn CommandSpecParser, diag: &'a dyn DiagnosticSink) -> Self {
        Self { commands, diag }
    }

    /// Parse one line into an [`Assignment`].
    ///
    /// A failure is reported to the diagnostic sink exactly once, with
    /// the offending line, and then returned. No partial assignment is
    /// ever produced.
    pub fn parse(&self, line: &str) -> Result<Assignment, ParseError> {
        self.parse_assign(line)
            .inspect_err(|e| self.diag.parse_failure(line, e))
    }

    fn parse_assign(&self, line: &str) -> Result<Assignment, ParseError> {
        let malformed = || ParseError::MalformedAssignment {
            input: line.to_string(),
        };

        let Some(eq) = line.find('=') else {
            return Err(malformed());
        };
        let name = &line[..eq];
        if !is_variable_reference(name) {
            return Err(malformed());
        }

        let expression = expr::recognize(&line[eq + 1..], self.commands)?;
        Ok(Assignment {
            variable: strip_spaces(name).to_string(),
            expression,
        })
    }

    /// Parse a whole definition document, one assignment per line.
    ///
    /// Blank lines and `#` comments are ignored. A line that fails to
    /// parse is skipped and recorded; the rest of the document is still
    /// processed.
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        let mut doc = ParsedDocument::default();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self.parse(line) {
                Ok(assignment) => doc.assignments.push(assignment),
                Err(error) => doc.skipped.push(SkippedLine {
                    line: idx + 1,
                    error,
                }),
            }
        }
        doc
    }
}

/// Outcome of parsing a definition document: the assignments that parsed
/// plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<SkippedLine>,
}

/// A line that failed to parse and was skipped.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the document.
    pub line: usize,
    pub error: ParseError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::Expression;
    use std::cell::RefCell;

    struct AcceptAll;
    impl CommandSpecParser for AcceptAll {
        fn accepts(&self, _descriptor: &str) -> bool {
            true
        }
    }

    /// Records every diagnostic for assertion.
    #[derive(Default)]
    struct CaptureSink {
        records: RefCell<Vec<String>>,
    }
    impl DiagnosticSink for CaptureSink {
        fn parse_failure(&self, input: &str, error: &ParseError) {
            self.records.borrow_mut().push(format!("{input}: {}", error.code()));
        }
    }

    #[test]
    fn parses_a_composed_assignment() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let a = parser.parse("%A% = %B%").unwrap();
        assert_eq!(a.variable, "%A%");
        assert_eq!(a.expression, Expression::Composed { text: "%B%".into() });
        assert!(sink.records.borrow().is_empty());
    }

    #[test]
    fn missing_equals_fails() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let e = parser.parse("noequalsign").unwrap_err();
        assert_eq!(e.code(), "malformed-assignment");
    }

    #[test]
    fn left_side_must_be_a_reference() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        assert!(parser.parse("foo = %B%").is_err());
        assert!(parser.parse(" = %B%").is_err());
        // tabs are not trimmed, so the reference shape breaks
        assert!(parser.parse("%A%\t= %B%").is_err());
    }

    #[test]
    fn splits_at_the_first_equals() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let a = parser.parse("%A% = x == y").unwrap();
        assert_eq!(a.expression, Expression::Composed { text: "x == y".into() });
    }

    #[test]
    fn empty_right_side_is_empty_composed_text() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let a = parser.parse("%A% =").unwrap();
        assert_eq!(a.expression, Expression::Composed { text: String::new() });
    }

    #[test]
    fn each_failure_is_reported_once() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let _ = parser.parse("%A% = %B%?foo:%D%");
        let records = sink.records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], "%A% = %B%?foo:%D%: invalid-branch-variable");
    }

    #[test]
    fn parsing_is_idempotent_across_reuse() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let first = parser.parse("%A% = %B%==foo?%C%:%D%").unwrap();
        let _ = parser.parse("%X% = system(other, args)").unwrap();
        let second = parser.parse("%A% = %B%==foo?%C%:%D%").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn document_skips_comments_and_blanks() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let doc = parser.parse_document(
            "# user variables\n\n%Series% = %Title%\n   \n%Flag% = %A%?%B%:%C%\n",
        );
        assert_eq!(doc.assignments.len(), 2);
        assert!(doc.skipped.is_empty());
    }

    #[test]
    fn document_reports_bad_lines_and_keeps_going() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let doc = parser.parse_document("%A% = %B%\nbogus line\n%C% = %D%\n");
        assert_eq!(doc.assignments.len(), 2);
        assert_eq!(doc.skipped.len(), 1);
        assert_eq!(doc.skipped[0].line, 2);
        assert_eq!(doc.skipped[0].error.code(), "malformed-assignment");
        assert_eq!(sink.records.borrow().len(), 1);
    }

    #[test]
    fn document_handles_crlf_input() {
        let sink = CaptureSink::default();
        let parser = VarParser::new(&AcceptAll, &sink);
        let doc = parser.parse_document("%A% = %B%\r\n%C% = %D%\r\n");
        assert_eq!(doc.assignments.len(), 2);
        assert_eq!(doc.assignments[1].variable, "%C%");
    }
}
