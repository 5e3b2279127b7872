//! Expression recognizers: an ordered chain of syntactic probes, first
//! match wins. There is no backtracking — once a probe matches, a failure
//! in the delegated recognizer is final and never falls through to a
//! different expression kind.

use crate::command::CommandSpecParser;
use crate::error::ParseError;
use crate::parse::text::{is_variable_reference, strip_spaces};
use crate::parse::types::{CondOp, Expression};

/// Classify the right-hand side of an assignment.
///
/// The input is space-trimmed once, then probed in order: the `system`
/// keyword at position 0 selects the shell-command recognizer; a leading
/// `%` with a `?` before the first `:` selects the conditional
/// recognizer; everything else is composed substitution text. The
/// composed fallback never fails.
pub(crate) fn recognize(
    text: &str,
    commands: &dyn CommandSpecParser,
) -> Result<Expression, ParseError> {
    let text = if text.is_empty() { text } else { strip_spaces(text) };

    if text.starts_with("system") {
        return recognize_shell_command(text, commands);
    }

    if text.starts_with('%')
        && let (Some(query), Some(colon)) = (text.find('?'), text.find(':'))
        && colon > query
    {
        return recognize_conditional(text, commands);
    }

    Ok(Expression::Composed {
        text: text.to_string(),
    })
}

/// Recognize `system( <cmd> [, <args>] )`.
///
/// The command name is the trimmed text between the first `(` and the
/// first `,` (or the last `)` when there is no comma); everything after
/// the comma is the raw argument blob, passed through untrimmed. The name
/// is validated by the command-specification collaborator via a
/// `varcmd: <name>` descriptor.
fn recognize_shell_command(
    text: &str,
    commands: &dyn CommandSpecParser,
) -> Result<Expression, ParseError> {
    let (Some(open), Some(close)) = (text.find('('), text.rfind(')')) else {
        return Err(ParseError::MalformedShellCommand {
            input: text.to_string(),
        });
    };
    if close < open {
        return Err(ParseError::MalformedShellCommand {
            input: text.to_string(),
        });
    }

    let interior = &text[open + 1..close];
    let (name, args) = match interior.find(',') {
        Some(comma) => (&interior[..comma], &interior[comma + 1..]),
        None => (interior, ""),
    };
    let command = if name.is_empty() { name } else { strip_spaces(name) };

    let descriptor = format!("varcmd: {command}");
    if !commands.accepts(&descriptor) {
        return Err(ParseError::InvalidCommandSpec {
            command: command.to_string(),
        });
    }

    Ok(Expression::ShellCommand {
        command: command.to_string(),
        args: args.to_string(),
    })
}

/// Recognize `%COND% ? TRUEVAR : FALSEVAR`.
fn recognize_conditional(
    text: &str,
    commands: &dyn CommandSpecParser,
) -> Result<Expression, ParseError> {
    let malformed = || ParseError::MalformedCondition {
        input: text.to_string(),
    };

    let Some((cond_raw, rest)) = text.split_once('?') else {
        return Err(malformed());
    };

    // A bare condition means "value is non-empty": synthesize an
    // inequality test against the empty string.
    let has_eq = cond_raw.contains("==");
    let has_neq = cond_raw.contains("!=");
    let cond = if has_eq || has_neq {
        cond_raw.to_string()
    } else {
        format!("{cond_raw}!=")
    };
    let op = if has_eq { CondOp::Eq } else { CondOp::NotEq };

    // When both comparators occur, the split happens at `!=`.
    let Some(op_pos) = cond.find("!=").or_else(|| cond.find("==")) else {
        return Err(malformed());
    };
    let left = &cond[..op_pos];
    let right = &cond[op_pos + 2..];

    // Each operand must parse as *some* expression, but the structured
    // result is discarded: only the trimmed raw text is kept, and the
    // comparison is evaluated against literal/substituted text at
    // runtime.
    recognize(left, commands).map_err(|_| malformed())?;
    recognize(right, commands).map_err(|_| malformed())?;

    let Some((true_part, false_part)) = rest.split_once(':') else {
        return Err(ParseError::MissingElseBranch {
            input: text.to_string(),
        });
    };
    for branch in [true_part, false_part] {
        if !is_variable_reference(branch) {
            return Err(ParseError::InvalidBranchVariable {
                branch: branch.to_string(),
            });
        }
    }

    Ok(Expression::Conditional {
        op,
        left: strip_spaces(left).to_string(),
        right: if right.is_empty() {
            String::new()
        } else {
            strip_spaces(right).to_string()
        },
        true_var: strip_spaces(true_part).to_string(),
        false_var: strip_spaces(false_part).to_string(),
    })
}
