//! Types produced by the assignment parser and consumed by the
//! downstream evaluation stage.

use serde::Serialize;

/// Comparison operator of a conditional expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CondOp {
    /// `==`
    Eq,
    /// `!=` — also synthesized for the bare form `%VAR%?...`, which
    /// tests the variable's value against the empty string
    NotEq,
}

impl CondOp {
    /// The operator's source syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            CondOp::Eq => "==",
            CondOp::NotEq => "!=",
        }
    }
}

/// A classified right-hand-side expression. Exactly one case holds per
/// parsed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Plain substitution text, stored verbatim. May contain `%VAR%`
    /// placeholders that the evaluation stage fills in later.
    Composed { text: String },

    /// `system(<command>[, <args>])` — a command description and an
    /// opaque, untrimmed argument blob. Both are interpreted by the
    /// command runner, never by this parser.
    ShellCommand { command: String, args: String },

    /// `%COND% ? %TRUE% : %FALSE%` with `COND` being `LEFT==RIGHT`,
    /// `LEFT!=RIGHT`, or a bare left operand.
    ///
    /// Operands are kept as trimmed raw text only: a nested `system(...)`
    /// or conditional on either side of the comparator is accepted as
    /// syntactically valid but compared textually at runtime. The
    /// branches are always plain variable references, not expressions.
    Conditional {
        op: CondOp,
        left: String,
        right: String,
        true_var: String,
        false_var: String,
    },
}

impl Expression {
    /// Whether this expression invokes a shell command.
    pub fn is_shell_command(&self) -> bool {
        matches!(self, Expression::ShellCommand { .. })
    }

    /// Whether this expression is a conditional test.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Expression::Conditional { .. })
    }
}

/// A fully parsed `name = expression` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// The assigned variable, `%` delimiters included (e.g. `"%Title%"`).
    pub variable: String,
    pub expression: Expression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cond_op_syntax() {
        assert_eq!(CondOp::Eq.as_str(), "==");
        assert_eq!(CondOp::NotEq.as_str(), "!=");
    }

    #[test]
    fn expression_predicates() {
        let shell = Expression::ShellCommand {
            command: "rename".into(),
            args: String::new(),
        };
        assert!(shell.is_shell_command());
        assert!(!shell.is_conditional());

        let composed = Expression::Composed { text: "%A%".into() };
        assert!(!composed.is_shell_command());
        assert!(!composed.is_conditional());
    }

    #[test]
    fn serializes_tagged() {
        let a = Assignment {
            variable: "%Out%".into(),
            expression: Expression::Composed { text: "%A%".into() },
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["variable"], "%Out%");
        assert_eq!(v["expression"]["kind"], "composed");
        assert_eq!(v["expression"]["text"], "%A%");
    }
}
