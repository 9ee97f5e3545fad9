//! Go statement values and their text rendering.
//!
//! The conversion synthesizer builds [`Stmt`] trees; nothing in it formats
//! text. Rendering lives here and only deals with layout (tabs, braces).

use std::fmt::Write as _;

/// One Go statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `lhs = rhs`
    Assign { lhs: String, rhs: String },
    /// `names := rhs`
    Define { names: String, rhs: String },
    /// `if [init; ]cond { then } [else { otherwise }]`
    If {
        init: Option<Box<Stmt>>,
        cond: String,
        then: Vec<Stmt>,
        otherwise: Vec<Stmt>,
    },
    /// `return expr`
    Return(String),
}

impl Stmt {
    pub fn assign(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Stmt::Assign {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn define(names: impl Into<String>, rhs: impl Into<String>) -> Self {
        Stmt::Define {
            names: names.into(),
            rhs: rhs.into(),
        }
    }

    pub fn if_then(cond: impl Into<String>, then: Vec<Stmt>) -> Self {
        Stmt::If {
            init: None,
            cond: cond.into(),
            then,
            otherwise: Vec::new(),
        }
    }

    pub fn ret(expr: impl Into<String>) -> Self {
        Stmt::Return(expr.into())
    }

    /// `if err != nil { return err }`
    pub fn return_if_err() -> Self {
        Stmt::if_then("err != nil", vec![Stmt::ret("err")])
    }

    /// Attach an init statement to an `If`. No effect on other statements.
    pub fn with_init(self, init: Stmt) -> Self {
        match self {
            Stmt::If {
                cond,
                then,
                otherwise,
                ..
            } => Stmt::If {
                init: Some(Box::new(init)),
                cond,
                then,
                otherwise,
            },
            other => other,
        }
    }

    /// Attach an else branch to an `If`. No effect on other statements.
    pub fn with_else(self, otherwise: Vec<Stmt>) -> Self {
        match self {
            Stmt::If {
                init, cond, then, ..
            } => Stmt::If {
                init,
                cond,
                then,
                otherwise,
            },
            other => other,
        }
    }

    /// Render as a single-line statement, for `if` init clauses.
    fn inline(&self) -> String {
        match self {
            Stmt::Assign { lhs, rhs } => format!("{} = {}", lhs, rhs),
            Stmt::Define { names, rhs } => format!("{} := {}", names, rhs),
            Stmt::Return(expr) => format!("return {}", expr),
            Stmt::If { cond, .. } => format!("if {} {{ ... }}", cond),
        }
    }

    /// Append this statement to `out`, indented with `depth` tabs.
    pub fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        match self {
            Stmt::If {
                init,
                cond,
                then,
                otherwise,
            } => {
                match init {
                    Some(init) => {
                        let _ = writeln!(out, "{}if {}; {} {{", indent, init.inline(), cond);
                    }
                    None => {
                        let _ = writeln!(out, "{}if {} {{", indent, cond);
                    }
                }
                render_block(then, out, depth + 1);
                if otherwise.is_empty() {
                    let _ = writeln!(out, "{}}}", indent);
                } else {
                    let _ = writeln!(out, "{}}} else {{", indent);
                    render_block(otherwise, out, depth + 1);
                    let _ = writeln!(out, "{}}}", indent);
                }
            }
            other => {
                let _ = writeln!(out, "{}{}", indent, other.inline());
            }
        }
    }
}

/// Append every statement to `out`.
pub fn render_block(stmts: &[Stmt], out: &mut String, depth: usize) {
    for stmt in stmts {
        stmt.render_into(out, depth);
    }
}

/// Render statements to a new string.
pub fn render(stmts: &[Stmt], depth: usize) -> String {
    let mut out = String::new();
    render_block(stmts, &mut out, depth);
    out
}

/// Quote `s` as a Go interpreted string literal.
pub fn go_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_assign() {
        let text = render(&[Stmt::assign("model.Id", "logic.Id")], 1);
        assert_eq!(text, "\tmodel.Id = logic.Id\n");
    }

    #[test]
    fn test_render_if_else() {
        let stmt = Stmt::if_then("model.Age.Valid", vec![Stmt::assign("logic.Age", "1")])
            .with_else(vec![Stmt::assign("logic.Age", "0")]);
        let expected = "\
\tif model.Age.Valid {
\t\tlogic.Age = 1
\t} else {
\t\tlogic.Age = 0
\t}
";
        assert_eq!(render(&[stmt], 1), expected);
    }

    #[test]
    fn test_render_if_with_init() {
        let stmt = Stmt::if_then("err != nil", vec![Stmt::ret("err")])
            .with_init(Stmt::define("v, err", "strconv.ParseFloat(s, 64)"));
        let expected = "\
if v, err := strconv.ParseFloat(s, 64); err != nil {
\treturn err
}
";
        assert_eq!(render(&[stmt], 0), expected);
    }

    #[test]
    fn test_with_else_ignores_non_if() {
        let stmt = Stmt::ret("nil").with_else(vec![Stmt::ret("err")]);
        assert_eq!(stmt, Stmt::ret("nil"));
    }

    #[test]
    fn test_go_string_literal() {
        assert_eq!(go_string_literal("amount"), "\"amount\"");
        assert_eq!(go_string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(go_string_literal("x\ny"), "\"x\\ny\"");
        assert_eq!(go_string_literal("\u{1}"), "\"\\x01\"");
    }
}
