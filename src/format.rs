// format.rs - Canonical S-expression rendering of an AST.
//
// Deterministic, value-based, and intentionally compact: atoms print
// their source text, composite ops print a parenthesized head. Used
// by the test suite and handy for debugging lint rules.

use crate::ast::{Expr, Op, Regexp};

/// Render the parsed pattern as a canonical S-expression.
///
/// ```
/// use resyn::parser::Parser;
/// use resyn::format::format_syntax;
///
/// let mut p = Parser::default();
/// assert_eq!(format_syntax(&p.parse("x+?").unwrap()), "(non-greedy (+ x))");
/// assert_eq!(format_syntax(&p.parse(".|✓|.").unwrap()), "(or . ✓ .)");
/// ```
pub fn format_syntax(re: &Regexp) -> String {
    format_expr(&re.expr)
}

fn format_expr(e: &Expr) -> String {
    match e.op {
        // Braces would collide with the concat syntax below, so bare
        // `{`/`}` chars print quoted.
        Op::Char | Op::Literal => match e.value.as_str() {
            "{" => "'{'".to_string(),
            "}" => "'}'".to_string(),
            _ => e.value.clone(),
        },
        Op::String
        | Op::Escape
        | Op::EscapeMeta
        | Op::EscapeOctal
        | Op::EscapeHex
        | Op::EscapeHexFull
        | Op::EscapeUni
        | Op::EscapeUniFull
        | Op::PosixClass => e.value.clone(),
        Op::Caret => "^".to_string(),
        Op::Dollar => "$".to_string(),
        Op::Dot => ".".to_string(),
        Op::Quote => format!("(q {})", e.value),
        Op::Comment => format!("/*{}*/", e.value),

        Op::CharRange => format!(
            "{}-{}",
            format_expr(&e.args[0]),
            format_expr(&e.args[1])
        ),
        Op::CharClass => format!("[{}]", format_args(&e.args)),
        Op::NegCharClass => format!("[^{}]", format_args(&e.args)),

        Op::Concat => format!("{{{}}}", format_args(&e.args)),
        Op::Alt => format!("(or {})", format_args(&e.args)),

        Op::Repeat => format!(
            "(repeat {} {})",
            format_expr(&e.args[0]),
            e.args[1].value
        ),
        Op::Capture => format!("(capture {})", format_expr(&e.args[0])),
        Op::NamedCapture => format!(
            "(capture {} {})",
            format_expr(&e.args[0]),
            e.args[1].value
        ),
        Op::Group => format!("(group {})", format_expr(&e.args[0])),
        Op::GroupWithFlags => format!(
            "(group {} ?{})",
            format_expr(&e.args[0]),
            e.args[1].value
        ),
        Op::FlagOnlyGroup => format!("(flags ?{})", format_expr(&e.args[0])),
        Op::AtomicGroup => format!("(atomic {})", format_expr(&e.args[0])),
        Op::PositiveLookahead => format!("(?= {})", format_expr(&e.args[0])),
        Op::NegativeLookahead => format!("(?! {})", format_expr(&e.args[0])),
        Op::PositiveLookbehind => format!("(?<= {})", format_expr(&e.args[0])),
        Op::NegativeLookbehind => format!("(?<! {})", format_expr(&e.args[0])),

        Op::Star => format!("(* {})", format_expr(&e.args[0])),
        Op::Plus => format!("(+ {})", format_expr(&e.args[0])),
        Op::Question => format!("(? {})", format_expr(&e.args[0])),
        Op::NonGreedy => format!("(non-greedy {})", format_expr(&e.args[0])),
        Op::Possessive => format!("(possessive {})", format_expr(&e.args[0])),

        Op::None => "<none>".to_string(),
    }
}

fn format_args(args: &[Expr]) -> String {
    args.iter()
        .map(format_expr)
        .collect::<Vec<_>>()
        .join(" ")
}
