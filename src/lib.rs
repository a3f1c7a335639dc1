// resyn - PCRE-dialect regex syntax front end.
//
// A pattern string is lexed into a token stream with synthetic concat
// markers, then Pratt-parsed into an AST where every node knows the
// exact source bytes that produced it. Downstream consumers inspect
// the AST (lint, analysis) or hand the pattern to a shape-specialized
// matcher.
//
// Module map:
//   position.rs       -> byte-offset source positions
//   error.rs          -> typed parse errors
//   ast.rs            -> Op, Form, Expr, Regexp
//   lexer.rs          -> context-aware tokenizer (internal)
//   parser.rs         -> Pratt parser + options
//   format.rs         -> canonical S-expression formatter
//   pcre.rs           -> <delim>pattern<delim>mods envelope
//   matchers.rs       -> Matcher trait, suffix-literal specialization
//   reverse.rs        -> platform-AST pattern reversal (internal)
//   reverse_reader.rs -> reverse code-point iterator

pub mod ast;
pub mod error;
pub mod format;
pub mod matchers;
pub mod parser;
pub mod pcre;
pub mod position;
pub mod prelude;
pub mod reverse_reader;

mod lexer;
mod reverse;
