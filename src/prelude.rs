// prelude.rs - Convenient re-exports for common usage.
//
//! # Prelude
//!
//! ```
//! use resyn::prelude::*;
//!
//! let mut p = Parser::default();
//! let re = p.parse("x+?").unwrap();
//! assert_eq!(format_syntax(&re), "(non-greedy (+ x))");
//! ```

pub use crate::ast::{Expr, Form, Op, Regexp};
pub use crate::error::{ErrorKind, ParseError};
pub use crate::format::format_syntax;
pub use crate::matchers::{compile_matcher, Matcher, SuffixLitMatcher};
pub use crate::parser::{Parser, ParserOptions};
pub use crate::pcre::RegexpPCRE;
pub use crate::position::Position;
pub use crate::reverse_reader::ReverseReader;
