// pcre.rs - PCRE `<delim>pattern<delim>modifiers` envelope.
//
// The envelope wraps a pattern body in a delimiter pair plus trailing
// modifier letters, `/foo/i` being the common spelling. Any ASCII
// byte that is neither alphanumeric nor whitespace may delimit;
// bracket-style openers pair with their closing counterpart.

use crate::ast::Regexp;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::position::Position;

/// A PCRE-style pattern: delimiter pair, modifiers, parsed body.
#[derive(Clone, Debug)]
pub struct RegexpPCRE {
    /// Opening and closing delimiter bytes. Equal except for
    /// bracket-style delimiters (`{}`, `[]`, `()`, `<>`).
    pub delim: [u8; 2],
    /// The modifier letters after the closing delimiter, verbatim.
    pub modifiers: String,
    /// The parsed pattern body; positions are relative to the body,
    /// not the enclosing source.
    pub re: Regexp,
}

impl Parser {
    /// Parse a PCRE envelope such as `#hello#` or `{pat}smi`.
    ///
    /// The closing delimiter is the *last* occurrence of the closing
    /// byte, which lets the delimiter recur inside the body:
    /// `/a/b/x` has the body `a/b` and modifiers `x`.
    pub fn parse_pcre(&mut self, source: &str) -> Result<RegexpPCRE, ParseError> {
        let first = match source.chars().next() {
            Some(c) => c,
            None => {
                return Err(ParseError::new(
                    ErrorKind::InvalidDelimiter,
                    Position::default(),
                    "empty pattern string".to_string(),
                ));
            }
        };
        if is_space(first) {
            return Err(ParseError::new(
                ErrorKind::InvalidDelimiter,
                Position::new(0, 1),
                "whitespace is not a valid delimiter".to_string(),
            ));
        }
        if first.is_ascii_alphanumeric() || !first.is_ascii() {
            return Err(ParseError::new(
                ErrorKind::InvalidDelimiter,
                Position::new(0, 1),
                format!("'{first}' is not a valid delimiter"),
            ));
        }

        let open = first as u8;
        let close = closing_delim(open);
        let end = match source.rfind(close as char) {
            Some(j) if j > 0 => j,
            _ => {
                return Err(ParseError::new(
                    ErrorKind::MissingDelimiter,
                    Position::new(0, 1),
                    format!("can't find '{}' ending delimiter", close as char),
                ));
            }
        };

        let re = self.parse(&source[1..end])?;
        Ok(RegexpPCRE {
            delim: [open, close],
            modifiers: source[end + 1..].to_string(),
            re,
        })
    }
}

fn closing_delim(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        b'<' => b'>',
        other => other,
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_pcre(source: &str) -> RegexpPCRE {
        Parser::default()
            .parse_pcre(source)
            .unwrap_or_else(|e| panic!("parse_pcre({source:?}): {e}"))
    }

    fn parse_pcre_err(source: &str) -> ParseError {
        Parser::default()
            .parse_pcre(source)
            .expect_err("parse_pcre should fail")
    }

    #[test]
    fn envelopes() {
        let tests: &[(&str, &str, &str, &str)] = &[
            // source, pattern, delim, modifiers
            ("@@", "", "@@", ""),
            ("//i", "", "//", "i"),
            ("#hello#", "hello", "##", ""),
            ("{pcre pattern}smi", "pcre pattern", "{}", "smi"),
            ("<an[o]ther (example)!>ms", "an[o]ther (example)!", "<>", "ms"),
            ("/a/b/x", "a/b", "//", "x"),
        ];

        for &(source, pattern, delim, modifiers) in tests {
            let pcre = parse_pcre(source);
            assert_eq!(pcre.re.pattern, pattern, "pattern of {source:?}");
            let have_delim: String = pcre.delim.iter().map(|&b| b as char).collect();
            assert_eq!(have_delim, delim, "delim of {source:?}");
            assert_eq!(pcre.modifiers, modifiers, "modifiers of {source:?}");
        }
    }

    #[test]
    fn envelope_errors() {
        assert_eq!(parse_pcre_err("").to_string(), "empty pattern string");
        assert_eq!(
            parse_pcre_err(" aa ").to_string(),
            "whitespace is not a valid delimiter"
        );
        assert_eq!(
            parse_pcre_err("abc").to_string(),
            "'a' is not a valid delimiter"
        );
        assert_eq!(
            parse_pcre_err("1x1").to_string(),
            "'1' is not a valid delimiter"
        );
        assert_eq!(
            parse_pcre_err("#foo").to_string(),
            "can't find '#' ending delimiter"
        );
        assert_eq!(
            parse_pcre_err("{foo").to_string(),
            "can't find '}' ending delimiter"
        );
        assert_eq!(parse_pcre_err("").kind(), ErrorKind::InvalidDelimiter);
        assert_eq!(parse_pcre_err("#foo").kind(), ErrorKind::MissingDelimiter);
    }

    #[test]
    fn body_parse_errors_propagate() {
        let err = Parser::default().parse_pcre("#[abc#").expect_err("bad body");
        assert_eq!(err.to_string(), "unterminated '['");
    }
}
