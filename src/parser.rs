// parser.rs - Pratt parser over the token stream.
//
// Top-down operator precedence: a prefix handler turns the current
// token into a left expression, then infix handlers extend it while
// the next token binds tighter than the caller's level. Alternation
// and concatenation flatten into n-ary nodes as they grow; a final
// pass folds adjacent chars into `Literal` nodes and materializes
// node values.
//
// Precedence levels: `|` (1) < `Concat`/`-` (2) < postfix quantifiers
// (3). `Minus` only reaches its infix handler inside a char class,
// because the lexer only emits it there.

use smallvec::SmallVec;

use crate::ast::{Expr, Form, Op, Regexp};
use crate::error::{ErrorKind, ParseError};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::position::Position;

/// Parser configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserOptions {
    /// Disable the pass that folds adjacent `Char` nodes into
    /// `Literal` nodes.
    pub no_literals: bool,
}

/// A reusable pattern parser.
///
/// The parser may be reused across calls; its internal buffers are
/// cleared rather than reallocated. Each call returns an independently
/// owned [`Regexp`].
///
/// # Examples
///
/// ```
/// use resyn::parser::Parser;
/// use resyn::ast::Op;
///
/// let mut p = Parser::default();
/// let re = p.parse("(?P<word>x+)").unwrap();
/// assert_eq!(re.expr.op, Op::NamedCapture);
/// assert_eq!(re.expr.args[1].value, "word");
/// ```
pub struct Parser {
    lexer: Lexer,
    source: String,
    char_class: SmallVec<[Expr; 8]>,
    options: ParserOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParserOptions::default())
    }
}

impl Parser {
    pub fn new(options: ParserOptions) -> Parser {
        Parser {
            lexer: Lexer::new(),
            source: String::new(),
            char_class: SmallVec::new(),
            options,
        }
    }

    /// Parse `pattern` into a position-preserving AST.
    ///
    /// Parsing accepts everything that is syntactically well-formed in
    /// the dialect, including constructs a later validation step may
    /// reject (ill-formed ranges like `[a-\d]`, empty classes, `\x5`).
    pub fn parse(&mut self, pattern: &str) -> Result<Regexp, ParseError> {
        self.lexer.init(pattern)?;
        self.char_class.clear();
        self.source.clear();
        self.source.push_str(pattern);

        let mut expr = if pattern.is_empty() {
            Expr::new(Op::Concat, Position::default())
        } else {
            self.parse_expr(0)?
        };

        if !self.options.no_literals {
            merge_chars(&mut expr);
        }
        materialize_values(&mut expr, &self.source);

        Ok(Regexp {
            pattern: self.source.clone(),
            expr,
        })
    }

    fn parse_expr(&mut self, precedence: u8) -> Result<Expr, ParseError> {
        let tok = self.lexer.next_token();
        let mut left = self.parse_prefix(tok)?;

        while precedence < token_precedence(self.lexer.peek().kind) {
            let tok = self.lexer.next_token();
            left = self.parse_infix(left, tok)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self, tok: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        match tok.kind {
            T::Char | T::Minus => Ok(Expr::new(Op::Char, tok.pos)),
            T::Dot => Ok(Expr::new(Op::Dot, tok.pos)),
            T::Caret => Ok(Expr::new(Op::Caret, tok.pos)),
            T::Dollar => Ok(Expr::new(Op::Dollar, tok.pos)),
            T::PosixClass => Ok(Expr::new(Op::PosixClass, tok.pos)),
            T::Comment => Ok(Expr::new(Op::Comment, tok.pos)),

            T::Escape => Ok(escape_expr(Op::Escape, Op::Char, tok, 1, 0, Form::Default)),
            T::EscapeMeta => Ok(escape_expr(Op::EscapeMeta, Op::Char, tok, 1, 0, Form::Default)),
            T::EscapeOctal => Ok(escape_expr(Op::EscapeOctal, Op::String, tok, 1, 0, Form::Default)),
            T::EscapeHex => Ok(escape_expr(
                Op::EscapeHex,
                Op::String,
                tok,
                2,
                0,
                Form::EscapeHexShort,
            )),
            T::EscapeHexFull => Ok(escape_expr(
                Op::EscapeHexFull,
                Op::String,
                tok,
                3,
                1,
                Form::EscapeHexFull,
            )),
            T::EscapeUni => Ok(escape_expr(
                Op::EscapeUni,
                Op::Char,
                tok,
                2,
                0,
                Form::EscapeUniShort,
            )),
            T::EscapeUniFull => Ok(escape_expr(
                Op::EscapeUniFull,
                Op::String,
                tok,
                3,
                1,
                Form::EscapeUniFull,
            )),
            T::Q => Ok(self.quote_expr(tok)),

            T::Lbracket => self.parse_char_class(Op::CharClass, tok),
            T::LbracketCaret => self.parse_char_class(Op::NegCharClass, tok),

            T::Lparen => self.parse_capture(tok),
            T::LparenName => self.parse_named_capture(tok),
            T::LparenFlags => self.parse_group_with_flags(tok),
            T::LparenAtomic => self.parse_group_like(Op::AtomicGroup, tok),
            T::LparenPositiveLookahead => self.parse_group_like(Op::PositiveLookahead, tok),
            T::LparenNegativeLookahead => self.parse_group_like(Op::NegativeLookahead, tok),
            T::LparenPositiveLookbehind => self.parse_group_like(Op::PositiveLookbehind, tok),
            T::LparenNegativeLookbehind => self.parse_group_like(Op::NegativeLookbehind, tok),

            // A leading `|`: the left alternative is the empty regex.
            T::Pipe => {
                let left = Expr::new(Op::Concat, Position::empty_at(tok.pos.begin));
                self.parse_alt(left, tok)
            }

            _ => Err(ParseError::new(
                ErrorKind::UnexpectedToken,
                tok.pos,
                format!("unexpected token: {:?}", tok.kind),
            )),
        }
    }

    fn parse_infix(&mut self, left: Expr, tok: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        match tok.kind {
            T::Pipe => self.parse_alt(left, tok),
            T::Concat => self.parse_concat(left, tok),
            T::Minus => self.parse_minus(left, tok),
            T::Plus => Ok(postfix_plus(left, tok)),
            T::Star => Ok(postfix(Op::Star, left, tok)),
            T::Question => Ok(postfix_question(left, tok)),
            T::Repeat => Ok(postfix_repeat(left, tok)),
            _ => unreachable!("no infix handler for {:?}", tok.kind),
        }
    }

    /// `left | right`, flattened: appending to an existing `Alt`
    /// keeps the node n-ary. A missing right side (`x|`, `(x|)`)
    /// becomes an empty `Concat`.
    fn parse_alt(&mut self, mut left: Expr, tok: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        let right = match self.lexer.peek().kind {
            T::Rparen | T::None => Expr::new(Op::Concat, Position::empty_at(tok.pos.end)),
            _ => self.parse_expr(1)?,
        };
        if left.op == Op::Alt {
            left.pos.end = right.pos.end;
            left.args.push(right);
            return Ok(left);
        }
        let pos = left.pos.combine(right.pos);
        Ok(Expr::with_args(Op::Alt, pos, vec![left, right]))
    }

    fn parse_concat(&mut self, mut left: Expr, _tok: Token) -> Result<Expr, ParseError> {
        let right = self.parse_expr(2)?;
        if left.op == Op::Concat {
            left.pos.end = right.pos.end;
            left.args.push(right);
            return Ok(left);
        }
        let pos = left.pos.combine(right.pos);
        Ok(Expr::with_args(Op::Concat, pos, vec![left, right]))
    }

    /// `-` inside a char class: a range when both operands qualify,
    /// otherwise a literal hyphen (the pending left element is folded
    /// into the class as-is).
    fn parse_minus(&mut self, left: Expr, tok: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        let left_ok = matches!(
            left.op,
            Op::Char
                | Op::Escape
                | Op::EscapeMeta
                | Op::EscapeOctal
                | Op::EscapeHex
                | Op::EscapeHexFull
                | Op::EscapeUni
                | Op::EscapeUniFull
        );
        let right_ok = matches!(
            self.lexer.peek().kind,
            T::Char | T::Escape | T::EscapeMeta | T::EscapeOctal | T::EscapeHex | T::EscapeHexFull | T::Minus
        );
        if left_ok && right_ok {
            let right = self.parse_expr(2)?;
            let pos = left.pos.combine(right.pos);
            return Ok(Expr::with_args(Op::CharRange, pos, vec![left, right]));
        }
        self.char_class.push(left);
        Ok(Expr::new(Op::Char, tok.pos))
    }

    fn parse_char_class(&mut self, op: Op, tok: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        self.char_class.clear();

        // `[]` and `[^]` are accepted as empty classes here; whether
        // they are *valid* is a question for post-parse validation.
        if self.lexer.peek().kind == T::Rbracket {
            let tok2 = self.lexer.next_token();
            return Ok(Expr::new(op, tok.pos.combine(tok2.pos)));
        }
        if self.lexer.peek().kind == T::None {
            return Err(ParseError::new(
                ErrorKind::UnterminatedClass,
                tok.pos,
                "unterminated '['".to_string(),
            ));
        }

        let end_pos;
        loop {
            let element = self.parse_expr(0)?;
            self.char_class.push(element);
            let next = self.lexer.peek();
            match next.kind {
                T::Rbracket => {
                    end_pos = next.pos;
                    self.lexer.next_token();
                    break;
                }
                T::None => {
                    return Err(ParseError::new(
                        ErrorKind::UnterminatedClass,
                        tok.pos,
                        "unterminated '['".to_string(),
                    ));
                }
                _ => {}
            }
        }

        let mut result = Expr::new(op, tok.pos.combine(end_pos));
        result.args = self.char_class.drain(..).collect();
        Ok(result)
    }

    /// The body of any `(...)`-style group: empty at a `)`, an error
    /// at end of pattern, a full expression otherwise.
    fn parse_group_item(&mut self, opener: Token) -> Result<Expr, ParseError> {
        use TokenKind as T;
        match self.lexer.peek().kind {
            T::Rparen => Ok(Expr::new(
                Op::Concat,
                Position::empty_at(self.lexer.peek().pos.begin),
            )),
            T::None => Err(ParseError::new(
                ErrorKind::IncompleteGroup,
                opener.pos,
                "group token is incomplete".to_string(),
            )),
            _ => self.parse_expr(0),
        }
    }

    fn parse_capture(&mut self, tok: Token) -> Result<Expr, ParseError> {
        let body = self.parse_group_item(tok)?;
        let rparen = self.expect_rparen()?;
        Ok(Expr::with_args(
            Op::Capture,
            tok.pos.combine(rparen.pos),
            vec![body],
        ))
    }

    fn parse_group_like(&mut self, op: Op, tok: Token) -> Result<Expr, ParseError> {
        let body = self.parse_group_item(tok)?;
        let rparen = self.expect_rparen()?;
        Ok(Expr::with_args(op, tok.pos.combine(rparen.pos), vec![body]))
    }

    fn parse_named_capture(&mut self, tok: Token) -> Result<Expr, ParseError> {
        // Token text is `(?P<name>`, `(?<name>` or `(?'name'`.
        let (form, name_pos) = match self.source.as_bytes()[usize::from(tok.pos.begin) + 2] {
            b'P' => (
                Form::NamedCaptureP,
                Position::new(tok.pos.begin + 4, tok.pos.end - 1),
            ),
            b'\'' => (
                Form::NamedCaptureQuote,
                Position::new(tok.pos.begin + 3, tok.pos.end - 1),
            ),
            _ => (
                Form::NamedCaptureAngle,
                Position::new(tok.pos.begin + 3, tok.pos.end - 1),
            ),
        };
        let name = Expr::new(Op::String, name_pos);
        let body = self.parse_group_item(tok)?;
        let rparen = self.expect_rparen()?;
        let mut result = Expr::with_args(
            Op::NamedCapture,
            tok.pos.combine(rparen.pos),
            vec![body, name],
        );
        result.form = form;
        Ok(result)
    }

    fn parse_group_with_flags(&mut self, tok: Token) -> Result<Expr, ParseError> {
        // Token text is `(?flags:` (body follows) or `(?flags` (the
        // `)` is the next token).
        let text = &self.source[tok.pos.range()];

        if !text.ends_with(':') {
            let flags = Expr::new(
                Op::String,
                Position::new(tok.pos.begin + 2, tok.pos.end),
            );
            let rparen = self.expect_rparen()?;
            return Ok(Expr::with_args(
                Op::FlagOnlyGroup,
                tok.pos.combine(rparen.pos),
                vec![flags],
            ));
        }

        if text == "(?:" {
            let body = self.parse_group_item(tok)?;
            let rparen = self.expect_rparen()?;
            return Ok(Expr::with_args(
                Op::Group,
                tok.pos.combine(rparen.pos),
                vec![body],
            ));
        }

        let flags = Expr::new(
            Op::String,
            Position::new(tok.pos.begin + 2, tok.pos.end - 1),
        );
        let body = self.parse_group_item(tok)?;
        let rparen = self.expect_rparen()?;
        Ok(Expr::with_args(
            Op::GroupWithFlags,
            tok.pos.combine(rparen.pos),
            vec![body, flags],
        ))
    }

    fn expect_rparen(&mut self) -> Result<Token, ParseError> {
        let tok = self.lexer.next_token();
        if tok.kind != TokenKind::Rparen {
            return Err(ParseError::new(
                ErrorKind::UnexpectedEnd,
                tok.pos,
                format!("expected ')', found '{:?}'", tok.kind),
            ));
        }
        Ok(tok)
    }

    fn quote_expr(&self, tok: Token) -> Expr {
        let text = &self.source[tok.pos.range()];
        let closed = text.len() >= 4 && text.ends_with(r"\E");
        let body_end = if closed { tok.pos.end - 2 } else { tok.pos.end };
        let body = Expr::new(Op::String, Position::new(tok.pos.begin + 2, body_end));
        let mut e = Expr::with_args(Op::Quote, tok.pos, vec![body]);
        e.form = if closed {
            Form::QuoteClosed
        } else {
            Form::QuoteUnclosed
        };
        e
    }
}

/// An escape node: `op` wraps a payload child of kind `payload_op`
/// placed `skip` bytes after the node start and `trim` bytes before
/// its end (`\x{` prefixes, `}` suffixes).
fn escape_expr(op: Op, payload_op: Op, tok: Token, skip: u16, trim: u16, form: Form) -> Expr {
    let payload = Expr::new(
        payload_op,
        Position::new(tok.pos.begin + skip, tok.pos.end - trim),
    );
    let mut e = Expr::with_args(op, tok.pos, vec![payload]);
    e.form = form;
    e
}

fn postfix(op: Op, left: Expr, tok: Token) -> Expr {
    let pos = left.pos.combine(tok.pos);
    Expr::with_args(op, pos, vec![left])
}

/// `?` after a quantifier is the non-greedy modifier, otherwise an
/// optional quantifier.
fn postfix_question(left: Expr, tok: Token) -> Expr {
    let op = match left.op {
        Op::Plus | Op::Star | Op::Question | Op::Repeat => Op::NonGreedy,
        _ => Op::Question,
    };
    postfix(op, left, tok)
}

/// `+` after a quantifier is the possessive modifier (PCRE extension).
fn postfix_plus(left: Expr, tok: Token) -> Expr {
    let op = match left.op {
        Op::Plus | Op::Star | Op::Question | Op::Repeat => Op::Possessive,
        _ => Op::Plus,
    };
    postfix(op, left, tok)
}

fn postfix_repeat(left: Expr, tok: Token) -> Expr {
    let count = Expr::new(Op::String, tok.pos);
    let pos = left.pos.combine(tok.pos);
    Expr::with_args(Op::Repeat, pos, vec![left, count])
}

fn token_precedence(kind: TokenKind) -> u8 {
    use TokenKind as T;
    match kind {
        T::Pipe => 1,
        T::Concat | T::Minus => 2,
        T::Plus | T::Star | T::Question | T::Repeat => 3,
        _ => 0,
    }
}

/// Fold runs of two or more adjacent `Char` args of a `Concat` into
/// single `Literal` nodes; a concat left with exactly one child is
/// replaced by that child.
fn merge_chars(e: &mut Expr) {
    for arg in &mut e.args {
        merge_chars(arg);
    }
    if e.op != Op::Concat {
        return;
    }

    let has_run = e
        .args
        .windows(2)
        .any(|w| w[0].op == Op::Char && w[1].op == Op::Char);
    if has_run {
        let old = std::mem::take(&mut e.args);
        let mut run: Vec<Expr> = Vec::new();
        for arg in old {
            if arg.op == Op::Char {
                run.push(arg);
                continue;
            }
            flush_run(&mut e.args, &mut run);
            e.args.push(arg);
        }
        flush_run(&mut e.args, &mut run);
    }

    if e.args.len() == 1 {
        *e = e.args.swap_remove(0);
    }
}

fn flush_run(args: &mut Vec<Expr>, run: &mut Vec<Expr>) {
    if run.len() >= 2 {
        let pos = run[0].pos.combine(run[run.len() - 1].pos);
        args.push(Expr::with_args(Op::Literal, pos, std::mem::take(run)));
    } else {
        args.append(run);
    }
}

fn materialize_values(e: &mut Expr, source: &str) {
    e.value = source[e.pos.range()].to_string();
    for arg in &mut e.args {
        materialize_values(arg, source);
    }
}
