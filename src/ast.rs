// ast.rs - Expression nodes for the parsed regex.
//
// All nodes share one shape: an operation tag, a source position, the
// source text covered by the node, an optional surface-form tag, and an
// ordered child list whose meaning is operation-specific. Consumers
// that only care about semantics can ignore `form`; consumers that
// reproduce the source (formatters, linters quoting the user's own
// spelling) rely on it.

use crate::position::Position;

/// Operation tag. The set is closed; downstream analysis dispatches on
/// it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// Sentinel, never produced by the parser.
    None,

    /// `^` at beginning of text or line.
    Caret,
    /// `$` at end of text or line.
    Dollar,
    /// `.` any character, possibly including newline.
    Dot,

    /// A single literal character (possibly multi-byte).
    Char,
    /// A run of two or more adjacent `Char` nodes, folded by the
    /// merging pass. Args: the original chars.
    Literal,
    /// Raw text carried by a parent node: group names, flags, repeat
    /// counts, escape payloads.
    String,

    /// A `\Q...\E` enclosed literal, e.g. `` \Q.?\E ``.
    /// The closing `\E` is not mandatory (see [`Form::QuoteUnclosed`]).
    /// Args\[0\] - quoted text (`String`).
    Quote,

    /// A single-character escape, e.g. `\d` `\a` `\n`.
    /// Args\[0\] - the escaped char.
    Escape,
    /// An escaped metacharacter, e.g. `\(` `\[` `\+`.
    /// Args\[0\] - the escaped char.
    EscapeMeta,
    /// An octal char code escape (up to 3 digits), e.g. `\123` `\12`.
    /// Args\[0\] - the digits (`String`).
    EscapeOctal,
    /// A two-digit hex char code escape, e.g. `\x7F`.
    /// A single digit is also accepted (PHP-PCRE compatibility).
    /// Args\[0\] - the digits (`String`).
    EscapeHex,
    /// A braced hex char code escape, e.g. `\x{10FFFF}` `\x{F}`.
    /// Args\[0\] - the digits (`String`).
    EscapeHexFull,
    /// A one-letter Unicode class escape, e.g. `\pS` `\PL`.
    /// Args\[0\] - the class letter.
    EscapeUni,
    /// A braced Unicode class escape, e.g. `\p{Greek}` `\p{^L}`.
    /// Args\[0\] - the class name (`String`).
    EscapeUniFull,

    /// A char class enclosed in `[]`, e.g. `[abc]` `[a-z0-9\]]`.
    /// Args: class elements (may include `CharRange` and `PosixClass`).
    CharClass,
    /// A negated char class, e.g. `[^abc]`.
    /// Args: class elements.
    NegCharClass,
    /// An inclusive char range inside a class, e.g. `0-9` `A-Z`.
    /// Args\[0\] - lower bound, Args\[1\] - upper bound.
    CharRange,
    /// A named ASCII set inside a class, e.g. `[:alpha:]` `[:^word:]`.
    PosixClass,

    /// A `{min,max}` repetition, e.g. `x{5}` `x{1,}` `x{1,4}`.
    /// Args\[0\] - repeated expression, Args\[1\] - repeat count (`String`).
    Repeat,

    /// `(re)` capturing group.
    /// Args\[0\] - enclosed expression (empty `Concat` for `()`).
    Capture,
    /// `(?P<name>re)`, `(?<name>re)` or `(?'name're)` capturing group;
    /// `form` records the spelling.
    /// Args\[0\] - enclosed expression, Args\[1\] - group name (`String`).
    NamedCapture,
    /// `(?:re)` non-capturing group.
    /// Args\[0\] - enclosed expression.
    Group,
    /// `(?flags:re)` non-capturing group, e.g. `(?i:abc)`.
    /// Args\[0\] - enclosed expression, Args\[1\] - flags (`String`).
    GroupWithFlags,
    /// `(?flags)` group that only changes the current flags,
    /// e.g. `(?i)` `(?-im)`.
    /// Args\[0\] - flags (`String`).
    FlagOnlyGroup,
    /// `(?>re)` atomic (non-backtracking) group. PCRE extension.
    /// Args\[0\] - enclosed expression.
    AtomicGroup,
    /// `(?=re)` zero-width positive lookahead.
    PositiveLookahead,
    /// `(?!re)` zero-width negative lookahead.
    NegativeLookahead,
    /// `(?<=re)` zero-width positive lookbehind.
    PositiveLookbehind,
    /// `(?<!re)` zero-width negative lookbehind.
    NegativeLookbehind,
    /// `(?#text)` inline comment; the value is the verbatim comment.
    Comment,

    /// Concatenation of args, e.g. `xy`. Zero args encode the empty
    /// regex (epsilon).
    Concat,
    /// `x|y` alternation; n-ary after flattening.
    Alt,

    /// `x*` zero or more.
    Star,
    /// `x+` one or more.
    Plus,
    /// `x?` zero or one.
    Question,
    /// `x*?`-style modifier: makes the quantifier in Args\[0\] lazy.
    NonGreedy,
    /// `x*+`-style modifier: makes the quantifier in Args\[0\]
    /// possessive. PCRE extension.
    Possessive,
}

/// Distinguishes surface spellings that map to one [`Op`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Form {
    #[default]
    Default,
    /// `(?P<name>...)`
    NamedCaptureP,
    /// `(?<name>...)`
    NamedCaptureAngle,
    /// `(?'name'...)`
    NamedCaptureQuote,
    /// `\xFF`
    EscapeHexShort,
    /// `\x{FF}`
    EscapeHexFull,
    /// `\pL`
    EscapeUniShort,
    /// `\p{L}`
    EscapeUniFull,
    /// `\Q...\E`
    QuoteClosed,
    /// `\Q...` running to the end of the pattern.
    QuoteUnclosed,
}

/// A single AST node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub op: Op,
    pub form: Form,
    pub pos: Position,
    /// The exact source text `pattern[pos.begin..pos.end]`,
    /// materialized once after parsing completes.
    pub value: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub(crate) fn new(op: Op, pos: Position) -> Expr {
        Expr {
            op,
            form: Form::Default,
            pos,
            value: String::new(),
            args: Vec::new(),
        }
    }

    pub(crate) fn with_args(op: Op, pos: Position, args: Vec<Expr>) -> Expr {
        Expr {
            op,
            form: Form::Default,
            pos,
            value: String::new(),
            args,
        }
    }

    pub fn begin(&self) -> u16 {
        self.pos.begin
    }

    pub fn end(&self) -> u16 {
        self.pos.end
    }

    pub fn last_arg(&self) -> Option<&Expr> {
        self.args.last()
    }
}

/// A successfully parsed pattern: the source string plus the root
/// expression. Immutable after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regexp {
    pub pattern: String,
    pub expr: Expr,
}

impl Regexp {
    /// The source text covered by `e`.
    pub fn expr_string(&self, e: &Expr) -> &str {
        &self.pattern[e.pos.range()]
    }
}
