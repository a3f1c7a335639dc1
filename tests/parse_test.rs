// parse_test.rs - Parser acceptance table and error messages.
//
// Each row parses a pattern and compares the canonical S-expression
// against the expected rendering. The table doubles as a precedence
// and flattening regression suite.

use resyn::prelude::*;

fn parse(pattern: &str) -> Regexp {
    Parser::default()
        .parse(pattern)
        .unwrap_or_else(|e| panic!("parse({pattern:?}): {e}"))
}

fn parse_err(pattern: &str) -> ParseError {
    Parser::default()
        .parse(pattern)
        .expect_err("parse should fail")
}

#[test]
fn parser_table() {
    let tests: &[(&str, &str)] = &[
        // Empty pattern.
        ("", "{}"),

        // Anchors.
        ("^", "^"),
        ("^^", "{^ ^}"),
        ("$", "$"),
        ("$$", "{$ $}"),

        // Simple literals and chars.
        (" ", " "),
        ("  ", "  "),
        ("x", "x"),
        ("abc", "abc"),
        ("□", "□"),
        ("✓", "✓"),
        ("✓✓", "✓✓"),

        // Dots and alternations (or).
        (".", "."),
        ("..", "{. .}"),
        ("...", "{. . .}"),
        (".|.", "(or . .)"),
        (".|✓|.", "(or . ✓ .)"),
        ("✓.|.", "(or {✓ .} .)"),
        (".|✓.", "(or . {✓ .})"),
        ("..✓|.", "(or {. . ✓} .)"),
        (".|..|..✓", "(or . {. .} {. . ✓})"),
        (".|...|..", "(or . {. . .} {. .})"),

        // Capturing groups.
        ("()", "(capture {})"),
        ("(.)", "(capture .)"),
        ("(.✓)", "(capture {. ✓})"),
        ("(x)|(y)", "(or (capture x) (capture y))"),
        ("(x)(y)", "{(capture x) (capture y)}"),
        ("✓(x)y", "{✓ (capture x) y}"),
        ("a(x1|y1)b", "{a (capture (or x1 y1)) b}"),

        // Non-capturing groups without flags.
        ("x(?:)y", "{x (group {}) y}"),
        ("x(?:.)y", "{x (group .) y}"),
        ("x(?:ab)y", "{x (group ab) y}"),
        ("(?:a|b)", "(group (or a b))"),
        ("(?:^a|bc)c", "{(group (or {^ a} bc)) c}"),

        // Flag-only groups.
        ("x(?i)y", "{x (flags ?i) y}"),
        ("x(?i-m)y", "{x (flags ?i-m) y}"),
        ("x(?-im)y", "{x (flags ?-im) y}"),

        // Non-capturing groups with flags.
        ("x(?i:)y", "{x (group {} ?i) y}"),
        ("x(?im:.)y", "{x (group . ?im) y}"),
        ("x(?i-m:ab)y", "{x (group ab ?i-m) y}"),

        // Named captures.
        ("x(?P<g>)y", "{x (capture {} g) y}"),
        ("x(?P<name>.)y", "{x (capture . name) y}"),
        ("x(?P<x1>ab)y", "{x (capture ab x1) y}"),
        ("x(?<x12>ab)y", "{x (capture ab x12) y}"),
        ("x(?'x12'ab)y", "{x (capture ab x12) y}"),
        ("(?P<name>xy)", "(capture xy name)"),

        // Atomic groups. PCRE-only.
        ("(?>)", "(atomic {})"),
        ("(?>foo)", "(atomic foo)"),

        // Lookaround.
        ("(?=x)y", "{(?= x) y}"),
        ("(?!x)y", "{(?! x) y}"),
        ("x(?<=y)", "{x (?<= y)}"),
        ("x(?<!y)", "{x (?<! y)}"),

        // Comments. PCRE-only.
        ("a(?#)b", "{a /*(?#)*/ b}"),
        (r"a(?#foo\)b", r"{a /*(?#foo\)*/ b}"),

        // Quantifiers.
        ("x+", "(+ x)"),
        ("x+|y+", "(or (+ x) (+ y))"),
        ("x+y+", "{(+ x) (+ y)}"),
        ("x+y+|z+", "(or {(+ x) (+ y)} (+ z))"),
        ("(ab)+", "(+ (capture ab))"),
        ("(.b)+", "(+ (capture {. b}))"),
        ("x+y*z+", "{(+ x) (* y) (+ z)}"),
        ("abc+", "{ab (+ c)}"),

        // Non-greedy modifiers.
        ("x+?", "(non-greedy (+ x))"),
        ("x+?|y+?", "(or (non-greedy (+ x)) (non-greedy (+ y)))"),
        ("x*?|y*?", "(or (non-greedy (* x)) (non-greedy (* y)))"),
        ("x??|y??", "(or (non-greedy (? x)) (non-greedy (? y)))"),

        // Possessive modifiers. PCRE-only.
        ("x++|x*+", "(or (possessive (+ x)) (possessive (* x)))"),
        (
            "[ab]?+|x{2,}+",
            "(or (possessive (? [a b])) (possessive (repeat x {2,})))",
        ),

        // Escapes and escape chars.
        (r"\d\d+", r"{\d (+ \d)}"),
        (r"\..", r"{\. .}"),
        (r"\1", r"\1"),
        (r"\✓b", r"{\✓ b}"),
        (r"\àb", r"{\à b}"),

        // Short Unicode escapes.
        (r"\pL+d", r"{(+ \pL) d}"),

        // Full Unicode escapes.
        (r"\p{Greek}\p{L}", r"{\p{Greek} \p{L}}"),
        (r"\P{Greek}\p{^L}", r"{\P{Greek} \p{^L}}"),

        // Octal escapes.
        (r"\0", r"\0"),
        (r"\01", r"\01"),
        (r"\012", r"\012"),
        (r"\777", r"\777"),
        (r"\78", r"{\7 8}"),
        (r"\778", r"{\77 8}"),

        // Short hex escapes.
        (r"\xfff", r"{\xff f}"),
        (r"\xab1", r"{\xab 1}"),

        // This is not a valid syntax for hex escapes, but PHP-PCRE
        // accepts it. A validator can report it, if enabled.
        (r"\x2[\x3\x4]", r"{\x2 [\x3 \x4]}"),

        // Full hex escapes.
        (r"\x{}b", r"{\x{} b}"),
        (r"\x{1}b", r"{\x{1} b}"),
        (r"\x{ABC}b", r"{\x{ABC} b}"),

        // Char classes.
        ("[1]", "[1]"),
        ("[1]a", "{[1] a}"),
        ("[-a]", "[- a]"),
        ("[a-]", "[a -]"),
        ("[a-z]a", "{[a-z] a}"),
        ("[a-z0-9]", "[a-z 0-9]"),
        ("[0-9-]", "[0-9 -]"),
        ("[A-Za-z0-9-]", "[A-Z a-z 0-9 -]"),
        (r"[\da-z_A-Z]", r"[\d a-z _ A-Z]"),
        (r"[\(-\)ab]", r"[\(-\) a b]"),
        (r"[\]\]\d]a", r"{[\] \] \d] a}"),
        (r"[[\[]a", r"{[[ \[] a}"),
        ("[a|b]", "[a | b]"),
        ("[a+b]", "[a + b]"),
        ("[a*b]", "[a * b]"),
        ("[x{1}]", "[x '{' 1 '}']"),

        // Empty classes are accepted; a validator may reject them.
        ("[]", "[]"),
        ("[^]", "[^]"),
        ("[]]", "{[] ]}"),
        ("[][]", "{[] []}"),

        // Negated char classes.
        ("[^1]a", "{[^1] a}"),
        ("[^-a]", "[^- a]"),
        ("[^a-]", "[^a -]"),
        ("[^a-z]a", "{[^a-z] a}"),
        ("[^a-z0-9]", "[^a-z 0-9]"),
        (r"[^\da-z_A-Z]", r"[^\d a-z _ A-Z]"),
        (r"[^\(-\)ab]", r"[^\(-\) a b]"),
        (r"[^\]\]\d]a", r"{[^\] \] \d] a}"),
        (r"[^[\[]a", r"{[^[ \[] a}"),
        ("[^1abc]", "[^1 a b c]"),
        ("[^]]", "{[^] ]}"),
        ("[^][]", "{[^] []}"),
        (
            r"[^\040\041\043-\133\135-\176]",
            r"[^\040 \041 \043-\133 \135-\176]",
        ),

        // Char class ranges. Ill-formed ranges such as `a-\d` parse;
        // rejecting them is a post-parse validator's job.
        (r"[\d-a]", r"[\d-a]"),
        (r"[a-\d]", r"[a-\d]"),
        (r"[\pL0-9]", r"[\pL 0-9]"),
        ("[+--]", "[+--]"),
        ("[--+]", "[--+]"),
        ("[---]", "[---]"),
        ("[-]", "[-]"),
        (r"[\x20-\x7f]", r"[\x20-\x7f]"),
        (r"[\x{20}-\x{7f}]", r"[\x{20}-\x{7f}]"),
        (r"[\1-\3]", r"[\1-\3]"),
        (r"[\10-\20]", r"[\10-\20]"),
        ("[❤-❤a]", "[❤-❤ a]"),

        // Char class with meta symbols.
        ("[|]", "[|]"),
        ("[$.+*^?]", "[$ . + * ^ ?]"),
        ("[^$.+*^?]", "[^$ . + * ^ ?]"),

        // Posix char classes.
        ("x[:alpha:]y", "{x [: a l p h a :] y}"),
        ("x[a[:alpha:]]y", "{x [a [:alpha:]] y}"),
        ("x[[:^alpha:]]y", "{x [[:^alpha:]] y}"),
        ("x[^[:alpha:]]y", "{x [^[:alpha:]] y}"),
        ("x[^[:^alpha:]]y", "{x [^[:^alpha:]] y}"),

        // Valid repeat expressions.
        (".{3}", "(repeat . {3})"),
        (".{3,}", "(repeat . {3,})"),
        (".{3,6}", "(repeat . {3,6})"),
        (".{6}?", "(non-greedy (repeat . {6}))"),
        ("[a-z]{5}", "(repeat [a-z] {5})"),

        // Invalid repeat expressions are parsed as normal chars.
        (".{a}", "{. {a}}"),
        (".{-1}", "{. {-1}}"),

        // \Q...\E escape.
        (r"\Qa.b\E+z", r"{(+ (q \Qa.b\E)) z}"),
        (r"x\Q?\Ey", r"{x (q \Q?\E) y}"),
        (r"x\Q\Ey", r"{x (q \Q\E) y}"),
        (r"x\Q", r"{x (q \Q)}"),
        (r"x\Qy", r"{x (q \Qy)}"),
        (r"x\Qyz", r"{x (q \Qyz)}"),

        // Incomplete `x|` and `|x` expressions are valid.
        ("(docker-|)", "(capture (or docker- {}))"),
        ("x|", "(or x {})"),
        ("|x", "(or {} x)"),
        ("(|x|y)", "(capture (or {} x y))"),
        ("(?:|x)", "(group (or {} x))"),

        // More tests for char merging.
        ("xy+", "{x (+ y)}"),
        (".xy", "{. xy}"),
        ("foo?|bar", "(or {fo (? o)} bar)"),

        // Patterns found in the wild.
        ("Adm([^i]|$)", "{Adm (capture (or [^i] $))}"),
        (
            r"\.(com|com\.\w{2})$",
            r"{\. (capture (or com {com \. (repeat \w {2})})) $}",
        ),
        ("(?i)a(?:x|y)b", "{(flags ?i) a (group (or x y)) b}"),
    ];

    for (pattern, want) in tests {
        let re = parse(pattern);
        let have = format_syntax(&re);
        assert_eq!(&have, want, "parse({pattern:?})");
    }
}

#[test]
fn parser_errors() {
    let tests: &[(&str, &str)] = &[
        ("\\", r"unexpected end of pattern: trailing '\'"),
        (r"\x", "unexpected end of pattern: expected hex-digit or '{'"),
        (r"\x{12", "can't find closing '}'"),
        ("(abc", "expected ')', found 'None'"),
        ("[abc", "unterminated '['"),
        ("[^abc", "unterminated '['"),
        ("[", "unterminated '['"),
        ("[^", "unterminated '['"),
        (r"\p", "unexpected end of pattern: expected uni-class-short or '{'"),
        (r"\p{L", "can't find closing '}'"),
        ("(?", "group token is incomplete"),
        ("(?i", "group token is incomplete"),
        ("(?:", "group token is incomplete"),
        ("(?i:", "group token is incomplete"),
        ("+", "unexpected token: Plus"),
        ("*ab", "unexpected token: Star"),
    ];

    for (pattern, want) in tests {
        let have = parse_err(pattern);
        assert_eq!(&have.to_string(), want, "parse({pattern:?})");
    }
}

#[test]
fn error_kinds() {
    assert_eq!(parse_err("\\").kind(), ErrorKind::UnexpectedEnd);
    assert_eq!(parse_err(r"\x{12").kind(), ErrorKind::UnclosedBrace);
    assert_eq!(parse_err("[abc").kind(), ErrorKind::UnterminatedClass);
    assert_eq!(parse_err("(abc").kind(), ErrorKind::UnexpectedEnd);
    assert_eq!(parse_err("(?").kind(), ErrorKind::IncompleteGroup);
    assert_eq!(parse_err("+").kind(), ErrorKind::UnexpectedToken);
}

#[test]
fn error_positions_are_byte_offsets() {
    let err = parse_err("ab[cd");
    assert_eq!(err.position(), Position::new(2, 3));

    let err = parse_err(r"ab\");
    assert_eq!(err.position(), Position::new(2, 3));
}

#[test]
fn named_capture_forms() {
    let mut p = Parser::default();
    for (pattern, form) in [
        ("(?P<g>x)", Form::NamedCaptureP),
        ("(?<g>x)", Form::NamedCaptureAngle),
        ("(?'g'x)", Form::NamedCaptureQuote),
    ] {
        let re = p.parse(pattern).unwrap();
        assert_eq!(re.expr.op, Op::NamedCapture, "{pattern}");
        assert_eq!(re.expr.form, form, "{pattern}");
        assert_eq!(re.expr.args[1].value, "g", "{pattern}");
    }
}

#[test]
fn quote_forms() {
    let mut p = Parser::default();
    let re = p.parse(r"\Qab\E").unwrap();
    assert_eq!(re.expr.form, Form::QuoteClosed);
    assert_eq!(re.expr.args[0].value, "ab");

    let re = p.parse(r"\Qab").unwrap();
    assert_eq!(re.expr.form, Form::QuoteUnclosed);
    assert_eq!(re.expr.args[0].value, "ab");
}
