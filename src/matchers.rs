// matchers.rs - Shape-specialized matchers.
//
// After parsing, some pattern shapes admit a faster strategy than the
// general engine scan. Each specialization recognizes one shape on the
// platform AST and compiles a dedicated matcher; everything else falls
// back to the standard engine behind the same trait.

use regex::Regex;
use regex_syntax::hir::{Hir, HirKind};

use crate::reverse::reversed_hir;
use crate::reverse_reader::ReverseReader;

/// Minimal matching interface shared by specialized matchers and the
/// standard-engine fallback.
///
/// Implementations are immutable once compiled and safe to share
/// across threads.
pub trait Matcher {
    /// Whether `s` contains a match anywhere.
    fn match_string(&self, s: &str) -> bool;
}

impl Matcher for Regex {
    fn match_string(&self, s: &str) -> bool {
        self.is_match(s)
    }
}

/// Compile `expr` into the best available matcher: a specialized one
/// when the pattern shape is recognized, otherwise the standard
/// engine wrapped in the same interface.
///
/// ```
/// use resyn::matchers::{compile_matcher, Matcher};
///
/// let m = compile_matcher("[A-Z]+_SUSPEND").unwrap();
/// assert!(m.match_string("THREAD_SUSPEND"));
/// assert!(!m.match_string("123_SUSPEND"));
/// ```
pub fn compile_matcher(expr: &str) -> Result<Box<dyn Matcher>, regex::Error> {
    if let Some(m) = SuffixLitMatcher::compile(expr) {
        return Ok(Box::new(m));
    }
    Ok(Box::new(Regex::new(expr)?))
}

/// Matcher for `<unbounded-head><literal-tail>` patterns such as
/// `[A-Z]+_SUSPEND`.
///
/// The literal tail is located with plain substring search; each hit
/// is verified by running the reversed head pattern, anchored at the
/// start, over the code-point-reversed prefix. Substring search skips
/// through non-matching input far faster than the engine's
/// position-by-position scan.
pub struct SuffixLitMatcher {
    suffix: String,
    head: Regex,
}

impl SuffixLitMatcher {
    /// Recognize the pattern shape and build the matcher. `None`
    /// means the shape does not apply and the caller should fall back
    /// to the standard engine.
    pub fn compile(expr: &str) -> Option<SuffixLitMatcher> {
        let hir = regex_syntax::Parser::new().parse(expr).ok()?;
        let HirKind::Concat(subs) = hir.kind() else {
            return None;
        };
        let (last, head) = subs.split_last()?;
        let HirKind::Literal(lit) = last.kind() else {
            return None;
        };
        let suffix = std::str::from_utf8(&lit.0).ok()?.to_string();
        if suffix.is_empty() {
            return None;
        }

        let reversed = reversed_hir(&Hir::concat(head.to_vec()))?;
        let head = Regex::new(&format!("^(?:{reversed})")).ok()?;
        Some(SuffixLitMatcher { suffix, head })
    }
}

impl Matcher for SuffixLitMatcher {
    fn match_string(&self, s: &str) -> bool {
        let mut rest = s;
        while let Some(i) = rest.find(&self.suffix) {
            let prefix: String = ReverseReader::new(&rest[..i]).collect();
            if self.head.is_match(&prefix) {
                return true;
            }
            rest = &rest[i + self.suffix.len()..];
        }
        false
    }
}
