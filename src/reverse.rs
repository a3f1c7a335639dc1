// reverse.rs - Pattern reversal on the platform AST.
//
// The suffix-literal matcher verifies match heads by running the head
// pattern backwards over a reversed input prefix. That requires the
// head itself to be reversed, which happens structurally on the
// `regex-syntax` HIR before printing and recompiling it.

use regex_syntax::hir::{Capture, Hir, HirKind, Repetition};

/// Structurally reverse `hir` so that it matches against reversed
/// input. Returns `None` for constructs reversal does not support:
/// look-around assertions and anchors make the rewrite unsound, so
/// the caller refuses to specialize.
pub(crate) fn reversed_hir(hir: &Hir) -> Option<Hir> {
    match hir.kind() {
        HirKind::Empty => Some(Hir::empty()),
        HirKind::Literal(lit) => {
            let s = std::str::from_utf8(&lit.0).ok()?;
            let reversed: String = s.chars().rev().collect();
            Some(Hir::literal(reversed.into_bytes().into_boxed_slice()))
        }
        HirKind::Class(_) => Some(hir.clone()),
        HirKind::Look(_) => None,
        HirKind::Repetition(rep) => Some(Hir::repetition(Repetition {
            min: rep.min,
            max: rep.max,
            greedy: rep.greedy,
            sub: Box::new(reversed_hir(&rep.sub)?),
        })),
        HirKind::Capture(cap) => Some(Hir::capture(Capture {
            index: cap.index,
            name: cap.name.clone(),
            sub: Box::new(reversed_hir(&cap.sub)?),
        })),
        HirKind::Concat(subs) => {
            let reversed = subs
                .iter()
                .rev()
                .map(reversed_hir)
                .collect::<Option<Vec<_>>>()?;
            Some(Hir::concat(reversed))
        }
        HirKind::Alternation(subs) => {
            let reversed = subs
                .iter()
                .map(reversed_hir)
                .collect::<Option<Vec<_>>>()?;
            Some(Hir::alternation(reversed))
        }
    }
}
