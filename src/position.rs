// position.rs - Byte-offset source positions.
//
// Every token and AST node records the half-open byte range
// [begin, end) of the pattern text that produced it. Offsets are u16:
// patterns are capped at 64 KiB up front (see Lexer::init), which keeps
// Token at 6 bytes and Expr headers small.

/// A half-open `[begin, end)` byte range into the pattern source.
///
/// Zero-length positions are legal; they mark synthetic nodes such as
/// the empty alternative in `x|`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub begin: u16,
    pub end: u16,
}

impl Position {
    pub fn new(begin: u16, end: u16) -> Position {
        Position { begin, end }
    }

    /// A zero-length position at `at`.
    pub fn empty_at(at: u16) -> Position {
        Position { begin: at, end: at }
    }

    /// The span from the start of `self` to the end of `other`.
    pub fn combine(self, other: Position) -> Position {
        Position {
            begin: self.begin,
            end: other.end,
        }
    }

    pub fn len(self) -> usize {
        usize::from(self.end) - usize::from(self.begin)
    }

    pub fn is_empty(self) -> bool {
        self.begin == self.end
    }

    /// The corresponding `usize` range, for slicing the source string.
    pub fn range(self) -> std::ops::Range<usize> {
        usize::from(self.begin)..usize::from(self.end)
    }
}
