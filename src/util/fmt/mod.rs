use std::fmt;

pub mod tree;

/// A 1-based line and column, as shown to users.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

impl LineCol {
    /// Locates the byte offset `lo` in `src`. Columns count characters, not
    /// bytes. Offsets past the end clamp to the end of the source.
    pub fn locate(src: &str, lo: usize) -> LineCol {
        let mut lo = lo.min(src.len());
        while !src.is_char_boundary(lo) {
            lo -= 1;
        }
        let before = &src[..lo];
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        LineCol {
            line: before.matches('\n').count() + 1,
            col: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
