use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::report::Location;
use crate::syntax::Span;

/// A Go source file loaded into memory, with a precomputed line index so
/// byte offsets can be reported as line/column positions.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    content: String,
    /// Byte offsets where each line starts (0-indexed into content)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_string(path.to_path_buf(), content))
    }

    /// Create a SourceFile from a string, using the given path for display
    /// purposes (stdin mode, tests).
    pub fn from_string(path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(content.as_bytes());
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }

    /// Convert a byte offset into a (1-indexed line, 0-indexed column) pair.
    /// Column is a character offset (UTF-8 codepoint count) within the line.
    pub fn offset_to_line_col(&self, byte_offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let end = byte_offset.min(self.content.len());
        let line_bytes = &self.content.as_bytes()[self.line_starts[line_idx]..end];
        // Count bytes that are NOT UTF-8 continuation bytes (0x80..0xBF),
        // which equals the number of character starts.
        let col = line_bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
        (line_idx + 1, col)
    }

    /// Convert a node span into a diagnostic Location at its start offset.
    pub fn location_of(&self, span: Span) -> Location {
        let (line, column) = self.offset_to_line_col(span.start);
        Location { line, column }
    }
}

fn compute_line_starts(content: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, &byte) in content.iter().enumerate() {
        if byte == b'\n' && i + 1 < content.len() {
            starts.push(i + 1);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(s: &str) -> SourceFile {
        SourceFile::from_string(PathBuf::from("test.go"), s.to_string())
    }

    #[test]
    fn line_starts_single_line() {
        let sf = source("package main");
        assert_eq!(sf.line_starts, vec![0]);
    }

    #[test]
    fn line_starts_multiple_lines() {
        // "abc\ndef\nghi"
        // 0123 4567 89..
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.line_starts, vec![0, 4, 8]);
    }

    #[test]
    fn line_starts_trailing_newline() {
        // no line start after the final \n since there is no content there
        let sf = source("abc\n");
        assert_eq!(sf.line_starts, vec![0]);
    }

    #[test]
    fn offset_to_line_col_first_char() {
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.offset_to_line_col(0), (1, 0));
    }

    #[test]
    fn offset_to_line_col_mid_line() {
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.offset_to_line_col(2), (1, 2));
        assert_eq!(sf.offset_to_line_col(9), (3, 1));
    }

    #[test]
    fn offset_to_line_col_line_start() {
        let sf = source("abc\ndef\nghi");
        assert_eq!(sf.offset_to_line_col(4), (2, 0));
    }

    #[test]
    fn offset_to_line_col_multibyte() {
        // 'é' is two bytes; the column counts characters, not bytes.
        let sf = source("aé = 1");
        assert_eq!(sf.offset_to_line_col(3), (1, 2));
    }

    #[test]
    fn location_of_span() {
        let sf = source("package main\n\nfunc f() {}\n");
        let loc = sf.location_of(Span { start: 14, end: 18 });
        assert_eq!(loc.line, 3);
        assert_eq!(loc.column, 0);
    }

    #[test]
    fn from_path_reads_file() {
        let dir = std::env::temp_dir().join("astwright_test_source");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("test.go");
        std::fs::write(&file, b"package main\n").unwrap();
        let sf = SourceFile::from_path(&file).unwrap();
        assert_eq!(sf.as_str(), "package main\n");
        assert_eq!(sf.path, file);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn from_path_nonexistent() {
        let result = SourceFile::from_path(Path::new("/nonexistent/file.go"));
        assert!(result.is_err());
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn line_starts_first_is_zero(content in "[ -~\\n]{0,400}") {
                let starts = compute_line_starts(content.as_bytes());
                prop_assert_eq!(starts[0], 0, "first line start must be 0");
            }

            #[test]
            fn line_starts_are_strictly_increasing(content in "[ -~\\n]{0,400}") {
                let starts = compute_line_starts(content.as_bytes());
                for pair in starts.windows(2) {
                    prop_assert!(pair[0] < pair[1],
                        "line starts not strictly increasing: {} >= {}", pair[0], pair[1]);
                }
            }

            #[test]
            fn line_starts_follow_newlines(content in "[ -~\\n]{0,400}") {
                let starts = compute_line_starts(content.as_bytes());
                for &start in &starts[1..] {
                    prop_assert!(start > 0 && content.as_bytes()[start - 1] == b'\n',
                        "line start {} is not preceded by newline", start);
                }
            }

            #[test]
            fn offset_to_line_col_is_monotonic(content in "[ -~\\n]{1,400}") {
                let sf = SourceFile::from_string(PathBuf::from("t.go"), content.clone());
                let mut prev = (0usize, 0usize);
                for offset in 0..content.len() {
                    let cur = sf.offset_to_line_col(offset);
                    prop_assert!(cur >= prev,
                        "monotonicity violated at offset {}: {:?} < {:?}", offset, cur, prev);
                    prev = cur;
                }
            }

            #[test]
            fn offset_to_line_col_line_in_range(content in "[ -~\\n]{1,400}") {
                let sf = SourceFile::from_string(PathBuf::from("t.go"), content.clone());
                let num_lines = sf.line_starts.len();
                for offset in 0..content.len() {
                    let (line, _col) = sf.offset_to_line_col(offset);
                    prop_assert!(line >= 1 && line <= num_lines,
                        "line {} out of range [1, {}] for offset {}", line, num_lines, offset);
                }
            }
        }
    }
}
