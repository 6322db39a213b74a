use std::io::Write;

use crate::formatter::{Formatter, RunSummary};
use crate::report::Rewrite;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, rewrites: &[Rewrite], summary: RunSummary, out: &mut dyn Write) {
        for rewrite in rewrites {
            let _ = writeln!(out, "{rewrite}");
        }
        let file_word = if summary.file_count == 1 {
            "file"
        } else {
            "files"
        };
        let rewrite_word = if rewrites.len() == 1 {
            "rewrite"
        } else {
            "rewrites"
        };
        let verb = if summary.wrote { "applied" } else { "needed" };
        let _ = writeln!(
            out,
            "\n{} {file_word} inspected, {} {rewrite_word} {verb}, {} changed",
            summary.file_count,
            rewrites.len(),
            summary.changed_count,
        );
    }
}
