pub mod json;
pub mod text;

use std::io::Write;

use crate::report::Rewrite;

/// Summary counters for one run, shared by all formatters.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub file_count: usize,
    pub changed_count: usize,
    /// True when --write was passed (changes were applied, not just found).
    pub wrote: bool,
}

pub trait Formatter {
    fn format_to(&self, rewrites: &[Rewrite], summary: RunSummary, out: &mut dyn Write);

    fn print(&self, rewrites: &[Rewrite], summary: RunSummary) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(rewrites, summary, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Location;

    pub(super) fn sample_rewrites() -> Vec<Rewrite> {
        vec![Rewrite {
            path: "main.go".to_string(),
            location: Location { line: 4, column: 1 },
            rule_name: "early-return".to_string(),
            message: "hoisted trailing return out of else branch".to_string(),
        }]
    }

    pub(super) fn sample_summary() -> RunSummary {
        RunSummary {
            file_count: 2,
            changed_count: 1,
            wrote: false,
        }
    }

    #[test]
    fn create_formatter_selects_json() {
        let formatter = create_formatter("json");
        let mut out = Vec::new();
        formatter.format_to(&sample_rewrites(), sample_summary(), &mut out);
        assert!(out.starts_with(b"{"));
    }

    #[test]
    fn create_formatter_falls_back_to_text() {
        for format in ["text", "bogus", ""] {
            let formatter = create_formatter(format);
            let mut out = Vec::new();
            formatter.format_to(&sample_rewrites(), sample_summary(), &mut out);
            assert!(String::from_utf8(out).unwrap().contains("main.go:4:1"));
        }
    }
}
