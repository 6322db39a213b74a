use std::io::Write;

use serde::Serialize;

use crate::formatter::{Formatter, RunSummary};
use crate::report::Rewrite;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    rewrites: Vec<JsonRewrite>,
}

#[derive(Serialize)]
struct Metadata {
    files_inspected: usize,
    files_changed: usize,
    rewrite_count: usize,
    applied: bool,
}

#[derive(Serialize)]
struct JsonRewrite {
    path: String,
    line: usize,
    column: usize,
    rule: String,
    message: String,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, rewrites: &[Rewrite], summary: RunSummary, out: &mut dyn Write) {
        let output = JsonOutput {
            metadata: Metadata {
                files_inspected: summary.file_count,
                files_changed: summary.changed_count,
                rewrite_count: rewrites.len(),
                applied: summary.wrote,
            },
            rewrites: rewrites
                .iter()
                .map(|r| JsonRewrite {
                    path: r.path.clone(),
                    line: r.location.line,
                    column: r.location.column,
                    rule: r.rule_name.clone(),
                    message: r.message.clone(),
                })
                .collect(),
        };
        if let Ok(text) = serde_json::to_string_pretty(&output) {
            let _ = writeln!(out, "{text}");
        }
    }
}
