//! The rewrite pipeline: per file, parse once, walk once with every enabled
//! rule's matchers, and print the tree back if anything fired.
//!
//! Files are processed in parallel; each file gets its own tree, capture
//! stores and matchers, so the engine itself stays single-threaded per file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::cli::Args;
use crate::config::{Config, RuleFilter};
use crate::pattern::{Matcher, walk};
use crate::report::Rewrite;
use crate::rule::registry::RuleRegistry;
use crate::rule::{Rule, RuleConfig};
use crate::source::SourceFile;
use crate::syntax::{self, print};

pub struct RewriteOutcome {
    pub rewrites: Vec<Rewrite>,
    pub file_count: usize,
    /// Files whose printed output differs from their input.
    pub changed_count: usize,
}

/// A rule resolved against config and CLI filters, ready to compile per file.
pub struct CompiledRule<'r> {
    pub rule: &'r dyn Rule,
    pub config: RuleConfig,
    filter: RuleFilter,
}

/// Resolve which rules run, honoring config Enabled flags and --only/--except.
pub fn compile_rules<'r>(
    registry: &'r RuleRegistry,
    config: &Config,
    args: &Args,
) -> Result<Vec<CompiledRule<'r>>> {
    let mut compiled = Vec::new();
    for rule in registry.rules() {
        let name = rule.name();
        if !args.only.is_empty() && !args.only.iter().any(|o| o == name) {
            continue;
        }
        if args.except.iter().any(|e| e == name) {
            continue;
        }
        let rule_config = config.rule_config(name);
        if !rule_config.enabled {
            continue;
        }
        let filter = RuleFilter::build(&rule_config)?;
        compiled.push(CompiledRule {
            rule: &**rule,
            config: rule_config,
            filter,
        });
    }
    Ok(compiled)
}

/// Result of rewriting one in-memory source.
#[derive(Debug)]
pub struct FileOutcome {
    pub rewrites: Vec<Rewrite>,
    /// Present iff at least one matcher fired and the printed output
    /// differs from the input.
    pub new_text: Option<String>,
}

/// Parse, walk and re-print one source. Parse failures and capture errors
/// are reported as errors; the tree is never partially processed.
pub fn rewrite_source(source: &SourceFile, rules: &[CompiledRule<'_>]) -> Result<FileOutcome> {
    let mut tree = match syntax::parse(source.as_str()) {
        Ok(tree) => tree,
        Err(err) => {
            let (line, column) = source.offset_to_line_col(err.offset);
            anyhow::bail!(
                "{}:{line}:{column}: {message}",
                source.path_str(),
                message = err.message,
            );
        }
    };

    // Compile matchers for rules applicable to this path, remembering which
    // rule each matcher belongs to for reporting.
    let mut matchers: Vec<Matcher> = Vec::new();
    let mut owners: Vec<usize> = Vec::new();
    for (idx, compiled) in rules.iter().enumerate() {
        if !compiled.filter.matches(&source.path) {
            continue;
        }
        for matcher in compiled.rule.matchers(&compiled.config) {
            matchers.push(matcher);
            owners.push(idx);
        }
    }

    walk(&mut tree, &mut matchers)
        .map_err(|err| anyhow::anyhow!("{}: {err}", source.path_str()))?;

    let mut rewrites = Vec::new();
    let mut fired = false;
    for (matcher, &owner) in matchers.iter_mut().zip(&owners) {
        let completions = matcher.take_completions();
        if completions.is_empty() {
            continue;
        }
        fired = true;
        let rule = rules[owner].rule;
        for node in completions {
            rewrites.push(Rewrite {
                path: source.path_str().to_string(),
                location: source.location_of(tree.span(node)),
                rule_name: rule.name().to_string(),
                message: rule.message().to_string(),
            });
        }
    }
    rewrites.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let new_text = if fired {
        let text = print(&tree);
        (text != source.as_str()).then_some(text)
    } else {
        None
    };

    Ok(FileOutcome { rewrites, new_text })
}

/// Re-parse printed output before writing it back; a rewrite that produced
/// unparsable source is discarded with a warning.
fn validate_rewritten(text: &str, path: &Path) -> bool {
    if let Err(err) = syntax::parse(text) {
        eprintln!(
            "warning: rewrite produced invalid syntax for {} ({err}), skipping",
            path.display(),
        );
        return false;
    }
    true
}

pub fn run_rewriter(
    files: &[PathBuf],
    config: &Config,
    registry: &RuleRegistry,
    args: &Args,
) -> Result<RewriteOutcome> {
    let rules = compile_rules(registry, config, args)?;

    let results: Vec<(Vec<Rewrite>, bool)> = files
        .par_iter()
        .map(|path| rewrite_file(path, &rules, args))
        .collect();

    let mut rewrites = Vec::new();
    let mut changed_count = 0;
    for (file_rewrites, changed) in results {
        rewrites.extend(file_rewrites);
        if changed {
            changed_count += 1;
        }
    }
    rewrites.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    Ok(RewriteOutcome {
        rewrites,
        file_count: files.len(),
        changed_count,
    })
}

/// Returns this file's rewrites and whether its output differs. Errors are
/// printed and skipped so one bad file does not abort the run.
fn rewrite_file(path: &Path, rules: &[CompiledRule<'_>], args: &Args) -> (Vec<Rewrite>, bool) {
    let source = match SourceFile::from_path(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err:#}");
            return (Vec::new(), false);
        }
    };

    let outcome = match rewrite_source(&source, rules) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err:#}");
            return (Vec::new(), false);
        }
    };

    let Some(new_text) = outcome.new_text else {
        return (outcome.rewrites, false);
    };

    if args.write {
        if !validate_rewritten(&new_text, path) {
            return (outcome.rewrites, false);
        }
        if let Err(err) = std::fs::write(path, &new_text) {
            eprintln!("error: failed to write {}: {err}", path.display());
            return (outcome.rewrites, false);
        }
        if args.debug {
            eprintln!("debug: wrote {}", path.display());
        }
    }

    (outcome.rewrites, true)
}
