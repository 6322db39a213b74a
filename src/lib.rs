pub mod cli;
pub mod config;
pub mod formatter;
pub mod fs;
pub mod pattern;
pub mod report;
pub mod rewriter;
pub mod rule;
pub mod source;
pub mod syntax;

#[cfg(test)]
pub mod testutil;

use std::io::Read;

use anyhow::Result;

use cli::Args;
use config::Config;
use formatter::{RunSummary, create_formatter};
use fs::discover_files;
use rewriter::{compile_rules, rewrite_source, run_rewriter};
use rule::registry::RuleRegistry;
use source::SourceFile;

/// Run the rewriter. Returns the exit code: 0 = nothing to rewrite,
/// 1 = rewrites applied/needed, 2 = error.
pub fn run(args: Args) -> Result<i32> {
    let search_dir = args.paths.first().map(|p| {
        if p.is_file() {
            p.parent().unwrap_or(p)
        } else {
            p.as_path()
        }
    });
    let config = Config::load(args.config.as_deref(), search_dir)?;

    if args.debug {
        match config.config_path() {
            Some(path) => eprintln!("debug: config loaded from {}", path.display()),
            None => eprintln!("debug: no config file found"),
        }
    }

    let registry = RuleRegistry::default_registry();

    // --list-rules: print all registered rule names and exit
    if args.list_rules {
        let mut names = registry.names();
        names.sort_unstable();
        for name in names {
            let description = registry.get(name).map(|r| r.description()).unwrap_or("");
            println!("{name}  {description}");
        }
        return Ok(0);
    }

    // --stdin: rewrite a single source from stdin, print result to stdout
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let source = SourceFile::from_string(display_path.clone(), input);
        let rules = compile_rules(&registry, &config, &args)?;
        let outcome = rewrite_source(&source, &rules)?;
        match &outcome.new_text {
            Some(text) => print!("{text}"),
            None => print!("{}", source.as_str()),
        }
        return if outcome.new_text.is_some() {
            Ok(1)
        } else {
            Ok(0)
        };
    }

    let files = discover_files(&args.paths)?;

    if args.debug {
        eprintln!("debug: {} files to rewrite", files.len());
        eprintln!("debug: {} rules registered", registry.len());
    }

    let outcome = run_rewriter(&files, &config, &registry, &args)?;
    let formatter = create_formatter(&args.format);
    formatter.print(
        &outcome.rewrites,
        RunSummary {
            file_count: outcome.file_count,
            changed_count: outcome.changed_count,
            wrote: args.write,
        },
    );

    if outcome.rewrites.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
