use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "astwright", version, about = "Structural search and rewrite for Go source")]
pub struct Args {
    /// Files or directories to rewrite
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Write rewritten files back to disk (default: report only)
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Run only the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// List all registered rule names, one per line, then exit
    #[arg(long)]
    pub list_rules: bool,

    /// Read source from stdin, print the rewritten source to stdout,
    /// use PATH for display and config matching
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Plain defaults for unit tests (clap parsing not involved).
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            paths: vec![],
            write: false,
            config: None,
            format: "text".to_string(),
            only: vec![],
            except: vec![],
            list_rules: false,
            stdin: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = Args::parse_from(["astwright"]);
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
        assert!(!args.write);
        assert_eq!(args.format, "text");
        assert!(args.only.is_empty());
    }

    #[test]
    fn parses_write_and_format() {
        let args = Args::parse_from(["astwright", "-w", "--format", "json", "src"]);
        assert!(args.write);
        assert_eq!(args.format, "json");
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn parses_comma_separated_rule_filters() {
        let args = Args::parse_from(["astwright", "--only", "early-return,import-rewrite"]);
        assert_eq!(args.only, vec!["early-return", "import-rewrite"]);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["astwright", "--format", "xml"]).is_err());
    }
}
